//! À trous (undecimated) wavelet pyramid and detail-band extraction.
//!
//! Scale `c[0]` is the input plane. Each level smooths the previous scale
//! with a 5-tap kernel whose taps are `2^l` samples apart, keeping the full
//! resolution. The detail band at level `L` is `c[L-1] - c[L]`.
//!
//! Two schemes share [`AtrousPyramid`]:
//! - [`IntegerAtrous`] ([`transform`]): user integer kernel, clamp-to-edge
//!   border, 16-bit intermediates, [`DetailMode`] display mapping.
//! - [`FloatAtrous`] ([`extract_frequency`]): B3 spline with explicit holes,
//!   reflect-101 border, `f64` intermediates, rounded output.
//!
//! Size policy:
//! - Integer: `width, height >= 5 * 2^(level - 1)`.
//! - Floating: `width, height >= 4 * 2^(level - 1) + 1`, the widest kernel.
//!
//! All checks happen before any working buffer is allocated. Working
//! buffers are owned by a single call.
//!
//! Features:
//! - `rayon`: row-parallel convolution passes, identical results.
//! - `tracing`: debug spans for each call and pyramid level.
//! - `serde`: (de)serialization of [`TransformParams`] and [`DetailMode`].

mod detail;
mod pyramid;
mod scheme;
mod transform;

pub use detail::{DetailMode, map_rounded};
pub use pyramid::{AtrousPyramid, Scales};
pub use scheme::{AtrousScheme, FloatAtrous, IntegerAtrous};
pub use transform::{
    PlaneBuf, PlaneRef, TransformParams, detail_stack, extract_frequency, extract_frequency_into,
    extract_frequency_plane, transform, transform_into, transform_plane,
};
