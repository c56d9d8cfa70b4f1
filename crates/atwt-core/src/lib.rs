//! Foundational primitives for the à trous wavelet transform.
//!
//! ## Planes and Stride
//! Planes use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! This allows borrowed views over padded frame buffers.
//!
//! ## Sample Formats
//! Transforms accept unsigned 8- and 16-bit integer samples ([`Sample`]).
//! [`SampleFormat`] describes planes whose sample type is only known at run
//! time and rejects everything else.
//!
//! ## Border Modes
//! Convolution supports clamp-to-edge and reflect-101 extension.
//! Reflect-101 mirrors around edge samples without repeating edge elements.

mod border;
mod error;
mod image;
mod sample;

pub use border::{BorderMode, map_index};
pub use error::Error;
pub use image::{Image, ImageView, ImageViewMut};
pub use sample::{Sample, SampleFormat, SampleKind};
