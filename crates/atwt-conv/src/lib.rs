//! Dilated 5-tap kernels and separable convolution.
//!
//! Coordinates follow the sample-index convention: tap `k` of a kernel with
//! step `s` reads `signal[i + (k - 2) * s]` when producing `out[i]`.
//!
//! Two kernel families share one convolver through [`SmoothingKernel`]:
//! - [`IntTaps`]: user integer weights, rounding division by the weight sum,
//!   16-bit unsigned results.
//! - [`Taps<f64>`](Taps): the normalized B3 spline picked from an explicit
//!   zero-inserted ("with holes") kernel, no rounding.
//!
//! With the `rayon` feature the rows of each pass are processed in
//! parallel. Results do not depend on the feature.

pub mod conv1d;
pub mod kernels;
pub mod separable;

pub use conv1d::{SmoothingKernel, convolve_row};
pub use kernels::{
    B3_SPLINE, DEFAULT_INT_WEIGHTS, IntKernel, IntTaps, TAPS, Taps, dilated_b3_kernel,
    dilated_len, step_for_level,
};
pub use separable::{horizontal_pass, smooth_separable, vertical_pass};
