//! Umbrella crate for the `atwt` workspace.
//!
//! Re-exports the sample buffers and errors of `atwt-core`, the kernels and
//! convolver of `atwt-conv` and the transforms of `atwt-pyr`.
//!
//! ```rust
//! use atwt::{Image, TransformParams, extract_frequency, transform};
//!
//! let plane = Image::from_vec(8, 8, (0..64u16).map(|v| v * 1000).collect())
//!     .expect("valid plane");
//! let detail = transform(&plane.as_view(), &TransformParams::new(1)).expect("8x8 fits level 1");
//! let band = extract_frequency(&plane.as_view(), 1).expect("8x8 fits level 1");
//! assert_eq!((detail.width(), detail.height()), (band.width(), band.height()));
//! ```

pub use atwt_conv::*;
pub use atwt_core::*;
pub use atwt_pyr::*;
