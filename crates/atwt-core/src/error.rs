use core::fmt;

use crate::sample::SampleKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch {
        expected: usize,
        actual: usize,
    },
    InvalidStride,
    /// Decomposition level below 1, or so deep its kernel support overflows.
    InvalidLevel {
        level: u32,
    },
    /// The kernel support at the requested level does not fit the image.
    DimensionTooSmall {
        width: usize,
        height: usize,
        required: usize,
    },
    UnsupportedFormat {
        kind: SampleKind,
        bits: u32,
    },
    /// Kernel weights sum to zero, so the normalization divisor is undefined.
    ZeroNormalizationKernel,
    InvalidMode(i64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::InvalidStride => write!(f, "invalid stride"),
            Self::InvalidLevel { level } => {
                write!(
                    f,
                    "invalid level {level}: level must be at least 1 and its kernel support must fit in usize"
                )
            }
            Self::DimensionTooSmall {
                width,
                height,
                required,
            } => write!(
                f,
                "image {width}x{height} is too small for the requested level: \
                 both dimensions must be at least {required}"
            ),
            Self::UnsupportedFormat { kind, bits } => write!(
                f,
                "unsupported sample format {kind} {bits}-bit: only 8- and 16-bit integer samples are supported"
            ),
            Self::ZeroNormalizationKernel => {
                write!(f, "kernel weights sum to zero and cannot be normalized")
            }
            Self::InvalidMode(code) => write!(f, "invalid detail mode {code}"),
        }
    }
}

impl std::error::Error for Error {}
