use core::fmt;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Integer,
    Float,
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
        }
    }
}

/// Sample type and precision of a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleFormat {
    pub kind: SampleKind,
    pub bits: u32,
}

impl SampleFormat {
    pub const U8: Self = Self {
        kind: SampleKind::Integer,
        bits: 8,
    };
    pub const U16: Self = Self {
        kind: SampleKind::Integer,
        bits: 16,
    };
    pub const F32: Self = Self {
        kind: SampleKind::Float,
        bits: 32,
    };

    /// Accepts integer samples of 8 or 16 bits.
    pub fn validate(&self) -> Result<(), Error> {
        match (self.kind, self.bits) {
            (SampleKind::Integer, 8 | 16) => Ok(()),
            (kind, bits) => Err(Error::UnsupportedFormat { kind, bits }),
        }
    }
}

/// Unsigned integer sample stored in a plane.
pub trait Sample: Copy + Default + Send + Sync + Into<u16> + 'static {
    const BITS: u32;
    /// Largest representable value, `2^BITS - 1`.
    const MAX: u32 = (1 << Self::BITS) - 1;
    const FORMAT: SampleFormat;

    /// Narrows `v`, saturating at [`Sample::MAX`].
    fn from_saturating(v: u32) -> Self;
}

impl Sample for u8 {
    const BITS: u32 = 8;
    const FORMAT: SampleFormat = SampleFormat::U8;

    #[inline]
    fn from_saturating(v: u32) -> Self {
        v.min(<Self as Sample>::MAX) as u8
    }
}

impl Sample for u16 {
    const BITS: u32 = 16;
    const FORMAT: SampleFormat = SampleFormat::U16;

    #[inline]
    fn from_saturating(v: u32) -> Self {
        v.min(<Self as Sample>::MAX) as u16
    }
}
