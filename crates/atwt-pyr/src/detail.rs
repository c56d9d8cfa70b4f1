//! Mapping of signed detail coefficients into an unsigned sample range.
//!
//! Every mapping clamps into `[0, max]` where `max = 2^bits - 1`.

use atwt_core::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display mode for integer detail bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DetailMode {
    /// `diff * 2 + mid`, sign kept around mid-gray.
    #[default]
    SignedCentered,
    /// `|diff|^2`, sign discarded.
    SquaredMagnitude,
}

impl DetailMode {
    /// Integer code used by frame-server style parameter records.
    pub fn code(self) -> i64 {
        match self {
            Self::SignedCentered => 1,
            Self::SquaredMagnitude => 2,
        }
    }

    pub fn map(self, diff: i64, max: u32) -> u32 {
        let max = i64::from(max);
        let val = match self {
            Self::SignedCentered => diff * 2 + (max + 1) / 2,
            Self::SquaredMagnitude => diff.saturating_mul(diff),
        };
        val.clamp(0, max) as u32
    }
}

impl TryFrom<i64> for DetailMode {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::SignedCentered),
            2 => Ok(Self::SquaredMagnitude),
            other => Err(Error::InvalidMode(other)),
        }
    }
}

/// Rounds half away from zero and clamps into `[0, max]`. NaN maps to 0.
pub fn map_rounded(diff: f64, max: u32) -> u32 {
    let r = diff.round();
    if r.is_nan() || r <= 0.0 {
        0
    } else if r >= f64::from(max) {
        max
    } else {
        r as u32
    }
}
