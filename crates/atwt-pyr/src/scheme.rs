use atwt_conv::{IntKernel, IntTaps, SmoothingKernel, Taps, dilated_len, step_for_level};
use atwt_core::{BorderMode, Error};

use crate::detail::{DetailMode, map_rounded};

/// Numeric variant of the à trous decomposition.
///
/// A scheme fixes the working type, the kernel at each level, the border
/// policy, the size precondition and how a detail coefficient is displayed.
/// [`AtrousPyramid`](crate::AtrousPyramid) runs the same iteration for every
/// scheme.
pub trait AtrousScheme: Sync {
    type Value: Copy + Default + Send + Sync + From<u16>;
    type Kernel: SmoothingKernel<Value = Self::Value>;

    fn border(&self) -> BorderMode;

    /// Kernel for 0-indexed `level`.
    fn kernel(&self, level: u32) -> Self::Kernel;

    /// Smallest width and height that support `levels` smoothing passes.
    /// `None` when the size is not representable.
    fn min_extent(&self, levels: u32) -> Option<usize>;

    /// Maps the difference `fine - coarse` into `[0, max]`.
    fn map_detail(&self, fine: Self::Value, coarse: Self::Value, max: u32) -> u32;

    /// Checks the level and size preconditions before any work is done.
    ///
    /// A level whose kernel support is not representable is an invalid level.
    fn validate(&self, width: usize, height: usize, levels: u32) -> Result<(), Error> {
        let required = match levels {
            0 => None,
            _ => self.min_extent(levels),
        }
        .ok_or(Error::InvalidLevel { level: levels })?;

        if width < required || height < required {
            return Err(Error::DimensionTooSmall {
                width,
                height,
                required,
            });
        }
        Ok(())
    }
}

/// Integer scheme: user 5-tap kernel, clamp border, 16-bit intermediates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntegerAtrous {
    kernel: IntKernel,
    mode: DetailMode,
}

impl IntegerAtrous {
    pub fn new(kernel: IntKernel, mode: DetailMode) -> Self {
        Self { kernel, mode }
    }
}

impl AtrousScheme for IntegerAtrous {
    type Value = u16;
    type Kernel = IntTaps;

    fn border(&self) -> BorderMode {
        BorderMode::Clamp
    }

    fn kernel(&self, level: u32) -> IntTaps {
        self.kernel.at_level(level)
    }

    // 5 * 2^(levels - 1)
    fn min_extent(&self, levels: u32) -> Option<usize> {
        step_for_level(levels.checked_sub(1)?)?.checked_mul(5)
    }

    #[inline]
    fn map_detail(&self, fine: u16, coarse: u16, max: u32) -> u32 {
        let diff = i64::from(fine) - i64::from(coarse);
        self.mode.map(diff, max)
    }
}

/// Floating scheme: B3 spline with explicit holes, reflect-101 border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatAtrous;

impl AtrousScheme for FloatAtrous {
    type Value = f64;
    type Kernel = Taps<f64>;

    fn border(&self) -> BorderMode {
        BorderMode::Reflect101
    }

    fn kernel(&self, level: u32) -> Taps<f64> {
        Taps::b3(level)
    }

    // The widest kernel, at level `levels - 1`, must fit.
    fn min_extent(&self, levels: u32) -> Option<usize> {
        dilated_len(levels.checked_sub(1)?)
    }

    #[inline]
    fn map_detail(&self, fine: f64, coarse: f64, max: u32) -> u32 {
        map_rounded(fine - coarse, max)
    }
}

#[cfg(test)]
mod tests {
    use atwt_conv::IntKernel;
    use atwt_core::Error;

    use super::{AtrousScheme, FloatAtrous, IntegerAtrous};
    use crate::detail::DetailMode;

    #[test]
    fn integer_min_extent_doubles_per_level() {
        let s = IntegerAtrous::default();
        assert_eq!(s.min_extent(1), Some(5));
        assert_eq!(s.min_extent(2), Some(10));
        assert_eq!(s.min_extent(3), Some(20));
        assert_eq!(s.min_extent(0), None);
        assert_eq!(s.min_extent(100), None);
    }

    #[test]
    fn float_min_extent_is_kernel_length() {
        let s = FloatAtrous;
        assert_eq!(s.min_extent(1), Some(5));
        assert_eq!(s.min_extent(2), Some(9));
        assert_eq!(s.min_extent(3), Some(17));
    }

    #[test]
    fn validate_rejects_level_zero_and_small_images() {
        let s = IntegerAtrous::default();
        assert_eq!(s.validate(10, 10, 0), Err(Error::InvalidLevel { level: 0 }));
        assert_eq!(
            s.validate(10, 10, 3),
            Err(Error::DimensionTooSmall {
                width: 10,
                height: 10,
                required: 20
            })
        );
        assert_eq!(s.validate(20, 20, 3), Ok(()));
        assert_eq!(
            s.validate(64, 19, 3),
            Err(Error::DimensionTooSmall {
                width: 64,
                height: 19,
                required: 20
            })
        );
        assert_eq!(
            s.validate(4096, 4096, 200),
            Err(Error::InvalidLevel { level: 200 })
        );
        assert_eq!(
            FloatAtrous.validate(4096, 4096, u32::MAX),
            Err(Error::InvalidLevel { level: u32::MAX })
        );
    }

    #[test]
    fn integer_detail_uses_configured_mode() {
        let centered = IntegerAtrous::new(IntKernel::default(), DetailMode::SignedCentered);
        assert_eq!(centered.map_detail(10, 13, 65535), 32762);

        let squared = IntegerAtrous::new(IntKernel::default(), DetailMode::SquaredMagnitude);
        assert_eq!(squared.map_detail(10, 13, 65535), 9);
    }

    #[test]
    fn float_detail_rounds_and_clamps() {
        assert_eq!(FloatAtrous.map_detail(10.0, 7.4, 255), 3);
        assert_eq!(FloatAtrous.map_detail(7.0, 10.0, 255), 0);
    }
}
