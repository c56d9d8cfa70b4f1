use atwt_conv::smooth_separable;
use atwt_core::Image;
#[cfg(feature = "tracing")]
use tracing::debug_span;

use crate::scheme::AtrousScheme;

/// The last two approximation scales of a decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct Scales<W> {
    /// `c[levels - 1]`
    pub fine: Image<W>,
    /// `c[levels]`
    pub coarse: Image<W>,
}

/// Stationary (undecimated) pyramid driven by an [`AtrousScheme`].
///
/// Scale `c[0]` is the input. Scale `c[l + 1]` is `c[l]` smoothed along rows
/// and then columns with the scheme's kernel for level `l`, whose taps are
/// `2^l` samples apart. Every scale keeps the input resolution.
#[derive(Debug, Clone, Copy)]
pub struct AtrousPyramid<'s, S> {
    scheme: &'s S,
}

impl<'s, S: AtrousScheme> AtrousPyramid<'s, S> {
    pub fn new(scheme: &'s S) -> Self {
        Self { scheme }
    }

    /// Runs `levels` smoothing passes and keeps only the last two scales.
    ///
    /// Three working images are alive at any time regardless of `levels`.
    ///
    /// # Panics
    /// If `levels == 0`.
    pub fn last_pair(&self, base: Image<S::Value>, levels: u32) -> Scales<S::Value> {
        assert!(levels >= 1, "at least one level is required");

        let (w, h) = (base.width(), base.height());
        let mut fine = base;
        let mut coarse = Image::new_fill(w, h, S::Value::default());
        let mut scratch = Image::new_fill(w, h, S::Value::default());

        for level in 0..levels {
            if level > 0 {
                core::mem::swap(&mut fine, &mut coarse);
            }
            self.smooth_level(&fine, level, &mut scratch, &mut coarse);
        }

        Scales { fine, coarse }
    }

    /// Materializes every scale `c[0] ..= c[levels]`.
    pub fn scales(&self, base: Image<S::Value>, levels: u32) -> Vec<Image<S::Value>> {
        let (w, h) = (base.width(), base.height());
        let mut out = Vec::with_capacity(levels as usize + 1);
        out.push(base);

        let mut scratch = Image::new_fill(w, h, S::Value::default());
        for level in 0..levels {
            let mut next = Image::new_fill(w, h, S::Value::default());
            let prev = out.last().expect("pyramid holds the base scale");
            self.smooth_level(prev, level, &mut scratch, &mut next);
            out.push(next);
        }
        out
    }

    fn smooth_level(
        &self,
        src: &Image<S::Value>,
        level: u32,
        scratch: &mut Image<S::Value>,
        dst: &mut Image<S::Value>,
    ) {
        #[cfg(feature = "tracing")]
        let _span = debug_span!("atrous_level", level).entered();

        let kernel = self.scheme.kernel(level);
        smooth_separable(src, &kernel, self.scheme.border(), scratch, dst);
    }
}
