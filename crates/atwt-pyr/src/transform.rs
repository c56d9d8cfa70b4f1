use atwt_conv::{DEFAULT_INT_WEIGHTS, IntKernel, TAPS};
use atwt_core::{Error, Image, ImageView, ImageViewMut, Sample, SampleFormat, SampleKind};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::detail::DetailMode;
use crate::pyramid::AtrousPyramid;
use crate::scheme::{AtrousScheme, FloatAtrous, IntegerAtrous};

/// Parameters of the integer transform.
///
/// - `level`: number of smoothing passes before the final difference, `>= 1`.
/// - `kernel`: five integer weights; `None` uses `[1, 4, 6, 4, 1]`. The
///   weights must not sum to zero.
/// - `mode`: how the signed detail is mapped into the output range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransformParams {
    pub level: u32,
    pub kernel: Option<[i32; TAPS]>,
    pub mode: DetailMode,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            level: 1,
            kernel: None,
            mode: DetailMode::SignedCentered,
        }
    }
}

impl TransformParams {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn with_kernel(mut self, kernel: [i32; TAPS]) -> Self {
        self.kernel = Some(kernel);
        self
    }

    pub fn with_mode(mut self, mode: DetailMode) -> Self {
        self.mode = mode;
        self
    }

    /// Effective kernel weights.
    pub fn weights(&self) -> [i32; TAPS] {
        self.kernel.unwrap_or(DEFAULT_INT_WEIGHTS)
    }

    /// Builds the integer scheme, rejecting zero-sum kernels.
    pub fn scheme(&self) -> Result<IntegerAtrous, Error> {
        let kernel = IntKernel::new(self.weights())?;
        Ok(IntegerAtrous::new(kernel, self.mode))
    }
}

/// Integer à trous detail band `c[level-1] - c[level]` of `src`.
///
/// The result is a contiguous image with the same width and height; its
/// stride equals the width whatever the input stride. Use [`transform_into`]
/// to write into a padded destination.
///
/// # Example
/// ```rust
/// use atwt_core::Image;
/// use atwt_pyr::{DetailMode, TransformParams, transform};
///
/// let flat = Image::new_fill(32, 32, 1000u16);
/// let params = TransformParams::new(2).with_mode(DetailMode::SquaredMagnitude);
/// let detail = transform(&flat.as_view(), &params).expect("valid input");
/// assert!(detail.data().iter().all(|&v| v == 0));
/// ```
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(src)))]
pub fn transform<T: Sample>(
    src: &ImageView<'_, T>,
    params: &TransformParams,
) -> Result<Image<T>, Error> {
    let scheme = params.scheme()?;
    run(&scheme, src, params.level)
}

/// Like [`transform`], writing into `dst` with its own stride.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(src, dst)))]
pub fn transform_into<T: Sample>(
    src: &ImageView<'_, T>,
    dst: &mut ImageViewMut<'_, T>,
    params: &TransformParams,
) -> Result<(), Error> {
    let scheme = params.scheme()?;
    run_into(&scheme, src, dst, params.level)
}

/// Floating-point B3 detail band at `level`, rounded into the sample range.
///
/// Like [`transform`], the result is contiguous; [`extract_frequency_into`]
/// keeps a caller-chosen destination stride.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(src)))]
pub fn extract_frequency<T: Sample>(src: &ImageView<'_, T>, level: u32) -> Result<Image<T>, Error> {
    run(&FloatAtrous, src, level)
}

/// Like [`extract_frequency`], writing into `dst` with its own stride.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(src, dst)))]
pub fn extract_frequency_into<T: Sample>(
    src: &ImageView<'_, T>,
    dst: &mut ImageViewMut<'_, T>,
    level: u32,
) -> Result<(), Error> {
    run_into(&FloatAtrous, src, dst, level)
}

/// Every floating-point detail band `c[i] - c[i+1]` for `i = 0 .. level`.
///
/// Bands are raw signed coefficients; the last one is what
/// [`extract_frequency`] rounds and clamps.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(src)))]
pub fn detail_stack<T: Sample>(src: &ImageView<'_, T>, level: u32) -> Result<Vec<Image<f64>>, Error> {
    let scheme = FloatAtrous;
    scheme.validate(src.width(), src.height(), level)?;

    let base = src.map(|v| {
        let v: u16 = v.into();
        f64::from(v)
    });
    let scales = AtrousPyramid::new(&scheme).scales(base, level);

    let bands = scales
        .windows(2)
        .map(|pair| {
            let (fine, coarse) = (&pair[0], &pair[1]);
            let diff = fine
                .data()
                .iter()
                .zip(coarse.data().iter())
                .map(|(&f, &c)| f - c)
                .collect();
            Image::from_vec(fine.width(), fine.height(), diff).expect("band matches scale size")
        })
        .collect();
    Ok(bands)
}

/// A plane whose sample type is only known at run time.
#[derive(Debug, Clone, Copy)]
pub enum PlaneRef<'a> {
    U8(ImageView<'a, u8>),
    /// 16-bit container; `bits` is the declared precision.
    U16 {
        view: ImageView<'a, u16>,
        bits: u32,
    },
    F32(ImageView<'a, f32>),
}

impl PlaneRef<'_> {
    pub fn format(&self) -> SampleFormat {
        match self {
            Self::U8(_) => SampleFormat::U8,
            Self::U16 { bits, .. } => SampleFormat {
                kind: SampleKind::Integer,
                bits: *bits,
            },
            Self::F32(_) => SampleFormat::F32,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Self::U8(v) => v.width(),
            Self::U16 { view, .. } => view.width(),
            Self::F32(v) => v.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Self::U8(v) => v.height(),
            Self::U16 { view, .. } => view.height(),
            Self::F32(v) => v.height(),
        }
    }
}

impl<'a> From<ImageView<'a, u8>> for PlaneRef<'a> {
    fn from(view: ImageView<'a, u8>) -> Self {
        Self::U8(view)
    }
}

impl<'a> From<ImageView<'a, u16>> for PlaneRef<'a> {
    fn from(view: ImageView<'a, u16>) -> Self {
        Self::U16 { view, bits: 16 }
    }
}

/// Output of a dynamic-plane transform, same sample type as the input.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaneBuf {
    U8(Image<u8>),
    U16(Image<u16>),
}

impl PlaneBuf {
    pub fn format(&self) -> SampleFormat {
        match self {
            Self::U8(_) => SampleFormat::U8,
            Self::U16(_) => SampleFormat::U16,
        }
    }
}

/// [`transform`] over a plane of run-time format.
pub fn transform_plane(plane: &PlaneRef<'_>, params: &TransformParams) -> Result<PlaneBuf, Error> {
    let format = plane.format();
    format.validate()?;
    match plane {
        PlaneRef::U8(view) => transform(view, params).map(PlaneBuf::U8),
        PlaneRef::U16 { view, .. } => transform(view, params).map(PlaneBuf::U16),
        PlaneRef::F32(_) => Err(unsupported(format)),
    }
}

/// [`extract_frequency`] over a plane of run-time format.
pub fn extract_frequency_plane(plane: &PlaneRef<'_>, level: u32) -> Result<PlaneBuf, Error> {
    let format = plane.format();
    format.validate()?;
    match plane {
        PlaneRef::U8(view) => extract_frequency(view, level).map(PlaneBuf::U8),
        PlaneRef::U16 { view, .. } => extract_frequency(view, level).map(PlaneBuf::U16),
        PlaneRef::F32(_) => Err(unsupported(format)),
    }
}

fn unsupported(format: SampleFormat) -> Error {
    Error::UnsupportedFormat {
        kind: format.kind,
        bits: format.bits,
    }
}

fn run<S: AtrousScheme, T: Sample>(
    scheme: &S,
    src: &ImageView<'_, T>,
    levels: u32,
) -> Result<Image<T>, Error> {
    scheme.validate(src.width(), src.height(), levels)?;

    let mut out = Image::new_fill(src.width(), src.height(), T::default());
    write_detail(scheme, src, &mut out.as_view_mut(), levels);
    Ok(out)
}

fn run_into<S: AtrousScheme, T: Sample>(
    scheme: &S,
    src: &ImageView<'_, T>,
    dst: &mut ImageViewMut<'_, T>,
    levels: u32,
) -> Result<(), Error> {
    if dst.width() != src.width() {
        return Err(Error::SizeMismatch {
            expected: src.width(),
            actual: dst.width(),
        });
    }
    if dst.height() != src.height() {
        return Err(Error::SizeMismatch {
            expected: src.height(),
            actual: dst.height(),
        });
    }
    scheme.validate(src.width(), src.height(), levels)?;

    write_detail(scheme, src, dst, levels);
    Ok(())
}

fn write_detail<S: AtrousScheme, T: Sample>(
    scheme: &S,
    src: &ImageView<'_, T>,
    dst: &mut ImageViewMut<'_, T>,
    levels: u32,
) {
    let base = src.map(|v| {
        let v: u16 = v.into();
        S::Value::from(v)
    });
    let scales = AtrousPyramid::new(scheme).last_pair(base, levels);

    for y in 0..dst.height() {
        let fine = scales.fine.row(y);
        let coarse = scales.coarse.row(y);
        for ((out, &f), &c) in dst.row_mut(y).iter_mut().zip(fine).zip(coarse) {
            *out = T::from_saturating(scheme.map_detail(f, c, T::MAX));
        }
    }
}
