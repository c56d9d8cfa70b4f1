use atwt_core::{BorderMode, Image, map_index};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::conv1d::{SmoothingKernel, convolve_row};
use crate::kernels::TAPS;

/// Smooths `src` along rows into `scratch`, then along columns into `dst`.
///
/// All three images must share the same dimensions.
pub fn smooth_separable<K: SmoothingKernel>(
    src: &Image<K::Value>,
    kernel: &K,
    border: BorderMode,
    scratch: &mut Image<K::Value>,
    dst: &mut Image<K::Value>,
) {
    horizontal_pass(src, kernel, border, scratch);
    vertical_pass(scratch, kernel, border, dst);
}

pub fn horizontal_pass<K: SmoothingKernel>(
    src: &Image<K::Value>,
    kernel: &K,
    border: BorderMode,
    dst: &mut Image<K::Value>,
) {
    assert_same_dims(src, dst);
    let w = src.width();
    if w == 0 || src.height() == 0 {
        return;
    }

    #[cfg(feature = "rayon")]
    dst.data_mut()
        .par_chunks_mut(w)
        .zip(src.data().par_chunks(w))
        .for_each(|(out, row)| convolve_row(row, kernel, border, out));

    #[cfg(not(feature = "rayon"))]
    for (out, row) in dst.data_mut().chunks_mut(w).zip(src.data().chunks(w)) {
        convolve_row(row, kernel, border, out);
    }
}

pub fn vertical_pass<K: SmoothingKernel>(
    src: &Image<K::Value>,
    kernel: &K,
    border: BorderMode,
    dst: &mut Image<K::Value>,
) {
    assert_same_dims(src, dst);
    let w = src.width();
    let h = src.height();
    if w == 0 || h == 0 {
        return;
    }

    let column_row = |y: usize, out: &mut [K::Value]| {
        let mut rows = [0usize; TAPS];
        for (r, &off) in rows.iter_mut().zip(kernel.offsets().iter()) {
            *r = map_index(y as isize + off, h, border)
                .expect("border index must map for non-empty image");
        }

        let data = src.data();
        for (x, out_x) in out.iter_mut().enumerate() {
            let mut samples = [data[x]; TAPS];
            for (s, &r) in samples.iter_mut().zip(rows.iter()) {
                *s = data[r * w + x];
            }
            *out_x = kernel.apply(samples);
        }
    };

    #[cfg(feature = "rayon")]
    dst.data_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out)| column_row(y, out));

    #[cfg(not(feature = "rayon"))]
    for (y, out) in dst.data_mut().chunks_mut(w).enumerate() {
        column_row(y, out);
    }
}

fn assert_same_dims<T>(a: &Image<T>, b: &Image<T>) {
    assert!(
        a.width() == b.width() && a.height() == b.height(),
        "source and destination dimensions must match"
    );
}
