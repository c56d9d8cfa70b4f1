use atwt_core::{BorderMode, map_index};

use crate::kernels::TAPS;

/// A dilated 5-tap kernel together with its normalization step.
pub trait SmoothingKernel: Sync {
    type Value: Copy + Send + Sync;

    /// Signed tap offsets, `(k - 2) * step`.
    fn offsets(&self) -> &[isize; TAPS];

    /// Largest absolute offset.
    fn radius(&self) -> usize;

    /// Weighted sum of the samples under each tap, normalized into `Value`.
    fn apply(&self, samples: [Self::Value; TAPS]) -> Self::Value;
}

/// Convolves one line of samples; `out[i]` combines `signal[i + offset_k]`.
pub fn convolve_row<K: SmoothingKernel>(
    signal: &[K::Value],
    kernel: &K,
    border: BorderMode,
    out: &mut [K::Value],
) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");

    let n = signal.len();
    if n == 0 {
        return;
    }

    let radius = kernel.radius();
    if n <= 2 * radius {
        convolve_bordered(signal, kernel, border, 0..n, out);
        return;
    }

    // Left border.
    convolve_bordered(signal, kernel, border, 0..radius, out);

    // Interior: the full footprint is in bounds.
    let offsets = kernel.offsets();
    for (i, out_i) in out.iter_mut().enumerate().take(n - radius).skip(radius) {
        let mut samples = [signal[i]; TAPS];
        for (s, &off) in samples.iter_mut().zip(offsets.iter()) {
            *s = signal[(i as isize + off) as usize];
        }
        *out_i = kernel.apply(samples);
    }

    // Right border.
    convolve_bordered(signal, kernel, border, (n - radius)..n, out);
}

fn convolve_bordered<K: SmoothingKernel>(
    signal: &[K::Value],
    kernel: &K,
    border: BorderMode,
    range: core::ops::Range<usize>,
    out: &mut [K::Value],
) {
    let n = signal.len();
    let offsets = kernel.offsets();
    for i in range {
        let mut samples = [signal[i]; TAPS];
        for (s, &off) in samples.iter_mut().zip(offsets.iter()) {
            let idx = map_index(i as isize + off, n, border)
                .expect("border index must map for non-empty signal");
            *s = signal[idx];
        }
        out[i] = kernel.apply(samples);
    }
}
