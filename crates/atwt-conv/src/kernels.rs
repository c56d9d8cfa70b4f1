//! 5-tap smoothing kernels dilated per decomposition level.
//!
//! Conventions:
//! - Levels are 0-indexed here; level `l` spaces taps `step = 2^l` apart.
//! - Tap `k` (`0..5`) reads the sample at `i + (k - 2) * step`.
//! - Integer kernels are normalized by their weight sum at convolution time.
//! - The floating kernel is the B3 spline, already normalized to sum 1.

use atwt_core::Error;

use crate::conv1d::SmoothingKernel;

pub const TAPS: usize = 5;

/// Default integer weights, the binomial approximation of the B3 spline.
pub const DEFAULT_INT_WEIGHTS: [i32; TAPS] = [1, 4, 6, 4, 1];

/// Normalized B3 spline base kernel.
pub const B3_SPLINE: [f64; TAPS] = [1.0 / 16.0, 1.0 / 4.0, 3.0 / 8.0, 1.0 / 4.0, 1.0 / 16.0];

/// Tap spacing at 0-indexed `level`, `None` on overflow.
pub fn step_for_level(level: u32) -> Option<usize> {
    2usize.checked_pow(level)
}

/// Length of the zero-inserted kernel at `level`: `(5 - 1) * 2^level + 1`.
pub fn dilated_len(level: u32) -> Option<usize> {
    step_for_level(level)?
        .checked_mul(TAPS - 1)?
        .checked_add(1)
}

/// Builds the explicit "with holes" B3 kernel for `level`.
///
/// Base tap `i` lands at `i * 2^level`; the `2^level - 1` positions between
/// consecutive base taps are zero.
///
/// # Panics
/// If the kernel length overflows `usize`.
pub fn dilated_b3_kernel(level: u32) -> Vec<f64> {
    let step = step_for_level(level).expect("kernel step overflow");
    let len = dilated_len(level).expect("kernel length overflow");
    let mut kernel = vec![0.0f64; len];
    for (i, &w) in B3_SPLINE.iter().enumerate() {
        kernel[i * step] = w;
    }
    kernel
}

/// The five nonzero taps of a dilated kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Taps<W> {
    weights: [W; TAPS],
    offsets: [isize; TAPS],
    step: usize,
}

impl<W: Copy> Taps<W> {
    pub fn dilated(weights: [W; TAPS], step: usize) -> Self {
        let mut offsets = [0isize; TAPS];
        for (k, off) in offsets.iter_mut().enumerate() {
            *off = (k as isize - 2) * step as isize;
        }
        Self {
            weights,
            offsets,
            step,
        }
    }

    pub fn weights(&self) -> &[W; TAPS] {
        &self.weights
    }

    pub fn step(&self) -> usize {
        self.step
    }
}

impl Taps<f64> {
    /// Picks the taps of an explicit zero-inserted kernel.
    ///
    /// # Panics
    /// If `kernel.len()` is not `4 * step + 1` for some `step >= 1`.
    pub fn from_dilated(kernel: &[f64]) -> Self {
        assert!(
            kernel.len() >= TAPS && (kernel.len() - 1) % (TAPS - 1) == 0,
            "dilated kernel len must be 4*step+1"
        );
        let step = (kernel.len() - 1) / (TAPS - 1);
        let mut weights = [0.0f64; TAPS];
        for (k, w) in weights.iter_mut().enumerate() {
            *w = kernel[k * step];
        }
        Self::dilated(weights, step)
    }

    /// B3 taps for 0-indexed `level`, via the explicit kernel.
    pub fn b3(level: u32) -> Self {
        Self::from_dilated(&dilated_b3_kernel(level))
    }
}

impl SmoothingKernel for Taps<f64> {
    type Value = f64;

    fn offsets(&self) -> &[isize; TAPS] {
        &self.offsets
    }

    fn radius(&self) -> usize {
        2 * self.step
    }

    #[inline]
    fn apply(&self, samples: [f64; TAPS]) -> f64 {
        let mut acc = 0.0f64;
        for (&w, &v) in self.weights.iter().zip(samples.iter()) {
            acc += w * v;
        }
        acc
    }
}

/// User-supplied integer weights with their normalization constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntKernel {
    weights: [i32; TAPS],
    norm: i64,
}

impl IntKernel {
    pub fn new(weights: [i32; TAPS]) -> Result<Self, Error> {
        let norm: i64 = weights.iter().map(|&w| i64::from(w)).sum();
        if norm == 0 {
            return Err(Error::ZeroNormalizationKernel);
        }
        Ok(Self { weights, norm })
    }

    pub fn weights(&self) -> &[i32; TAPS] {
        &self.weights
    }

    /// Sum of the weights; never zero.
    pub fn norm(&self) -> i64 {
        self.norm
    }

    /// Taps at 0-indexed `level`.
    ///
    /// # Panics
    /// If `2^level` overflows `usize`.
    pub fn at_level(&self, level: u32) -> IntTaps {
        let step = step_for_level(level).expect("kernel step overflow");
        IntTaps {
            taps: Taps::dilated(self.weights, step),
            norm: self.norm,
        }
    }
}

impl Default for IntKernel {
    fn default() -> Self {
        Self {
            weights: DEFAULT_INT_WEIGHTS,
            norm: 16,
        }
    }
}

/// Integer taps at one level, rounding to nearest on normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntTaps {
    taps: Taps<i32>,
    norm: i64,
}

impl SmoothingKernel for IntTaps {
    type Value = u16;

    fn offsets(&self) -> &[isize; TAPS] {
        &self.taps.offsets
    }

    fn radius(&self) -> usize {
        2 * self.taps.step
    }

    #[inline]
    fn apply(&self, samples: [u16; TAPS]) -> u16 {
        let mut sum = 0i64;
        for (&w, &v) in self.taps.weights.iter().zip(samples.iter()) {
            sum += i64::from(w) * i64::from(v);
        }
        // Truncating division, then a 16-bit store: matches an int -> uint16 cast.
        ((sum + self.norm / 2) / self.norm) as u16
    }
}

#[cfg(test)]
mod tests {
    use atwt_core::Error;

    use super::{B3_SPLINE, IntKernel, Taps, dilated_b3_kernel, dilated_len, step_for_level};
    use crate::conv1d::SmoothingKernel;

    #[test]
    fn dilated_kernel_inserts_holes() {
        let k0 = dilated_b3_kernel(0);
        assert_eq!(k0, B3_SPLINE.to_vec());

        let k2 = dilated_b3_kernel(2);
        assert_eq!(k2.len(), 17);
        assert_eq!(dilated_len(2), Some(17));
        for (i, &w) in k2.iter().enumerate() {
            if i % 4 == 0 {
                assert_eq!(w, B3_SPLINE[i / 4]);
            } else {
                assert_eq!(w, 0.0);
            }
        }

        let sum: f64 = k2.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn taps_recovered_from_explicit_kernel() {
        let taps = Taps::b3(3);
        assert_eq!(taps.step(), 8);
        assert_eq!(taps.offsets(), &[-16, -8, 0, 8, 16]);
        assert_eq!(taps.weights(), &B3_SPLINE);
        assert_eq!(taps.radius(), 16);
    }

    #[test]
    fn step_overflow_is_reported() {
        assert_eq!(step_for_level(0), Some(1));
        assert_eq!(step_for_level(4), Some(16));
        assert_eq!(step_for_level(200), None);
        assert_eq!(dilated_len(200), None);
    }

    #[test]
    fn int_kernel_rejects_zero_sum() {
        assert_eq!(
            IntKernel::new([1, -1, 0, 0, 0]),
            Err(Error::ZeroNormalizationKernel)
        );
        let k = IntKernel::new([1, 2, 3, 2, 1]).expect("nonzero sum");
        assert_eq!(k.norm(), 9);
        assert_eq!(IntKernel::default().norm(), 16);
    }

    #[test]
    fn int_taps_round_to_nearest() {
        let taps = IntKernel::default().at_level(1);
        assert_eq!(taps.offsets(), &[-4, -2, 0, 2, 4]);

        // (1*0 + 4*0 + 6*1 + 4*0 + 1*0 + 8) / 16 = 0
        assert_eq!(taps.apply([0, 0, 1, 0, 0]), 0);
        // (6*2 + 8) / 16 = 1
        assert_eq!(taps.apply([0, 0, 2, 0, 0]), 1);
        assert_eq!(taps.apply([100; 5]), 100);
        assert_eq!(taps.apply([65535; 5]), 65535);
    }
}
