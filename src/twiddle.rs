//! Precomputed tables for the radix-4 real FFT engine.
//!
//! Three tables are derived from the transform size `N`:
//!
//! - a bit-reversal index table for the `N/2`-point complex network,
//! - the complex-stage twiddles (`N/4` values) consumed by the radix-4
//!   butterflies in [`crate::kernels`],
//! - the real-spectrum correction twiddles (`N/4` values) used to turn the
//!   packed half-length complex FFT into the half spectrum of the real
//!   signal.
//!
//! All of them are pure functions of `N`, so an [`OouraTables`] value can be
//! shared freely between engines (see [`crate::planner::OouraPlanner`]).

use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::FRAC_PI_4;

use libm::{cos, sincos};

use crate::error::FftError;
use crate::fft::validate_size;

/// Index table driving the in-place bit-reversal permutation.
///
/// The table holds `m` offsets where `m` is roughly `√N / 2`, so it stays
/// tiny even for large blocks. Elements are addressed as interleaved
/// complex pairs: index `2k` is the real part of complex element `k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitReversal {
    ip: Vec<usize>,
    m: usize,
    four_group: bool,
}

impl BitReversal {
    /// Build the permutation table for a buffer of `n` reals (`n/2` complex
    /// elements).
    pub fn new(n: usize) -> Self {
        let mut ip = vec![0usize];
        let mut l = n;
        let mut m = 1usize;
        while (m << 3) < l {
            l >>= 1;
            for j in 0..m {
                let next = ip[j] + l;
                ip.push(next);
            }
            m <<= 1;
        }
        Self {
            ip,
            m,
            four_group: (m << 3) == l,
        }
    }

    /// Offsets stored in the table.
    pub fn indices(&self) -> &[usize] {
        &self.ip
    }

    /// Reorder `a` from natural to bit-reversed complex order.
    ///
    /// The permutation is an involution: applying it twice restores the
    /// original order.
    pub fn permute(&self, a: &mut [f64]) {
        let ip = &self.ip;
        let m = self.m;
        let m2 = 2 * m;
        if self.four_group {
            for k in 0..m {
                for j in 0..k {
                    let mut j1 = 2 * j + ip[k];
                    let mut k1 = 2 * k + ip[j];
                    swap_pair(a, j1, k1);
                    j1 += m2;
                    k1 += 2 * m2;
                    swap_pair(a, j1, k1);
                    j1 += m2;
                    k1 -= m2;
                    swap_pair(a, j1, k1);
                    j1 += m2;
                    k1 += 2 * m2;
                    swap_pair(a, j1, k1);
                }
                let j1 = 2 * k + m2 + ip[k];
                swap_pair(a, j1, j1 + m2);
            }
        } else {
            for k in 1..m {
                for j in 0..k {
                    let j1 = 2 * j + ip[k];
                    let k1 = 2 * k + ip[j];
                    swap_pair(a, j1, k1);
                    swap_pair(a, j1 + m2, k1 + m2);
                }
            }
        }
    }
}

#[inline(always)]
fn swap_pair(a: &mut [f64], j: usize, k: usize) {
    a.swap(j, k);
    a.swap(j + 1, k + 1);
}

/// Build the complex-stage twiddle table of `nw` values.
///
/// Entries come in `(cos, sin)` pairs of multiples of `π/4 / (nw/2)`,
/// mirrored around `π/4`, and are stored in bit-reversed order so that the
/// radix-4 stages walk the table sequentially. Tables with `nw <= 2` are
/// never read and stay zeroed.
pub fn complex_twiddles(nw: usize) -> Vec<f64> {
    let mut w = vec![0.0f64; nw];
    if nw > 2 {
        let nwh = nw >> 1;
        let delta = FRAC_PI_4 / nwh as f64;
        w[0] = 1.0;
        w[1] = 0.0;
        w[nwh] = cos(delta * nwh as f64);
        w[nwh + 1] = w[nwh];
        if nwh > 2 {
            for j in (2..nwh).step_by(2) {
                let (y, x) = sincos(delta * j as f64);
                w[j] = x;
                w[j + 1] = y;
                w[nw - j] = y;
                w[nw - j + 1] = x;
            }
            BitReversal::new(nw).permute(&mut w);
        }
    }
    w
}

/// Build the real-spectrum correction table of `nc` values.
///
/// The lower half holds `0.5 * cos(θ)` and the upper half `0.5 * sin(θ)`
/// for `θ` stepping by `π/4 / (nc/2)`.
pub fn correction_twiddles(nc: usize) -> Vec<f64> {
    let mut c = vec![0.0f64; nc];
    if nc > 1 {
        let nch = nc >> 1;
        let delta = FRAC_PI_4 / nch as f64;
        c[0] = cos(delta * nch as f64);
        c[nch] = 0.5 * c[0];
        for j in 1..nch {
            let (s, co) = sincos(delta * j as f64);
            c[j] = 0.5 * co;
            c[nc - j] = 0.5 * s;
        }
    }
    c
}

/// Every table needed to transform blocks of one size.
#[derive(Debug, Clone, PartialEq)]
pub struct OouraTables {
    size: usize,
    bitrev: BitReversal,
    wt: Vec<f64>,
    ct: Vec<f64>,
}

impl OouraTables {
    /// Build the tables for real blocks of `size` samples.
    ///
    /// Returns [`FftError::InvalidSize`] unless `size` is a power of two and
    /// at least 2.
    pub fn new(size: usize) -> Result<Self, FftError> {
        validate_size(size)?;
        let quarter = size >> 2;
        Ok(Self {
            size,
            bitrev: BitReversal::new(size),
            wt: complex_twiddles(quarter),
            ct: correction_twiddles(quarter),
        })
    }

    /// Real block length these tables were built for.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bit_reversal(&self) -> &BitReversal {
        &self.bitrev
    }

    /// Twiddles for the radix-4 butterfly stages.
    pub fn complex_twiddles(&self) -> &[f64] {
        &self.wt
    }

    /// Twiddles for the real-spectrum correction stage.
    pub fn correction_twiddles(&self) -> &[f64] {
        &self.ct
    }
}
