//! In-place stages of the radix-4 real FFT.
//!
//! Data is a buffer of `n` doubles viewed as `n/2` interleaved complex
//! values (`a[2k]` real, `a[2k + 1]` imaginary). The complex cascade uses
//! the `exp(+2πi jk/n)` kernel; [`rdft_forward`] and [`rdft_backward`] wrap
//! it with the bit-reversal permutation and the real-spectrum correction.
//!
//! Every routine here works on caller-provided memory only and never
//! allocates.

use crate::twiddle::OouraTables;

/// Which way the final cascade stage runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    /// Conjugates the outputs of the last stage.
    Backward,
}

type Cplx = (f64, f64);

#[inline(always)]
fn rotate(x: Cplx, w: Cplx) -> Cplx {
    (w.0 * x.0 - w.1 * x.1, w.0 * x.1 + w.1 * x.0)
}

#[inline(always)]
fn store(a: &mut [f64], j: usize, x: Cplx) {
    a[j] = x.0;
    a[j + 1] = x.1;
}

/// Untwiddled radix-4 butterfly over the complex values at `j`, `j + l`,
/// `j + 2l` and `j + 3l`.
///
/// Returns the outputs destined for `j`, `j + l`, `j + 2l`, `j + 3l`.
#[inline(always)]
fn butterfly4(a: &[f64], j: usize, l: usize) -> [Cplx; 4] {
    let j1 = j + l;
    let j2 = j1 + l;
    let j3 = j2 + l;
    let x0r = a[j] + a[j1];
    let x0i = a[j + 1] + a[j1 + 1];
    let x1r = a[j] - a[j1];
    let x1i = a[j + 1] - a[j1 + 1];
    let x2r = a[j2] + a[j3];
    let x2i = a[j2 + 1] + a[j3 + 1];
    let x3r = a[j2] - a[j3];
    let x3i = a[j2 + 1] - a[j3 + 1];
    [
        (x0r + x2r, x0i + x2i),
        (x1r - x3i, x1i + x3r),
        (x0r - x2r, x0i - x2i),
        (x1r + x3i, x1i - x3r),
    ]
}

#[inline(always)]
fn radix4(a: &mut [f64], j: usize, l: usize, dir: Direction) {
    let mut y = butterfly4(a, j, l);
    if dir == Direction::Backward {
        for v in y.iter_mut() {
            v.1 = -v.1;
        }
    }
    for (i, v) in y.iter().enumerate() {
        store(a, j + i * l, *v);
    }
}

/// Radix-4 butterfly for the group rotated by `π/4`.
///
/// `c` is `cos(π/4)`; the rotations `exp(iπ/4)`, `i` and `exp(3iπ/4)` are
/// applied with two multiplies each.
#[inline(always)]
fn radix4_eighth(a: &mut [f64], j: usize, l: usize, c: f64) {
    let [y0, y1, y2, y3] = butterfly4(a, j, l);
    store(a, j, y0);
    store(a, j + l, (c * (y1.0 - y1.1), c * (y1.0 + y1.1)));
    store(a, j + 2 * l, (-y2.1, y2.0));
    store(a, j + 3 * l, (-c * (y3.0 + y3.1), c * (y3.0 - y3.1)));
}

#[inline(always)]
fn radix4_twiddled(a: &mut [f64], j: usize, l: usize, wk1: Cplx, wk2: Cplx, wk3: Cplx) {
    let [y0, y1, y2, y3] = butterfly4(a, j, l);
    store(a, j, y0);
    store(a, j + l, rotate(y1, wk1));
    store(a, j + 2 * l, rotate(y2, wk2));
    store(a, j + 3 * l, rotate(y3, wk3));
}

#[inline(always)]
fn radix2(a: &mut [f64], j: usize, l: usize, dir: Direction) {
    let j1 = j + l;
    let mut y0 = (a[j] + a[j1], a[j + 1] + a[j1 + 1]);
    let mut y1 = (a[j] - a[j1], a[j + 1] - a[j1 + 1]);
    if dir == Direction::Backward {
        y0.1 = -y0.1;
        y1.1 = -y1.1;
    }
    store(a, j, y0);
    store(a, j1, y1);
}

/// One radix-4 stage with butterfly span `l` over a buffer of `n` doubles.
///
/// Groups of `4l` values are processed in pairs: the even group of each
/// pair uses the twiddles `(wk1, wk2, wk3)` read sequentially from the
/// bit-reversed table `w`, the odd group the same angles advanced by a
/// quarter turn on `wk2`. The first pair needs no table lookups.
fn radix4_stage(n: usize, l: usize, a: &mut [f64], w: &[f64]) {
    let m = l << 2;
    for j in (0..l).step_by(2) {
        radix4(a, j, l, Direction::Forward);
    }
    let c = w[2];
    for j in (m..l + m).step_by(2) {
        radix4_eighth(a, j, l, c);
    }

    let m2 = 2 * m;
    let mut k1 = 0usize;
    let mut k = m2;
    while k < n {
        k1 += 2;
        let k2 = 2 * k1;
        let wk2 = (w[k1], w[k1 + 1]);
        let wk1 = (w[k2], w[k2 + 1]);
        let wk3 = (
            wk1.0 - 2.0 * wk2.1 * wk1.1,
            2.0 * wk2.1 * wk1.0 - wk1.1,
        );
        for j in (k..l + k).step_by(2) {
            radix4_twiddled(a, j, l, wk1, wk2, wk3);
        }

        let wk1 = (w[k2 + 2], w[k2 + 3]);
        let wk3 = (
            wk1.0 - 2.0 * wk2.0 * wk1.1,
            2.0 * wk2.0 * wk1.0 - wk1.1,
        );
        let wk2 = (-wk2.1, wk2.0);
        for j in (k + m..l + k + m).step_by(2) {
            radix4_twiddled(a, j, l, wk1, wk2, wk3);
        }
        k += m2;
    }
}

/// Full complex cascade over bit-reversed input.
///
/// Runs a span-2 stage, then stages quadrupling the span while more than
/// one radix-4 level remains, then a last radix-4 stage when `n/2` is a
/// power of four or a radix-2 stage otherwise.
fn cascade(n: usize, a: &mut [f64], w: &[f64], dir: Direction) {
    let mut l = 2;
    if n > 8 {
        radix4_stage(n, 2, a, w);
        l = 8;
        while (l << 2) < n {
            radix4_stage(n, l, a, w);
            l <<= 2;
        }
    }
    if (l << 2) == n {
        for j in (0..l).step_by(2) {
            radix4(a, j, l, dir);
        }
    } else {
        for j in (0..l).step_by(2) {
            radix2(a, j, l, dir);
        }
    }
}

/// Complex DFT (`exp(+2πi jk/n)` kernel) of bit-reversed data.
pub fn complex_forward(n: usize, a: &mut [f64], w: &[f64]) {
    cascade(n, a, w, Direction::Forward);
}

/// Conjugate of [`complex_forward`]'s result, used on the inverse path.
pub fn complex_backward(n: usize, a: &mut [f64], w: &[f64]) {
    cascade(n, a, w, Direction::Backward);
}

/// Unfold the packed half-length spectrum into the spectrum of the real
/// signal (bins `1..n/4` and their mirrors).
pub fn real_forward_correction(n: usize, a: &mut [f64], c: &[f64]) {
    let nc = c.len();
    let m = n >> 1;
    let ks = 2 * nc / m;
    let mut kk = 0;
    for j in (2..m).step_by(2) {
        let k = n - j;
        kk += ks;
        let wkr = 0.5 - c[nc - kk];
        let wki = c[kk];
        let xr = a[j] - a[k];
        let xi = a[j + 1] + a[k + 1];
        let yr = wkr * xr - wki * xi;
        let yi = wkr * xi + wki * xr;
        a[j] -= yr;
        a[j + 1] -= yi;
        a[k] += yr;
        a[k + 1] -= yi;
    }
}

/// Inverse of [`real_forward_correction`]; also conjugates the data so the
/// following [`complex_backward`] yields the inverse transform.
pub fn real_backward_correction(n: usize, a: &mut [f64], c: &[f64]) {
    let nc = c.len();
    let m = n >> 1;
    let ks = 2 * nc / m;
    let mut kk = 0;
    a[1] = -a[1];
    for j in (2..m).step_by(2) {
        let k = n - j;
        kk += ks;
        let wkr = 0.5 - c[nc - kk];
        let wki = c[kk];
        let xr = a[j] - a[k];
        let xi = a[j + 1] + a[k + 1];
        let yr = wkr * xr + wki * xi;
        let yi = wkr * xi - wki * xr;
        a[j] -= yr;
        a[j + 1] = yi - a[j + 1];
        a[k] += yr;
        a[k + 1] = yi - a[k + 1];
    }
    a[m + 1] = -a[m + 1];
}

/// Forward real DFT in place.
///
/// On return `a[0]` holds DC, `a[1]` Nyquist and `a[2k]`, `a[2k + 1]` the
/// cosine and sine sums of bin `k` (the sine sum is the negated imaginary
/// part of the usual DFT).
pub fn rdft_forward(tables: &OouraTables, a: &mut [f64]) {
    let n = tables.size();
    debug_assert_eq!(a.len(), n);
    if n > 4 {
        tables.bit_reversal().permute(a);
        complex_forward(n, a, tables.complex_twiddles());
        real_forward_correction(n, a, tables.correction_twiddles());
    } else if n == 4 {
        complex_forward(n, a, tables.complex_twiddles());
    }
    let xi = a[0] - a[1];
    a[0] += a[1];
    a[1] = xi;
}

/// Inverse real DFT in place, unscaled.
///
/// Takes the layout produced by [`rdft_forward`]; the result is the signal
/// multiplied by `n/2`.
pub fn rdft_backward(tables: &OouraTables, a: &mut [f64]) {
    let n = tables.size();
    debug_assert_eq!(a.len(), n);
    a[1] = 0.5 * (a[0] - a[1]);
    a[0] -= a[1];
    if n > 4 {
        real_backward_correction(n, a, tables.correction_twiddles());
        tables.bit_reversal().permute(a);
        complex_backward(n, a, tables.complex_twiddles());
    } else if n == 4 {
        complex_forward(n, a, tables.complex_twiddles());
    }
}


#[cfg(all(feature = "internal-tests", test))]
mod property_tests {
    use super::*;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_rdft_roundtrip(shift in 1u32..12, ref signal in proptest::collection::vec(-1000.0f64..1000.0, 2048)) {
            let n = 1usize << shift;
            let tables = OouraTables::new(n).unwrap();
            let mut a: Vec<f64> = signal[..n].to_vec();
            rdft_forward(&tables, &mut a);
            rdft_backward(&tables, &mut a);
            let scale = 2.0 / n as f64;
            for (x, y) in signal.iter().zip(a.iter()) {
                prop_assert!((x - y * scale).abs() < 1e-8);
            }
        }

        #[test]
        fn prop_permutation_is_involution(shift in 3u32..14) {
            let n = 1usize << shift;
            let tables = OouraTables::new(n).unwrap();
            let original: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let mut a = original.clone();
            tables.bit_reversal().permute(&mut a);
            tables.bit_reversal().permute(&mut a);
            prop_assert_eq!(a, original);
        }
    }
}
