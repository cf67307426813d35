//! Owned split-complex spectrum.

use alloc::vec;
use alloc::vec::Vec;

use libm::sqrtf;

use crate::error::FftError;
use crate::fft::{check_len, complex_size, AudioFftImpl};

/// Real and imaginary halves of a DC-to-Nyquist spectrum.
///
/// Sized for one block length, so it can be passed straight to
/// [`AudioFftImpl::fft`] and [`AudioFftImpl::ifft`] without any length
/// bookkeeping at the call site.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    re: Vec<f32>,
    im: Vec<f32>,
}

impl Spectrum {
    /// Zeroed spectrum for blocks of `size` samples.
    pub fn zeros(size: usize) -> Self {
        let bins = complex_size(size);
        Self {
            re: vec![0.0; bins],
            im: vec![0.0; bins],
        }
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.re.len()
    }

    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    pub fn re(&self) -> &[f32] {
        &self.re
    }

    pub fn im(&self) -> &[f32] {
        &self.im
    }

    pub fn re_mut(&mut self) -> &mut [f32] {
        &mut self.re
    }

    pub fn im_mut(&mut self) -> &mut [f32] {
        &mut self.im
    }

    /// Both halves at once, mutably.
    pub fn parts_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.re, &mut self.im)
    }

    /// Forward transform of `data` into this spectrum.
    pub fn analyze(&mut self, fft: &mut dyn AudioFftImpl, data: &[f32]) -> Result<(), FftError> {
        fft.fft(data, &mut self.re, &mut self.im)
    }

    /// Inverse transform of this spectrum into `data`.
    pub fn synthesize(&self, fft: &mut dyn AudioFftImpl, data: &mut [f32]) -> Result<(), FftError> {
        fft.ifft(data, &self.re, &self.im)
    }

    /// Write `|X[k]|` for every bin into `out`.
    pub fn magnitudes_into(&self, out: &mut [f32]) -> Result<(), FftError> {
        check_len(self.len(), out.len())?;
        for ((o, r), i) in out.iter_mut().zip(&self.re).zip(&self.im) {
            *o = sqrtf(r * r + i * i);
        }
        Ok(())
    }

    /// Write `|X[k]|²` for every bin into `out`.
    pub fn power_into(&self, out: &mut [f32]) -> Result<(), FftError> {
        check_len(self.len(), out.len())?;
        for ((o, r), i) in out.iter_mut().zip(&self.re).zip(&self.im) {
            *o = r * r + i * i;
        }
        Ok(())
    }

    /// Index of the bin with the largest power; the lowest index wins ties.
    pub fn peak_bin(&self) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (k, (r, i)) in self.re.iter().zip(&self.im).enumerate() {
            let p = r * r + i * i;
            match best {
                Some((_, bp)) if bp >= p => {}
                _ => best = Some((k, p)),
            }
        }
        best.map(|(k, _)| k)
    }
}
