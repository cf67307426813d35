//! Transform interface shared by every backend.
//!
//! [`AudioFftImpl`] is the capability contract: initialize for a block size,
//! run forward and inverse real transforms over split-complex buffers, and
//! report sizes. The radix-4 engine ([`crate::ooura::OouraFft`]) is always
//! available; the `realfft` feature adds
//! [`crate::realfft_backend::RealFftBackend`]. Both honour the same pre- and
//! post-conditions, so callers pick one at construction time and program
//! against the trait.

use alloc::boxed::Box;

use crate::error::FftError;

/// Length of the real/imaginary arrays for a real block of `size` samples.
///
/// Covers the bins from DC to Nyquist inclusive. This is a pure function and
/// needs no initialized engine.
#[inline]
pub const fn complex_size(size: usize) -> usize {
    size / 2 + 1
}

/// Check that `size` is a supported transform size (power of two, `>= 2`).
pub fn validate_size(size: usize) -> Result<(), FftError> {
    if size < 2 || !size.is_power_of_two() {
        return Err(FftError::InvalidSize(size));
    }
    Ok(())
}

/// Check that a caller buffer has exactly `expected` elements.
#[inline]
pub(crate) fn check_len(expected: usize, actual: usize) -> Result<(), FftError> {
    if expected != actual {
        return Err(FftError::MismatchedLengths { expected, actual });
    }
    Ok(())
}

/// Validate the three buffers of a transform call against `size`.
#[inline]
pub(crate) fn check_buffers(
    size: usize,
    data_len: usize,
    re_len: usize,
    im_len: usize,
) -> Result<(), FftError> {
    let bins = complex_size(size);
    check_len(size, data_len)?;
    check_len(bins, re_len)?;
    check_len(bins, im_len)
}

/// Real-to-complex and complex-to-real FFT over split-complex spectra.
///
/// Spectra hold `complex_size(size)` bins in two separate arrays. Bin 0 is
/// DC and the last bin is Nyquist; their imaginary parts are written as zero
/// by [`fft`](Self::fft) and ignored by [`ifft`](Self::ifft). Output is
/// ready to use: the forward transform yields the plain DFT and the inverse
/// already divides by the block size.
///
/// Only [`init`](Self::init) may allocate. A single instance must not be
/// shared between threads while transforming; use one instance per thread.
pub trait AudioFftImpl: Send {
    /// Prepare the engine for blocks of `size` samples.
    ///
    /// Re-initializing with another size replaces every table and buffer;
    /// re-initializing with the current size keeps them.
    fn init(&mut self, size: usize) -> Result<(), FftError>;

    /// Forward transform of `data` into `re`/`im`.
    fn fft(&mut self, data: &[f32], re: &mut [f32], im: &mut [f32]) -> Result<(), FftError>;

    /// Inverse transform of `re`/`im` into `data`.
    fn ifft(&mut self, data: &mut [f32], re: &[f32], im: &[f32]) -> Result<(), FftError>;

    /// Block size set by the last successful [`init`](Self::init), if any.
    fn size(&self) -> Option<usize>;

    /// Spectrum length for the initialized size.
    fn spectrum_len(&self) -> Option<usize> {
        self.size().map(complex_size)
    }

    /// Same as the free function [`complex_size`].
    fn complex_size(size: usize) -> usize
    where
        Self: Sized,
    {
        complex_size(size)
    }
}

/// Create the preferred backend for this build.
///
/// Selects [`crate::realfft_backend::RealFftBackend`] when the `realfft`
/// feature is enabled and the radix-4 engine otherwise. The returned engine
/// is uninitialized.
pub fn new_audio_fft() -> Box<dyn AudioFftImpl> {
    #[cfg(feature = "realfft")]
    {
        Box::new(crate::realfft_backend::RealFftBackend::new())
    }
    #[cfg(not(feature = "realfft"))]
    {
        Box::new(crate::ooura::OouraFft::new())
    }
}
