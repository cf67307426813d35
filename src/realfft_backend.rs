//! Alternative backend built on the `realfft` crate.
//!
//! Implements the same [`AudioFftImpl`] contract as
//! [`crate::ooura::OouraFft`]: identical spectrum layout, `1/N` scaling on
//! the inverse and no allocation after [`AudioFftImpl::init`]. Like the
//! radix-4 engine it computes in `f64` and only rounds to `f32` at the
//! boundary. Mostly useful to cross-check the radix-4 engine.

use alloc::sync::Arc;
use alloc::vec::Vec;

use realfft::num_complex::Complex;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};

use crate::error::FftError;
use crate::fft::{check_buffers, complex_size, validate_size, AudioFftImpl};

struct Plan {
    size: usize,
    forward: Arc<dyn RealToComplex<f64>>,
    inverse: Arc<dyn ComplexToReal<f64>>,
    /// Time-domain samples; input of the forward and output of the inverse.
    samples: Vec<f64>,
    spectrum: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

/// [`AudioFftImpl`] backed by `realfft`/`rustfft`.
#[derive(Default)]
pub struct RealFftBackend {
    plan: Option<Plan>,
}

impl core::fmt::Debug for RealFftBackend {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RealFftBackend")
            .field("size", &self.size())
            .finish()
    }
}

impl RealFftBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(size: usize) -> Result<Self, FftError> {
        let mut fft = Self::new();
        fft.init(size)?;
        Ok(fft)
    }
}

/// Map a `realfft` status onto [`FftError`].
///
/// DC and Nyquist imaginary parts are cleared before every inverse call, so
/// `InputValues` only reports values that were already discarded.
fn check_realfft(res: Result<(), realfft::FftError>) -> Result<(), FftError> {
    use realfft::FftError as R;
    match res {
        Ok(()) | Err(R::InputValues(..)) => Ok(()),
        Err(R::InputBuffer(expected, actual))
        | Err(R::OutputBuffer(expected, actual))
        | Err(R::ScratchBuffer(expected, actual)) => {
            Err(FftError::MismatchedLengths { expected, actual })
        }
    }
}

impl AudioFftImpl for RealFftBackend {
    fn init(&mut self, size: usize) -> Result<(), FftError> {
        if self.size() == Some(size) {
            return Ok(());
        }
        validate_size(size)?;
        let mut planner = RealFftPlanner::<f64>::new();
        let forward = planner.plan_fft_forward(size);
        let inverse = planner.plan_fft_inverse(size);
        let scratch_len = forward
            .get_scratch_len()
            .max(inverse.get_scratch_len());
        self.plan = Some(Plan {
            size,
            samples: forward.make_input_vec(),
            spectrum: forward.make_output_vec(),
            scratch: alloc::vec![Complex::new(0.0, 0.0); scratch_len],
            forward,
            inverse,
        });
        #[cfg(feature = "verbose-logging")]
        log::debug!("realfft: initialized size {size} (scratch {scratch_len})");
        Ok(())
    }

    fn fft(&mut self, data: &[f32], re: &mut [f32], im: &mut [f32]) -> Result<(), FftError> {
        let plan = self.plan.as_mut().ok_or(FftError::Uninitialized)?;
        check_buffers(plan.size, data.len(), re.len(), im.len())?;

        for (dst, src) in plan.samples.iter_mut().zip(data) {
            *dst = f64::from(*src);
        }
        check_realfft(plan.forward.process_with_scratch(
            &mut plan.samples,
            &mut plan.spectrum,
            &mut plan.scratch,
        ))?;
        for ((r, i), c) in re.iter_mut().zip(im.iter_mut()).zip(&plan.spectrum) {
            *r = c.re as f32;
            *i = c.im as f32;
        }
        let last = complex_size(plan.size) - 1;
        im[0] = 0.0;
        im[last] = 0.0;
        Ok(())
    }

    fn ifft(&mut self, data: &mut [f32], re: &[f32], im: &[f32]) -> Result<(), FftError> {
        let plan = self.plan.as_mut().ok_or(FftError::Uninitialized)?;
        check_buffers(plan.size, data.len(), re.len(), im.len())?;

        for ((c, r), i) in plan.spectrum.iter_mut().zip(re).zip(im) {
            *c = Complex::new(f64::from(*r), f64::from(*i));
        }
        let last = plan.spectrum.len() - 1;
        plan.spectrum[0].im = 0.0;
        plan.spectrum[last].im = 0.0;
        check_realfft(plan.inverse.process_with_scratch(
            &mut plan.spectrum,
            &mut plan.samples,
            &mut plan.scratch,
        ))?;
        let scale = 1.0 / plan.size as f64;
        for (dst, src) in data.iter_mut().zip(&plan.samples) {
            *dst = (*src * scale) as f32;
        }
        Ok(())
    }

    fn size(&self) -> Option<usize> {
        self.plan.as_ref().map(|p| p.size)
    }
}
