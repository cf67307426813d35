//! Radix-4 real FFT engine.
//!
//! [`OouraFft`] owns (or shares) the tables for one block size and a
//! private `f64` scratch buffer. Transforms widen the caller's samples into
//! scratch, run the in-place stages from [`crate::kernels`] and narrow the
//! result back, so steady-state calls never allocate.

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::FftError;
use crate::fft::{check_buffers, AudioFftImpl};
use crate::kernels::{rdft_backward, rdft_forward};
use crate::twiddle::OouraTables;

/// Real FFT engine built on Ooura's radix-4 routines.
///
/// ```
/// use audiofft::{AudioFftImpl, OouraFft};
///
/// let mut fft = OouraFft::with_size(8).unwrap();
/// let data = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
/// let mut re = [0.0f32; 5];
/// let mut im = [0.0f32; 5];
/// fft.fft(&data, &mut re, &mut im).unwrap();
/// assert!((re[0] - 36.0).abs() < 1e-4);
///
/// let mut back = [0.0f32; 8];
/// fft.ifft(&mut back, &re, &im).unwrap();
/// assert!((back[7] - 8.0).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OouraFft {
    tables: Option<Arc<OouraTables>>,
    buffer: Vec<f64>,
}

impl OouraFft {
    /// Uninitialized engine; call [`AudioFftImpl::init`] before transforming.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine ready for blocks of `size` samples.
    pub fn with_size(size: usize) -> Result<Self, FftError> {
        let mut fft = Self::new();
        fft.init(size)?;
        Ok(fft)
    }

    /// Engine reusing already built tables.
    ///
    /// Only the scratch buffer is allocated, so this is the cheap way to
    /// create one engine per thread for the same block size.
    pub fn from_tables(tables: Arc<OouraTables>) -> Self {
        let buffer = vec![0.0; tables.size()];
        Self {
            tables: Some(tables),
            buffer,
        }
    }

    /// Tables in use, if initialized.
    pub fn tables(&self) -> Option<&Arc<OouraTables>> {
        self.tables.as_ref()
    }
}

impl AudioFftImpl for OouraFft {
    fn init(&mut self, size: usize) -> Result<(), FftError> {
        if self.size() == Some(size) {
            return Ok(());
        }
        let tables = OouraTables::new(size)?;
        #[cfg(feature = "verbose-logging")]
        log::debug!(
            "ooura: initialized size {size} ({} bins, {} twiddles)",
            crate::fft::complex_size(size),
            tables.complex_twiddles().len() + tables.correction_twiddles().len()
        );
        *self = Self::from_tables(Arc::new(tables));
        Ok(())
    }

    fn fft(&mut self, data: &[f32], re: &mut [f32], im: &mut [f32]) -> Result<(), FftError> {
        let tables = self.tables.as_deref().ok_or(FftError::Uninitialized)?;
        let size = tables.size();
        check_buffers(size, data.len(), re.len(), im.len())?;

        let a = &mut self.buffer[..];
        for (dst, src) in a.iter_mut().zip(data) {
            *dst = f64::from(*src);
        }
        rdft_forward(tables, a);

        let half = size / 2;
        for k in 0..half {
            re[k] = a[2 * k] as f32;
            im[k] = -a[2 * k + 1] as f32;
        }
        re[half] = a[1] as f32;
        im[0] = 0.0;
        im[half] = 0.0;
        Ok(())
    }

    fn ifft(&mut self, data: &mut [f32], re: &[f32], im: &[f32]) -> Result<(), FftError> {
        let tables = self.tables.as_deref().ok_or(FftError::Uninitialized)?;
        let size = tables.size();
        check_buffers(size, data.len(), re.len(), im.len())?;

        let a = &mut self.buffer[..];
        let half = size / 2;
        for k in 0..half {
            a[2 * k] = f64::from(re[k]);
            a[2 * k + 1] = -f64::from(im[k]);
        }
        a[1] = f64::from(re[half]);
        rdft_backward(tables, a);

        let scale = 2.0 / size as f64;
        for (dst, src) in data.iter_mut().zip(a.iter()) {
            *dst = (*src * scale) as f32;
        }
        Ok(())
    }

    fn size(&self) -> Option<usize> {
        self.tables.as_deref().map(OouraTables::size)
    }
}

/// Engine used when no backend is picked explicitly.
pub type AudioFft = OouraFft;
