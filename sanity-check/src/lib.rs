use audiofft::{AudioFftImpl, FftError, OouraFft, RealFftBackend, Spectrum};
use clap::ValueEnum;
use hound::{SampleFormat, WavReader};
use std::error::Error;
use std::f64::consts::PI;
use std::path::Path;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Ooura,
    Realfft,
}

impl Backend {
    pub fn engine(self) -> Box<dyn AudioFftImpl> {
        match self {
            Backend::Ooura => Box::new(OouraFft::new()),
            Backend::Realfft => Box::new(RealFftBackend::new()),
        }
    }
}

/// Read a WAV file as mono `f32` samples in `[-1, 1]`.
///
/// Multi-channel files are mixed down by averaging each frame.
pub fn read_wav(path: &Path) -> Result<(Vec<f32>, u32), Box<dyn Error>> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };
    let channels = usize::from(spec.channels.max(1));
    let samples = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };
    Ok((samples, spec.sample_rate))
}

/// Largest deviation of `fft` on the ramp `1..=size` from the exact DFT,
/// relative to `max(1, |X[k]|)`.
pub fn conformance_error(fft: &mut dyn AudioFftImpl, size: usize) -> Result<f64, FftError> {
    fft.init(size)?;
    let input: Vec<f32> = (1..=size).map(|x| x as f32).collect();
    let mut spectrum = Spectrum::zeros(size);
    spectrum.analyze(fft, &input)?;
    let n = size as f64;
    let mut worst = 0.0f64;
    for k in 0..spectrum.len() {
        let (want_re, want_im) = if k == 0 {
            (n * (n + 1.0) / 2.0, 0.0)
        } else if k == size / 2 {
            (-n / 2.0, 0.0)
        } else {
            (-n / 2.0, n / 2.0 / (PI * k as f64 / n).tan())
        };
        let err_re = (spectrum.re()[k] as f64 - want_re).abs() / want_re.abs().max(1.0);
        let err_im = (spectrum.im()[k] as f64 - want_im).abs() / want_im.abs().max(1.0);
        worst = worst.max(err_re).max(err_im);
    }
    Ok(worst)
}

/// Deterministic test signal mixing a few partials and a slow ramp.
pub fn test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f64 / size as f64;
            let v = (2.0 * PI * 3.0 * t).sin()
                + 0.5 * (2.0 * PI * 17.0 * t + 0.3).cos()
                + 0.25 * (t - 0.5);
            v as f32
        })
        .collect()
}

/// Largest absolute difference between `x` and `ifft(fft(x))`.
pub fn roundtrip_error(fft: &mut dyn AudioFftImpl, size: usize) -> Result<f32, FftError> {
    fft.init(size)?;
    let input = test_signal(size);
    let mut spectrum = Spectrum::zeros(size);
    let mut output = vec![0.0; size];
    spectrum.analyze(fft, &input)?;
    spectrum.synthesize(fft, &mut output)?;
    Ok(max_abs_diff(&input, &output))
}

/// Largest difference between the spectra of the two backends.
pub fn parity_error(size: usize) -> Result<f32, FftError> {
    let input = test_signal(size);
    let mut a = Spectrum::zeros(size);
    let mut b = Spectrum::zeros(size);
    a.analyze(&mut OouraFft::with_size(size)?, &input)?;
    b.analyze(&mut RealFftBackend::with_size(size)?, &input)?;
    Ok(max_abs_diff(a.re(), b.re()).max(max_abs_diff(a.im(), b.im())))
}

fn max_abs_diff(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0f32, f32::max)
}

/// Dominant frequency (Hz) of each complete block of `block` samples.
pub fn dominant_frequencies(
    fft: &mut dyn AudioFftImpl,
    samples: &[f32],
    sample_rate: u32,
    block: usize,
) -> Result<Vec<f32>, FftError> {
    fft.init(block)?;
    let mut spectrum = Spectrum::zeros(block);
    let bin_hz = sample_rate as f32 / block as f32;
    let mut out = Vec::with_capacity(samples.len() / block);
    for chunk in samples.chunks_exact(block) {
        spectrum.analyze(fft, chunk)?;
        let peak = spectrum.peak_bin().unwrap_or(0);
        out.push(peak as f32 * bin_hz);
    }
    Ok(out)
}
