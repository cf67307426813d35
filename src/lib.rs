//! # audiofft - Allocation-free real FFT for audio blocks
//!
//! Forward and inverse real FFTs for power-of-two block sizes, producing and
//! consuming a split-complex half spectrum (`N/2 + 1` bins, DC to Nyquist).
//! Designed for real-time audio callbacks: all tables and scratch memory are
//! built once by `init`, after which transforms never allocate.
//!
//! ## Features
//!
//! - **Radix-4 engine** ([`OouraFft`]) with `f64` internal precision
//! - **Ready-to-use scaling**: `fft` yields the plain DFT, `ifft` divides by `N`
//! - **Shared tables** through [`OouraPlanner`] for one engine per thread
//! - **Swappable backends** behind the [`AudioFftImpl`] trait
//! - **`no_std`** with `alloc`
//!
//! ## Cargo Features
//!
//! - `std` (default): `std::error::Error` and environment configuration
//! - `realfft`: adds [`RealFftBackend`] and makes it the [`new_audio_fft`] choice
//! - `verbose-logging`: `log` diagnostics on initialization and planner paths
//! - `internal-tests`: extra property tests inside the crate
//!
//! ## Example
//!
//! ```
//! use audiofft::{complex_size, AudioFft, AudioFftImpl};
//!
//! let size = 1024;
//! let mut fft = AudioFft::new();
//! fft.init(size).unwrap();
//!
//! let input: Vec<f32> = (0..size).map(|i| (i % 16) as f32).collect();
//! let mut re = vec![0.0; complex_size(size)];
//! let mut im = vec![0.0; complex_size(size)];
//! fft.fft(&input, &mut re, &mut im).unwrap();
//!
//! let mut output = vec![0.0; size];
//! fft.ifft(&mut output, &re, &im).unwrap();
//! assert!(input.iter().zip(&output).all(|(a, b)| (a - b).abs() < 1e-3));
//! ```
//!
//! ## Runtime configuration
//!
//! `AUDIOFFT_PLANNER_CACHE_ENTRIES` caps the number of table sets an
//! [`OouraPlanner`] keeps (default 64, `0` keeps the default).

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod error;

/// Transform interface shared by every backend.
pub mod fft;

/// Bit-reversal and twiddle tables.
pub mod twiddle;

/// In-place butterfly and real-correction stages.
pub mod kernels;

/// Radix-4 engine.
pub mod ooura;

/// Table cache shared between engines.
pub mod planner;

pub mod spectrum;

/// Backend built on the `realfft` crate.
#[cfg(feature = "realfft")]
pub mod realfft_backend;

pub use error::FftError;
pub use fft::{complex_size, new_audio_fft, AudioFftImpl};
pub use ooura::{AudioFft, OouraFft};
pub use planner::OouraPlanner;
#[cfg(feature = "realfft")]
pub use realfft_backend::RealFftBackend;
pub use spectrum::Spectrum;
pub use twiddle::OouraTables;
