use clap::{Parser, Subcommand};
use sanity_check::{
    conformance_error, dominant_frequencies, parity_error, read_wav, roundtrip_error, Backend,
};
use std::error::Error;
use std::path::PathBuf;

/// Correctness checks and a small WAV analysis for the audiofft engines.
#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare the spectrum of the ramp 1..=N with the exact DFT
    Conformance {
        #[arg(long, value_enum, default_value_t = Backend::Ooura)]
        backend: Backend,
        /// Largest size tested, as a power of two
        #[arg(long, default_value_t = 16)]
        max_shift: u32,
    },
    /// Measure ifft(fft(x)) - x
    Roundtrip {
        #[arg(long, value_enum, default_value_t = Backend::Ooura)]
        backend: Backend,
        #[arg(long, default_value_t = 16)]
        max_shift: u32,
    },
    /// Compare the radix-4 engine with the realfft backend
    Parity {
        #[arg(long, default_value_t = 16)]
        max_shift: u32,
    },
    /// Print the dominant frequency of each block of a WAV file
    Wav {
        input: PathBuf,
        /// Block length in samples (power of two)
        #[arg(long, default_value_t = 4096)]
        block: usize,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    match Args::parse().command {
        Command::Conformance { backend, max_shift } => {
            let mut fft = backend.engine();
            for shift in 1..=max_shift {
                let size = 1usize << shift;
                let err = conformance_error(fft.as_mut(), size)?;
                println!("{size:>8}  max relative error {err:.3e}");
            }
        }
        Command::Roundtrip { backend, max_shift } => {
            let mut fft = backend.engine();
            for shift in 1..=max_shift {
                let size = 1usize << shift;
                let err = roundtrip_error(fft.as_mut(), size)?;
                println!("{size:>8}  max roundtrip error {err:.3e}");
            }
        }
        Command::Parity { max_shift } => {
            for shift in 1..=max_shift {
                let size = 1usize << shift;
                let err = parity_error(size)?;
                println!("{size:>8}  max backend difference {err:.3e}");
            }
        }
        Command::Wav { input, block } => {
            let (samples, sample_rate) = read_wav(&input)?;
            let mut fft = Backend::Ooura.engine();
            let freqs = dominant_frequencies(fft.as_mut(), &samples, sample_rate, block)?;
            let block_secs = block as f32 / sample_rate as f32;
            for (i, f) in freqs.iter().enumerate() {
                println!("{:>8.3}s  {:>9.1} Hz", i as f32 * block_secs, f);
            }
        }
    }
    Ok(())
}
