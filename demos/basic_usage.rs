//! Basic usage example for audiofft
//!
//! Shows the forward and inverse transforms, the owned spectrum helper and
//! sharing tables between engines through the planner.

use audiofft::{complex_size, AudioFft, AudioFftImpl, OouraPlanner, Spectrum};

fn main() {
    println!("=== audiofft Basic Usage Example ===\n");

    // 1. Forward and inverse transform
    println!("1. Real FFT");
    let size = 8;
    let mut fft = AudioFft::new();
    fft.init(size).unwrap();

    let input: Vec<f32> = (1..=size).map(|x| x as f32).collect();
    let mut re = vec![0.0; complex_size(size)];
    let mut im = vec![0.0; complex_size(size)];
    fft.fft(&input, &mut re, &mut im).unwrap();
    println!("   Input: {:?}", input);
    println!(
        "   Spectrum: {:?}",
        re.iter()
            .zip(&im)
            .map(|(r, i)| format!("{:.2}{:+.2}i", r, i))
            .collect::<Vec<_>>()
    );

    let mut output = vec![0.0; size];
    fft.ifft(&mut output, &re, &im).unwrap();
    println!("   IFFT: {:?}", output);
    println!();

    // 2. Dominant frequency of a tone
    println!("2. Peak detection");
    let sample_rate = 48_000.0f32;
    let block = 1024;
    let tone = 1_500.0f32;
    let signal: Vec<f32> = (0..block)
        .map(|n| (2.0 * std::f32::consts::PI * tone * n as f32 / sample_rate).sin())
        .collect();
    let mut engine = AudioFft::with_size(block).unwrap();
    let mut spectrum = Spectrum::zeros(block);
    spectrum.analyze(&mut engine, &signal).unwrap();
    let peak = spectrum.peak_bin().unwrap();
    println!(
        "   Peak bin {} = {:.1} Hz (tone at {:.1} Hz)",
        peak,
        peak as f32 * sample_rate / block as f32,
        tone
    );
    println!();

    // 3. One engine per channel, one set of tables
    println!("3. Shared tables");
    let mut planner = OouraPlanner::new();
    let left = planner.plan(block).unwrap();
    let right = planner.plan(block).unwrap();
    println!(
        "   Engines: {:?} / {:?}, cached table sets: {}",
        left.size(),
        right.size(),
        planner.cache_len()
    );

    println!("\n=== Example completed successfully! ===");
}
