//! Demonstrates enabling verbose logging for audiofft.
use audiofft::{AudioFftImpl, OouraPlanner, Spectrum};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .init();

    let mut planner = OouraPlanner::with_capacity(2);
    for size in [256, 512, 256, 1024] {
        let mut fft = planner.plan(size).unwrap();
        let signal = vec![1.0f32; size];
        let mut spectrum = Spectrum::zeros(size);
        spectrum.analyze(&mut fft, &signal).unwrap();
    }

    let mut fft = audiofft::OouraFft::new();
    fft.init(64).unwrap();
    fft.init(128).unwrap();
}
