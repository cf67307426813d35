use hound::{SampleFormat, WavSpec, WavWriter};
use sanity_check::{dominant_frequencies, read_wav, Backend};
use std::f32::consts::PI;

fn write_tone(path: &std::path::Path, spec: WavSpec, freq: f32, frames: usize) {
    let mut writer = WavWriter::create(path, spec).unwrap();
    for n in 0..frames {
        let v = (2.0 * PI * freq * n as f32 / spec.sample_rate as f32).sin() * 0.5;
        for _ in 0..spec.channels {
            match spec.sample_format {
                SampleFormat::Int => writer.write_sample((v * i16::MAX as f32) as i16).unwrap(),
                SampleFormat::Float => writer.write_sample(v).unwrap(),
            }
        }
    }
    writer.finalize().unwrap();
}

#[test]
fn reads_uppercase_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("case.WAV");
    let spec = WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(&path, spec).unwrap();
    writer.write_sample(0i16).unwrap();
    writer.finalize().unwrap();
    let (samples, sr) = read_wav(&path).unwrap();
    assert_eq!(sr, 8000);
    assert_eq!(samples, vec![0.0]);
}

#[test]
fn stereo_is_mixed_to_mono() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("stereo.wav");
    let spec = WavSpec {
        channels: 2,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    write_tone(&path, spec, 500.0, 1024);
    let (samples, _) = read_wav(&path).unwrap();
    assert_eq!(samples.len(), 1024);
    assert!(samples.iter().all(|s| s.abs() <= 0.51));
}

#[test]
fn float_tone_reports_its_frequency() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("tone.wav");
    let spec = WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    // 16000 / 1024 Hz per bin; bin 64 is exactly 1000 Hz.
    write_tone(&path, spec, 1000.0, 4096);
    let (samples, sr) = read_wav(&path).unwrap();
    let mut fft = Backend::Ooura.engine();
    let freqs = dominant_frequencies(fft.as_mut(), &samples, sr, 1024).unwrap();
    assert_eq!(freqs, vec![1000.0; 4]);
}
