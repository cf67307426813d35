// Test intent: verifies table sharing and eviction in the planner.
use audiofft::{AudioFftImpl, FftError, OouraFft, OouraPlanner, Spectrum};
use std::sync::Arc;

#[test]
fn same_size_returns_same_tables() {
    let mut planner = OouraPlanner::with_capacity(8);
    let t1 = planner.tables(256).expect("Invariant: operation should succeed");
    let t2 = planner.tables(256).expect("Invariant: operation should succeed");
    assert!(Arc::ptr_eq(&t1, &t2));
    assert_eq!(planner.cache_len(), 1);
}

#[test]
fn planned_engines_share_tables_but_not_scratch() {
    let mut planner = OouraPlanner::new();
    let mut a = planner.plan(128).expect("Invariant: operation should succeed");
    let mut b = planner.plan(128).expect("Invariant: operation should succeed");
    assert!(Arc::ptr_eq(
        a.tables().expect("Invariant: operation should succeed"),
        b.tables().expect("Invariant: operation should succeed"),
    ));

    let x: Vec<f32> = (0..128).map(|i| (i as f32 * 0.1).sin()).collect();
    let y: Vec<f32> = (0..128).map(|i| (i % 3) as f32).collect();
    let mut sa = Spectrum::zeros(128);
    let mut sb = Spectrum::zeros(128);
    sa.analyze(&mut a, &x).expect("Invariant: operation should succeed");
    sb.analyze(&mut b, &y).expect("Invariant: operation should succeed");

    let mut fresh = OouraFft::with_size(128).expect("Invariant: operation should succeed");
    let mut expected = Spectrum::zeros(128);
    expected
        .analyze(&mut fresh, &x)
        .expect("Invariant: operation should succeed");
    assert_eq!(sa, expected);
}

#[test]
fn planned_engine_matches_direct_engine() {
    let mut planner = OouraPlanner::new();
    let mut planned = planner.plan(1024).expect("Invariant: operation should succeed");
    let mut direct = OouraFft::with_size(1024).expect("Invariant: operation should succeed");
    assert_eq!(planned.size(), Some(1024));
    let input: Vec<f32> = (0..1024).map(|i| ((i * 13) % 17) as f32).collect();
    let mut s1 = Spectrum::zeros(1024);
    let mut s2 = Spectrum::zeros(1024);
    s1.analyze(&mut planned, &input)
        .expect("Invariant: operation should succeed");
    s2.analyze(&mut direct, &input)
        .expect("Invariant: operation should succeed");
    assert_eq!(s1, s2);
}

#[test]
fn least_recently_used_size_is_evicted() {
    let mut planner = OouraPlanner::with_capacity(3);
    let first = planner.tables(8).expect("Invariant: operation should succeed");
    for size in [16, 32, 64] {
        planner.tables(size).expect("Invariant: operation should succeed");
    }
    assert_eq!(planner.cache_len(), 3);
    let rebuilt = planner.tables(8).expect("Invariant: operation should succeed");
    assert!(!Arc::ptr_eq(&first, &rebuilt));
    assert_eq!(first, rebuilt);
}

#[test]
fn cache_never_exceeds_capacity() {
    let mut planner = OouraPlanner::new();
    let mut small = OouraPlanner::with_capacity(4);
    for shift in 1..20 {
        small
            .tables(1 << shift)
            .expect("Invariant: operation should succeed");
        assert!(small.cache_len() <= 4);
    }
    planner
        .tables(2)
        .expect("Invariant: operation should succeed");
    assert_eq!(planner.cache_len(), 1);
}

#[test]
fn planner_rejects_invalid_sizes() {
    let mut planner = OouraPlanner::new();
    assert_eq!(planner.plan(0).unwrap_err(), FftError::InvalidSize(0));
    assert_eq!(planner.plan(96).unwrap_err(), FftError::InvalidSize(96));
}

#[test]
fn engines_move_to_worker_threads() {
    let mut planner = OouraPlanner::new();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let mut fft = planner.plan(256).expect("Invariant: operation should succeed");
            std::thread::spawn(move || {
                let input: Vec<f32> = (0..256).map(|i| ((i + t) % 11) as f32).collect();
                let mut s = Spectrum::zeros(256);
                let mut out = vec![0.0; 256];
                s.analyze(&mut fft, &input)
                    .expect("Invariant: operation should succeed");
                s.synthesize(&mut fft, &mut out)
                    .expect("Invariant: operation should succeed");
                input
                    .iter()
                    .zip(&out)
                    .map(|(a, b)| (a - b).abs())
                    .fold(0.0f32, f32::max)
            })
        })
        .collect();
    for h in handles {
        let err = h.join().expect("Invariant: operation should succeed");
        assert!(err < 1e-3);
    }
    assert_eq!(planner.cache_len(), 1);
}
