use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use audiofft::{AudioFftImpl, OouraFft, OouraPlanner, OouraTables};

fn bench_init(c: &mut Criterion) {
    let mut group = c.benchmark_group("init");
    for &size in &[256usize, 4096, 65536] {
        group.bench_function(BenchmarkId::new("tables", size), |b| {
            b.iter(|| black_box(OouraTables::new(size).unwrap()))
        });

        group.bench_function(BenchmarkId::new("engine", size), |b| {
            b.iter(|| {
                let mut fft = OouraFft::new();
                fft.init(size).unwrap();
                black_box(fft)
            })
        });

        let mut planner = OouraPlanner::new();
        planner.tables(size).unwrap();
        group.bench_function(BenchmarkId::new("planned", size), |b| {
            b.iter(|| black_box(planner.plan(size).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_init);
criterion_main!(benches);
