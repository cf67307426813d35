use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use std::{env, fs};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use once_cell::sync::Lazy;
use serde::Serialize;

use audiofft::{complex_size, AudioFftImpl, OouraFft, RealFftBackend};
use realfft::RealFftPlanner as RustRealFftPlanner;

/// Global allocator wrapper counting allocations and the high-water mark of
/// live bytes above the level seen at the last [`reset_alloc`].
struct CountingAllocator;

static ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);
static LIVE_BYTES: AtomicUsize = AtomicUsize::new(0);
static BASELINE_BYTES: AtomicUsize = AtomicUsize::new(0);
static PEAK_BYTES: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
            let live = LIVE_BYTES.fetch_add(layout.size(), Ordering::Relaxed) + layout.size();
            PEAK_BYTES.fetch_max(live, Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        LIVE_BYTES.fetch_sub(layout.size(), Ordering::Relaxed);
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn reset_alloc() {
    let live = LIVE_BYTES.load(Ordering::Relaxed);
    ALLOCATIONS.store(0, Ordering::Relaxed);
    BASELINE_BYTES.store(live, Ordering::Relaxed);
    PEAK_BYTES.store(live, Ordering::Relaxed);
}

/// Allocations and peak extra bytes since the last [`reset_alloc`].
fn alloc_stats() -> (usize, usize) {
    let peak = PEAK_BYTES.load(Ordering::Relaxed);
    let base = BASELINE_BYTES.load(Ordering::Relaxed);
    (ALLOCATIONS.load(Ordering::Relaxed), peak.saturating_sub(base))
}

// ---------------- Result tracking ----------------
#[derive(Serialize, Clone)]
struct BenchRecord {
    library: String,
    direction: String,
    size: usize,
    time_per_op_ns: f64,
    ops_per_sec: f64,
    allocations: usize,
    peak_bytes: usize,
}

#[derive(Serialize)]
struct BenchFile {
    date: String,
    runner: String,
    flags: String,
    results: Vec<BenchRecord>,
}

static RESULTS: Lazy<Mutex<Vec<BenchRecord>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Time `op` over `iters` runs while tracking allocations, recording the
/// first measurement of each benchmark.
fn measure(
    iters: u64,
    record: &mut Option<(&'static str, &'static str, usize)>,
    mut op: impl FnMut(),
) -> Duration {
    let mut total = Duration::ZERO;
    let mut alloc_total = 0;
    let mut peak = 0;
    for _ in 0..iters {
        reset_alloc();
        let start = Instant::now();
        op();
        total += start.elapsed();
        let (a, p) = alloc_stats();
        alloc_total += a;
        peak = peak.max(p);
    }
    if let Some((library, direction, size)) = record.take() {
        let t = total.as_secs_f64() / iters as f64;
        RESULTS.lock().unwrap().push(BenchRecord {
            library: library.into(),
            direction: direction.into(),
            size,
            time_per_op_ns: t * 1e9,
            ops_per_sec: 1.0 / t,
            allocations: alloc_total / iters as usize,
            peak_bytes: peak,
        });
    }
    total
}

fn bench_engine(c: &mut Criterion, name: &'static str, fft: &mut dyn AudioFftImpl, size: usize) {
    let mut group = c.benchmark_group(format!("real_{}", size));
    let input: Vec<f32> = (0..size).map(|i| (i % 64) as f32 / 64.0).collect();
    let mut re = vec![0.0; complex_size(size)];
    let mut im = vec![0.0; complex_size(size)];
    let mut output = vec![0.0; size];

    let mut record = Some((name, "forward", size));
    group.bench_function(BenchmarkId::new(format!("{name}/forward"), size), |b| {
        b.iter_custom(|iters| {
            measure(iters, &mut record, || {
                fft.fft(&input, &mut re, &mut im).unwrap();
            })
        });
    });

    let mut record = Some((name, "inverse", size));
    group.bench_function(BenchmarkId::new(format!("{name}/inverse"), size), |b| {
        b.iter_custom(|iters| {
            measure(iters, &mut record, || {
                fft.ifft(&mut output, &re, &im).unwrap();
            })
        });
    });
    group.finish();
}

fn bench_raw_realfft(c: &mut Criterion, size: usize) {
    let mut group = c.benchmark_group(format!("real_{}", size));
    let input: Vec<f32> = (0..size).map(|i| (i % 64) as f32 / 64.0).collect();
    let mut planner = RustRealFftPlanner::<f32>::new();
    let rfft = planner.plan_fft_forward(size);
    let mut in_data = input.clone();
    let mut out_data = rfft.make_output_vec();
    let mut scratch = rfft.make_scratch_vec();
    let mut record = Some(("realfft-raw", "forward", size));
    group.bench_function(BenchmarkId::new("realfft-raw/forward", size), |b| {
        b.iter_custom(|iters| {
            measure(iters, &mut record, || {
                in_data.copy_from_slice(&input);
                rfft.process_with_scratch(&mut in_data, &mut out_data, &mut scratch)
                    .unwrap();
            })
        });
    });
    group.finish();
}

fn save_results() {
    let file = BenchFile {
        date: chrono::Utc::now().to_rfc3339(),
        runner: env::var("RUNNER_NAME").unwrap_or_else(|_| "local".to_string()),
        flags: env::var("RUSTFLAGS").unwrap_or_default(),
        results: RESULTS.lock().unwrap().clone(),
    };
    let json = serde_json::to_string_pretty(&file).unwrap();
    fs::create_dir_all("benchmarks").unwrap();
    fs::write("benchmarks/latest.json", json).unwrap();
}

fn main_bench(c: &mut Criterion) {
    for size in (6..=16).map(|p| 1usize << p) {
        let mut ooura = OouraFft::with_size(size).unwrap();
        bench_engine(c, "ooura", &mut ooura, size);
        let mut backend = RealFftBackend::with_size(size).unwrap();
        bench_engine(c, "realfft-backend", &mut backend, size);
        bench_raw_realfft(c, size);
    }
    save_results();
}

criterion_group!(benches, main_bench);
criterion_main!(benches);
