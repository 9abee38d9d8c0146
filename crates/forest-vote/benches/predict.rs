//! Forest voting benchmarks.
//!
//! Single-row latency by forest size, and thread scaling for one large forest.

use std::num::NonZeroUsize;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use forest_vote::testing::{random_model, random_rows};
use forest_vote::{Execution, ForestPredictor};

const N_FEATURES: usize = 16;
const N_CLASSES: usize = 4;

// =============================================================================
// Forest Size
// =============================================================================

fn bench_forest_size(c: &mut Criterion) {
    let rows = random_rows(7, 256, N_FEATURES);

    let mut group = c.benchmark_group("predict/forest_size");
    group.throughput(Throughput::Elements(rows.len() as u64));

    for n_trees in [10, 100, 500] {
        let model = random_model(42, n_trees, N_FEATURES, N_CLASSES);
        let predictor = ForestPredictor::sequential(&model);

        group.bench_with_input(BenchmarkId::new("sequential", n_trees), &rows, |b, rows| {
            b.iter(|| {
                for row in rows {
                    black_box(predictor.predict_index(black_box(row)).ok());
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// Thread Scaling
// =============================================================================

fn bench_thread_scaling(c: &mut Criterion) {
    let model = random_model(42, 1_000, N_FEATURES, N_CLASSES);
    let rows = random_rows(7, 64, N_FEATURES);

    let mut group = c.benchmark_group("predict/thread_scaling");
    group.throughput(Throughput::Elements(rows.len() as u64));

    for n_threads in [1, 2, 4, 8] {
        let execution = Execution::from_threads(NonZeroUsize::new(n_threads)).unwrap();
        let predictor = ForestPredictor::with_execution(&model, execution, 1);

        group.bench_with_input(BenchmarkId::new("per_row", n_threads), &rows, |b, rows| {
            b.iter(|| {
                for row in rows {
                    black_box(predictor.predict_votes(black_box(row)).ok());
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("batch", n_threads), &rows, |b, rows| {
            b.iter(|| black_box(predictor.predict_batch(black_box(rows))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_forest_size, bench_thread_scaling);
criterion_main!(benches);
