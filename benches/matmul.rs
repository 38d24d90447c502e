//! Kernel comparison: naive vs unrolled vs staged pipeline.
//!
//! ```bash
//! cargo bench --bench matmul
//! cargo bench --bench matmul -- matmul_64x64
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use blockmm::naive::{matmul_naive, matmul_unrolled};
use blockmm::{matmult, Matrix};

/// Fixed seed keeps the data identical across runs, so results are
/// comparable over time.
fn random_matrix<const N: usize>(rng: &mut StdRng) -> Matrix<i16, N> {
    let data: Vec<i16> = (0..N * N).map(|_| rng.random_range(-100..=100)).collect();
    Matrix::from_vec(data).unwrap()
}

fn bench_size<const N: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("matmul_{}x{}", N, N));
    // 2 * N^3 multiply-adds per product.
    group.throughput(Throughput::Elements(2 * (N * N * N) as u64));

    let mut rng = StdRng::seed_from_u64(42);
    let a: Matrix<i16, N> = random_matrix(&mut rng);
    let b: Matrix<i16, N> = random_matrix(&mut rng);

    group.bench_function("naive", |bench| {
        bench.iter(|| black_box(matmul_naive(black_box(&a), black_box(&b))));
    });

    group.bench_function("unrolled", |bench| {
        bench.iter(|| black_box(matmul_unrolled(black_box(&a), black_box(&b))));
    });

    group.bench_function("pipeline", |bench| {
        bench.iter(|| black_box(matmult(black_box(&a), black_box(&b))));
    });

    group.finish();
}

fn all_benchmarks(c: &mut Criterion) {
    bench_size::<16>(c);
    bench_size::<64>(c);
    bench_size::<256>(c);
}

criterion_group!(benches, all_benchmarks);
criterion_main!(benches);
