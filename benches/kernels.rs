//! Per-tier kernel benchmarks.
//!
//! Every tier the host supports is measured side by side through
//! [`Dispatch::supported`], so one run compares Scalar, SSE2, SSE4.1 and AVX
//! on the same inputs.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use simdgeo::{batch, Dispatch, Matrix4, Quaternion, Vector3};

/// Batch lengths from L1-resident up to well past the parallel threshold.
const BATCH_SIZES: &[usize] = &[64, 1_024, 16_384, 262_144];

fn random_vectors(len: usize, seed: u64) -> Vec<Vector3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            Vector3::new(
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
            )
        })
        .collect()
}

fn projection() -> Matrix4 {
    let view = Matrix4::look_at(Vector3::new(0.0, 50.0, 400.0), Vector3::ZERO, Vector3::UP);
    Matrix4::perspective(1.0, 16.0 / 9.0, 0.1, 1_000.0) * view
}

fn bench_vector3(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector3");
    let a = Vector3::new(1.5, -2.0, 0.25);
    let b = Vector3::new(-0.5, 4.0, 3.0);

    for dispatch in Dispatch::supported() {
        let k = dispatch.vector3;
        let tier = dispatch.tier.name();
        group.bench_function(BenchmarkId::new("dot", tier), |bench| {
            bench.iter(|| (k.dot)(black_box(a), black_box(b)))
        });
        group.bench_function(BenchmarkId::new("cross", tier), |bench| {
            bench.iter(|| (k.cross)(black_box(a), black_box(b)))
        });
        group.bench_function(BenchmarkId::new("normalize", tier), |bench| {
            bench.iter(|| (k.normalize)(black_box(a)))
        });
    }
    group.finish();
}

fn bench_matrix4(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix4");
    let a = projection();
    let b = Matrix4::trs(
        Vector3::new(3.0, -1.0, 2.0),
        Quaternion::from_euler(0.3, 1.2, -0.4),
        Vector3::splat(1.5),
    );
    let p = Vector3::new(10.0, 5.0, -20.0);

    for dispatch in Dispatch::supported() {
        let k = dispatch.matrix4;
        let tier = dispatch.tier.name();
        group.bench_function(BenchmarkId::new("mul", tier), |bench| {
            bench.iter(|| (k.mul)(black_box(&a), black_box(&b)))
        });
        group.bench_function(BenchmarkId::new("transform_point", tier), |bench| {
            bench.iter(|| (k.transform_point)(black_box(&a), black_box(p)))
        });
        group.bench_function(BenchmarkId::new("inverse", tier), |bench| {
            bench.iter(|| (k.inverse)(black_box(&b)))
        });
    }
    group.finish();
}

fn bench_quaternion(c: &mut Criterion) {
    let mut group = c.benchmark_group("quaternion");
    let a = Quaternion::from_euler(0.1, 0.2, 0.3);
    let b = Quaternion::from_euler(-0.7, 1.1, 0.05);

    for dispatch in Dispatch::supported() {
        let k = dispatch.quaternion;
        let tier = dispatch.tier.name();
        group.bench_function(BenchmarkId::new("mul", tier), |bench| {
            bench.iter(|| (k.mul)(black_box(a), black_box(b)))
        });
        group.bench_function(BenchmarkId::new("normalize", tier), |bench| {
            bench.iter(|| (k.normalize)(black_box(a)))
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let m = projection();

    for &len in BATCH_SIZES {
        let a = random_vectors(len, 1);
        let b = random_vectors(len, 2);
        let mut out = vec![Vector3::ZERO; len];
        group.throughput(Throughput::Elements(len as u64));

        for dispatch in Dispatch::supported() {
            let k = dispatch.batch;
            let tier = dispatch.tier.name();
            group.bench_with_input(BenchmarkId::new(format!("add/{tier}"), len), &len, |bench, _| {
                bench.iter(|| (k.add)(black_box(&a), black_box(&b), &mut out))
            });
            group.bench_with_input(
                BenchmarkId::new(format!("transform/{tier}"), len),
                &len,
                |bench, _| bench.iter(|| (k.transform)(black_box(&m), black_box(&a), &mut out)),
            );
        }

        simdgeo::initialize();
        group.bench_with_input(BenchmarkId::new("par_transform", len), &len, |bench, _| {
            bench.iter(|| batch::par_transform_batch(black_box(&m), black_box(&a), &mut out))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_vector3, bench_matrix4, bench_quaternion, bench_batch);
criterion_main!(benches);
