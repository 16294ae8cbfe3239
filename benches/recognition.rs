//! Benchmarks for the recognition algorithms on the symbolic backend.
//!
//! This suite measures the crushing worklist and the recognizers built on it:
//!
//! 1. **Prime decomposition**: `summands()` on connected sums of growing length
//! 2. **Irreducibility**: the early-exit path on reducible inputs
//! 3. **Sphere recognition**: homology spheres that need crushing
//! 4. **Bounded recognizers**: solid torus and compressing disc searches
//!
//! Each iteration starts from a fresh clone so that cached answers never
//! short-circuit the measured work.

#![allow(missing_docs)] // Criterion macros generate undocumented functions

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use crushing::prelude::*;
use std::hint::black_box;

/// A connected sum cycling through kept and erased summands.
fn mixed_sum(count: usize) -> ModelTriangulation {
    let palette = [
        Piece::Lens { p: 5, q: 2 },
        Piece::SphereBundle,
        Piece::Lens { p: 2, q: 1 },
        Piece::poincare(),
        Piece::Lens { p: 3, q: 1 },
    ];
    let pieces: Vec<Piece> = palette.iter().cycle().take(count).cloned().collect();
    ModelTriangulation::connected_sum(&pieces)
        .unwrap_or_else(|err| panic!("benchmark pieces are valid: {err}"))
}

fn bench_summands(c: &mut Criterion) {
    let mut group = c.benchmark_group("summands");
    for count in [1_usize, 4, 16, 64] {
        let tri = mixed_sum(count).with_vertices(count + 1);
        group.throughput(Throughput::Elements(u64::try_from(count).unwrap_or(u64::MAX)));
        group.bench_with_input(BenchmarkId::from_parameter(count), &tri, |b, tri| {
            b.iter_batched(
                || tri.clone_without_cache(),
                |fresh| black_box(fresh.summands()),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_irreducible(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_irreducible");
    for count in [2_usize, 16, 64] {
        let tri = mixed_sum(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &tri, |b, tri| {
            b.iter_batched(
                || tri.clone_without_cache(),
                |fresh| black_box(fresh.is_irreducible()),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_sphere");
    let stubborn = ModelTriangulation::three_sphere()
        .with_vertices(8)
        .with_stubborn_presentation();
    group.bench_function("stubborn_three_sphere", |b| {
        b.iter_batched(
            || stubborn.clone_without_cache(),
            |fresh| black_box(fresh.is_sphere()),
            BatchSize::SmallInput,
        );
    });
    let poincare_sum =
        ModelTriangulation::connected_sum(&[Piece::poincare(), Piece::poincare()])
            .unwrap_or_else(|err| panic!("benchmark pieces are valid: {err}"));
    group.bench_function("poincare_sum", |b| {
        b.iter_batched(
            || poincare_sum.clone_without_cache(),
            |fresh| black_box(fresh.is_sphere()),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_bounded(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded");
    let solid_torus = ModelTriangulation::solid_torus()
        .with_vertices(4)
        .with_trivial_discs(3);
    group.bench_function("is_solid_torus", |b| {
        b.iter_batched(
            || solid_torus.clone_without_cache(),
            |fresh| black_box(fresh.is_solid_torus()),
            BatchSize::SmallInput,
        );
    });
    for genus in [2_usize, 8, 32] {
        let handlebody = ModelTriangulation::handlebody(genus);
        group.bench_with_input(
            BenchmarkId::new("has_compressing_disc", genus),
            &handlebody,
            |b, tri| {
                b.iter_batched(
                    || tri.clone_without_cache(),
                    |fresh| black_box(fresh.has_compressing_disc()),
                    BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_summands,
    bench_irreducible,
    bench_sphere,
    bench_bounded
);
criterion_main!(benches);
