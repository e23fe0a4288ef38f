//! Criterion micro-benchmarks for operator assembly and application.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rivulet_core::{Domain, EquationCoefficients};
use rivulet_grid::{BoundaryPolicy, GridSpec};
use rivulet_stencil::StencilAssembler;
use rivulet_test_utils::profiles::random_profile;

/// Benchmark: assemble a 10K-cell Lax-Friedrichs operator.
fn bench_assemble_lax_friedrichs_10k(c: &mut Criterion) {
    let grid = GridSpec::cells(Domain::new(0.0, 1000.0).unwrap(), 10_000).unwrap();
    let coeffs = EquationCoefficients::new(3.0, 0.001, 0.0).unwrap();

    c.bench_function("assemble_lax_friedrichs_10k", |b| {
        b.iter(|| {
            let m = StencilAssembler::lax_friedrichs(
                &coeffs,
                &grid,
                black_box(0.01),
                BoundaryPolicy::Periodic,
            );
            black_box(m);
        });
    });
}

/// Benchmark: assemble a 10K-node FTCS operator.
fn bench_assemble_ftcs_10k(c: &mut Criterion) {
    let grid = GridSpec::interior(Domain::new(0.0, 1000.0).unwrap(), 10_000).unwrap();
    let coeffs = EquationCoefficients::new(1.0, 5.0, 0.0).unwrap();

    c.bench_function("assemble_ftcs_10k", |b| {
        b.iter(|| {
            let m = StencilAssembler::ftcs(&coeffs, &grid, black_box(1e-3));
            black_box(m);
        });
    });
}

/// Benchmark: one banded matrix-vector product on 100K cells.
fn bench_apply_100k(c: &mut Criterion) {
    let n = 100_000;
    let grid = GridSpec::cells(Domain::new(0.0, 1000.0).unwrap(), n).unwrap();
    let coeffs = EquationCoefficients::new(3.0, 0.001, 0.0).unwrap();
    let m = StencilAssembler::lax_friedrichs(&coeffs, &grid, 0.001, BoundaryPolicy::OneSided);
    let x = random_profile(42, n, 0.0..10.0);
    let mut out = vec![0.0; n];

    c.bench_function("apply_100k", |b| {
        b.iter(|| {
            m.apply(black_box(&x), &mut out);
            black_box(&out);
        });
    });
}

criterion_group!(
    benches,
    bench_assemble_lax_friedrichs_10k,
    bench_assemble_ftcs_10k,
    bench_apply_100k
);
criterion_main!(benches);
