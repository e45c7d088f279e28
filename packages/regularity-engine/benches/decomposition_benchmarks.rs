//! Benchmarks for the decomposition driver's main entry point across
//! the terminal recognizer shapes it's expected to reach most often:
//! series-parallel reduction, direct graphicness, R10 recognition, and
//! a one-sum split of the two.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use regularity_engine::{parse_triplets, RegularParams, SparseMatrix};

fn identity_matrix(n: usize) -> SparseMatrix {
    let mut spec = format!("{n} {n}\n");
    for i in 0..n {
        spec.push_str(&format!("{i} {i} 1\n"));
    }
    parse_triplets(&spec, false).unwrap()
}

fn wheel_incidence(spokes: usize) -> SparseMatrix {
    // A wheel graph's edge-vertex incidence matrix: `spokes` outer
    // vertices in a cycle, each also joined to a hub vertex.
    let rows = spokes + 1;
    let hub = spokes;
    let mut cols = Vec::new();
    for i in 0..spokes {
        cols.push((i, (i + 1) % spokes));
        cols.push((i, hub));
    }
    let mut spec = format!("{rows} {}\n", cols.len());
    for (c, &(a, b)) in cols.iter().enumerate() {
        spec.push_str(&format!("{a} {c} 1\n{b} {c} 1\n"));
    }
    parse_triplets(&spec, false).unwrap()
}

fn r10_standard() -> SparseMatrix {
    let mut spec = String::from("5 5\n");
    for r in 0..5usize {
        for &offset in &[0usize, 1, 4] {
            spec.push_str(&format!("{} {} 1\n", r, (r + offset) % 5));
        }
    }
    parse_triplets(&spec, false).unwrap()
}

fn bench_series_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("series_parallel_identity");
    for &n in &[8usize, 32, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let matrix = identity_matrix(n);
                let outcome = regularity_engine::test(
                    black_box(matrix),
                    false,
                    RegularParams::default(),
                    None,
                    0.0,
                    false,
                    false,
                )
                .unwrap();
                black_box(outcome.is_regular)
            });
        });
    }
    group.finish();
}

fn bench_direct_graphicness(c: &mut Criterion) {
    let mut group = c.benchmark_group("direct_graphicness_wheel");
    for &spokes in &[4usize, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(spokes), &spokes, |b, &spokes| {
            b.iter(|| {
                let matrix = wheel_incidence(spokes);
                let outcome = regularity_engine::test(
                    black_box(matrix),
                    false,
                    RegularParams::default().with_direct_graphicness(true),
                    None,
                    0.0,
                    false,
                    false,
                )
                .unwrap();
                black_box(outcome.is_regular)
            });
        });
    }
    group.finish();
}

fn bench_r10_recognition(c: &mut Criterion) {
    c.bench_function("r10_recognition", |b| {
        b.iter(|| {
            let matrix = r10_standard();
            let outcome = regularity_engine::test(
                black_box(matrix),
                false,
                RegularParams::default(),
                None,
                0.0,
                false,
                false,
            )
            .unwrap();
            black_box(outcome.is_regular)
        });
    });
}

criterion_group!(
    benches,
    bench_series_parallel,
    bench_direct_graphicness,
    bench_r10_recognition,
);
criterion_main!(benches);
