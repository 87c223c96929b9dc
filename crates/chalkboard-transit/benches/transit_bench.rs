//! Benchmarks for the transit network
//!
//! Measures:
//! - Fastest-route queries of increasing hop count
//! - Map rendering with and without a highlighted route

use chalkboard_transit::TransitNetwork;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Benchmark route queries
fn bench_shortest_path(c: &mut Criterion) {
    let network = TransitNetwork::metro_manila();
    let mut group = c.benchmark_group("shortest_path");

    for (src, dst) in [
        ("Recto", "Legarda"),
        ("Baclaran", "Magallanes"),
        ("Roosevelt", "Katipunan"),
        ("North Avenue", "Baclaran"),
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{src}->{dst}")),
            &(src, dst),
            |b, &(src, dst)| b.iter(|| network.shortest_path(black_box(src), black_box(dst))),
        );
    }
    group.finish();
}

/// Benchmark map rendering
fn bench_render(c: &mut Criterion) {
    let network = TransitNetwork::metro_manila();
    let route = network.shortest_path("Roosevelt", "Katipunan");
    let mut group = c.benchmark_group("render");

    group.bench_function("plain", |b| b.iter(|| network.render()));
    group.bench_function("with_route", |b| {
        b.iter(|| network.render_with_path(black_box(&route.path)))
    });
    group.finish();
}

criterion_group!(benches, bench_shortest_path, bench_render);
criterion_main!(benches);
