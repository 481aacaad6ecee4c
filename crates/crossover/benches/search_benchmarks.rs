//! Benchmarks for the pairwise crossover search.
//!
//! Run with: cargo bench --package crossover --bench search_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use crossover::{
    find_crossover, find_crossover_exhaustive, location_time_distance_km, CrossoverConfig,
    DatasetId, Sample, Track,
};
use test_utils::{random_walk_track, RawTrack};

fn to_track(id: &str, raw: &RawTrack) -> Track {
    Track::from_raw(
        DatasetId::parse(id).unwrap(),
        &raw.lons,
        &raw.lats,
        &raw.times,
        &raw.ssts,
        &raw.fco2s,
    )
    .unwrap()
}

// =============================================================================
// METRIC BENCHMARKS
// =============================================================================

fn bench_metric(c: &mut Criterion) {
    let config = CrossoverConfig::default();
    let p1 = Sample {
        lon: -70.0,
        lat: 40.0,
        time: 0.0,
        sst: 15.0,
        fco2: 380.0,
    };
    let p2 = Sample {
        lon: -69.5,
        lat: 40.3,
        time: 3600.0,
        sst: 15.1,
        fco2: 381.0,
    };

    c.bench_function("location_time_distance_km", |b| {
        b.iter(|| location_time_distance_km(black_box(&p1), black_box(&p2), &config))
    });
}

// =============================================================================
// PAIRWISE SEARCH BENCHMARKS
// =============================================================================

fn bench_search(c: &mut Criterion) {
    let config = CrossoverConfig::default();
    let mut group = c.benchmark_group("pairwise_search");

    for rows in [500usize, 2_000, 8_000] {
        let a = to_track("AAAA20100101", &random_walk_track(1, rows));
        let b = to_track("BBBB20100101", &random_walk_track(2, rows));
        group.throughput(Throughput::Elements((rows * rows) as u64));

        group.bench_with_input(BenchmarkId::new("pruned", rows), &rows, |bench, _| {
            bench.iter(|| find_crossover(black_box(&a), black_box(&b), &config))
        });

        if rows <= 2_000 {
            group.bench_with_input(BenchmarkId::new("exhaustive", rows), &rows, |bench, _| {
                bench.iter(|| find_crossover_exhaustive(black_box(&a), black_box(&b), &config))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_metric, bench_search);
criterion_main!(benches);
