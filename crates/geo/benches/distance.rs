//! Benchmarks for geo crate distance calculations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use thelewale_geo::{haversine_distance, Coordinate, PlaceQuery, RadiusFilter};

fn create_test_points(count: usize) -> Vec<Option<Coordinate>> {
    (0..count)
        .map(|i| {
            // Every tenth stall has no stored location
            if i % 10 == 0 {
                return None;
            }
            // Grid around Delhi
            let lat = 28.0 + (i as f64 * 0.01) % 1.5;
            let lng = 76.5 + (i as f64 * 0.01) % 1.5;
            Some(Coordinate::new(lat, lng))
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let delhi = Coordinate::new(28.6139, 77.2090);
    let mumbai = Coordinate::new(19.0760, 72.8777);

    c.bench_function("haversine_single", |b| {
        b.iter(|| haversine_distance(black_box(&delhi), black_box(&mumbai)))
    });
}

fn bench_radius_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("radius_filter");
    let user = Coordinate::new(28.6139, 77.2090);
    let filter = RadiusFilter::default();

    for size in [10, 100, 1000, 10000].iter() {
        let points = create_test_points(*size);

        group.bench_with_input(BenchmarkId::new("apply", size), size, |b, _| {
            b.iter(|| filter.apply(black_box(&user), black_box(points.clone())))
        });
    }

    group.finish();
}

fn bench_place_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_parsing");

    group.bench_function("lat_lng", |b| {
        b.iter(|| PlaceQuery::parse(black_box("Lat: 28.6139, Lng: 77.2090")))
    });

    group.bench_function("named", |b| {
        b.iter(|| PlaceQuery::parse(black_box("Chandni Chowk, Delhi")))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_distance,
    bench_radius_filter,
    bench_place_parsing
);
criterion_main!(benches);
