use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use geo::geometry::{Coord, Point};
use terrain::{sample_path, PathModel};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

const CIVITAVECCHIA: Point = Point(Coord {
    x: 11.796718,
    y: 42.087076,
});
const SAN_BENEDETTO_DEL_TRONTO: Point = Point(Coord {
    x: 13.888322,
    y: 42.947266,
});

fn path_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Path Sampling");

    for n in [20, 100, 1_000] {
        for (name, model) in [
            ("geodesic", PathModel::Geodesic),
            ("haversine", PathModel::Haversine),
        ] {
            group.bench_with_input(BenchmarkId::new(name, n), &n, |b, &n| {
                b.iter(|| {
                    sample_path(CIVITAVECCHIA, SAN_BENEDETTO_DEL_TRONTO, n, model, false).unwrap()
                })
            });
        }
    }
}

criterion_group!(benches, path_sampling);
criterion_main!(benches);
