//! Broad and narrow phase benchmarks.
//!
//! Run with: `cargo bench --package tessera_physics`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera_physics::{resolve_colliding_circles, Aabb, Circle, Polygon, UniformGrid};

fn bench_candidate_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("uniform_grid");

    for count in [100_usize, 1_000, 5_000] {
        let side = (count as f64).sqrt().ceil();
        let boxes: Vec<Aabb> = (0..count)
            .map(|i| {
                let x = (i as f64 % side) * 9.0 + 5.0;
                let y = (i as f64 / side).floor() * 9.0 + 5.0;
                Aabb::from_center_size(x, y, 10.0, 10.0)
            })
            .collect();
        let extent = side * 9.0 + 10.0;

        group.bench_with_input(BenchmarkId::new("rebuild_and_pair", count), &boxes, |b, boxes| {
            let mut grid = UniformGrid::covering(extent, extent, 32.0).unwrap();
            b.iter(|| {
                grid.clear();
                for (i, bounds) in boxes.iter().enumerate() {
                    grid.insert(i, *bounds);
                }
                black_box(grid.candidate_pairs().len())
            });
        });
    }

    group.finish();
}

fn bench_narrow_phase(c: &mut Criterion) {
    c.bench_function("resolve_colliding_circles", |b| {
        b.iter(|| {
            let mut a = Circle::new(0.0, 0.0, 5.0);
            let mut other = Circle::new(black_box(6.0), 1.0, 5.0);
            black_box(resolve_colliding_circles(&mut a, &mut other))
        });
    });

    let octagon = Polygon::regular(0.0, 0.0, 10.0, 8);
    c.bench_function("polygon_hit_test", |b| {
        b.iter(|| black_box(octagon.hit_test(black_box(3.0), black_box(4.0))));
    });
}

criterion_group!(benches, bench_candidate_pairs, bench_narrow_phase);
criterion_main!(benches);
