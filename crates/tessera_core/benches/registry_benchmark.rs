//! # Registry Benchmark
//!
//! Measures the hot paths a simulation step hits every frame:
//! - `entities(&[BODY, COLLIDER])` over a populated registry
//! - `add_component` into an existing bucket
//!
//! Run with: `cargo bench --package tessera_core`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera_core::{ComponentTag, Registry};

const BODY: ComponentTag = ComponentTag::bit(0);
const COLLIDER: ComponentTag = ComponentTag::bit(1);
const COLOR: ComponentTag = ComponentTag::bit(2);

fn populated(count: usize) -> Registry {
    let registry = Registry::new();
    for i in 0..count {
        let entity = registry.create();
        entity.add_component(BODY | COLLIDER, i as f64);
        if i % 2 == 0 {
            entity.add_component(COLOR, [0_u8; 4]);
        }
    }
    registry
}

fn bench_entities_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("entities_query");

    for count in [100, 1_000, 10_000] {
        let registry = populated(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(registry.entities(&[BODY, COLOR]).len()));
        });
    }

    group.finish();
}

fn bench_add_component(c: &mut Criterion) {
    let registry = populated(1_000);
    let ids: Vec<_> = registry.entities(&[]).iter().map(|e| e.id()).collect();

    c.bench_function("add_component_existing_bucket", |b| {
        let mut i = 0;
        b.iter(|| {
            let id = ids[i % ids.len()];
            i += 1;
            black_box(registry.add_component(id, BODY, i as f64))
        });
    });
}

criterion_group!(benches, bench_entities_query, bench_add_component);
criterion_main!(benches);
