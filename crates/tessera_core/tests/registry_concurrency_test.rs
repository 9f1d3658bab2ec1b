//! Concurrency stress tests for the registry.
//!
//! Writers add components on distinct entities under the same tag while
//! readers query; afterwards every write must be visible.

use std::sync::Arc;
use std::thread;

use tessera_core::{ComponentTag, EntityId, Registry};

const BODY: ComponentTag = ComponentTag::bit(0);
const COLLIDER: ComponentTag = ComponentTag::bit(1);
const COLOR: ComponentTag = ComponentTag::bit(5);

#[test]
fn test_concurrent_writes_are_not_lost() {
    let registry = Arc::new(Registry::new());
    let writers = 8;
    let per_writer = 250;

    let handles: Vec<_> = (0..writers)
        .map(|w| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let mut ids = Vec::with_capacity(per_writer);
                for i in 0..per_writer {
                    let id = registry.create().id();
                    assert!(registry.add_component(id, BODY | COLLIDER, (w, i)));
                    ids.push(id);
                }
                ids
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..100 {
                    for entity in registry.entities(&[BODY, COLLIDER]) {
                        // Mask is only updated after the buckets, so a
                        // visible entity always has its component.
                        assert!(entity.component(BODY).is_some());
                        assert!(entity.component(COLLIDER).is_some());
                    }
                    let _ = registry.components(BODY);
                }
            })
        })
        .collect();

    let mut written: Vec<EntityId> = Vec::new();
    for h in handles {
        written.extend(h.join().unwrap());
    }
    for r in readers {
        r.join().unwrap();
    }

    let total = writers * per_writer;
    assert_eq!(written.len(), total);
    assert_eq!(registry.entities(&[BODY]).len(), total);
    assert_eq!(registry.entities(&[BODY, COLLIDER]).len(), total);
    assert_eq!(registry.components(COLLIDER).len(), total);

    for id in written {
        assert!(registry.component_as::<(usize, usize)>(id, BODY).is_some());
    }
}

#[test]
fn test_concurrent_first_writes_to_new_tags() {
    // Every thread races to create the same buckets.
    let registry = Arc::new(Registry::new());
    let ids: Vec<_> = (0..64).map(|_| registry.create().id()).collect();
    let ids = Arc::new(ids);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let registry = Arc::clone(&registry);
            let ids = Arc::clone(&ids);
            thread::spawn(move || {
                for (i, &id) in ids.iter().enumerate().filter(|(i, _)| i % 8 == t) {
                    let tag = ComponentTag::bit((i % 4) as u32 + 10) | COLOR;
                    registry.add_component(id, tag, i);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(registry.components(COLOR).len(), 64);
    for bit in 10..14 {
        assert_eq!(registry.components(ComponentTag::bit(bit)).len(), 16);
    }
}

#[test]
fn test_reads_of_one_tag_during_writes_of_another() {
    let registry = Arc::new(Registry::new());
    let stable = registry.create().id();
    registry.add_component(stable, COLOR, [255_u8, 0, 0, 255]);

    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for i in 0..1_000_u32 {
                let id = registry.create().id();
                registry.add_component(id, BODY, i);
            }
        })
    };

    for _ in 0..1_000 {
        let color = registry.component_as::<[u8; 4]>(stable, COLOR).unwrap();
        assert_eq!(*color, [255, 0, 0, 255]);
    }

    writer.join().unwrap();
    assert_eq!(registry.entities(&[BODY]).len(), 1_000);
}
