//! # Component Storage
//!
//! Two-level storage for components:
//! - The outer map goes from a single-bit tag to its bucket
//! - Each bucket maps entity ids to component values behind its own lock
//!
//! Writes to an existing bucket only read-lock the outer map long enough to
//! clone the bucket handle. The outer map is write-locked only when a tag is
//! seen for the first time.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::component::ComponentValue;
use super::entity::EntityId;
use super::tag::ComponentTag;

/// Storage for all components registered under one single-bit tag.
#[derive(Default)]
pub(super) struct ComponentBucket {
    list: RwLock<HashMap<EntityId, ComponentValue>>,
}

impl ComponentBucket {
    /// Inserts or replaces the component for `id`.
    pub(super) fn insert(&self, id: EntityId, value: ComponentValue) {
        self.list.write().insert(id, value);
    }

    /// Returns the component for `id`.
    pub(super) fn get(&self, id: EntityId) -> Option<ComponentValue> {
        self.list.read().get(&id).cloned()
    }

    /// Snapshot of every component in the bucket, in no particular order.
    pub(super) fn values(&self) -> Vec<ComponentValue> {
        self.list.read().values().cloned().collect()
    }

    /// Number of components in the bucket.
    pub(super) fn len(&self) -> usize {
        self.list.read().len()
    }

    /// Holds the bucket as a writer would.
    #[cfg(test)]
    pub(super) fn lock_for_write(&self) -> parking_lot::RwLockWriteGuard<'_, HashMap<EntityId, ComponentValue>> {
        self.list.write()
    }
}

/// Tag → bucket index.
#[derive(Default)]
pub(super) struct ComponentIndex {
    buckets: RwLock<HashMap<ComponentTag, Arc<ComponentBucket>>>,
}

impl ComponentIndex {
    /// Returns the bucket for a single-bit tag, if it exists.
    pub(super) fn bucket(&self, tag: ComponentTag) -> Option<Arc<ComponentBucket>> {
        self.buckets.read().get(&tag).cloned()
    }

    /// Number of buckets created so far.
    pub(super) fn bucket_count(&self) -> usize {
        self.buckets.read().len()
    }

    /// Stores `value` for `id` under every single-bit flag of `tag`.
    pub(super) fn insert(&self, id: EntityId, tag: ComponentTag, value: &ComponentValue) {
        let mut existing = Vec::new();
        let mut missing = Vec::new();
        {
            let buckets = self.buckets.read();
            for flag in tag.flags() {
                match buckets.get(&flag) {
                    Some(bucket) => existing.push(Arc::clone(bucket)),
                    None => missing.push(flag),
                }
            }
        }

        for bucket in existing {
            bucket.insert(id, Arc::clone(value));
        }

        if missing.is_empty() {
            return;
        }

        // Another writer may have created the bucket since the read above;
        // the entry API keeps whichever got there first.
        let mut buckets = self.buckets.write();
        for flag in missing {
            let bucket = buckets.entry(flag).or_insert_with(|| {
                tracing::debug!(tag = %flag, "creating component bucket");
                Arc::new(ComponentBucket::default())
            });
            bucket.insert(id, Arc::clone(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::component_value;

    #[test]
    fn test_insert_creates_one_bucket_per_flag() {
        let index = ComponentIndex::default();
        let id = EntityId::from_raw(1);
        let tag = ComponentTag::bit(0) | ComponentTag::bit(3);

        index.insert(id, tag, &component_value(5_u8));

        assert_eq!(index.bucket_count(), 2);
        assert!(index.bucket(ComponentTag::bit(0)).is_some());
        assert!(index.bucket(ComponentTag::bit(3)).is_some());
        assert!(index.bucket(tag).is_none());
    }

    #[test]
    fn test_insert_overwrites() {
        let index = ComponentIndex::default();
        let id = EntityId::from_raw(1);
        let tag = ComponentTag::bit(2);

        index.insert(id, tag, &component_value(1_u32));
        index.insert(id, tag, &component_value(2_u32));

        let bucket = index.bucket(tag).unwrap();
        assert_eq!(bucket.len(), 1);
        let value = bucket.get(id).unwrap();
        assert_eq!(value.downcast_ref::<u32>(), Some(&2));
    }

    #[test]
    fn test_empty_tag_stores_nothing() {
        let index = ComponentIndex::default();
        index.insert(EntityId::from_raw(1), ComponentTag::NONE, &component_value(()));
        assert_eq!(index.bucket_count(), 0);
    }
}
