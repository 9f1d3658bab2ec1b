//! # Registry
//!
//! The central container mapping entities to their components.
//!
//! ## Indexes
//!
//! ```text
//! entities:   EntityId ──► record (tag mask, or a self-contained Container)
//! components: tag bit  ──► bucket ──► EntityId ──► component value
//! ```
//!
//! Every id present in a bucket is also present in the entity index: a
//! component can only be added through an id the registry handed out.
//!
//! ## Locking
//!
//! | operation            | locks taken                                         |
//! |----------------------|-----------------------------------------------------|
//! | `create`/`register`  | entity index (write)                                |
//! | `entity`/`entities`  | entity index (read)                                 |
//! | `add_component`      | touched buckets, then entity index (read)           |
//! | `component(s)`       | entity index (read) + one bucket (read)             |
//!
//! The entity index is write-locked only by `create` and `register`. Tag
//! masks are atomics updated under its read lock, so a write to one tag never
//! waits on readers of another.
//!
//! No lock is held while another is acquired, except the outer bucket map
//! while a brand-new bucket receives its first value. Containers are always
//! called with no registry lock held.

use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::component::{component_value, downcast, ComponentValue, Container};
use super::entity::{Entity, EntityId, IdGenerator};
use super::storage::ComponentIndex;
use super::tag::ComponentTag;

/// What the entity index knows about one entity.
enum EntityRecord {
    /// Components live in the registry's buckets; `tags` holds the bits of
    /// every tag ever added.
    Tracked { tags: AtomicU64 },
    /// Components live in the container itself.
    Contained(Arc<dyn Container>),
}

impl EntityRecord {
    fn snapshot(&self) -> RecordSnapshot {
        match self {
            Self::Tracked { tags } => {
                RecordSnapshot::Tracked(ComponentTag::from_bits(tags.load(Ordering::Acquire)))
            }
            Self::Contained(container) => RecordSnapshot::Contained(Arc::clone(container)),
        }
    }
}

/// Copy of a record that can be inspected after the entity index is
/// released.
enum RecordSnapshot {
    Tracked(ComponentTag),
    Contained(Arc<dyn Container>),
}

impl RecordSnapshot {
    fn has_all(&self, tags: &[ComponentTag]) -> bool {
        match self {
            Self::Tracked(mask) => tags.iter().all(|&t| mask.contains(t)),
            Self::Contained(container) => tags.iter().all(|&t| container.has_component(t)),
        }
    }
}

/// Tag-indexed component store.
///
/// All operations are total: unknown ids and tags produce `None`, `false` or
/// an empty list. The registry is `Send + Sync`; share it with `Arc` to read
/// components from one thread while another writes them.
///
/// # Example
///
/// ```rust
/// use tessera_core::{ComponentTag, Registry};
///
/// const POSITION: ComponentTag = ComponentTag::bit(0);
///
/// let registry = Registry::new();
/// let id = registry.create().id();
/// registry.add_component(id, POSITION, (1.0_f64, 2.0_f64));
///
/// let pos = registry.component_as::<(f64, f64)>(id, POSITION).unwrap();
/// assert_eq!(*pos, (1.0, 2.0));
/// ```
pub struct Registry {
    ids: Arc<IdGenerator>,
    entities: RwLock<HashMap<EntityId, EntityRecord>>,
    components: ComponentIndex,
}

impl Registry {
    /// Initial capacity of the entity index.
    const INITIAL_CAPACITY: usize = 64;

    /// Creates an empty registry with its own id sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(Arc::new(IdGenerator::new()))
    }

    /// Creates an empty registry drawing ids from a shared generator.
    #[must_use]
    pub fn with_generator(ids: Arc<IdGenerator>) -> Self {
        Self {
            ids,
            entities: RwLock::new(HashMap::with_capacity(Self::INITIAL_CAPACITY)),
            components: ComponentIndex::default(),
        }
    }

    /// Returns the id generator backing this registry.
    #[must_use]
    pub fn id_generator(&self) -> &Arc<IdGenerator> {
        &self.ids
    }

    /// Number of entities (created and registered).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.read().len()
    }

    /// Returns `true` when no entity exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.read().is_empty()
    }

    /// Returns `true` when `id` belongs to this registry.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.read().contains_key(&id)
    }

    /// Allocates a new entity without components.
    pub fn create(&self) -> Entity<'_> {
        let id = self.ids.next_id();
        self.entities
            .write()
            .insert(id, EntityRecord::Tracked { tags: AtomicU64::new(0) });
        tracing::trace!(%id, "entity created");
        Entity::new(self, id)
    }

    /// Gives a self-contained component container an id.
    ///
    /// The container keeps answering for its own components; nothing is
    /// copied into the registry's buckets, so [`Registry::components`] does
    /// not see them.
    pub fn register(&self, container: Arc<dyn Container>) -> Entity<'_> {
        let id = self.ids.next_id();
        self.entities
            .write()
            .insert(id, EntityRecord::Contained(container));
        tracing::trace!(%id, "container registered");
        Entity::new(self, id)
    }

    /// Returns the handle for `id`, or `None` when the id is unknown.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<Entity<'_>> {
        self.contains(id).then(|| Entity::new(self, id))
    }

    /// Returns every entity that has a component for each of `tags`.
    ///
    /// An empty slice returns all entities. Order is unspecified.
    #[must_use]
    pub fn entities(&self, tags: &[ComponentTag]) -> Vec<Entity<'_>> {
        let snapshots: Vec<_> = self
            .entities
            .read()
            .iter()
            .map(|(&id, record)| (id, record.snapshot()))
            .collect();
        snapshots
            .into_iter()
            .filter(|(_, record)| record.has_all(tags))
            .map(|(id, _)| Entity::new(self, id))
            .collect()
    }

    /// Returns `true` when entity `id` has a component for every bit of `tag`.
    #[must_use]
    pub fn has_component(&self, id: EntityId, tag: ComponentTag) -> bool {
        let snapshot = self.entities.read().get(&id).map(EntityRecord::snapshot);
        snapshot.is_some_and(|record| record.has_all(&[tag]))
    }

    /// Adds `value` to entity `id` under every bit of `tag`, replacing any
    /// previous value for those bits.
    ///
    /// Returns `false` (and stores nothing) when `id` is unknown.
    pub fn add_component<T: Any + Send + Sync>(&self, id: EntityId, tag: ComponentTag, value: T) -> bool {
        self.add_component_value(id, tag, component_value(value))
    }

    /// Type-erased variant of [`Registry::add_component`].
    pub fn add_component_value(&self, id: EntityId, tag: ComponentTag, value: ComponentValue) -> bool {
        let container = match self.entities.read().get(&id) {
            None => return false,
            Some(EntityRecord::Contained(container)) => Some(Arc::clone(container)),
            Some(EntityRecord::Tracked { .. }) => None,
        };

        if let Some(container) = container {
            container.add_component(tag, value);
            return true;
        }

        // Buckets first, mask second: a reader that sees the tag in the mask
        // always finds the component.
        self.components.insert(id, tag, &value);
        if let Some(EntityRecord::Tracked { tags }) = self.entities.read().get(&id) {
            tags.fetch_or(tag.bits(), Ordering::Release);
        }
        true
    }

    /// Returns the component of entity `id` stored under the single-bit
    /// `tag`.
    ///
    /// Composite tags have no bucket of their own and yield `None` for
    /// registry-tracked entities; containers decide for themselves.
    #[must_use]
    pub fn component(&self, id: EntityId, tag: ComponentTag) -> Option<ComponentValue> {
        let container = match self.entities.read().get(&id)? {
            EntityRecord::Contained(container) => Some(Arc::clone(container)),
            EntityRecord::Tracked { .. } => None,
        };

        match container {
            Some(container) => container.component(tag),
            None => self.components.bucket(tag)?.get(id),
        }
    }

    /// Returns the component of entity `id` under `tag` as a `T`.
    ///
    /// `None` when absent or stored with a different type.
    #[must_use]
    pub fn component_as<T: Any + Send + Sync>(&self, id: EntityId, tag: ComponentTag) -> Option<Arc<T>> {
        self.component(id, tag).and_then(downcast::<T>)
    }

    /// Returns every registry-stored component under the single-bit `tag`.
    ///
    /// Order is unspecified. Components held by registered containers are
    /// not included.
    #[must_use]
    pub fn components(&self, tag: ComponentTag) -> Vec<ComponentValue> {
        self.components
            .bucket(tag)
            .map(|bucket| bucket.values())
            .unwrap_or_default()
    }

    /// Returns every component under `tag` that is a `T`.
    #[must_use]
    pub fn components_as<T: Any + Send + Sync>(&self, tag: ComponentTag) -> Vec<Arc<T>> {
        self.components(tag)
            .into_iter()
            .filter_map(downcast::<T>)
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
