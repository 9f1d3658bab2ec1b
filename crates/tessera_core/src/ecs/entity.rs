//! # Entity Management
//!
//! Entities are opaque identifiers. Ids come from an [`IdGenerator`], are
//! strictly increasing and never reused for the lifetime of the generator.
//! The [`Entity`] handle pairs an id with the registry that owns it.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use super::component::{component_value, downcast, ComponentValue};
use super::registry::Registry;
use super::tag::ComponentTag;

/// Unique identifier for an entity.
///
/// Ids start at 1; the value carries no data of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct EntityId(u32);

impl EntityId {
    /// Wraps a raw id value.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Atomic, monotonically increasing source of [`EntityId`]s.
///
/// Each [`Registry`] owns one by default. Share a generator between
/// registries with [`Registry::with_generator`] when ids must be unique
/// across all of them.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU32,
}

impl IdGenerator {
    /// Creates a generator whose first id is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicU32::new(0),
        }
    }

    /// Allocates the next id.
    ///
    /// # Panics
    ///
    /// Panics when the 32-bit id space is exhausted. The counter stays at
    /// the last id, so every later call panics too and ids are never reused.
    pub fn next_id(&self) -> EntityId {
        match self
            .last
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| last.checked_add(1))
        {
            Ok(prev) => EntityId(prev + 1),
            Err(_) => panic!("entity id space exhausted"),
        }
    }

    /// Returns the most recently allocated id, if any.
    #[must_use]
    pub fn last(&self) -> Option<EntityId> {
        match self.last.load(Ordering::Relaxed) {
            0 => None,
            raw => Some(EntityId(raw)),
        }
    }
}

/// Handle bound to a registry and an entity id.
///
/// The handle is a thin proxy: every call forwards to the owning
/// [`Registry`], so it never exposes or caches registry internals.
#[derive(Clone, Copy)]
pub struct Entity<'r> {
    registry: &'r Registry,
    id: EntityId,
}

impl<'r> Entity<'r> {
    pub(super) const fn new(registry: &'r Registry, id: EntityId) -> Self {
        Self { registry, id }
    }

    /// Returns the entity's id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the registry this handle belongs to.
    #[inline]
    #[must_use]
    pub const fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Adds `component` under every bit of `tag`, replacing previous values.
    pub fn add_component<T: Any + Send + Sync>(&self, tag: ComponentTag, component: T) -> &Self {
        self.registry.add_component_value(self.id, tag, component_value(component));
        self
    }

    /// Adds an already type-erased component under every bit of `tag`.
    pub fn add_component_value(&self, tag: ComponentTag, component: ComponentValue) -> &Self {
        self.registry.add_component_value(self.id, tag, component);
        self
    }

    /// Returns `true` when the entity has a component for every bit of `tag`.
    #[must_use]
    pub fn has_component(&self, tag: ComponentTag) -> bool {
        self.registry.has_component(self.id, tag)
    }

    /// Returns the component stored under `tag`.
    #[must_use]
    pub fn component(&self, tag: ComponentTag) -> Option<ComponentValue> {
        self.registry.component(self.id, tag)
    }

    /// Returns the component stored under `tag` as a `T`.
    #[must_use]
    pub fn component_as<T: Any + Send + Sync>(&self, tag: ComponentTag) -> Option<Arc<T>> {
        self.component(tag).and_then(downcast::<T>)
    }

    /// Returns one component per requested tag; absent tags are left out.
    #[must_use]
    pub fn components(&self, tags: &[ComponentTag]) -> HashMap<ComponentTag, ComponentValue> {
        tags.iter()
            .filter_map(|&tag| self.component(tag).map(|c| (tag, c)))
            .collect()
    }
}

impl PartialEq for Entity<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.registry, other.registry) && self.id == other.id
    }
}

impl Eq for Entity<'_> {}

impl fmt::Debug for Entity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entity").field(&self.id.raw()).finish()
    }
}
