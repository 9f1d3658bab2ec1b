//! # TESSERA Core
//!
//! Tag-indexed Entity Component registry designed for:
//! - Querying entities by capability ("has body AND collider")
//! - Concurrent reads from a render thread while the simulation writes
//! - Arbitrary component kinds behind a runtime-checked slot
//!
//! ## Architecture Rules
//!
//! 1. **Total lookups** - An absent entity or component is a normal state,
//!    never an error and never a panic
//! 2. **Two-level locking** - One lock for the entity index, one lock for
//!    the tag→bucket map, one lock per bucket
//! 3. **Owned id sequences** - Each registry allocates ids from its own
//!    [`IdGenerator`] unless one is injected
//!
//! ## Example
//!
//! ```rust
//! use tessera_core::{ComponentTag, Registry};
//!
//! const BODY: ComponentTag = ComponentTag::bit(0);
//! const COLLIDER: ComponentTag = ComponentTag::bit(1);
//!
//! let registry = Registry::new();
//! let ball = registry.create();
//! ball.add_component(BODY | COLLIDER, 42_u32);
//!
//! assert_eq!(registry.entities(&[BODY, COLLIDER]).len(), 1);
//! assert_eq!(registry.component_as::<u32>(ball.id(), COLLIDER).as_deref(), Some(&42));
//! ```

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod ecs;

pub use ecs::{
    ComponentTag, ComponentValue, Container, Entity, EntityId, IdGenerator, Registry,
};
