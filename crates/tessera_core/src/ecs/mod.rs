//! # Entity Component Registry
//!
//! ## Design Philosophy
//!
//! - Entities are plain ids; the registry owns everything else
//! - Components are grouped in one bucket per single-bit tag
//! - A composite tag registers the same component under every bit it carries
//! - Statically defined entities may bring their own storage ([`Container`])

mod component;
mod entity;
mod registry;
mod storage;
mod tag;

pub use component::{ComponentValue, Container};
pub use entity::{Entity, EntityId, IdGenerator};
pub use registry::Registry;
pub use tag::ComponentTag;
