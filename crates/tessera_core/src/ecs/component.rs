//! # Component Slots
//!
//! Components are arbitrary values. The registry stores them type-erased and
//! checks the type again on retrieval, so asking for the wrong type yields
//! `None` instead of a bad cast.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use super::tag::ComponentTag;

/// A type-erased, shareable component value.
///
/// The same value is shared by every single-bit tag it was registered under,
/// so a body added as `BODY | COLLIDER` is one allocation reachable from two
/// buckets.
pub type ComponentValue = Arc<dyn Any + Send + Sync>;

/// Wraps a concrete value into a [`ComponentValue`].
#[inline]
pub fn component_value<T: Any + Send + Sync>(value: T) -> ComponentValue {
    Arc::new(value)
}

/// Recovers the concrete type of a component, or `None` on a type mismatch.
#[inline]
#[must_use]
pub fn downcast<T: Any + Send + Sync>(value: ComponentValue) -> Option<Arc<T>> {
    value.downcast::<T>().ok()
}

/// Self-contained component storage for statically defined entities.
///
/// A container answers for its own components; the registry only gives it an
/// id and never copies its components into the tag buckets. Implementors
/// decide which tags they support, typically with a `match` on the tag.
///
/// Methods take `&self` because containers are shared with the registry;
/// mutable state needs interior mutability.
pub trait Container: Send + Sync {
    /// Stores `component` under `tag`. Unsupported tags may be ignored.
    fn add_component(&self, tag: ComponentTag, component: ComponentValue);

    /// Returns `true` when the container provides a component for `tag`.
    fn has_component(&self, tag: ComponentTag) -> bool;

    /// Returns the component stored under `tag`.
    fn component(&self, tag: ComponentTag) -> Option<ComponentValue>;

    /// Returns one component per requested tag; absent tags are left out.
    fn components(&self, tags: &[ComponentTag]) -> HashMap<ComponentTag, ComponentValue> {
        tags.iter()
            .filter_map(|&tag| self.component(tag).map(|c| (tag, c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast_matching_type() {
        let value = component_value(7_i64);
        assert_eq!(downcast::<i64>(value).as_deref(), Some(&7));
    }

    #[test]
    fn test_downcast_wrong_type_is_none() {
        let value = component_value(String::from("red"));
        assert!(downcast::<u32>(value).is_none());
    }

    #[test]
    fn test_shared_value_is_one_allocation() {
        let value = component_value(1.5_f64);
        let again = Arc::clone(&value);
        assert!(Arc::ptr_eq(&value, &again));
    }
}
