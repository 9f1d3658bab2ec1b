//! # TESSERA Physics
//!
//! Shapes, colliders and collision handling for 2D scenes.
//!
//! ## Pipeline
//!
//! ```text
//! Shape ──► Collider (hit-test, bounds)
//!             │
//!             ▼
//!      UniformGrid (broad phase: candidate pairs)
//!             │
//!             ▼
//!      resolve_colliding_* (narrow phase: positional correction)
//!             │
//!             ▼
//!      elastic_impulse (velocity exchange)
//! ```
//!
//! Nothing here touches the registry. A simulation stores bodies as
//! components and feeds them through the stages above.
//!
//! ```rust
//! use tessera_physics::{resolve_colliding_circles, Circle, Collider, Shape};
//!
//! let mut a = Circle::new(0.0, 0.0, 1.0);
//! let mut b = Circle::new(1.0, 0.0, 1.0);
//! assert!(resolve_colliding_circles(&mut a, &mut b));
//!
//! let shape = Shape::from(a);
//! assert!(Collider::new(&shape).hit_test(-0.5, 0.0));
//! ```

pub mod aabb;
pub mod body;
pub mod broad;
pub mod collider;
pub mod error;
pub mod hittest;
pub mod polygon;
pub mod resolve;
pub mod shape;

pub use aabb::Aabb;
pub use body::{
    apply_elastic_impulse, apply_static_impulse, elastic_impulse, resolve_static_collision,
    DynamicBody, StaticBody, DEFAULT_DENSITY,
};
pub use broad::UniformGrid;
pub use collider::Collider;
pub use error::{PhysicsError, PhysicsResult};
pub use hittest::{hit_test_circle, hit_test_ellipse, hit_test_polygon, hit_test_rect};
pub use polygon::Polygon;
pub use resolve::{
    resolve_colliding_circles, resolve_colliding_ellipses, resolve_colliding_polygons,
    resolve_colliding_rects, resolve_colliding_shapes,
};
pub use shape::{Circle, Ellipse, Rect, Shape, ShapeKind};
