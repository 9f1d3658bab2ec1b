//! # Colliders
//!
//! A [`Collider`] borrows a shape and answers the two questions collision
//! code asks of it: does it contain a point, and what box encloses it.
//!
//! [`Collider::new`] matches every [`Shape`] variant, so a new shape kind
//! does not compile until it gets a collider.

use crate::aabb::Aabb;
use crate::hittest::{hit_test_circle, hit_test_ellipse, hit_test_rect};
use crate::polygon::Polygon;
use crate::shape::{Circle, Ellipse, Rect, Shape, ShapeKind};

/// Collision view over a borrowed shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collider<'a> {
    /// Ellipse collider.
    Ellipse(&'a Ellipse),
    /// Circle collider.
    Circle(&'a Circle),
    /// Rect collider.
    Rect(&'a Rect),
    /// Polygon collider.
    Polygon(&'a Polygon),
}

impl<'a> Collider<'a> {
    /// Builds the collider matching the shape's variant.
    #[must_use]
    pub const fn new(shape: &'a Shape) -> Self {
        match shape {
            Shape::Ellipse(e) => Self::Ellipse(e),
            Shape::Circle(c) => Self::Circle(c),
            Shape::Rect(r) => Self::Rect(r),
            Shape::Polygon(p) => Self::Polygon(p),
        }
    }

    /// Kind of the underlying shape.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Ellipse(_) => ShapeKind::Ellipse,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Rect(_) => ShapeKind::Rect,
            Self::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// Returns `true` when `(x, y)` is inside the shape.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> bool {
        match self {
            Self::Ellipse(e) => hit_test_ellipse(x, y, e),
            Self::Circle(c) => hit_test_circle(x, y, c),
            Self::Rect(r) => hit_test_rect(x, y, r),
            Self::Polygon(p) => p.hit_test(x, y),
        }
    }

    /// Axis-aligned box enclosing the shape.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        match self {
            Self::Ellipse(e) => e.bounds(),
            Self::Circle(c) => c.bounds(),
            Self::Rect(r) => r.bounds(),
            Self::Polygon(p) => p.bounds(),
        }
    }
}

impl<'a> From<&'a Shape> for Collider<'a> {
    fn from(shape: &'a Shape) -> Self {
        Self::new(shape)
    }
}
