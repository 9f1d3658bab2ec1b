//! # Narrow Phase
//!
//! Exact overlap handling for pairs of same-kind shapes.
//!
//! | pair            | detection | correction                      |
//! |-----------------|-----------|---------------------------------|
//! | circle/circle   | yes       | each centre moves half the gap  |
//! | rect/rect       | yes       | none                            |
//! | ellipse/ellipse | no        | none                            |
//! | polygon/polygon | no        | none                            |
//!
//! Correction is positional only. Velocity changes are applied by the
//! caller through [`crate::body::elastic_impulse`].

use tessera_shared::Vector;

use crate::polygon::Polygon;
use crate::shape::{Circle, Ellipse, Rect, Shape};

/// Separates two overlapping circles.
///
/// Returns `false` and leaves both untouched when the squared centre
/// distance exceeds the squared radius sum. Otherwise each centre moves away
/// from the other by half the overlap, leaving the circles touching.
///
/// Coincident centres have no separation direction; they are pushed apart
/// along the x axis.
pub fn resolve_colliding_circles(a: &mut Circle, b: &mut Circle) -> bool {
    let d = Vector::new(a.x - b.x, a.y - b.y);
    let r = a.radius + b.radius;
    let dist_sq = d.length_squared();
    if dist_sq > r * r {
        return false;
    }

    let distance = dist_sq.sqrt();
    let overlap = (distance - r) / 2.0;
    let normal = d.normalize().unwrap_or_else(|| {
        tracing::warn!(x = a.x, y = a.y, "coincident circle centres, separating along x");
        Vector::new(1.0, 0.0)
    });

    a.x -= overlap * normal.x;
    a.y -= overlap * normal.y;
    b.x += overlap * normal.x;
    b.y += overlap * normal.y;
    true
}

/// Reports whether two rects overlap. Rects that only share an edge do not.
///
/// Detection only; neither rect is moved.
#[must_use]
pub fn resolve_colliding_rects(a: &Rect, b: &Rect) -> bool {
    let (ax, ay) = (a.x - a.w / 2.0, a.y - a.h / 2.0);
    let (bx, by) = (b.x - b.w / 2.0, b.y - b.h / 2.0);
    !(bx >= ax + a.w || ax >= bx + b.w || by >= ay + a.h || ay >= by + b.h)
}

/// Ellipse pairs are not resolved; always `false`.
pub fn resolve_colliding_ellipses(_a: &mut Ellipse, _b: &mut Ellipse) -> bool {
    false
}

/// Polygon pairs are not resolved; always `false`.
pub fn resolve_colliding_polygons(_a: &mut Polygon, _b: &mut Polygon) -> bool {
    false
}

/// Dispatches a pair of shapes to the resolver for their kind.
///
/// Mixed-kind pairs are never resolved.
pub fn resolve_colliding_shapes(a: &mut Shape, b: &mut Shape) -> bool {
    match (a, b) {
        (Shape::Circle(a), Shape::Circle(b)) => resolve_colliding_circles(a, b),
        (Shape::Rect(a), Shape::Rect(b)) => resolve_colliding_rects(a, b),
        (Shape::Ellipse(a), Shape::Ellipse(b)) => resolve_colliding_ellipses(a, b),
        (Shape::Polygon(a), Shape::Polygon(b)) => resolve_colliding_polygons(a, b),
        _ => false,
    }
}
