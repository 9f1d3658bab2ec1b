//! # Shapes
//!
//! Primitive shapes positioned by their centre. Ellipses, circles and rects
//! are axis-aligned and cannot be transformed; polygons carry their own
//! transform (see [`crate::polygon`]).

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tessera_shared::{Point, Vector};

use crate::aabb::Aabb;
use crate::hittest::{hit_test_circle, hit_test_ellipse, hit_test_rect};
use crate::polygon::Polygon;

/// Axis-aligned ellipse centred at `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    /// Centre x.
    pub x: f64,
    /// Centre y.
    pub y: f64,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
}

impl Ellipse {
    /// Creates an ellipse.
    #[must_use]
    pub const fn new(x: f64, y: f64, radius_x: f64, radius_y: f64) -> Self {
        Self {
            x,
            y,
            radius_x,
            radius_y,
        }
    }

    /// π · rx · ry
    #[must_use]
    pub fn area(&self) -> f64 {
        PI * self.radius_x * self.radius_y
    }

    /// Box spanning the two radii around the centre.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.x, self.y, self.radius_x * 2.0, self.radius_y * 2.0)
    }

    /// Point containment, boundary included.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> bool {
        hit_test_ellipse(x, y, self)
    }
}

/// Circle centred at `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Centre x.
    pub x: f64,
    /// Centre y.
    pub y: f64,
    /// Radius.
    pub radius: f64,
}

impl Circle {
    /// Creates a circle.
    #[must_use]
    pub const fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    /// π · r²
    #[must_use]
    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Square of side `2r` around the centre.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.x, self.y, self.radius * 2.0, self.radius * 2.0)
    }

    /// Point containment, boundary excluded.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> bool {
        hit_test_circle(x, y, self)
    }
}

/// Axis-aligned rectangle centred at `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Centre x.
    pub x: f64,
    /// Centre y.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Rect {
    /// Creates a rect.
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// w · h
    #[must_use]
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// The rect itself as a box.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.x, self.y, self.w, self.h)
    }

    /// Point containment, half-open.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> bool {
        hit_test_rect(x, y, self)
    }
}

/// Discriminant of a [`Shape`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// [`Ellipse`]
    Ellipse,
    /// [`Circle`]
    Circle,
    /// [`Rect`]
    Rect,
    /// [`Polygon`]
    Polygon,
}

/// Any supported shape.
///
/// The set of kinds is closed; every match over it is exhaustive.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned ellipse.
    Ellipse(Ellipse),
    /// Circle.
    Circle(Circle),
    /// Axis-aligned rect.
    Rect(Rect),
    /// Transformable polygon.
    Polygon(Polygon),
}

impl Shape {
    /// Which kind of shape this is.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Ellipse(_) => ShapeKind::Ellipse,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Rect(_) => ShapeKind::Rect,
            Self::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// Centre (or, for polygons, the position offset).
    #[must_use]
    pub fn position(&self) -> Point {
        match self {
            Self::Ellipse(e) => Point::new(e.x, e.y),
            Self::Circle(c) => Point::new(c.x, c.y),
            Self::Rect(r) => Point::new(r.x, r.y),
            Self::Polygon(p) => p.position(),
        }
    }

    /// Moves the shape so that [`Shape::position`] returns `p`.
    pub fn set_position(&mut self, p: Point) {
        match self {
            Self::Ellipse(e) => (e.x, e.y) = (p.x, p.y),
            Self::Circle(c) => (c.x, c.y) = (p.x, p.y),
            Self::Rect(r) => (r.x, r.y) = (p.x, p.y),
            Self::Polygon(poly) => poly.set_position(p),
        }
    }

    /// Moves the shape by `offset`.
    pub fn translate(&mut self, offset: Vector) {
        let p = self.position() + offset;
        self.set_position(p);
    }

    /// Enclosed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        match self {
            Self::Ellipse(e) => e.area(),
            Self::Circle(c) => c.area(),
            Self::Rect(r) => r.area(),
            Self::Polygon(p) => p.area(),
        }
    }

    /// Current bounding box.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        match self {
            Self::Ellipse(e) => e.bounds(),
            Self::Circle(c) => c.bounds(),
            Self::Rect(r) => r.bounds(),
            Self::Polygon(p) => p.bounds(),
        }
    }

    /// Point containment using the kind's boundary rule.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> bool {
        match self {
            Self::Ellipse(e) => e.hit_test(x, y),
            Self::Circle(c) => c.hit_test(x, y),
            Self::Rect(r) => r.hit_test(x, y),
            Self::Polygon(p) => p.hit_test(x, y),
        }
    }

    /// Returns the circle, if this is one.
    #[must_use]
    pub const fn as_circle(&self) -> Option<&Circle> {
        match self {
            Self::Circle(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the polygon, if this is one.
    #[must_use]
    pub const fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Self::Polygon(p) => Some(p),
            _ => None,
        }
    }

    /// Mutable access to the polygon, if this is one.
    pub fn as_polygon_mut(&mut self) -> Option<&mut Polygon> {
        match self {
            Self::Polygon(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Ellipse> for Shape {
    fn from(e: Ellipse) -> Self {
        Self::Ellipse(e)
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

impl From<Rect> for Shape {
    fn from(r: Rect) -> Self {
        Self::Rect(r)
    }
}

impl From<Polygon> for Shape {
    fn from(p: Polygon) -> Self {
        Self::Polygon(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_areas() {
        assert!((Circle::new(0.0, 0.0, 2.0).area() - 4.0 * PI).abs() < EPS);
        assert!((Ellipse::new(0.0, 0.0, 2.0, 3.0).area() - 6.0 * PI).abs() < EPS);
        assert!((Rect::new(5.0, 5.0, 3.0, 4.0).area() - 12.0).abs() < EPS);
    }

    #[test]
    fn test_bounds_follow_position() {
        let mut shape = Shape::from(Circle::new(10.0, 10.0, 2.0));
        assert_eq!(shape.bounds(), Aabb::from_center_size(10.0, 10.0, 4.0, 4.0));

        shape.translate(Vector::new(1.0, -1.0));
        assert_eq!(shape.position(), Point::new(11.0, 9.0));
        assert_eq!(shape.bounds(), Aabb::from_center_size(11.0, 9.0, 4.0, 4.0));
    }

    #[test]
    fn test_rect_bounds_match_hit_test() {
        let r = Rect::new(0.0, 0.0, 22.0, 100.0);
        let b = r.bounds();
        for (x, y) in [(1.0, 2.0), (11.0, 0.0), (-11.0, -50.0), (0.0, 50.0)] {
            assert_eq!(b.hit_test(x, y), r.hit_test(x, y));
        }
    }

    #[test]
    fn test_shape_dispatch() {
        let shapes = [
            Shape::from(Ellipse::new(0.0, 0.0, 2.0, 1.0)),
            Shape::from(Circle::new(0.0, 0.0, 1.0)),
            Shape::from(Rect::new(0.0, 0.0, 2.0, 2.0)),
            Shape::from(Polygon::quad(0.0, 0.0, 2.0, 2.0)),
        ];
        let kinds: Vec<_> = shapes.iter().map(Shape::kind).collect();
        assert_eq!(
            kinds,
            [ShapeKind::Ellipse, ShapeKind::Circle, ShapeKind::Rect, ShapeKind::Polygon]
        );
        assert!(shapes.iter().all(|s| s.hit_test(0.0, 0.0)));
        assert!(shapes.iter().all(|s| !s.hit_test(5.0, 5.0)));
    }

    #[test]
    fn test_as_circle() {
        assert!(Shape::from(Circle::new(0.0, 0.0, 1.0)).as_circle().is_some());
        assert!(Shape::from(Rect::new(0.0, 0.0, 1.0, 1.0)).as_circle().is_none());
    }
}
