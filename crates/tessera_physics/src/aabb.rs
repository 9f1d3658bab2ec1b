//! # Axis-Aligned Bounding Box
//!
//! Bounds are derived values: every shape computes them from its current
//! fields, so they are never stale.

use serde::{Deserialize, Serialize};
use tessera_shared::Point;

/// Axis-aligned bounding box stored as its top-left and bottom-right corners.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub top_left: Point,
    /// Maximum corner.
    pub bottom_right: Point,
}

impl Aabb {
    /// Creates a box from its two corners.
    #[must_use]
    pub const fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Creates a box centred at `(x, y)` with the given width and height.
    #[must_use]
    pub fn from_center_size(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            top_left: Point::new(x - w / 2.0, y - h / 2.0),
            bottom_right: Point::new(x + w / 2.0, y + h / 2.0),
        }
    }

    /// Width of the box.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    /// Height of the box.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    /// Centre of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.top_left.x + self.width() / 2.0,
            self.top_left.y + self.height() / 2.0,
        )
    }

    /// Returns `true` when `(x, y)` lies inside the box. The top-left edges
    /// are inclusive, the bottom-right edges exclusive.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> bool {
        x >= self.top_left.x
            && x < self.bottom_right.x
            && y >= self.top_left.y
            && y < self.bottom_right.y
    }

    /// Returns `true` when the boxes overlap. Boxes that only share an edge
    /// do not overlap.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        !(other.top_left.x >= self.bottom_right.x
            || self.top_left.x >= other.bottom_right.x
            || other.top_left.y >= self.bottom_right.y
            || self.top_left.y >= other.bottom_right.y)
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            top_left: Point::new(
                self.top_left.x.min(other.top_left.x),
                self.top_left.y.min(other.top_left.y),
            ),
            bottom_right: Point::new(
                self.bottom_right.x.max(other.bottom_right.x),
                self.bottom_right.y.max(other.bottom_right.y),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_center_size() {
        let b = Aabb::from_center_size(10.0, 20.0, 4.0, 6.0);
        assert_eq!(b.top_left, Point::new(8.0, 17.0));
        assert_eq!(b.bottom_right, Point::new(12.0, 23.0));
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 6.0);
        assert_eq!(b.center(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_hit_test_half_open() {
        let b = Aabb::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!(b.hit_test(0.0, 0.0));
        assert!(b.hit_test(9.99, 9.99));
        assert!(!b.hit_test(10.0, 5.0));
        assert!(!b.hit_test(5.0, 10.0));
    }

    #[test]
    fn test_union() {
        let a = Aabb::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let b = Aabb::new(Point::new(-2.0, 0.5), Point::new(0.5, 3.0));
        let u = a.union(&b);
        assert_eq!(u.top_left, Point::new(-2.0, 0.0));
        assert_eq!(u.bottom_right, Point::new(1.0, 3.0));
        assert!(u.hit_test(0.0, 0.0) && u.hit_test(-1.0, 2.0));
    }

    #[test]
    fn test_intersects_excludes_touching() {
        let a = Aabb::new(Point::new(0.0, 0.0), Point::new(2.0, 2.0));
        let touching = Aabb::new(Point::new(2.0, 0.0), Point::new(4.0, 2.0));
        let overlapping = Aabb::new(Point::new(1.0, 1.0), Point::new(3.0, 3.0));

        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }
}
