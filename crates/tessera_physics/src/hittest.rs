//! # Hit-Tests
//!
//! Point containment per shape kind. Boundary handling differs between
//! kinds and callers rely on it:
//!
//! | shape   | boundary                                   |
//! |---------|--------------------------------------------|
//! | circle  | excluded (`<`)                             |
//! | ellipse | included (`<=`)                            |
//! | rect    | top/left included, bottom/right excluded   |
//! | polygon | even-odd rule                              |

use tessera_shared::Point;

use crate::shape::{Circle, Ellipse, Rect};

/// Returns `true` when `(x, y)` is strictly inside `circle`.
///
/// Compares the squared distance to the centre with the squared radius.
#[inline]
#[must_use]
pub fn hit_test_circle(x: f64, y: f64, circle: &Circle) -> bool {
    let dx = circle.x - x;
    let dy = circle.y - y;
    (dx * dx + dy * dy) < circle.radius * circle.radius
}

/// Returns `true` when `(x, y)` is inside or on `ellipse`.
#[inline]
#[must_use]
pub fn hit_test_ellipse(x: f64, y: f64, ellipse: &Ellipse) -> bool {
    let dx = x - ellipse.x;
    let dy = y - ellipse.y;
    (dx * dx) / (ellipse.radius_x * ellipse.radius_x)
        + (dy * dy) / (ellipse.radius_y * ellipse.radius_y)
        <= 1.0
}

/// Returns `true` when `(x, y)` is inside the centred rectangle.
#[inline]
#[must_use]
pub fn hit_test_rect(x: f64, y: f64, rect: &Rect) -> bool {
    let w = rect.w / 2.0;
    let h = rect.h / 2.0;
    x >= rect.x - w && x < rect.x + w && y >= rect.y - h && y < rect.y + h
}

/// Ray-casting point-in-polygon test over world-space `vertices`.
///
/// A horizontal ray from `(x, y)` toggles the result at every edge it
/// crosses (<https://wrf.ecse.rpi.edu/Research/Short_Notes/pnpoly.html>).
#[must_use]
pub fn hit_test_polygon(x: f64, y: f64, vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut hit = false;
    let mut j = n - 1;
    for i in 0..n {
        let u = vertices[i];
        let v = vertices[j];
        if (u.y > y) != (v.y > y) && x < (v.x - u.x) * (y - u.y) / (v.y - u.y) + u.x {
            hit = !hit;
        }
        j = i;
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_boundary_excluded() {
        let c = Circle::new(0.0, 0.0, 2.0);
        assert!(!hit_test_circle(2.0, 0.0, &c));
        assert!(hit_test_circle(1.0, 1.0, &c));
    }

    #[test]
    fn test_ellipse_boundary_included() {
        let e = Ellipse::new(0.0, 0.0, 2.0, 1.0);
        assert!(hit_test_ellipse(2.0, 0.0, &e));
        assert!(hit_test_ellipse(0.0, -1.0, &e));
        assert!(!hit_test_ellipse(2.0, 0.5, &e));
    }

    #[test]
    fn test_circle_and_ellipse_disagree_on_same_edge() {
        let c = Circle::new(0.0, 0.0, 1.0);
        let e = Ellipse::new(0.0, 0.0, 1.0, 1.0);
        assert!(!hit_test_circle(1.0, 0.0, &c));
        assert!(hit_test_ellipse(1.0, 0.0, &e));
    }

    #[test]
    fn test_rect_half_open() {
        let r = Rect::new(0.0, 0.0, 22.0, 100.0);
        assert!(hit_test_rect(1.0, 2.0, &r));
        assert!(hit_test_rect(-11.0, -50.0, &r));
        assert!(!hit_test_rect(11.0, 0.0, &r));
        assert!(!hit_test_rect(0.0, 50.0, &r));
        assert!(!hit_test_rect(10.0, 10.0, &Rect::new(0.0, 0.0, 10.0, 50.0)));
    }

    #[test]
    fn test_polygon_unit_square() {
        let square = [
            Point::new(0.5, -0.5),
            Point::new(-0.5, -0.5),
            Point::new(-0.5, 0.5),
            Point::new(0.5, 0.5),
        ];
        assert!(hit_test_polygon(0.0, 0.0, &square));
        assert!(!hit_test_polygon(1.0, 1.0, &square));
    }

    #[test]
    fn test_polygon_concave() {
        // A "U" shape: the notch at the top centre is outside.
        let u = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 3.0),
            Point::new(2.0, 3.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        assert!(hit_test_polygon(0.5, 1.0, &u));
        assert!(!hit_test_polygon(1.5, 1.0, &u));
        assert!(hit_test_polygon(1.5, 3.5, &u));
    }

    #[test]
    fn test_degenerate_polygon_never_hits() {
        assert!(!hit_test_polygon(0.0, 0.0, &[]));
        assert!(!hit_test_polygon(0.0, 0.0, &[Point::ZERO, Point::new(1.0, 1.0)]));
    }
}
