//! # Bodies
//!
//! A body is a shape plus the state needed to move it. Dynamic bodies carry
//! velocity and density; static bodies never move and have infinite mass.
//!
//! ## Integration
//!
//! ```text
//! a  = -friction · v
//! v += a · dt
//! p += v · dt
//! |v| < rest_speed  =>  v = a = 0
//! ```

use tessera_shared::Vector;

use crate::collider::Collider;
use crate::resolve::resolve_colliding_shapes;
use crate::shape::Shape;

/// Density used when none is given.
pub const DEFAULT_DENSITY: f64 = 1.0;

/// A moving body.
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicBody {
    /// Geometry and position.
    pub shape: Shape,
    /// Current velocity in units per second.
    pub velocity: Vector,
    /// Acceleration applied during the last integration.
    pub acceleration: Vector,
    /// Mass per unit area.
    pub density: f64,
}

impl DynamicBody {
    /// Creates a body at rest with [`DEFAULT_DENSITY`].
    #[must_use]
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            velocity: Vector::ZERO,
            acceleration: Vector::ZERO,
            density: DEFAULT_DENSITY,
        }
    }

    /// Sets the density.
    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Sets the initial velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    /// Area times density.
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.shape.area() * self.density
    }

    /// Collision view of the body's shape.
    #[must_use]
    pub const fn collider(&self) -> Collider<'_> {
        Collider::new(&self.shape)
    }

    /// Returns `true` while the body has any velocity.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        !self.velocity.is_zero()
    }

    /// Advances the body by `dt` seconds under linear friction.
    ///
    /// Velocity below `rest_speed` snaps to zero so bodies come to rest.
    pub fn integrate(&mut self, dt: f64, friction: f64, rest_speed: f64) {
        self.acceleration = self.velocity * -friction;
        self.velocity += self.acceleration * dt;
        self.shape.translate(self.velocity * dt);

        if self.velocity.length_squared() < rest_speed * rest_speed {
            self.velocity.zero();
            self.acceleration.zero();
        }
    }

    /// Keeps the body's bounds inside `[0, width] x [0, height]`.
    ///
    /// A body pushed back from an edge has the matching velocity component
    /// pointed away from that edge. Returns `true` when the body was moved.
    pub fn clamp_to_bounds(&mut self, width: f64, height: f64) -> bool {
        let bounds = self.shape.bounds();
        let mut offset = Vector::ZERO;

        if bounds.top_left.x <= 0.0 {
            offset.x = -bounds.top_left.x;
            self.velocity.x = self.velocity.x.abs();
        } else if bounds.bottom_right.x > width {
            offset.x = width - bounds.bottom_right.x;
            self.velocity.x = -self.velocity.x.abs();
        }

        if bounds.top_left.y <= 0.0 {
            offset.y = -bounds.top_left.y;
            self.velocity.y = self.velocity.y.abs();
        } else if bounds.bottom_right.y > height {
            offset.y = height - bounds.bottom_right.y;
            self.velocity.y = -self.velocity.y.abs();
        }

        if offset.is_zero() {
            return false;
        }
        self.shape.translate(offset);
        true
    }
}

/// A body that never moves.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticBody {
    /// Geometry and position.
    pub shape: Shape,
}

impl StaticBody {
    /// Wraps a shape.
    #[must_use]
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
        }
    }

    /// Always infinite.
    #[must_use]
    pub const fn mass(&self) -> f64 {
        f64::INFINITY
    }

    /// Collision view of the body's shape.
    #[must_use]
    pub const fn collider(&self) -> Collider<'_> {
        Collider::new(&self.shape)
    }
}

/// Velocities after a 2D elastic collision along the unit `normal`, which
/// points from the first body to the second.
///
/// `p = 2·(n·(v1 − v2)) / (m1 + m2)`, `v1 −= p·m2·n`, `v2 += p·m1·n`.
/// A body with infinite mass keeps its velocity and reflects the other.
#[must_use]
pub fn elastic_impulse(normal: Vector, v1: Vector, m1: f64, v2: Vector, m2: f64) -> (Vector, Vector) {
    let k = normal.dot(v1 - v2);
    match (m1.is_finite(), m2.is_finite()) {
        (true, true) => {
            let p = 2.0 * k / (m1 + m2);
            (v1 - normal * (p * m2), v2 + normal * (p * m1))
        }
        (true, false) => (v1 - normal * (2.0 * k), v2),
        (false, true) => (v1, v2 + normal * (2.0 * k)),
        (false, false) => (v1, v2),
    }
}

/// Exchanges momentum between two dynamic bodies along the line joining
/// their positions.
///
/// Returns `false` without touching either body when the positions coincide.
pub fn apply_elastic_impulse(a: &mut DynamicBody, b: &mut DynamicBody) -> bool {
    let Some(normal) = (b.shape.position() - a.shape.position()).normalize() else {
        return false;
    };
    let (va, vb) = elastic_impulse(normal, a.velocity, a.mass(), b.velocity, b.mass());
    a.velocity = va;
    b.velocity = vb;
    true
}

/// Pushes a dynamic body out of a static one.
///
/// Uses the same-kind resolver on a copy of the obstacle, then moves the
/// body by the full relative correction so the obstacle stays put.
/// Returns `false` when the shapes do not overlap or the pair has no
/// resolver.
pub fn resolve_static_collision(body: &mut DynamicBody, obstacle: &StaticBody) -> bool {
    let mut shadow = obstacle.shape.clone();
    let before = body.shape.position();
    if !resolve_colliding_shapes(&mut body.shape, &mut shadow) {
        return false;
    }
    let body_moved = body.shape.position() - before;
    let obstacle_moved = shadow.position() - obstacle.shape.position();
    body.shape.set_position(before);
    body.shape.translate(body_moved - obstacle_moved);
    true
}

/// Bounces a dynamic body off a static one.
///
/// Returns `false` when the positions coincide.
pub fn apply_static_impulse(body: &mut DynamicBody, obstacle: &StaticBody) -> bool {
    let Some(normal) = (obstacle.shape.position() - body.shape.position()).normalize() else {
        return false;
    };
    let (v, _) = elastic_impulse(normal, body.velocity, body.mass(), Vector::ZERO, obstacle.mass());
    body.velocity = v;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Circle, Rect};
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn ball(x: f64, y: f64, r: f64, vx: f64, vy: f64) -> DynamicBody {
        DynamicBody::new(Circle::new(x, y, r)).with_velocity(Vector::new(vx, vy))
    }

    #[test]
    fn test_mass_from_area() {
        let body = DynamicBody::new(Rect::new(0.0, 0.0, 2.0, 3.0)).with_density(0.5);
        assert!((body.mass() - 3.0).abs() < EPS);
        assert!((ball(0.0, 0.0, 1.0, 0.0, 0.0).mass() - PI).abs() < EPS);
        assert!(StaticBody::new(Circle::new(0.0, 0.0, 1.0)).mass().is_infinite());
    }

    #[test]
    fn test_integrate_applies_friction() {
        let mut body = ball(0.0, 0.0, 1.0, 10.0, 0.0);
        body.integrate(0.1, 0.5, 1.0);

        // a = -5, v = 10 - 0.5, x = 9.5 * 0.1
        assert!((body.acceleration.x + 5.0).abs() < EPS);
        assert!((body.velocity.x - 9.5).abs() < EPS);
        assert!((body.shape.position().x - 0.95).abs() < EPS);
    }

    #[test]
    fn test_integrate_comes_to_rest() {
        let mut body = ball(0.0, 0.0, 1.0, 0.5, 0.5);
        body.integrate(0.016, 0.5, 1.0);
        assert!(!body.is_moving());
        assert!(body.acceleration.is_zero());
    }

    #[test]
    fn test_clamp_bounces_off_edges() {
        let mut body = ball(0.5, 50.0, 2.0, -3.0, 0.0);
        assert!(body.clamp_to_bounds(100.0, 100.0));
        assert!((body.shape.position().x - 2.0).abs() < EPS);
        assert!(body.velocity.x > 0.0);

        let mut body = ball(50.0, 99.0, 2.0, 0.0, 4.0);
        assert!(body.clamp_to_bounds(100.0, 100.0));
        assert!((body.shape.position().y - 98.0).abs() < EPS);
        assert!(body.velocity.y < 0.0);

        let mut inside = ball(50.0, 50.0, 2.0, 1.0, 1.0);
        assert!(!inside.clamp_to_bounds(100.0, 100.0));
        assert_eq!(inside.velocity, Vector::new(1.0, 1.0));
    }

    #[test]
    fn test_equal_masses_swap_normal_velocity() {
        let n = Vector::new(1.0, 0.0);
        let (v1, v2) = elastic_impulse(n, Vector::new(3.0, 1.0), 2.0, Vector::new(-1.0, 0.0), 2.0);
        assert!((v1.x + 1.0).abs() < EPS && (v1.y - 1.0).abs() < EPS);
        assert!((v2.x - 3.0).abs() < EPS && v2.y.abs() < EPS);
    }

    #[test]
    fn test_impulse_conserves_momentum() {
        let mut a = ball(0.0, 0.0, 1.0, 4.0, 1.0);
        let mut b = ball(1.5, 0.5, 2.0, -1.0, 0.0);
        let (ma, mb) = (a.mass(), b.mass());
        let before = a.velocity * ma + b.velocity * mb;

        assert!(apply_elastic_impulse(&mut a, &mut b));
        let after = a.velocity * ma + b.velocity * mb;
        assert!((before.x - after.x).abs() < 1e-6);
        assert!((before.y - after.y).abs() < 1e-6);
    }

    #[test]
    fn test_impulse_skips_coincident_bodies() {
        let mut a = ball(1.0, 1.0, 1.0, 1.0, 0.0);
        let mut b = ball(1.0, 1.0, 1.0, -1.0, 0.0);
        assert!(!apply_elastic_impulse(&mut a, &mut b));
        assert_eq!(a.velocity, Vector::new(1.0, 0.0));
    }

    #[test]
    fn test_static_collision_moves_only_the_body() {
        let mut body = ball(0.0, 0.0, 1.0, 2.0, 0.0);
        let post = StaticBody::new(Circle::new(1.5, 0.0, 1.0));

        assert!(resolve_static_collision(&mut body, &post));
        assert!((body.shape.position().x + 0.5).abs() < EPS);
        assert_eq!(post.shape.position().x, 1.5);

        let mut far = ball(10.0, 0.0, 1.0, 0.0, 0.0);
        assert!(!resolve_static_collision(&mut far, &post));
        assert_eq!(far.shape.position().x, 10.0);
    }

    #[test]
    fn test_static_obstacle_reflects() {
        let mut body = ball(0.0, 0.0, 1.0, 2.0, 0.0);
        let wall = StaticBody::new(Circle::new(3.0, 0.0, 1.0));
        assert!(apply_static_impulse(&mut body, &wall));
        assert!((body.velocity.x + 2.0).abs() < EPS);
    }
}
