//! # Polygons
//!
//! A polygon keeps two vertex lists:
//!
//! ```text
//! model:  vertices as constructed, relative to the position
//! actual: matrix · (model + origin), recomputed on every transform
//! ```
//!
//! World-space vertices are `actual + position`. Translation is done through
//! the position, so moving a polygon never touches its vertex lists.

use tessera_shared::{deg_to_rad, Matrix, Point};

use crate::aabb::Aabb;
use crate::error::{PhysicsError, PhysicsResult};
use crate::hittest::hit_test_polygon;

/// Above this many vertices a hit-test checks the bounding box first.
const BOUNDS_PRECHECK_VERTICES: usize = 5;

/// Closed polygon with a model-space vertex list and a transform.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    x: f64,
    y: f64,
    origin: Point,
    matrix: Matrix,
    model: Vec<Point>,
    actual: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon at `(x, y)` from model-space vertices.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::DegeneratePolygon`] for fewer than 3 vertices.
    pub fn try_new(x: f64, y: f64, model: Vec<Point>) -> PhysicsResult<Self> {
        if model.len() < 3 {
            return Err(PhysicsError::DegeneratePolygon(model.len()));
        }
        Ok(Self {
            x,
            y,
            origin: Point::ZERO,
            matrix: Matrix::IDENTITY,
            actual: model.clone(),
            model,
        })
    }

    /// Creates a polygon from vertices known to be valid.
    ///
    /// # Panics
    ///
    /// Panics for fewer than 3 vertices.
    #[must_use]
    pub fn new(x: f64, y: f64, model: Vec<Point>) -> Self {
        match Self::try_new(x, y, model) {
            Ok(polygon) => polygon,
            Err(err) => panic!("{err}"),
        }
    }

    /// Regular polygon with `sides` vertices at distance `radius` from
    /// `(x, y)`. The first vertex sits at angle 0.
    ///
    /// # Panics
    ///
    /// Panics when `sides < 3`.
    #[must_use]
    pub fn regular(x: f64, y: f64, radius: f64, sides: usize) -> Self {
        assert!(sides >= 3, "regular polygon needs at least 3 sides, got {sides}");

        let n = sides as f64;
        let interior = (n - 2.0) * 180.0 / n;
        let model = (0..sides)
            .map(|i| {
                let deg = 360.0 - (180.0 - interior) * i as f64;
                let rad = deg_to_rad(deg);
                Point::new(rad.cos() * radius, rad.sin() * radius)
            })
            .collect();
        Self::new(x, y, model)
    }

    /// Isosceles triangle `w` long and `h` wide at the base, pointing along
    /// +x and centred on its centroid.
    #[must_use]
    pub fn trigon(x: f64, y: f64, w: f64, h: f64) -> Self {
        let corners = [
            Point::new(w, 0.0),
            Point::new(0.0, -h / 2.0),
            Point::new(0.0, h / 2.0),
        ];
        let cx = corners.iter().map(|p| p.x).sum::<f64>() / 3.0;
        let cy = corners.iter().map(|p| p.y).sum::<f64>() / 3.0;
        let model = corners
            .iter()
            .map(|p| Point::new(p.x - cx, p.y - cy))
            .collect();
        Self::new(x, y, model)
    }

    /// `w` × `h` quadrilateral centred on `(x, y)`.
    #[must_use]
    pub fn quad(x: f64, y: f64, w: f64, h: f64) -> Self {
        let (hw, hh) = (w / 2.0, h / 2.0);
        Self::new(
            x,
            y,
            vec![
                Point::new(hw, -hh),
                Point::new(-hw, -hh),
                Point::new(-hw, hh),
                Point::new(hw, hh),
            ],
        )
    }

    /// Position offset added to every vertex.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Moves the polygon.
    pub fn set_position(&mut self, p: Point) {
        self.x = p.x;
        self.y = p.y;
    }

    /// Offset added to model vertices before the matrix applies.
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Changes the origin and re-applies the last transform.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
        let matrix = self.matrix;
        self.transform(&matrix);
    }

    /// Last matrix passed to [`Polygon::transform`].
    #[must_use]
    pub const fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Vertices as constructed.
    #[must_use]
    pub fn model(&self) -> &[Point] {
        &self.model
    }

    /// Transformed vertices, relative to the position.
    #[must_use]
    pub fn actual(&self) -> &[Point] {
        &self.actual
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.model.len()
    }

    /// Recomputes `actual[i] = matrix · (model[i] + origin)`.
    pub fn transform(&mut self, matrix: &Matrix) {
        self.matrix = *matrix;
        let origin = self.origin;
        for (actual, &model) in self.actual.iter_mut().zip(&self.model) {
            *actual = matrix.apply(model + origin);
        }
    }

    /// World-space vertices.
    #[must_use]
    pub fn edges(&self) -> Vec<Point> {
        let offset = self.position().to_vector();
        self.actual.iter().map(|&p| p + offset).collect()
    }

    /// Shoelace area of the transformed vertices.
    #[must_use]
    pub fn area(&self) -> f64 {
        let n = self.actual.len();
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.actual[i];
                let b = self.actual[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice.abs() / 2.0
    }

    /// Box around the world-space vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.actual {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Aabb::new(
            Point::new(min_x + self.x, min_y + self.y),
            Point::new(max_x + self.x, max_y + self.y),
        )
    }

    /// Even-odd point containment in world space.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> bool {
        if self.actual.len() > BOUNDS_PRECHECK_VERTICES && !self.bounds().hit_test(x, y) {
            return false;
        }
        hit_test_polygon(x - self.x, y - self.y, &self.actual)
    }
}
