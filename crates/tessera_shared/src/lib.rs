//! # TESSERA Shared
//!
//! Two-dimensional math used by both the registry consumers and the
//! collision engine.
//!
//! ## Coordinate System
//!
//! Screen-style coordinates: `x` grows to the right, `y` grows downwards.
//! Angles are in radians unless a function name says otherwise.

#![deny(unsafe_code)]

pub mod math;

pub use math::{
    clamp, deg_to_rad, dist, dist_sq, rad_to_deg, Matrix, Point, Transform, Vector,
};
