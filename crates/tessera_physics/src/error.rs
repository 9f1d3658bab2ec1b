//! # Physics Error Types
//!
//! Errors raised while building collision structures. Per-frame queries
//! (hit-tests, resolution) never fail.

use thiserror::Error;

/// Errors that can occur while constructing physics structures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// A broad-phase grid needs at least one cell.
    #[error("uniform grid needs at least one cell, got {cols}x{rows}")]
    EmptyGrid {
        /// Requested column count.
        cols: usize,
        /// Requested row count.
        rows: usize,
    },

    /// A broad-phase grid may hold at most `UniformGrid::MAX_CELLS` cells.
    #[error("uniform grid of {cols}x{rows} cells is too large")]
    GridTooLarge {
        /// Requested column count.
        cols: usize,
        /// Requested row count.
        rows: usize,
    },

    /// Cell size must be a positive, finite number.
    #[error("invalid grid cell size: {0}")]
    InvalidCellSize(f64),

    /// A polygon needs at least three vertices.
    #[error("polygon needs at least 3 vertices, got {0}")]
    DegeneratePolygon(usize),
}

/// Result type for physics construction.
pub type PhysicsResult<T> = Result<T, PhysicsError>;
