//! # Simulation Error Types
//!
//! Errors raised while setting up a simulation. Stepping never fails.

use thiserror::Error;

use tessera_physics::PhysicsError;

/// Errors that can occur while building a simulation.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Config file could not be parsed or holds invalid values.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Config file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Collision structures could not be built.
    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

/// Result type for simulation setup.
pub type SimulationResult<T> = Result<T, SimulationError>;
