//! # TESSERA
//!
//! Registry-driven 2D collision simulation.
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │  tessera_core    │   │ tessera_physics  │   │ tessera_shared   │
//! │  • Registry      │   │ • Shapes         │   │ • Point/Vector   │
//! │  • ComponentTag  │   │ • Colliders      │   │ • Matrix         │
//! │  • Containers    │   │ • Resolver, grid │   │ • Transform      │
//! └────────┬─────────┘   └────────┬─────────┘   └──────────────────┘
//!          └───────────┬──────────┘
//!                      ▼
//!               ┌─────────────┐
//!               │ Simulation  │  config ─► spawn ─► step ─► pick
//!               └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: TOML scene description
//! - `simulation`: the bouncing-balls world
//! - `error`: setup errors

pub mod config;
pub mod error;
pub mod simulation;

pub use tessera_core as core;
pub use tessera_physics as physics;
pub use tessera_shared as shared;

pub use config::SimulationConfig;
pub use error::{SimulationError, SimulationResult};
pub use simulation::{
    BodyCell, Color, Simulation, StaticObstacle, StepStats, BODY, COLLIDER, COLOR,
    OBSTACLE_COLOR, PALETTE,
};
