//! # Scene Configuration
//!
//! A scene is described by a small TOML file. Every key is optional:
//!
//! ```toml
//! width = 800.0
//! height = 600.0
//! ball_count = 60
//! min_radius = 10.0
//! max_radius = 30.0
//! max_speed = 150.0
//! friction = 0.5
//! rest_speed = 1.0
//! cell_size = 64.0
//! density = 1.0
//! seed = 42
//! obstacle_radius = 0.0
//! ```
//!
//! The config is validated once at load time; a simulation built from a
//! validated config never fails afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tessera_physics::UniformGrid;

use crate::error::{SimulationError, SimulationResult};

/// Area per ball when the ball count is derived from the scene size.
pub const AREA_PER_BALL: f64 = 8000.0;

/// Parameters of a bouncing-balls scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Scene width.
    pub width: f64,
    /// Scene height.
    pub height: f64,
    /// Number of balls spawned at start.
    pub ball_count: usize,
    /// Smallest ball radius.
    pub min_radius: f64,
    /// Largest ball radius.
    pub max_radius: f64,
    /// Largest initial speed along each axis.
    pub max_speed: f64,
    /// Linear friction coefficient.
    pub friction: f64,
    /// Speed below which a ball stops.
    pub rest_speed: f64,
    /// Broad-phase cell size.
    pub cell_size: f64,
    /// Mass per unit area of every ball.
    pub density: f64,
    /// RNG seed for ball placement.
    pub seed: u64,
    /// Radius of a static obstacle in the centre of the scene; 0 for none.
    pub obstacle_radius: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let (width, height) = (800.0, 600.0);
        Self {
            width,
            height,
            ball_count: (width * height / AREA_PER_BALL) as usize,
            min_radius: 10.0,
            max_radius: 30.0,
            max_speed: 150.0,
            friction: 0.5,
            rest_speed: 1.0,
            cell_size: 64.0,
            density: 1.0,
            seed: 42,
            obstacle_radius: 0.0,
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`SimulationError::Config`] when the document is malformed or fails
    /// [`SimulationConfig::validate`].
    pub fn from_toml_str(source: &str) -> SimulationResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| SimulationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`SimulationError::Io`] when the file cannot be read, otherwise as
    /// [`SimulationConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> SimulationResult<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.as_ref().display(), "loaded scene config");
        Ok(config)
    }

    /// Checks that the values describe a scene that can be built.
    ///
    /// # Errors
    ///
    /// [`SimulationError::Config`] naming the first offending key.
    pub fn validate(&self) -> SimulationResult<()> {
        fn positive(name: &str, value: f64) -> SimulationResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SimulationError::Config(format!("{name} must be positive, got {value}")))
            }
        }
        fn non_negative(name: &str, value: f64) -> SimulationResult<()> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(SimulationError::Config(format!("{name} must not be negative, got {value}")))
            }
        }

        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("min_radius", self.min_radius)?;
        positive("max_radius", self.max_radius)?;
        positive("cell_size", self.cell_size)?;
        positive("density", self.density)?;
        non_negative("max_speed", self.max_speed)?;
        non_negative("friction", self.friction)?;
        non_negative("rest_speed", self.rest_speed)?;
        non_negative("obstacle_radius", self.obstacle_radius)?;

        if self.min_radius > self.max_radius {
            return Err(SimulationError::Config(format!(
                "min_radius {} exceeds max_radius {}",
                self.min_radius, self.max_radius
            )));
        }
        let cells = (self.width / self.cell_size).ceil() * (self.height / self.cell_size).ceil();
        if cells > UniformGrid::MAX_CELLS as f64 {
            return Err(SimulationError::Config(format!(
                "cell_size {} splits a {}x{} scene into more than {} cells",
                self.cell_size,
                self.width,
                self.height,
                UniformGrid::MAX_CELLS
            )));
        }
        if self.max_radius * 2.0 > self.width.min(self.height) {
            return Err(SimulationError::Config(format!(
                "max_radius {} does not fit in a {}x{} scene",
                self.max_radius, self.width, self.height
            )));
        }
        Ok(())
    }
}
