//! # Bouncing-Balls Simulation
//!
//! Every ball is a registry entity carrying one shared body under
//! `BODY | COLLIDER` and a [`Color`] under `COLOR`. A static obstacle is a
//! registered [`Container`] that only answers for `COLLIDER` and `COLOR`.
//!
//! ## Step
//!
//! ```text
//! 1. Entities(BODY, COLLIDER)           registry query, sorted by id
//! 2. integrate + clamp                  moving bodies only
//! 3. UniformGrid rebuild                bounds of every collider
//! 4. resolve candidate pairs            positional correction
//! 5. elastic impulse per resolved pair  velocity exchange
//! 6. clamp corrected bodies             corrections never leave the area
//! ```
//!
//! When nothing moved in step 2 the collision stages are skipped.
//!
//! Bodies live behind a `parking_lot::RwLock` so a render thread can read
//! them through the registry while the simulation thread writes.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use tessera_core::{ComponentTag, ComponentValue, Container, EntityId, Registry};
use tessera_physics::{
    apply_elastic_impulse, apply_static_impulse, resolve_colliding_shapes,
    resolve_static_collision, Circle, DynamicBody, Shape, StaticBody, UniformGrid,
};
use tessera_shared::Vector;

use crate::config::SimulationConfig;
use crate::error::SimulationResult;

/// Tag of the movable body.
pub const BODY: ComponentTag = ComponentTag::bit(0);
/// Tag of anything that can be hit.
pub const COLLIDER: ComponentTag = ComponentTag::bit(1);
/// Tag of the fill colour.
pub const COLOR: ComponentTag = ComponentTag::bit(2);

/// Component stored under `BODY | COLLIDER` for every ball.
pub type BodyCell = RwLock<DynamicBody>;

/// RGBA fill colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Creates an opaque colour.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }
}

/// Colours balls are drawn from.
pub const PALETTE: [Color; 8] = [
    Color::rgb(0xe6, 0x39, 0x46),
    Color::rgb(0xf4, 0xa2, 0x61),
    Color::rgb(0xe9, 0xc4, 0x6a),
    Color::rgb(0x2a, 0x9d, 0x8f),
    Color::rgb(0x26, 0x46, 0x53),
    Color::rgb(0x45, 0x7b, 0x9d),
    Color::rgb(0xa8, 0xda, 0xdc),
    Color::rgb(0x6d, 0x59, 0x7a),
];

/// Colour of static obstacles.
pub const OBSTACLE_COLOR: Color = Color::rgb(0x80, 0x80, 0x80);

/// A static obstacle that stores its own components.
pub struct StaticObstacle {
    slots: RwLock<HashMap<ComponentTag, ComponentValue>>,
}

impl StaticObstacle {
    /// Creates an obstacle holding `body` under `COLLIDER` and `color` under
    /// `COLOR`.
    #[must_use]
    pub fn new(body: StaticBody, color: Color) -> Self {
        let mut slots: HashMap<ComponentTag, ComponentValue> = HashMap::new();
        slots.insert(COLLIDER, Arc::new(body));
        slots.insert(COLOR, Arc::new(color));
        Self {
            slots: RwLock::new(slots),
        }
    }
}

impl Container for StaticObstacle {
    fn add_component(&self, tag: ComponentTag, value: ComponentValue) {
        let mut slots = self.slots.write();
        for flag in tag.flags() {
            slots.insert(flag, Arc::clone(&value));
        }
    }

    fn has_component(&self, tag: ComponentTag) -> bool {
        let slots = self.slots.read();
        tag.flags().iter().all(|flag| slots.contains_key(flag))
    }

    fn component(&self, tag: ComponentTag) -> Option<ComponentValue> {
        self.slots.read().get(&tag).cloned()
    }
}

/// What one [`Simulation::step`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Dynamic bodies seen.
    pub bodies: usize,
    /// Pairs reported by the broad phase.
    pub candidates: usize,
    /// Pairs the narrow phase corrected.
    pub collisions: usize,
}

/// Registry-backed ball simulation.
pub struct Simulation {
    config: SimulationConfig,
    registry: Registry,
    grid: UniformGrid,
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Builds a scene from a config.
    ///
    /// # Errors
    ///
    /// Fails when the config does not validate or the broad-phase grid
    /// cannot be built.
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;
        let grid = UniformGrid::covering(config.width, config.height, config.cell_size)?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        let mut sim = Self {
            config,
            registry: Registry::new(),
            grid,
            rng,
        };

        if sim.config.obstacle_radius > 0.0 {
            let (x, y) = (sim.config.width / 2.0, sim.config.height / 2.0);
            sim.add_obstacle(Circle::new(x, y, sim.config.obstacle_radius));
        }
        for _ in 0..sim.config.ball_count {
            sim.spawn_random_ball();
        }

        tracing::info!(
            balls = sim.config.ball_count,
            entities = sim.registry.len(),
            cols = sim.grid.cols(),
            rows = sim.grid.rows(),
            "simulation ready"
        );
        Ok(sim)
    }

    /// The config the scene was built from.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The registry holding every entity of the scene.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Adds a ball and returns its id.
    pub fn spawn_ball(&self, circle: Circle, velocity: Vector, color: Color) -> EntityId {
        let body = DynamicBody::new(circle)
            .with_density(self.config.density)
            .with_velocity(velocity);
        let entity = self.registry.create();
        entity
            .add_component(BODY | COLLIDER, BodyCell::new(body))
            .add_component(COLOR, color);
        entity.id()
    }

    /// Adds a static obstacle and returns its id.
    pub fn add_obstacle(&self, shape: impl Into<Shape>) -> EntityId {
        let obstacle = StaticObstacle::new(StaticBody::new(shape), OBSTACLE_COLOR);
        self.registry.register(Arc::new(obstacle)).id()
    }

    fn spawn_random_ball(&mut self) -> EntityId {
        let c = &self.config;
        let radius = self.rng.gen_range(c.min_radius..=c.max_radius);
        let x = self.rng.gen_range(c.max_radius..=c.width - c.max_radius);
        let y = self.rng.gen_range(c.max_radius..=c.height - c.max_radius);
        let velocity = if c.max_speed > 0.0 {
            Vector::new(
                self.rng.gen_range(-c.max_speed..c.max_speed),
                self.rng.gen_range(-c.max_speed..c.max_speed),
            )
        } else {
            Vector::ZERO
        };
        let color = PALETTE[self.rng.gen_range(0..PALETTE.len())];
        self.spawn_ball(Circle::new(x, y, radius), velocity, color)
    }

    /// Every ball body, ordered by entity id.
    #[must_use]
    pub fn bodies(&self) -> Vec<(EntityId, Arc<BodyCell>)> {
        let mut bodies: Vec<_> = self
            .registry
            .entities(&[BODY, COLLIDER])
            .into_iter()
            .filter_map(|e| e.component_as::<BodyCell>(BODY).map(|b| (e.id(), b)))
            .collect();
        bodies.sort_unstable_by_key(|(id, _)| *id);
        bodies
    }

    /// Every static obstacle, ordered by entity id.
    #[must_use]
    pub fn obstacles(&self) -> Vec<(EntityId, Arc<StaticBody>)> {
        let mut obstacles: Vec<_> = self
            .registry
            .entities(&[COLLIDER])
            .into_iter()
            .filter(|e| !e.has_component(BODY))
            .filter_map(|e| e.component_as::<StaticBody>(COLLIDER).map(|b| (e.id(), b)))
            .collect();
        obstacles.sort_unstable_by_key(|(id, _)| *id);
        obstacles
    }

    /// Advances the scene by `dt` seconds.
    pub fn step(&mut self, dt: f64) -> StepStats {
        let bodies = self.bodies();
        let obstacles = self.obstacles();
        let mut stats = StepStats {
            bodies: bodies.len(),
            ..StepStats::default()
        };

        let (w, h) = (self.config.width, self.config.height);
        let mut moved = false;
        for (_, cell) in &bodies {
            let mut body = cell.write();
            if body.is_moving() {
                body.integrate(dt, self.config.friction, self.config.rest_speed);
                body.clamp_to_bounds(w, h);
                moved = true;
            } else if body.clamp_to_bounds(w, h) {
                moved = true;
            }
        }
        if !moved {
            return stats;
        }

        self.grid.clear();
        for (i, (_, cell)) in bodies.iter().enumerate() {
            self.grid.insert(i, cell.read().collider().bounds());
        }
        for (j, (_, obstacle)) in obstacles.iter().enumerate() {
            self.grid.insert(bodies.len() + j, obstacle.collider().bounds());
        }

        let pairs = self.grid.candidate_pairs();
        stats.candidates = pairs.len();

        let mut resolved = Vec::new();
        let mut corrected = Vec::new();
        for (i, j) in pairs {
            if i >= bodies.len() {
                continue;
            }
            if j >= bodies.len() {
                let obstacle = &obstacles[j - bodies.len()].1;
                let mut body = bodies[i].1.write();
                if resolve_static_collision(&mut body, obstacle) {
                    apply_static_impulse(&mut body, obstacle);
                    stats.collisions += 1;
                    corrected.push(i);
                }
                continue;
            }
            // pairs are (smaller, larger): locks are always taken in index order
            let mut a = bodies[i].1.write();
            let mut b = bodies[j].1.write();
            if resolve_colliding_shapes(&mut a.shape, &mut b.shape) {
                resolved.push((i, j));
            }
        }
        stats.collisions += resolved.len();

        for &(i, j) in &resolved {
            let mut a = bodies[i].1.write();
            let mut b = bodies[j].1.write();
            apply_elastic_impulse(&mut a, &mut b);
        }

        corrected.extend(resolved.iter().flat_map(|&(i, j)| [i, j]));
        corrected.sort_unstable();
        corrected.dedup();
        for i in corrected {
            bodies[i].1.write().clamp_to_bounds(w, h);
        }

        tracing::debug!(
            bodies = stats.bodies,
            candidates = stats.candidates,
            collisions = stats.collisions,
            "step"
        );
        stats
    }

    /// Returns the lowest-id entity whose collider contains `(x, y)`.
    #[must_use]
    pub fn pick(&self, x: f64, y: f64) -> Option<EntityId> {
        let mut entities = self.registry.entities(&[COLLIDER]);
        entities.sort_unstable_by_key(tessera_core::Entity::id);
        entities.into_iter().find_map(|e| {
            let hit = if let Some(cell) = e.component_as::<BodyCell>(COLLIDER) {
                cell.read().collider().hit_test(x, y)
            } else if let Some(obstacle) = e.component_as::<StaticBody>(COLLIDER) {
                obstacle.collider().hit_test(x, y)
            } else {
                false
            };
            hit.then_some(e.id())
        })
    }

    /// Total kinetic energy of all balls.
    #[must_use]
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies()
            .iter()
            .map(|(_, cell)| {
                let body = cell.read();
                0.5 * body.mass() * body.velocity.length_squared()
            })
            .sum()
    }
}
