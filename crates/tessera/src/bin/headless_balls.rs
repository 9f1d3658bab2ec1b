//! # TESSERA Headless Balls
//!
//! Runs a bouncing-balls scene without a window and prints what happened.
//!
//! ```bash
//! # Default scene
//! ./headless_balls
//!
//! # Scene from a config file, 1200 steps
//! ./headless_balls scene.toml 1200
//! ```

use std::time::Instant;

use tessera::{Simulation, SimulationConfig};

/// Fixed simulation time step.
const DT: f64 = 1.0 / 60.0;

/// Steps run when none are given.
const DEFAULT_STEPS: u32 = 600;

/// Steps between two progress lines.
const REPORT_EVERY: u32 = 60;

fn main() {
    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => match SimulationConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("✗ FATAL: {e}");
                std::process::exit(1);
            }
        },
        None => SimulationConfig::default(),
    };
    let steps = match args.next().map(|s| s.parse::<u32>()) {
        None => DEFAULT_STEPS,
        Some(Ok(steps)) => steps,
        Some(Err(e)) => {
            eprintln!("✗ FATAL: invalid step count: {e}");
            std::process::exit(1);
        }
    };

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                    TESSERA HEADLESS BALLS v0.1.0");
    println!("═══════════════════════════════════════════════════════════════════");
    println!();
    println!("  Scene:    {} x {}", config.width, config.height);
    println!("  Balls:    {}", config.ball_count);
    println!("  Seed:     {}", config.seed);
    println!("  Steps:    {steps}");
    println!();

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("✗ FATAL: {e}");
            std::process::exit(1);
        }
    };

    let started = Instant::now();
    let mut total_collisions = 0_usize;
    for step in 1..=steps {
        let stats = sim.step(DT);
        total_collisions += stats.collisions;
        if step % REPORT_EVERY == 0 {
            println!(
                "  step {step:>5}  candidates {:>4}  collisions {:>3}  energy {:>12.1}",
                stats.candidates,
                stats.collisions,
                sim.kinetic_energy()
            );
        }
    }

    let elapsed = started.elapsed();
    println!();
    println!("  ✓ {steps} steps in {elapsed:.2?}, {total_collisions} collisions resolved");
}
