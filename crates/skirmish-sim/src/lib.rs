//! Simulation engine for SKIRMISH.
//!
//! Owns the hecs entity registry, runs the per-tick combat systems and the
//! wave spawner at a fixed tick rate, and produces `SimSnapshot`s for the host.

pub mod collaborators;
pub mod engine;
pub mod level;
pub mod level_gen;
pub mod loader;
pub mod registry;
pub mod systems;
pub mod tween;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use registry::Registry;
pub use skirmish_core as core;
