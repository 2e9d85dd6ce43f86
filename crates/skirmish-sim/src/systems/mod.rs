//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over the registry or its `World`.
//! They hold no state of their own; the wave spawner is the one exception
//! and owns its sequence state explicitly.

pub mod cleanup;
pub mod cooldown;
pub mod damage;
pub mod defeat;
pub mod invincibility;
pub mod movement;
pub mod snapshot;
pub mod wave_spawner;
pub mod weapon_fire;
