//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems.
//! `Faction`, `Position` and `Velocity` are also attached directly as components.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Health of a damage receiver. Mutated only by the collision-damage system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    /// Never negative.
    pub current: f32,
    pub max: f32,
    /// Damage-immunity latch. Set by the damage system when a hit lands,
    /// cleared by whoever owns the invincibility timer.
    pub is_invincible: bool,
    /// True only for the tick in which damage landed.
    pub was_damaged_this_tick: bool,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            is_invincible: false,
            was_damaged_this_tick: false,
        }
    }
}

/// Circular hit volume centred on the entity position plus `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionRadius {
    pub radius: f32,
    pub offset: Vec2,
}

/// A bullet in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub damage: f32,
    /// Set when the projectile hits something; the registry reaps it at end of tick.
    pub marked_for_removal: bool,
}

/// Weapon fire gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CooldownTimer {
    pub cooldown_secs: f32,
    /// Time accumulated since the last shot. Only advances while `can_fire` is false.
    pub elapsed_secs: f32,
    pub can_fire: bool,
}

/// What a shooter fires once its cooldown allows it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub damage: f32,
    pub projectile_speed: f32,
}

/// Marks an entity as a wave-spawned enemy actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub template_id: String,
    /// Behaviour flag. False while the actor is still moving into the arena.
    pub active: bool,
}

/// Marks the player-controlled actor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// One-shot request for the player's weapon to fire this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireIntent {
    pub direction: Vec2,
}

/// Clears the `Health::is_invincible` latch after it has been held for `duration_secs`.
///
/// `counting` is set on the first tick the latch is seen held; elapsed time
/// accumulates from the tick after that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvincibilityWindow {
    pub duration_secs: f32,
    pub elapsed_secs: f32,
    #[serde(default)]
    pub counting: bool,
}

impl InvincibilityWindow {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            elapsed_secs: 0.0,
            counting: false,
        }
    }
}

/// Insertion sequence number assigned by the registry.
/// Systems that need reproducible iteration sort by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpawnOrder(pub u64);
