//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Side an entity fights for. Damage only applies across differing factions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
    #[default]
    Neutral,
}

/// Easing curve used when an actor is moved into the arena.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EasingKind {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseOutCubic,
    /// Overshoots the target slightly before settling.
    EaseOutBack,
}

/// Top-level simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No level has been started.
    #[default]
    Idle,
    /// Systems tick every frame.
    Active,
    /// Time is frozen; commands are still processed.
    Paused,
    /// Every wave has been spawned and cleared.
    LevelComplete,
    /// The player's health reached zero.
    Defeated,
}

/// Observable state of the wave spawner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnerPhase {
    /// No wave in progress, level not started.
    #[default]
    Idle,
    /// A spawn sequence is in flight.
    Spawning,
    /// The last sequence dispatched; waiting for the arena to clear.
    WaitingForClear,
    /// All waves spawned and cleared.
    Complete,
}
