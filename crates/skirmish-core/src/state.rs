//! Simulation snapshot: the complete visible state handed to the host each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::SimTime;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub spawner: SpawnerPhase,
    pub wave_index: u32,
    pub total_waves: u32,
    pub active_enemies: u32,
    pub level_complete: bool,
    pub receivers: Vec<ReceiverView>,
    pub projectiles: Vec<ProjectileView>,
    pub events: Vec<SimEvent>,
}

/// A health-bearing actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiverView {
    pub entity: u64,
    pub faction: Faction,
    pub position: Vec2,
    pub current_health: f32,
    pub max_health: f32,
    pub is_invincible: bool,
    pub was_damaged_this_tick: bool,
    /// `Some(active)` for wave-spawned enemies.
    pub enemy_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub entity: u64,
    pub faction: Faction,
    pub position: Vec2,
    pub damage: f32,
}
