//! Events emitted by the simulation for audio, UI and logging.
//!
//! Entities are referred to by their stable id bits so this crate stays
//! free of any ECS dependency.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::Faction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// `StartLevel` ran; `cancelled_enemies` residual actors were destroyed.
    LevelStarted { cancelled_enemies: u32 },
    /// A wave's spawn sequence began.
    WaveStarted { wave_index: u32 },
    /// A wave flagged `skip_wave` was passed over.
    WaveSkipped { wave_index: u32 },
    /// The last spawn entry of a wave was dispatched.
    WaveDispatched { wave_index: u32, spawned: u32 },
    EnemySpawned {
        entity: u64,
        template_id: String,
        position: Vec2,
    },
    /// The enemy finished moving in and its behaviour was enabled.
    EnemyActivated { entity: u64 },
    /// An inactive enemy was removed from the active set.
    EnemyReaped { entity: u64 },
    ProjectileFired {
        entity: u64,
        faction: Faction,
        position: Vec2,
    },
    ReceiverDamaged {
        entity: u64,
        faction: Faction,
        damage: f32,
        remaining: f32,
    },
    PlayerDefeated,
    LevelCompleted,
}
