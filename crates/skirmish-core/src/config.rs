//! Level and actor configuration.
//!
//! Authored as JSON and loaded read-only. Nothing here is mutated
//! by the simulation.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{EasingKind, Faction};

/// One enemy to spawn during a wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnEntry {
    /// Key into the actor catalog.
    pub actor_template_id: String,
    pub start_point: Vec2,
    pub end_point: Vec2,
    /// Wait before this entry, measured from the previous entry's dispatch.
    #[serde(default)]
    pub spawn_delay: f32,
    /// Seconds to move from `start_point` to `end_point`.
    #[serde(default)]
    pub move_duration: f32,
    #[serde(default)]
    pub easing: EasingKind,
    /// Treat both points as normalized `[-1, 1]` screen coordinates.
    #[serde(default)]
    pub scale_to_screen: bool,
}

/// A group of spawns released together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    #[serde(default)]
    pub spawns: Vec<SpawnEntry>,
    /// Wait before the first spawn entry.
    #[serde(default)]
    pub wave_delay: f32,
    /// Advance past this wave without waiting or spawning.
    #[serde(default)]
    pub skip_wave: bool,
}

/// The ordered waves of one level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub waves: Vec<WaveDefinition>,
}

impl LevelDetails {
    /// Bounds-checked wave lookup.
    pub fn wave(&self, index: usize) -> Option<&WaveDefinition> {
        self.waves.get(index)
    }

    pub fn total_waves(&self) -> usize {
        self.waves.len()
    }

    /// Number of enemies the level spawns, ignoring skipped waves.
    pub fn total_spawns(&self) -> usize {
        self.waves
            .iter()
            .filter(|w| !w.skip_wave)
            .map(|w| w.spawns.len())
            .sum()
    }

    /// Check timing invariants. An empty level is valid.
    pub fn validate(&self) -> Result<(), String> {
        for (wi, wave) in self.waves.iter().enumerate() {
            if !is_non_negative(wave.wave_delay) {
                return Err(format!("wave {wi}: wave_delay must be >= 0"));
            }
            for (si, spawn) in wave.spawns.iter().enumerate() {
                if !is_non_negative(spawn.spawn_delay) {
                    return Err(format!("wave {wi} spawn {si}: spawn_delay must be >= 0"));
                }
                if !is_non_negative(spawn.move_duration) {
                    return Err(format!("wave {wi} spawn {si}: move_duration must be >= 0"));
                }
            }
        }
        Ok(())
    }
}

/// False for negative values and NaN.
fn is_non_negative(value: f32) -> bool {
    value >= 0.0
}

/// Weapon parameters for an actor template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub cooldown_secs: f32,
    pub damage: f32,
    #[serde(default = "default_enemy_projectile_speed")]
    pub projectile_speed: f32,
}

fn default_enemy_projectile_speed() -> f32 {
    ENEMY_PROJECTILE_SPEED
}

fn default_enemy_faction() -> Faction {
    Faction::Enemy
}

/// Everything the actor factory needs to build one actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorTemplate {
    pub health: f32,
    pub collision_radius: f32,
    #[serde(default)]
    pub collision_offset: Vec2,
    #[serde(default = "default_enemy_faction")]
    pub faction: Faction,
    /// Length of the post-hit immunity window. `None` keeps the latch set forever.
    #[serde(default)]
    pub invincibility_secs: Option<f32>,
    #[serde(default)]
    pub weapon: Option<WeaponSpec>,
}

impl ActorTemplate {
    /// The default player loadout.
    pub fn player() -> Self {
        Self {
            health: PLAYER_MAX_HEALTH,
            collision_radius: PLAYER_COLLISION_RADIUS,
            collision_offset: Vec2::ZERO,
            faction: Faction::Player,
            invincibility_secs: Some(PLAYER_INVINCIBILITY_SECS),
            weapon: Some(WeaponSpec {
                cooldown_secs: PLAYER_FIRE_COOLDOWN_SECS,
                damage: PLAYER_PROJECTILE_DAMAGE,
                projectile_speed: PLAYER_PROJECTILE_SPEED,
            }),
        }
    }
}

/// Actor templates keyed by id. Ordered so iteration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorCatalog {
    pub templates: BTreeMap<String, ActorTemplate>,
}

impl ActorCatalog {
    /// Built-in enemy roster.
    pub fn default_catalog() -> Self {
        let mut templates = BTreeMap::new();
        templates.insert(
            "watcher".to_string(),
            ActorTemplate {
                health: 3.0,
                collision_radius: 0.4,
                collision_offset: Vec2::ZERO,
                faction: Faction::Enemy,
                invincibility_secs: Some(0.0),
                weapon: Some(WeaponSpec {
                    cooldown_secs: 1.5,
                    damage: 1.0,
                    projectile_speed: ENEMY_PROJECTILE_SPEED,
                }),
            },
        );
        templates.insert(
            "drone".to_string(),
            ActorTemplate {
                health: 1.0,
                collision_radius: 0.3,
                collision_offset: Vec2::ZERO,
                faction: Faction::Enemy,
                invincibility_secs: Some(0.0),
                weapon: None,
            },
        );
        templates.insert(
            "brute".to_string(),
            ActorTemplate {
                health: 8.0,
                collision_radius: 0.7,
                collision_offset: Vec2::new(0.0, 0.1),
                faction: Faction::Enemy,
                invincibility_secs: Some(0.1),
                weapon: Some(WeaponSpec {
                    cooldown_secs: 2.5,
                    damage: 2.0,
                    projectile_speed: ENEMY_PROJECTILE_SPEED * 0.7,
                }),
            },
        );
        Self { templates }
    }

    pub fn get(&self, id: &str) -> Option<&ActorTemplate> {
        self.templates.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}
