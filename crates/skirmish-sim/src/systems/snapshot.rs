//! Snapshot system: queries the world and builds a complete SimSnapshot.
//!
//! This system is read-only. Views are listed in spawn order.

use hecs::World;

use skirmish_core::components::*;
use skirmish_core::enums::{Faction, GamePhase, SpawnerPhase};
use skirmish_core::events::SimEvent;
use skirmish_core::state::*;
use skirmish_core::types::{Position, SimTime};

use crate::level::LevelController;

/// Build a complete SimSnapshot from the current world and level state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    level: &LevelController,
    events: Vec<SimEvent>,
) -> SimSnapshot {
    let spawner = level.spawner();
    SimSnapshot {
        time: *time,
        phase,
        spawner: spawner.phase(),
        wave_index: spawner.current_wave_index() as u32,
        total_waves: level.details().total_waves() as u32,
        active_enemies: spawner.active_enemy_count(),
        level_complete: spawner.phase() == SpawnerPhase::Complete,
        receivers: build_receivers(world),
        projectiles: build_projectiles(world),
        events,
    }
}

fn build_receivers(world: &World) -> Vec<ReceiverView> {
    let mut query = world.query::<(&SpawnOrder, &Health, &Faction, &Position, Option<&Enemy>)>();
    let mut views: Vec<(SpawnOrder, ReceiverView)> = query
        .iter()
        .map(|(entity, (order, health, faction, pos, enemy))| {
            (
                *order,
                ReceiverView {
                    entity: entity.to_bits().get(),
                    faction: *faction,
                    position: pos.0,
                    current_health: health.current,
                    max_health: health.max,
                    is_invincible: health.is_invincible,
                    was_damaged_this_tick: health.was_damaged_this_tick,
                    enemy_active: enemy.map(|e| e.active),
                },
            )
        })
        .collect();
    views.sort_unstable_by_key(|(order, _)| *order);
    views.into_iter().map(|(_, view)| view).collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut query = world.query::<(&SpawnOrder, &Projectile, &Faction, &Position)>();
    let mut views: Vec<(SpawnOrder, ProjectileView)> = query
        .iter()
        .filter(|(_, (_, projectile, ..))| !projectile.marked_for_removal)
        .map(|(entity, (order, projectile, faction, pos))| {
            (
                *order,
                ProjectileView {
                    entity: entity.to_bits().get(),
                    faction: *faction,
                    position: pos.0,
                    damage: projectile.damage,
                },
            )
        })
        .collect();
    views.sort_unstable_by_key(|(order, _)| *order);
    views.into_iter().map(|(_, view)| view).collect()
}
