//! Defeat system: removes enemies that ran out of health and reports
//! whether the player has been defeated.

use hecs::Entity;

use skirmish_core::components::{Enemy, Health, Player};

use crate::registry::Registry;

/// Despawn every enemy at zero health. Returns true if a player is at zero health.
///
/// Despawned enemies report inactive to the actor factory, so the wave
/// spawner reaps them on its next bookkeeping pass.
pub fn run(registry: &mut Registry, despawn_buffer: &mut Vec<Entity>) -> bool {
    despawn_buffer.clear();
    let world = registry.world_mut();
    for (entity, health) in world.query_mut::<&Health>().with::<&Enemy>() {
        if health.current <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    let player_down = world
        .query_mut::<&Health>()
        .with::<&Player>()
        .into_iter()
        .any(|(_, health)| health.current <= 0.0);

    for entity in despawn_buffer.drain(..) {
        registry.despawn(entity);
    }
    player_down
}
