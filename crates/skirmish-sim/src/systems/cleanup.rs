//! Cleanup system: removes spent and out-of-bounds projectiles.

use hecs::Entity;

use skirmish_core::components::Projectile;
use skirmish_core::constants::OOB_MARGIN;
use skirmish_core::types::Position;

use crate::collaborators::Viewport;
use crate::registry::Registry;

/// Reap projectiles flagged by the damage system, then any that left the arena.
/// Uses a pre-allocated buffer to avoid per-tick allocation. Returns how many were removed.
pub fn run(registry: &mut Registry, arena: &Viewport, despawn_buffer: &mut Vec<Entity>) -> usize {
    let mut removed = registry.reap_marked_projectiles(despawn_buffer);

    despawn_buffer.clear();
    for (entity, pos) in registry.world_mut().query_mut::<&Position>().with::<&Projectile>() {
        if !arena.contains(pos.0, OOB_MARGIN) {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        if registry.despawn(entity) {
            removed += 1;
        }
    }
    removed
}
