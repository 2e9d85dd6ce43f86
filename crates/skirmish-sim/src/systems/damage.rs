//! Collision-damage system: projectiles against damage receivers.
//!
//! Receivers are entities with Health + Faction + CollisionRadius + Position.
//! Both sides are scanned in spawn order so results are reproducible.
//! A receiver takes at most one hit per tick and latches invincible when it does.

use glam::Vec2;
use hecs::{Entity, World};

use skirmish_core::components::{CollisionRadius, Health, Projectile, SpawnOrder};
use skirmish_core::enums::Faction;
use skirmish_core::events::SimEvent;
use skirmish_core::types::Position;

struct ProjectileProbe {
    order: SpawnOrder,
    entity: Entity,
    faction: Faction,
    position: Vec2,
    damage: f32,
}

/// Run one damage pass. Consumed projectiles are only flagged here;
/// the registry reaps them during cleanup.
pub fn run(world: &mut World, events: &mut Vec<SimEvent>) {
    let mut projectiles: Vec<ProjectileProbe> = world
        .query::<(&SpawnOrder, &Projectile, &Faction, &Position)>()
        .iter()
        .map(|(entity, (order, projectile, faction, pos))| ProjectileProbe {
            order: *order,
            entity,
            faction: *faction,
            position: pos.0,
            damage: projectile.damage,
        })
        .collect();

    let mut receivers: Vec<(SpawnOrder, Entity)> = world
        .query::<(&SpawnOrder, &Health, &Faction, &CollisionRadius, &Position)>()
        .iter()
        .map(|(entity, (order, ..))| (*order, entity))
        .collect();

    if receivers.is_empty() || projectiles.is_empty() {
        return;
    }

    receivers.sort_unstable_by_key(|&(order, _)| order);
    projectiles.sort_unstable_by_key(|p| p.order);

    for &(_, receiver) in &receivers {
        let (faction, centre, radius_sq) = {
            let Ok((health, faction, radius, pos)) = world
                .query_one_mut::<(&mut Health, &Faction, &CollisionRadius, &Position)>(receiver)
            else {
                continue;
            };
            health.was_damaged_this_tick = false;
            if health.is_invincible || radius.radius.is_nan() || radius.radius <= 0.0 {
                continue;
            }
            (*faction, pos.0 + radius.offset, radius.radius * radius.radius)
        };

        // First opposing projectile inside the hit circle wins.
        let Some(hit) = projectiles
            .iter()
            .find(|p| p.faction != faction && p.position.distance_squared(centre) <= radius_sq)
        else {
            continue;
        };

        if let Ok(mut projectile) = world.get::<&mut Projectile>(hit.entity) {
            projectile.marked_for_removal = true;
        }

        if hit.damage > 0.0 {
            if let Ok(mut health) = world.get::<&mut Health>(receiver) {
                health.is_invincible = true;
                health.current = (health.current - hit.damage).max(0.0);
                health.was_damaged_this_tick = true;
                events.push(SimEvent::ReceiverDamaged {
                    entity: receiver.to_bits().get(),
                    faction,
                    damage: hit.damage,
                    remaining: health.current,
                });
            }
        }
    }
}
