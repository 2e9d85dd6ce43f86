//! Weapon fire: turns armed cooldown timers into projectiles.
//!
//! The player fires on a queued `FireIntent`. Active armed enemies fire at
//! the player as soon as their cooldown allows.

use glam::Vec2;
use hecs::Entity;

use skirmish_core::components::{CooldownTimer, Enemy, FireIntent, Player, SpawnOrder, Weapon};
use skirmish_core::enums::Faction;
use skirmish_core::events::SimEvent;
use skirmish_core::types::Position;

use crate::registry::Registry;
use crate::world_setup::spawn_projectile;

/// Fire `shooter`'s weapon along `direction` if its timer is armed.
///
/// Disarms the timer and returns the new projectile. Returns `None` when the
/// shooter is not armed, still cooling down, or `direction` has no length.
pub fn fire_weapon(registry: &mut Registry, shooter: Entity, direction: Vec2) -> Option<Entity> {
    let direction = direction.try_normalize()?;
    let (origin, faction, weapon) = {
        let (timer, weapon, pos, faction) = registry
            .world_mut()
            .query_one_mut::<(&mut CooldownTimer, &Weapon, &Position, &Faction)>(shooter)
            .ok()?;
        if !timer.can_fire {
            return None;
        }
        timer.can_fire = false;
        timer.elapsed_secs = 0.0;
        (pos.0, *faction, *weapon)
    };
    Some(spawn_projectile(
        registry,
        faction,
        origin,
        direction * weapon.projectile_speed,
        weapon.damage,
    ))
}

/// Run one fire pass: consume player intents, then let active enemies shoot.
pub fn run(registry: &mut Registry, events: &mut Vec<SimEvent>) {
    let mut intents: Vec<(SpawnOrder, Entity, Vec2)> = registry
        .world_mut()
        .query_mut::<(&SpawnOrder, &FireIntent)>()
        .with::<&Player>()
        .into_iter()
        .map(|(entity, (order, intent))| (*order, entity, intent.direction))
        .collect();
    intents.sort_unstable_by_key(|&(order, ..)| order);

    for &(_, player, direction) in &intents {
        let _ = registry.world_mut().remove_one::<FireIntent>(player);
        if let Some(projectile) = fire_weapon(registry, player, direction) {
            push_fired(registry, projectile, events);
        }
    }

    let Some(target) = first_player_position(registry) else {
        return;
    };

    let mut shooters: Vec<(SpawnOrder, Entity, Vec2)> = registry
        .world()
        .query::<(&SpawnOrder, &Enemy, &CooldownTimer, &Position)>()
        .with::<&Weapon>()
        .iter()
        .filter(|(_, (_, enemy, timer, _))| enemy.active && timer.can_fire)
        .map(|(entity, (order, _, _, pos))| (*order, entity, pos.0))
        .collect();
    shooters.sort_unstable_by_key(|&(order, ..)| order);

    for (_, shooter, origin) in shooters {
        if let Some(projectile) = fire_weapon(registry, shooter, target - origin) {
            push_fired(registry, projectile, events);
        }
    }
}

fn first_player_position(registry: &Registry) -> Option<Vec2> {
    registry
        .world()
        .query::<(&SpawnOrder, &Position)>()
        .with::<&Player>()
        .iter()
        .min_by_key(|(_, (order, _))| **order)
        .map(|(_, (_, pos))| pos.0)
}

fn push_fired(registry: &Registry, projectile: Entity, events: &mut Vec<SimEvent>) {
    let world = registry.world();
    let (Ok(faction), Ok(pos)) = (
        world.get::<&Faction>(projectile),
        world.get::<&Position>(projectile),
    ) else {
        return;
    };
    events.push(SimEvent::ProjectileFired {
        entity: projectile.to_bits().get(),
        faction: *faction,
        position: pos.0,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::components::Projectile;
    use skirmish_core::config::{ActorCatalog, ActorTemplate};
    use skirmish_core::types::Velocity;

    use crate::world_setup::{spawn_enemy, spawn_player};

    fn projectile_count(registry: &Registry) -> usize {
        registry.world().query::<&Projectile>().iter().count()
    }

    #[test]
    fn fire_disarms_and_spawns_projectile() {
        let mut registry = Registry::new();
        let player = spawn_player(&mut registry, &ActorTemplate::player(), Vec2::new(1.0, -2.0));

        let shot = fire_weapon(&mut registry, player, Vec2::new(0.0, 3.0)).unwrap();
        let world = registry.world();
        assert!(!world.get::<&CooldownTimer>(player).unwrap().can_fire);
        assert_eq!(world.get::<&Position>(shot).unwrap().0, Vec2::new(1.0, -2.0));
        assert_eq!(*world.get::<&Faction>(shot).unwrap(), Faction::Player);
        let vel = world.get::<&Velocity>(shot).unwrap().0;
        assert!((vel.length() - ActorTemplate::player().weapon.unwrap().projectile_speed).abs() < 1e-4);
        assert!(vel.x.abs() < 1e-6 && vel.y > 0.0);
    }

    #[test]
    fn cooling_weapon_does_not_fire() {
        let mut registry = Registry::new();
        let player = spawn_player(&mut registry, &ActorTemplate::player(), Vec2::ZERO);
        assert!(fire_weapon(&mut registry, player, Vec2::Y).is_some());
        assert!(fire_weapon(&mut registry, player, Vec2::Y).is_none());
        assert_eq!(projectile_count(&registry), 1);
    }

    #[test]
    fn zero_direction_is_rejected_without_disarming() {
        let mut registry = Registry::new();
        let player = spawn_player(&mut registry, &ActorTemplate::player(), Vec2::ZERO);
        assert!(fire_weapon(&mut registry, player, Vec2::ZERO).is_none());
        assert!(registry.world().get::<&CooldownTimer>(player).unwrap().can_fire);
    }

    #[test]
    fn intent_is_consumed_once() {
        let mut registry = Registry::new();
        let player = spawn_player(&mut registry, &ActorTemplate::player(), Vec2::ZERO);
        registry
            .world_mut()
            .insert_one(player, FireIntent { direction: Vec2::Y })
            .unwrap();

        let mut events = Vec::new();
        run(&mut registry, &mut events);
        assert_eq!(projectile_count(&registry), 1);
        assert!(registry.world().get::<&FireIntent>(player).is_err());
        assert!(matches!(
            events.as_slice(),
            [SimEvent::ProjectileFired {
                faction: Faction::Player,
                ..
            }]
        ));
    }

    #[test]
    fn active_armed_enemy_aims_at_player() {
        let catalog = ActorCatalog::default_catalog();
        let mut registry = Registry::new();
        spawn_player(&mut registry, &ActorTemplate::player(), Vec2::new(0.0, -5.0));
        let watcher = spawn_enemy(
            &mut registry,
            "watcher",
            catalog.get("watcher").unwrap(),
            Vec2::new(0.0, 5.0),
        );
        registry
            .world()
            .get::<&mut CooldownTimer>(watcher)
            .unwrap()
            .can_fire = true;

        let mut events = Vec::new();
        run(&mut registry, &mut events);

        let shots: Vec<Vec2> = registry
            .world()
            .query::<(&Projectile, &Velocity)>()
            .iter()
            .map(|(_, (_, v))| v.0)
            .collect();
        assert_eq!(shots.len(), 1);
        assert!(shots[0].y < 0.0, "shot travels toward the player");
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn inactive_enemy_holds_fire() {
        let catalog = ActorCatalog::default_catalog();
        let mut registry = Registry::new();
        spawn_player(&mut registry, &ActorTemplate::player(), Vec2::ZERO);
        let watcher = spawn_enemy(
            &mut registry,
            "watcher",
            catalog.get("watcher").unwrap(),
            Vec2::new(0.0, 5.0),
        );
        {
            let world = registry.world();
            world.get::<&mut CooldownTimer>(watcher).unwrap().can_fire = true;
            world.get::<&mut Enemy>(watcher).unwrap().active = false;
        }

        run(&mut registry, &mut Vec::new());
        assert_eq!(projectile_count(&registry), 0);
    }

    #[test]
    fn enemies_hold_fire_without_a_player() {
        let catalog = ActorCatalog::default_catalog();
        let mut registry = Registry::new();
        let watcher = spawn_enemy(
            &mut registry,
            "watcher",
            catalog.get("watcher").unwrap(),
            Vec2::ZERO,
        );
        registry
            .world()
            .get::<&mut CooldownTimer>(watcher)
            .unwrap()
            .can_fire = true;

        run(&mut registry, &mut Vec::new());
        assert_eq!(projectile_count(&registry), 0);
    }
}
