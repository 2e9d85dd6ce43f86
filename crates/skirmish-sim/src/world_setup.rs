//! Entity spawn factories for setting up the simulation world.
//!
//! Builds the player and template-driven enemy actors with the
//! appropriate component bundles.

use glam::Vec2;
use hecs::{Entity, EntityBuilder};

use skirmish_core::components::*;
use skirmish_core::config::{ActorCatalog, ActorTemplate};
use skirmish_core::enums::Faction;
use skirmish_core::types::{Position, Velocity};

use crate::collaborators::ActorFactory;
use crate::registry::Registry;

/// Shared components for any actor built from a template.
fn actor_builder(template: &ActorTemplate, position: Vec2) -> EntityBuilder {
    let mut builder = EntityBuilder::new();
    builder
        .add(Position(position))
        .add(template.faction)
        .add(Health::new(template.health))
        .add(CollisionRadius {
            radius: template.collision_radius,
            offset: template.collision_offset,
        });
    if let Some(duration_secs) = template.invincibility_secs {
        builder.add(InvincibilityWindow::new(duration_secs));
    }
    builder
}

/// Spawn the player-controlled actor. Its weapon starts armed.
pub fn spawn_player(registry: &mut Registry, template: &ActorTemplate, position: Vec2) -> Entity {
    let mut builder = actor_builder(template, position);
    builder.add(Player);
    if let Some(weapon) = template.weapon {
        builder
            .add(CooldownTimer {
                cooldown_secs: weapon.cooldown_secs,
                elapsed_secs: 0.0,
                can_fire: true,
            })
            .add(Weapon {
                damage: weapon.damage,
                projectile_speed: weapon.projectile_speed,
            });
    }
    registry.spawn_built(&mut builder)
}

/// Spawn an enemy actor. Its weapon starts on cooldown.
pub fn spawn_enemy(
    registry: &mut Registry,
    template_id: &str,
    template: &ActorTemplate,
    position: Vec2,
) -> Entity {
    let mut builder = actor_builder(template, position);
    builder.add(Enemy {
        template_id: template_id.to_string(),
        active: true,
    });
    if let Some(weapon) = template.weapon {
        builder
            .add(CooldownTimer {
                cooldown_secs: weapon.cooldown_secs,
                elapsed_secs: 0.0,
                can_fire: false,
            })
            .add(Weapon {
                damage: weapon.damage,
                projectile_speed: weapon.projectile_speed,
            });
    }
    registry.spawn_built(&mut builder)
}

/// Spawn a free projectile. Used by the weapon-fire action and by tests.
pub fn spawn_projectile(
    registry: &mut Registry,
    faction: Faction,
    position: Vec2,
    velocity: Vec2,
    damage: f32,
) -> Entity {
    registry.spawn((
        Projectile {
            damage,
            marked_for_removal: false,
        },
        faction,
        Position(position),
        Velocity(velocity),
    ))
}

/// Actor factory backed by an `ActorCatalog`.
pub struct TemplateFactory {
    catalog: ActorCatalog,
}

impl TemplateFactory {
    pub fn new(catalog: ActorCatalog) -> Self {
        Self { catalog }
    }
}

impl ActorFactory for TemplateFactory {
    fn spawn(&mut self, registry: &mut Registry, template_id: &str) -> Option<Entity> {
        let template = self.catalog.get(template_id)?;
        Some(spawn_enemy(registry, template_id, template, Vec2::ZERO))
    }

    fn destroy(&mut self, registry: &mut Registry, entity: Entity) {
        registry.despawn(entity);
    }

    fn is_active(&self, registry: &Registry, entity: Entity) -> bool {
        registry.contains(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_factory_builds_catalog_actors() {
        let mut registry = Registry::new();
        let mut factory = TemplateFactory::new(ActorCatalog::default_catalog());

        let watcher = factory.spawn(&mut registry, "watcher").unwrap();
        let world = registry.world();
        assert_eq!(*world.get::<&Faction>(watcher).unwrap(), Faction::Enemy);
        assert_eq!(world.get::<&Health>(watcher).unwrap().current, 3.0);
        assert!(!world.get::<&CooldownTimer>(watcher).unwrap().can_fire);
        assert_eq!(world.get::<&Enemy>(watcher).unwrap().template_id, "watcher");

        let drone = factory.spawn(&mut registry, "drone").unwrap();
        assert!(registry.world().get::<&Weapon>(drone).is_err(), "drones are unarmed");

        assert!(factory.spawn(&mut registry, "nope").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn template_factory_destroy_makes_inactive() {
        let mut registry = Registry::new();
        let mut factory = TemplateFactory::new(ActorCatalog::default_catalog());
        let e = factory.spawn(&mut registry, "drone").unwrap();
        assert!(factory.is_active(&registry, e));

        factory.destroy(&mut registry, e);
        assert!(!factory.is_active(&registry, e));
    }

    #[test]
    fn player_weapon_starts_armed() {
        let mut registry = Registry::new();
        let p = spawn_player(&mut registry, &ActorTemplate::player(), Vec2::ZERO);
        let world = registry.world();
        assert!(world.get::<&Player>(p).is_ok());
        assert!(world.get::<&CooldownTimer>(p).unwrap().can_fire);
        assert!(world.get::<&InvincibilityWindow>(p).is_ok());
    }
}
