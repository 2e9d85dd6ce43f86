//! Entity registry: the single shared store of live simulation entities.
//!
//! Wraps a hecs `World` and stamps every entity with a `SpawnOrder` so
//! systems can iterate in insertion order regardless of archetype layout.

use hecs::{DynamicBundle, Entity, EntityBuilder, World};

use skirmish_core::components::{Projectile, SpawnOrder};

pub struct Registry {
    world: World,
    next_order: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            next_order: 0,
        }
    }

    /// Spawn an entity from a static bundle.
    pub fn spawn(&mut self, bundle: impl DynamicBundle) -> Entity {
        let mut builder = EntityBuilder::new();
        builder.add_bundle(bundle);
        self.spawn_built(&mut builder)
    }

    /// Spawn an entity assembled with optional components.
    pub fn spawn_built(&mut self, builder: &mut EntityBuilder) -> Entity {
        builder.add(SpawnOrder(self.next_order));
        self.next_order += 1;
        self.world.spawn(builder.build())
    }

    /// Remove an entity. Returns false if it was already gone.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        self.world.despawn(entity).is_ok()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    /// Number of live entities.
    pub fn len(&self) -> u32 {
        self.world.len()
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Despawn every projectile flagged `marked_for_removal`.
    pub fn reap_marked_projectiles(&mut self, despawn_buffer: &mut Vec<Entity>) -> usize {
        despawn_buffer.clear();
        for (entity, projectile) in self.world.query_mut::<&Projectile>() {
            if projectile.marked_for_removal {
                despawn_buffer.push(entity);
            }
        }
        let reaped = despawn_buffer.len();
        for entity in despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }
        reaped
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::types::Position;

    #[test]
    fn spawn_assigns_increasing_order() {
        let mut registry = Registry::new();
        let a = registry.spawn((Position::new(0.0, 0.0),));
        let b = registry.spawn((Position::new(1.0, 0.0),));

        let order_a = *registry.world().get::<&SpawnOrder>(a).unwrap();
        let order_b = *registry.world().get::<&SpawnOrder>(b).unwrap();
        assert!(order_a < order_b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn order_is_not_reused_after_despawn() {
        let mut registry = Registry::new();
        let a = registry.spawn((Position::new(0.0, 0.0),));
        assert!(registry.despawn(a));
        assert!(!registry.despawn(a), "second despawn is a no-op");
        assert!(!registry.contains(a));

        let b = registry.spawn((Position::new(0.0, 0.0),));
        let order_b = *registry.world().get::<&SpawnOrder>(b).unwrap();
        assert_eq!(order_b, SpawnOrder(1));
    }

    #[test]
    fn reap_marked_projectiles_only_removes_flagged() {
        let mut registry = Registry::new();
        let spent = registry.spawn((Projectile {
            damage: 1.0,
            marked_for_removal: true,
        },));
        let live = registry.spawn((Projectile {
            damage: 1.0,
            marked_for_removal: false,
        },));

        let mut buffer = Vec::new();
        assert_eq!(registry.reap_marked_projectiles(&mut buffer), 1);
        assert!(!registry.contains(spent));
        assert!(registry.contains(live));
        assert!(buffer.is_empty());
    }
}
