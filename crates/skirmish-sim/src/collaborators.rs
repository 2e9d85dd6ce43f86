//! Narrow interfaces to the systems the simulation core depends on but does not own:
//! actor instantiation, screen-space mapping and movement tweening.
//!
//! Built-in implementations live in `world_setup` (`TemplateFactory`),
//! `tween` (`TweenSystem`) and here (`Viewport`).

use glam::Vec2;
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use skirmish_core::constants::{ARENA_HEIGHT, ARENA_WIDTH};
use skirmish_core::enums::EasingKind;
use skirmish_core::events::SimEvent;

use crate::registry::Registry;

/// Creates and destroys actors by template id.
pub trait ActorFactory {
    /// Instantiate an actor. `None` means the template could not be built.
    fn spawn(&mut self, registry: &mut Registry, template_id: &str) -> Option<Entity>;
    fn destroy(&mut self, registry: &mut Registry, entity: Entity);
    /// False once the actor has been destroyed or defeated.
    fn is_active(&self, registry: &Registry, entity: Entity) -> bool;
}

/// Maps normalized screen points to world positions for the current viewport.
pub trait ScreenMapper {
    fn map_normalized_point(&self, point: Vec2) -> Vec2;
}

/// Completion token for a move started with `Tweener::move_over_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoveHandle(pub u64);

/// Moves actors over time along an easing curve.
pub trait Tweener {
    /// Start moving `entity` from its current position to `target`.
    fn move_over_time(
        &mut self,
        world: &World,
        entity: Entity,
        target: Vec2,
        duration_secs: f32,
        easing: EasingKind,
    ) -> MoveHandle;

    /// Step every move by `dt`. Each handle is returned exactly once, on the tick its
    /// move finishes. Moves whose entity disappeared are dropped without completing.
    fn advance(&mut self, world: &mut World, dt: f32) -> Vec<MoveHandle>;

    /// Drop any move in flight for `entity`.
    fn cancel(&mut self, entity: Entity);
}

/// Arena dimensions, centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    /// True if `point` lies within the arena grown by `margin` on every side.
    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        let half = self.half_extents() + Vec2::splat(margin);
        point.x.abs() <= half.x && point.y.abs() <= half.y
    }
}

impl ScreenMapper for Viewport {
    /// `[-1, 1]` on each axis spans the full arena; values outside land off-screen.
    fn map_normalized_point(&self, point: Vec2) -> Vec2 {
        point * self.half_extents()
    }
}

/// Everything the wave spawner touches while dispatching or reaping enemies.
pub struct SpawnContext<'a> {
    pub registry: &'a mut Registry,
    pub factory: &'a mut dyn ActorFactory,
    pub screen: &'a dyn ScreenMapper,
    pub tweener: &'a mut dyn Tweener,
    pub events: &'a mut Vec<SimEvent>,
    /// Current simulation tick; delays resume against this.
    pub tick: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_maps_corners_to_arena_edges() {
        let viewport = Viewport {
            width: 10.0,
            height: 20.0,
        };
        assert_eq!(viewport.map_normalized_point(Vec2::ZERO), Vec2::ZERO);
        assert_eq!(
            viewport.map_normalized_point(Vec2::new(1.0, -1.0)),
            Vec2::new(5.0, -10.0)
        );
        assert_eq!(
            viewport.map_normalized_point(Vec2::new(0.5, 1.2)),
            Vec2::new(2.5, 12.0)
        );
    }

    #[test]
    fn viewport_contains_respects_margin() {
        let viewport = Viewport::default();
        let edge = viewport.half_extents();
        assert!(viewport.contains(edge, 0.0));
        assert!(!viewport.contains(edge + Vec2::X, 0.0));
        assert!(viewport.contains(edge + Vec2::X, 1.0));
    }
}
