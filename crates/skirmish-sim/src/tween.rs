//! Built-in tween engine: moves entity positions along easing curves.

use glam::Vec2;
use hecs::{Entity, World};

use skirmish_core::enums::EasingKind;
use skirmish_core::types::Position;

use crate::collaborators::{MoveHandle, Tweener};

/// Map linear progress `t` in `[0, 1]` through an easing curve.
pub fn ease(kind: EasingKind, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match kind {
        EasingKind::Linear => t,
        EasingKind::EaseInQuad => t * t,
        EasingKind::EaseOutQuad => t * (2.0 - t),
        EasingKind::EaseInOutQuad => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        EasingKind::EaseOutCubic => {
            let u = t - 1.0;
            u * u * u + 1.0
        }
        EasingKind::EaseOutBack => {
            const C1: f32 = 1.701_58;
            const C3: f32 = C1 + 1.0;
            let u = t - 1.0;
            1.0 + C3 * u * u * u + C1 * u * u
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveMove {
    handle: MoveHandle,
    entity: Entity,
    from: Vec2,
    to: Vec2,
    duration_secs: f32,
    elapsed_secs: f32,
    easing: EasingKind,
}

/// Moves in flight, advanced in start order.
#[derive(Debug, Default)]
pub struct TweenSystem {
    moves: Vec<ActiveMove>,
    next_handle: u64,
}

impl TweenSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of moves still in flight.
    pub fn in_flight(&self) -> usize {
        self.moves.len()
    }
}

impl Tweener for TweenSystem {
    fn move_over_time(
        &mut self,
        world: &World,
        entity: Entity,
        target: Vec2,
        duration_secs: f32,
        easing: EasingKind,
    ) -> MoveHandle {
        let handle = MoveHandle(self.next_handle);
        self.next_handle += 1;

        let from = world
            .get::<&Position>(entity)
            .map(|p| p.0)
            .unwrap_or(target);

        // A new move replaces any move already driving this entity.
        self.moves.retain(|m| m.entity != entity);
        self.moves.push(ActiveMove {
            handle,
            entity,
            from,
            to: target,
            duration_secs: duration_secs.max(0.0),
            elapsed_secs: 0.0,
            easing,
        });
        handle
    }

    fn advance(&mut self, world: &mut World, dt: f32) -> Vec<MoveHandle> {
        let mut completed = Vec::new();
        self.moves.retain_mut(|m| {
            let Ok(mut pos) = world.get::<&mut Position>(m.entity) else {
                return false;
            };
            m.elapsed_secs += dt;
            let t = if m.duration_secs > 0.0 {
                (m.elapsed_secs / m.duration_secs).min(1.0)
            } else {
                1.0
            };
            if t >= 1.0 {
                pos.0 = m.to;
                completed.push(m.handle);
                return false;
            }
            pos.0 = m.from.lerp(m.to, ease(m.easing, t));
            true
        });
        completed
    }

    fn cancel(&mut self, entity: Entity) {
        self.moves.retain(|m| m.entity != entity);
    }
}
