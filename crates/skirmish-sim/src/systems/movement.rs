//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick: position += velocity * dt.
//! Actors moved by the tween engine carry no Velocity and are skipped.

use hecs::World;

use skirmish_core::types::{Position, Velocity};

pub fn run(world: &mut World, dt: f32) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.0 += vel.0 * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrates_velocity() {
        let mut world = World::new();
        let e = world.spawn((Position::new(1.0, 1.0), Velocity::new(2.0, -4.0)));
        run(&mut world, 0.5);
        assert_eq!(world.get::<&Position>(e).unwrap().0, glam::Vec2::new(2.0, -1.0));
    }
}
