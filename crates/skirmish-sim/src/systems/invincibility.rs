//! Invincibility window: releases the `Health::is_invincible` latch after a
//! per-actor duration. Actors without a window stay latched once hit.

use hecs::World;

use skirmish_core::components::{Health, InvincibilityWindow};

pub fn run(world: &mut World, dt: f32) {
    for (_entity, (health, window)) in world.query_mut::<(&mut Health, &mut InvincibilityWindow)>() {
        if !health.is_invincible {
            window.elapsed_secs = 0.0;
            window.counting = false;
            continue;
        }
        // First tick the latch is seen held; count from the next tick.
        if !window.counting {
            window.counting = true;
            window.elapsed_secs = 0.0;
            continue;
        }
        window.elapsed_secs += dt;
        if window.elapsed_secs >= window.duration_secs {
            health.is_invincible = false;
            window.elapsed_secs = 0.0;
            window.counting = false;
        }
    }
}
