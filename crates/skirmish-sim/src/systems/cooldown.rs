//! Weapon cooldown system: re-arms weapons once their cooldown has elapsed.

use hecs::World;

use skirmish_core::components::CooldownTimer;

/// Accumulate `dt` on every disarmed timer and re-arm those that reached their cooldown.
/// Armed timers are left untouched until something fires them.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, timer) in world.query_mut::<&mut CooldownTimer>() {
        if timer.can_fire {
            continue;
        }
        timer.elapsed_secs += dt;
        if timer.elapsed_secs >= timer.cooldown_secs {
            timer.can_fire = true;
            timer.elapsed_secs = 0.0;
        }
    }
}
