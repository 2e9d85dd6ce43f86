//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Arena ---

/// Default arena width in world units (portrait phone aspect).
pub const ARENA_WIDTH: f32 = 9.0;

/// Default arena height in world units.
pub const ARENA_HEIGHT: f32 = 16.0;

/// Projectiles this far outside the arena edge are reaped.
pub const OOB_MARGIN: f32 = 2.0;

// --- Player ---

pub const PLAYER_MAX_HEALTH: f32 = 10.0;
pub const PLAYER_COLLISION_RADIUS: f32 = 0.35;
pub const PLAYER_INVINCIBILITY_SECS: f32 = 1.0;
pub const PLAYER_FIRE_COOLDOWN_SECS: f32 = 0.15;
pub const PLAYER_PROJECTILE_DAMAGE: f32 = 1.0;
pub const PLAYER_PROJECTILE_SPEED: f32 = 14.0;

/// Player spawn point: bottom quarter of the arena.
pub const PLAYER_SPAWN_Y: f32 = -ARENA_HEIGHT * 0.3;

// --- Enemies ---

/// Enemy projectiles are slower than the player's so they can be dodged.
pub const ENEMY_PROJECTILE_SPEED: f32 = 5.0;
