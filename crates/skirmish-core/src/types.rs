//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D position in arena space (world units).
/// x = right, y = up, origin at the arena centre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// 2D velocity in arena space (units/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Squared distance to another point.
    pub fn distance_squared(&self, other: Vec2) -> f32 {
        self.0.distance_squared(other)
    }
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Convert a delay in seconds to a whole number of ticks, rounding up.
/// Zero and negative delays map to zero ticks. The small bias keeps
/// f32 noise (0.1 s -> 6.0000001 ticks) from adding a tick.
pub fn secs_to_ticks(secs: f32) -> u64 {
    if secs.is_nan() || secs <= 0.0 {
        return 0;
    }
    (secs as f64 * crate::constants::TICK_RATE as f64 - 1e-4).ceil() as u64
}
