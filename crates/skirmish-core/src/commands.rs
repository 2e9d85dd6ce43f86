//! Commands sent to the simulation by the host (input layer, tests, tools).
//!
//! Commands are queued and processed at the next tick boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// All host actions the simulation understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Start the loaded level from wave 0, cancelling any level in progress.
    StartLevel,
    /// Freeze simulation time.
    Pause,
    /// Resume a paused simulation.
    Resume,
    /// Fire the player's weapon along `direction` if its cooldown allows.
    Fire { direction: Vec2 },
}
