//! Level controller: glue between a loaded level and its wave spawner.

use skirmish_core::config::LevelDetails;
use skirmish_core::events::SimEvent;

use crate::collaborators::{MoveHandle, SpawnContext};
use crate::systems::wave_spawner::WaveSpawner;

pub struct LevelController {
    details: LevelDetails,
    spawner: WaveSpawner,
}

impl LevelController {
    pub fn new(details: LevelDetails) -> Self {
        Self {
            details,
            spawner: WaveSpawner::new(),
        }
    }

    pub fn details(&self) -> &LevelDetails {
        &self.details
    }

    pub fn spawner(&self) -> &WaveSpawner {
        &self.spawner
    }

    pub fn start_level(&mut self, ctx: &mut SpawnContext<'_>) {
        self.spawner.start_level(&self.details, ctx);
    }

    /// Every wave has been dispatched or skipped.
    ///
    /// Only meaningful once the active set is empty and no spawn is in flight;
    /// `tick` checks both before acting on it.
    pub fn level_complete(&self) -> bool {
        self.spawner.current_wave_index() >= self.details.total_waves()
    }

    /// Per-tick bookkeeping. Returns true on the tick the level completes.
    ///
    /// Reaping runs before the clear-check, so an arena emptied this tick
    /// releases the next wave in the same tick.
    pub fn tick(&mut self, ctx: &mut SpawnContext<'_>, completed: &[MoveHandle]) -> bool {
        self.spawner.tick(&self.details, ctx, completed);

        if !self.spawner.is_started() {
            return false;
        }

        let arena_clear = |spawner: &WaveSpawner| !spawner.is_spawning() && spawner.active_enemies().is_empty();

        if arena_clear(&self.spawner) {
            self.spawner.begin_wave(&self.details, ctx);
        }

        if arena_clear(&self.spawner) && self.level_complete() {
            self.spawner.complete();
            log::info!("level '{}' complete", self.details.name);
            ctx.events.push(SimEvent::LevelCompleted);
            return true;
        }
        false
    }
}
