//! Wave spawner: releases a level's waves one at a time.
//!
//! States: `Idle -> Spawning -> WaitingForClear -> (Spawning | Complete)`.
//!
//! A wave's spawn sequence spans many ticks (wave delay, per-entry delays).
//! It is kept as an explicit `SpawnSequence` with a resume tick per step and
//! is advanced from the main tick loop. At most one sequence is in flight.
//! Move completions from the tweener re-enable enemies that finished moving in.
//!
//! The spawner exclusively owns the active-enemy set.

use glam::Vec2;
use hecs::Entity;

use skirmish_core::components::Enemy;
use skirmish_core::config::{LevelDetails, SpawnEntry, WaveDefinition};
use skirmish_core::enums::SpawnerPhase;
use skirmish_core::events::SimEvent;
use skirmish_core::types::{secs_to_ticks, Position};

use crate::collaborators::{MoveHandle, SpawnContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequenceStep {
    /// Waiting out the wave delay.
    WaveDelay { resume_at: u64 },
    /// Waiting to dispatch entry `index`. Past the last entry the wave is done.
    Entry { index: usize, resume_at: u64 },
}

#[derive(Debug, Clone)]
struct SpawnSequence {
    wave_index: usize,
    step: SequenceStep,
    spawned: u32,
}

#[derive(Debug, Default)]
pub struct WaveSpawner {
    current_wave_index: usize,
    started: bool,
    phase: SpawnerPhase,
    active_enemies: Vec<Entity>,
    sequence: Option<SpawnSequence>,
    /// Enemies still moving in, keyed by the move that will activate them.
    pending_activation: Vec<(MoveHandle, Entity)>,
}

impl WaveSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SpawnerPhase {
        self.phase
    }

    pub fn current_wave_index(&self) -> usize {
        self.current_wave_index
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// True while a wave's spawn sequence is in flight.
    pub fn is_spawning(&self) -> bool {
        self.sequence.is_some()
    }

    pub fn active_enemies(&self) -> &[Entity] {
        &self.active_enemies
    }

    pub fn active_enemy_count(&self) -> u32 {
        self.active_enemies.len() as u32
    }

    /// Restart from wave 0. Cancels any sequence in flight and destroys every
    /// enemy it was tracking before the first wave begins.
    pub fn start_level(&mut self, details: &LevelDetails, ctx: &mut SpawnContext<'_>) {
        self.sequence = None;
        self.pending_activation.clear();

        let mut cancelled = 0u32;
        for entity in self.active_enemies.drain(..) {
            ctx.tweener.cancel(entity);
            if ctx.factory.is_active(ctx.registry, entity) {
                ctx.factory.destroy(ctx.registry, entity);
            }
            cancelled += 1;
        }

        self.current_wave_index = 0;
        self.started = true;
        self.phase = SpawnerPhase::WaitingForClear;
        log::info!(
            "level '{}' started: {} waves, {} residual enemies cancelled",
            details.name,
            details.total_waves(),
            cancelled
        );
        ctx.events.push(SimEvent::LevelStarted {
            cancelled_enemies: cancelled,
        });

        self.begin_wave(details, ctx);
    }

    /// Begin the wave at the current index.
    ///
    /// No-op while a sequence is already in flight or when the level has no
    /// wave at the current index. Skipped waves advance the index immediately.
    pub fn begin_wave(&mut self, details: &LevelDetails, ctx: &mut SpawnContext<'_>) {
        if self.sequence.is_some() {
            return;
        }
        let index = self.current_wave_index;
        let Some(wave) = details.wave(index) else {
            return;
        };

        if wave.skip_wave {
            log::info!("wave {index} skipped");
            ctx.events.push(SimEvent::WaveSkipped {
                wave_index: index as u32,
            });
            self.current_wave_index += 1;
            self.phase = SpawnerPhase::WaitingForClear;
            return;
        }

        log::info!(
            "wave {index} started: {} spawns after {:.2}s",
            wave.spawns.len(),
            wave.wave_delay
        );
        ctx.events.push(SimEvent::WaveStarted {
            wave_index: index as u32,
        });
        self.phase = SpawnerPhase::Spawning;
        self.sequence = Some(SpawnSequence {
            wave_index: index,
            step: SequenceStep::WaveDelay {
                resume_at: ctx.tick.saturating_add(secs_to_ticks(wave.wave_delay)),
            },
            spawned: 0,
        });
        self.advance_sequence(details, ctx);
    }

    /// Per-tick bookkeeping: activate enemies whose move finished, resume the
    /// spawn sequence, then reap enemies that are no longer active.
    pub fn tick(&mut self, details: &LevelDetails, ctx: &mut SpawnContext<'_>, completed: &[MoveHandle]) {
        self.on_moves_completed(completed, ctx);
        self.advance_sequence(details, ctx);
        self.reap_inactive(ctx);
    }

    /// Mark the level finished. No further waves start until `start_level`.
    pub fn complete(&mut self) {
        self.started = false;
        self.phase = SpawnerPhase::Complete;
    }

    /// Run the in-flight sequence until it has to wait or the wave is dispatched.
    fn advance_sequence(&mut self, details: &LevelDetails, ctx: &mut SpawnContext<'_>) {
        loop {
            let Some(seq) = self.sequence.as_ref() else {
                return;
            };
            let Some(wave) = details.wave(seq.wave_index) else {
                self.sequence = None;
                return;
            };
            match seq.step {
                SequenceStep::WaveDelay { resume_at } => {
                    if ctx.tick < resume_at {
                        return;
                    }
                    self.schedule_entry(wave, 0, ctx.tick);
                }
                SequenceStep::Entry { index, resume_at } => {
                    let Some(entry) = wave.spawns.get(index) else {
                        self.finish_sequence(ctx);
                        return;
                    };
                    if ctx.tick < resume_at {
                        return;
                    }
                    let wave_index = seq.wave_index;
                    if self.dispatch(wave_index, entry, ctx).is_some() {
                        if let Some(seq) = self.sequence.as_mut() {
                            seq.spawned += 1;
                        }
                    }
                    self.schedule_entry(wave, index + 1, ctx.tick);
                }
            }
        }
    }

    /// Point the sequence at entry `index`, due `spawn_delay` after `now`.
    fn schedule_entry(&mut self, wave: &WaveDefinition, index: usize, now: u64) {
        let delay = wave
            .spawns
            .get(index)
            .map_or(0, |entry| secs_to_ticks(entry.spawn_delay));
        if let Some(seq) = self.sequence.as_mut() {
            seq.step = SequenceStep::Entry {
                index,
                resume_at: now.saturating_add(delay),
            };
        }
    }

    /// Instantiate one entry's enemy and start moving it in.
    fn dispatch(&mut self, wave_index: usize, entry: &SpawnEntry, ctx: &mut SpawnContext<'_>) -> Option<Entity> {
        let Some(entity) = ctx.factory.spawn(ctx.registry, &entry.actor_template_id) else {
            log::error!(
                "wave {wave_index}: actor factory could not build '{}', entry skipped",
                entry.actor_template_id
            );
            return None;
        };

        let (start, end) = if entry.scale_to_screen {
            (
                ctx.screen.map_normalized_point(entry.start_point),
                ctx.screen.map_normalized_point(entry.end_point),
            )
        } else {
            (entry.start_point, entry.end_point)
        };

        self.active_enemies.push(entity);
        place_inactive(ctx, entity, &entry.actor_template_id, start);

        let handle = ctx.tweener.move_over_time(
            ctx.registry.world(),
            entity,
            end,
            entry.move_duration,
            entry.easing,
        );
        self.pending_activation.push((handle, entity));

        log::debug!(
            "wave {wave_index}: spawned '{}' at ({:.2}, {:.2})",
            entry.actor_template_id,
            start.x,
            start.y
        );
        ctx.events.push(SimEvent::EnemySpawned {
            entity: entity.to_bits().get(),
            template_id: entry.actor_template_id.clone(),
            position: start,
        });
        Some(entity)
    }

    fn finish_sequence(&mut self, ctx: &mut SpawnContext<'_>) {
        let Some(seq) = self.sequence.take() else {
            return;
        };
        log::info!("wave {} dispatched: {} enemies", seq.wave_index, seq.spawned);
        ctx.events.push(SimEvent::WaveDispatched {
            wave_index: seq.wave_index as u32,
            spawned: seq.spawned,
        });
        self.current_wave_index += 1;
        self.phase = SpawnerPhase::WaitingForClear;
    }

    fn on_moves_completed(&mut self, completed: &[MoveHandle], ctx: &mut SpawnContext<'_>) {
        for handle in completed {
            let Some(slot) = self.pending_activation.iter().position(|(h, _)| h == handle) else {
                continue;
            };
            let (_, entity) = self.pending_activation.remove(slot);
            let activated = ctx
                .registry
                .world()
                .get::<&mut Enemy>(entity)
                .map(|mut enemy| enemy.active = true)
                .is_ok();
            if activated {
                ctx.events.push(SimEvent::EnemyActivated {
                    entity: entity.to_bits().get(),
                });
            }
        }
    }

    /// Drop enemies the factory no longer reports active.
    fn reap_inactive(&mut self, ctx: &mut SpawnContext<'_>) {
        let registry = &*ctx.registry;
        let factory = &*ctx.factory;
        let mut reaped = Vec::new();
        self.active_enemies.retain(|&entity| {
            let alive = factory.is_active(registry, entity);
            if !alive {
                reaped.push(entity);
            }
            alive
        });

        for entity in reaped {
            ctx.factory.destroy(ctx.registry, entity);
            ctx.tweener.cancel(entity);
            self.pending_activation.retain(|&(_, pending)| pending != entity);
            ctx.events.push(SimEvent::EnemyReaped {
                entity: entity.to_bits().get(),
            });
        }
    }
}

/// Move a freshly built enemy to its start point with behaviour disabled.
fn place_inactive(ctx: &mut SpawnContext<'_>, entity: Entity, template_id: &str, start: Vec2) {
    let world = ctx.registry.world_mut();

    let placed = world
        .get::<&mut Position>(entity)
        .map(|mut pos| pos.0 = start)
        .is_ok();
    if !placed {
        let _ = world.insert_one(entity, Position(start));
    }

    let flagged = world
        .get::<&mut Enemy>(entity)
        .map(|mut enemy| enemy.active = false)
        .is_ok();
    if !flagged {
        let _ = world.insert_one(
            entity,
            Enemy {
                template_id: template_id.to_string(),
                active: false,
            },
        );
    }
}
