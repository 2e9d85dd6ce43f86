//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the entity registry, the level controller and the
//! collaborators, processes host commands, runs all systems in a fixed order,
//! and produces `SimSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::Entity;

use skirmish_core::commands::SimCommand;
use skirmish_core::components::{FireIntent, Health, Projectile};
use skirmish_core::config::{ActorCatalog, ActorTemplate, LevelDetails};
use skirmish_core::constants::{DT, PLAYER_SPAWN_Y};
use skirmish_core::enums::GamePhase;
use skirmish_core::events::SimEvent;
use skirmish_core::state::SimSnapshot;
use skirmish_core::types::{Position, SimTime};

use crate::collaborators::{ActorFactory, ScreenMapper, SpawnContext, Tweener, Viewport};
use crate::level::LevelController;
use crate::registry::Registry;
use crate::systems;
use crate::tween::TweenSystem;
use crate::world_setup::{self, TemplateFactory};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Arena bounds. Also the default screen mapping.
    pub arena: Viewport,
    /// Loadout for the player actor.
    pub player: ActorTemplate,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena: Viewport::default(),
            player: ActorTemplate::player(),
        }
    }
}

/// The simulation engine. Owns the registry and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    registry: Registry,
    level: LevelController,
    factory: Box<dyn ActorFactory>,
    screen: Box<dyn ScreenMapper>,
    tweener: Box<dyn Tweener>,
    time: SimTime,
    phase: GamePhase,
    player: Option<Entity>,
    command_queue: VecDeque<SimCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Engine with the built-in collaborators and the default actor catalog.
    pub fn new(config: SimConfig, level: LevelDetails) -> Self {
        Self::with_catalog(config, level, ActorCatalog::default_catalog())
    }

    /// Engine with the built-in collaborators over a custom actor catalog.
    pub fn with_catalog(config: SimConfig, level: LevelDetails, catalog: ActorCatalog) -> Self {
        let screen = config.arena;
        Self::with_collaborators(
            config,
            level,
            Box::new(TemplateFactory::new(catalog)),
            Box::new(screen),
            Box::new(TweenSystem::new()),
        )
    }

    /// Engine with caller-supplied collaborators.
    pub fn with_collaborators(
        config: SimConfig,
        level: LevelDetails,
        factory: Box<dyn ActorFactory>,
        screen: Box<dyn ScreenMapper>,
        tweener: Box<dyn Tweener>,
    ) -> Self {
        Self {
            config,
            registry: Registry::new(),
            level: LevelController::new(level),
            factory,
            screen,
            tweener,
            time: SimTime::default(),
            phase: GamePhase::default(),
            player: None,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(self.registry.world(), &self.time, self.phase, &self.level, events)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable registry access for hosts and tests that stage entities directly.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn level(&self) -> &LevelController {
        &self.level
    }

    /// The player actor, once a level has been started.
    pub fn player(&self) -> Option<Entity> {
        self.player.filter(|&p| self.registry.contains(p))
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::StartLevel => self.start_level(),
            SimCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                    log::debug!("paused at tick {}", self.time.tick);
                }
            }
            SimCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                    log::debug!("resumed at tick {}", self.time.tick);
                }
            }
            SimCommand::Fire { direction } => {
                if self.phase != GamePhase::Active {
                    return;
                }
                if let Some(player) = self.player() {
                    let _ = self
                        .registry
                        .world_mut()
                        .insert_one(player, FireIntent { direction });
                }
            }
        }
    }

    /// (Re)start the loaded level. Valid from any phase.
    fn start_level(&mut self) {
        self.time = SimTime::default();
        self.reset_player();

        self.despawn_buffer.clear();
        self.despawn_buffer.extend(
            self.registry
                .world_mut()
                .query_mut::<&Projectile>()
                .into_iter()
                .map(|(entity, _)| entity),
        );
        for entity in self.despawn_buffer.drain(..) {
            self.registry.despawn(entity);
        }

        let mut ctx = SpawnContext {
            registry: &mut self.registry,
            factory: self.factory.as_mut(),
            screen: self.screen.as_ref(),
            tweener: self.tweener.as_mut(),
            events: &mut self.events,
            tick: self.time.tick,
        };
        self.level.start_level(&mut ctx);
        self.phase = GamePhase::Active;
    }

    /// Spawn the player, or restore an existing one to full health at the spawn point.
    fn reset_player(&mut self) {
        let spawn_point = Vec2::new(0.0, PLAYER_SPAWN_Y);
        if let Some(player) = self.player() {
            if let Ok((health, pos)) = self
                .registry
                .world_mut()
                .query_one_mut::<(&mut Health, &mut Position)>(player)
            {
                *health = Health::new(health.max);
                pos.0 = spawn_point;
            }
            return;
        }
        self.player = Some(world_setup::spawn_player(
            &mut self.registry,
            &self.config.player,
            spawn_point,
        ));
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        systems::cooldown::run(self.registry.world_mut(), DT);
        systems::weapon_fire::run(&mut self.registry, &mut self.events);
        systems::movement::run(self.registry.world_mut(), DT);
        let completed_moves = self.tweener.advance(self.registry.world_mut(), DT);
        systems::damage::run(self.registry.world_mut(), &mut self.events);
        systems::invincibility::run(self.registry.world_mut(), DT);
        let player_down = systems::defeat::run(&mut self.registry, &mut self.despawn_buffer);

        let level_done = {
            let mut ctx = SpawnContext {
                registry: &mut self.registry,
                factory: self.factory.as_mut(),
                screen: self.screen.as_ref(),
                tweener: self.tweener.as_mut(),
                events: &mut self.events,
                tick: self.time.tick,
            };
            self.level.tick(&mut ctx, &completed_moves)
        };

        systems::cleanup::run(&mut self.registry, &self.config.arena, &mut self.despawn_buffer);

        if player_down {
            log::warn!("player defeated at tick {}", self.time.tick);
            self.events.push(SimEvent::PlayerDefeated);
            self.phase = GamePhase::Defeated;
        } else if level_done {
            self.phase = GamePhase::LevelComplete;
        }
    }
}
