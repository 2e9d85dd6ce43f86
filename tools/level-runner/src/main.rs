//! level-runner: headless level playback and procedural level generator.
//!
//! Usage:
//!   level-runner run --level wave1.json [--catalog actors.json] [--max-ticks 7200] [--autopilot]
//!   level-runner run --seed 7 --waves 5 --autopilot
//!   level-runner generate --seed 7 --waves 5 --output wave7.json
//!
//! Set `RUST_LOG=info` (or `debug`) to see level events as they happen.

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use glam::Vec2;

use skirmish_core::commands::SimCommand;
use skirmish_core::config::{ActorCatalog, LevelDetails};
use skirmish_core::enums::{Faction, GamePhase};
use skirmish_core::events::SimEvent;
use skirmish_core::state::SimSnapshot;
use skirmish_sim::engine::SimConfig;
use skirmish_sim::level_gen::generate_level;
use skirmish_sim::loader::{load_actor_catalog, load_level_details};
use skirmish_sim::SimulationEngine;

const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 5;

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "generate" => cmd_generate(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "level-runner: SKIRMISH headless level tool\n\
         \n\
         Commands:\n\
         \n\
         run       Play a level headless until it completes, the player falls, or the tick limit\n\
         \n\
           --level <path>     Level JSON to play\n\
           --seed <N>         Generate the level instead (with --waves)\n\
           --waves <N>        Wave count for a generated level (default: 5)\n\
           --catalog <path>   Actor catalog JSON (default: built-in roster)\n\
           --max-ticks <N>    Tick limit (default: {DEFAULT_MAX_TICKS})\n\
           --autopilot        Fire at the nearest active enemy whenever possible\n\
         \n\
         generate  Write a procedurally generated level\n\
         \n\
           --seed <N>         RNG seed\n\
           --waves <N>        Number of waves (default: 5)\n\
           --catalog <path>   Actor catalog JSON (default: built-in roster)\n\
           --output <path>    Output file (default: stdout)\n\
         \n\
         Examples:\n\
         \n\
           level-runner generate --seed 7 --waves 6 --output levels/seed7.json\n\
           RUST_LOG=info level-runner run --level levels/seed7.json --autopilot\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn parse_num<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>> {
    match flag_value(args, flag) {
        Some(raw) => match raw.parse() {
            Ok(v) => Ok(Some(v)),
            Err(_) => bail!("{flag} expects a number, got '{raw}'"),
        },
        None => Ok(None),
    }
}

fn catalog_arg(args: &[String]) -> Result<ActorCatalog> {
    match flag_value(args, "--catalog") {
        Some(path) => load_actor_catalog(path),
        None => Ok(ActorCatalog::default_catalog()),
    }
}

fn cmd_generate(args: &[String]) -> Result<()> {
    let Some(seed) = parse_num::<u64>(args, "--seed")? else {
        bail!("generate requires --seed");
    };
    let waves = parse_num::<usize>(args, "--waves")?.unwrap_or(5);
    let catalog = catalog_arg(args)?;

    let level = generate_level(seed, waves, &catalog);
    let json = serde_json::to_string_pretty(&level).context("serialize level")?;

    match flag_value(args, "--output").map(PathBuf::from) {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("write level: {}", path.display()))?;
            eprintln!(
                "Wrote {} ({} waves, {} spawns)",
                path.display(),
                level.total_waves(),
                level.total_spawns()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_run(args: &[String]) -> Result<()> {
    let catalog = catalog_arg(args)?;
    let level: LevelDetails = match (flag_value(args, "--level"), parse_num::<u64>(args, "--seed")?) {
        (Some(path), _) => load_level_details(path)?,
        (None, Some(seed)) => {
            let waves = parse_num::<usize>(args, "--waves")?.unwrap_or(5);
            generate_level(seed, waves, &catalog)
        }
        (None, None) => bail!("run requires --level <path> or --seed <N>"),
    };
    let max_ticks = parse_num::<u64>(args, "--max-ticks")?.unwrap_or(DEFAULT_MAX_TICKS);
    let autopilot = has_flag(args, "--autopilot");

    let total_waves = level.total_waves();
    log::debug!("running '{}' for at most {max_ticks} ticks (autopilot: {autopilot})", level.name);
    let mut engine = SimulationEngine::with_catalog(SimConfig::default(), level, catalog);
    engine.queue_command(SimCommand::StartLevel);

    let mut report = Report::default();
    let mut snapshot = engine.tick();
    report.absorb(&snapshot);

    while snapshot.phase == GamePhase::Active && snapshot.time.tick < max_ticks {
        if autopilot {
            if let Some(direction) = aim(&snapshot) {
                engine.queue_command(SimCommand::Fire { direction });
            }
        }
        snapshot = engine.tick();
        report.absorb(&snapshot);
    }

    let outcome = match snapshot.phase {
        GamePhase::LevelComplete => "level complete",
        GamePhase::Defeated => "player defeated",
        _ => "tick limit reached",
    };
    log::info!(
        "run finished: {outcome} at tick {} (wave {} of {total_waves})",
        snapshot.time.tick,
        snapshot.wave_index
    );
    println!("Outcome:        {outcome}");
    println!("Ticks:          {} ({:.1}s)", snapshot.time.tick, snapshot.time.elapsed_secs);
    println!("Waves reached:  {} / {}", snapshot.wave_index, total_waves);
    println!("Enemies:        {} spawned, {} reaped", report.spawned, report.reaped);
    println!("Shots fired:    {} player, {} enemy", report.player_shots, report.enemy_shots);
    println!("Hits taken:     {}", report.player_hits);
    Ok(())
}

/// Direction from the player to the nearest active enemy.
fn aim(snapshot: &SimSnapshot) -> Option<Vec2> {
    let player = snapshot
        .receivers
        .iter()
        .find(|r| r.faction == Faction::Player)?;
    snapshot
        .receivers
        .iter()
        .filter(|r| r.enemy_active == Some(true))
        .min_by(|a, b| {
            let da = a.position.distance_squared(player.position);
            let db = b.position.distance_squared(player.position);
            da.total_cmp(&db)
        })
        .map(|target| target.position - player.position)
}

#[derive(Default)]
struct Report {
    spawned: u32,
    reaped: u32,
    player_shots: u32,
    enemy_shots: u32,
    player_hits: u32,
}

impl Report {
    fn absorb(&mut self, snapshot: &SimSnapshot) {
        for event in &snapshot.events {
            match event {
                SimEvent::EnemySpawned { .. } => self.spawned += 1,
                SimEvent::EnemyReaped { .. } => self.reaped += 1,
                SimEvent::ProjectileFired { faction, .. } => match faction {
                    Faction::Player => self.player_shots += 1,
                    _ => self.enemy_shots += 1,
                },
                SimEvent::ReceiverDamaged {
                    faction: Faction::Player,
                    ..
                } => self.player_hits += 1,
                _ => {}
            }
        }
    }
}
