#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::commands::SimCommand;
    use crate::components::Health;
    use crate::config::*;
    use crate::constants::TICK_RATE;
    use crate::enums::*;
    use crate::events::SimEvent;
    use crate::types::{secs_to_ticks, Position, SimTime};

    const LEVEL_JSON: &str = r#"{
        "name": "opening",
        "waves": [
            {
                "wave_delay": 1.0,
                "spawns": [
                    { "actor_template_id": "watcher", "start_point": [0.0, 1.2], "end_point": [0.0, 0.6],
                      "spawn_delay": 0.5, "move_duration": 1.0, "easing": "EaseOutQuad", "scale_to_screen": true },
                    { "actor_template_id": "drone", "start_point": [3.0, 9.0], "end_point": [3.0, 5.0] }
                ]
            },
            { "skip_wave": true }
        ]
    }"#;

    #[test]
    fn test_level_json_parses_with_defaults() {
        let level: LevelDetails = serde_json::from_str(LEVEL_JSON).unwrap();
        assert_eq!(level.name, "opening");
        assert_eq!(level.total_waves(), 2);

        let first = level.wave(0).unwrap();
        assert_eq!(first.wave_delay, 1.0);
        assert_eq!(first.spawns[0].easing, EasingKind::EaseOutQuad);
        assert!(first.spawns[0].scale_to_screen);
        assert_eq!(first.spawns[0].end_point, Vec2::new(0.0, 0.6));

        // Omitted fields fall back to defaults.
        let drone = &first.spawns[1];
        assert_eq!(drone.spawn_delay, 0.0);
        assert_eq!(drone.move_duration, 0.0);
        assert_eq!(drone.easing, EasingKind::Linear);
        assert!(!drone.scale_to_screen);

        let skipped = level.wave(1).unwrap();
        assert!(skipped.skip_wave);
        assert!(skipped.spawns.is_empty());
        assert!(level.wave(2).is_none());
    }

    #[test]
    fn test_total_spawns_ignores_skipped_waves() {
        let mut level: LevelDetails = serde_json::from_str(LEVEL_JSON).unwrap();
        assert_eq!(level.total_spawns(), 2);

        level.waves[1].spawns = level.waves[0].spawns.clone();
        assert_eq!(level.total_spawns(), 2, "skip_wave spawns are never released");

        level.waves[1].skip_wave = false;
        assert_eq!(level.total_spawns(), 4);
    }

    #[test]
    fn test_validate_accepts_empty_and_rejects_negative_timing() {
        assert!(LevelDetails::default().validate().is_ok());

        let mut level: LevelDetails = serde_json::from_str(LEVEL_JSON).unwrap();
        assert!(level.validate().is_ok());

        level.waves[0].spawns[1].spawn_delay = -0.1;
        let err = level.validate().unwrap_err();
        assert!(err.contains("wave 0 spawn 1"), "unexpected message: {err}");

        level.waves[0].spawns[1].spawn_delay = 0.0;
        level.waves[1].wave_delay = f32::NAN;
        assert!(level.validate().is_err(), "NaN delay must be rejected");
    }

    #[test]
    fn test_actor_template_defaults() {
        let json = r#"{ "health": 4.0, "collision_radius": 0.5 }"#;
        let t: ActorTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(t.faction, Faction::Enemy);
        assert_eq!(t.collision_offset, Vec2::ZERO);
        assert!(t.invincibility_secs.is_none());
        assert!(t.weapon.is_none());
    }

    #[test]
    fn test_default_catalog_roster() {
        let catalog = ActorCatalog::default_catalog();
        let ids: Vec<&str> = catalog.ids().collect();
        assert_eq!(ids, vec!["brute", "drone", "watcher"]);
        for id in ids {
            let t = catalog.get(id).unwrap();
            assert_eq!(t.faction, Faction::Enemy);
            assert!(t.health > 0.0);
            assert!(t.collision_radius > 0.0);
        }
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_player_template_is_player_faction() {
        let p = ActorTemplate::player();
        assert_eq!(p.faction, Faction::Player);
        assert!(p.weapon.is_some());
    }

    #[test]
    fn test_secs_to_ticks_rounds_up() {
        assert_eq!(secs_to_ticks(0.0), 0);
        assert_eq!(secs_to_ticks(-1.0), 0);
        assert_eq!(secs_to_ticks(1.0), TICK_RATE as u64);
        assert_eq!(secs_to_ticks(0.001), 1);
        assert_eq!(secs_to_ticks(0.5), TICK_RATE as u64 / 2);
        assert_eq!(secs_to_ticks(0.1), 6);
        assert_eq!(secs_to_ticks(f32::NAN), 0);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        for _ in 0..TICK_RATE {
            t.advance();
        }
        assert_eq!(t.tick, TICK_RATE as u64);
        assert!((t.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_health_new_is_full() {
        let h = Health::new(10.0);
        assert_eq!(h.current, 10.0);
        assert_eq!(h.max, 10.0);
        assert!(!h.is_invincible);
        assert!(!h.was_damaged_this_tick);
    }

    #[test]
    fn test_position_distance_squared() {
        let p = Position::new(1.0, 1.0);
        assert_eq!(p.distance_squared(Vec2::new(4.0, 5.0)), 25.0);
    }

    #[test]
    fn test_command_wire_format_is_tagged() {
        let json = serde_json::to_string(&SimCommand::StartLevel).unwrap();
        assert_eq!(json, r#"{"type":"StartLevel"}"#);

        let fire: SimCommand =
            serde_json::from_str(r#"{"type":"Fire","direction":[0.0,1.0]}"#).unwrap();
        assert_eq!(
            fire,
            SimCommand::Fire {
                direction: Vec2::Y
            }
        );
    }

    #[test]
    fn test_event_wire_format_is_tagged() {
        let json = serde_json::to_string(&SimEvent::WaveStarted { wave_index: 2 }).unwrap();
        assert_eq!(json, r#"{"type":"WaveStarted","wave_index":2}"#);
    }
}
