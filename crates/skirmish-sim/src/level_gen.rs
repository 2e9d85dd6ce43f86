//! Seeded procedural level generation.
//!
//! Same seed and catalog always produce the same `LevelDetails`. Points are
//! authored in normalized screen space: enemies enter from above the top edge
//! and settle in the upper half of the arena.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use skirmish_core::config::{ActorCatalog, LevelDetails, SpawnEntry, WaveDefinition};
use skirmish_core::enums::EasingKind;

const EASINGS: [EasingKind; 6] = [
    EasingKind::Linear,
    EasingKind::EaseInQuad,
    EasingKind::EaseOutQuad,
    EasingKind::EaseInOutQuad,
    EasingKind::EaseOutCubic,
    EasingKind::EaseOutBack,
];

/// Chance that a wave after the first is authored as a breather.
const SKIP_CHANCE: f64 = 0.1;

/// Round to hundredths so generated files stay readable.
fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

/// Generate a level with `wave_count` waves drawn from `catalog`.
/// Waves grow from one to up to seven spawns.
pub fn generate_level(seed: u64, wave_count: usize, catalog: &ActorCatalog) -> LevelDetails {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let ids: Vec<&str> = catalog.ids().collect();

    let waves = (0..wave_count)
        .map(|wave_index| generate_wave(&mut rng, wave_index, &ids))
        .collect();

    LevelDetails {
        name: format!("generated-{seed}"),
        waves,
    }
}

fn generate_wave(rng: &mut ChaCha8Rng, wave_index: usize, ids: &[&str]) -> WaveDefinition {
    let skip_wave = wave_index > 0 && rng.gen_bool(SKIP_CHANCE);
    let wave_delay = round2(rng.gen_range(0.5..1.5));

    let spawns = if ids.is_empty() {
        Vec::new()
    } else {
        let count = rng.gen_range(1..=3 + wave_index.min(4));
        (0..count).map(|_| generate_entry(rng, ids)).collect()
    };

    WaveDefinition {
        spawns,
        wave_delay,
        skip_wave,
    }
}

fn generate_entry(rng: &mut ChaCha8Rng, ids: &[&str]) -> SpawnEntry {
    let template = ids[rng.gen_range(0..ids.len())];
    let lane = round2(rng.gen_range(-0.8..0.8));
    SpawnEntry {
        actor_template_id: template.to_string(),
        start_point: Vec2::new(lane, 1.2),
        end_point: Vec2::new(
            round2((lane + rng.gen_range(-0.2..0.2)).clamp(-0.9, 0.9)),
            round2(rng.gen_range(0.2..0.8)),
        ),
        spawn_delay: round2(rng.gen_range(0.2..0.8)),
        move_duration: round2(rng.gen_range(0.8..1.6)),
        easing: EASINGS[rng.gen_range(0..EASINGS.len())],
        scale_to_screen: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_level() {
        let catalog = ActorCatalog::default_catalog();
        assert_eq!(generate_level(11, 6, &catalog), generate_level(11, 6, &catalog));
        assert_ne!(generate_level(11, 6, &catalog), generate_level(12, 6, &catalog));
    }

    #[test]
    fn generated_levels_validate_and_use_catalog_ids() {
        let catalog = ActorCatalog::default_catalog();
        for seed in 0..20 {
            let level = generate_level(seed, 5, &catalog);
            assert_eq!(level.total_waves(), 5);
            assert!(level.validate().is_ok());
            assert!(!level.waves[0].skip_wave, "first wave is never skipped");
            for entry in level.waves.iter().flat_map(|w| &w.spawns) {
                assert!(catalog.get(&entry.actor_template_id).is_some());
                assert!(entry.scale_to_screen);
                assert!(entry.end_point.y < entry.start_point.y);
            }
        }
    }

    #[test]
    fn empty_catalog_yields_empty_waves() {
        let level = generate_level(3, 2, &ActorCatalog::default());
        assert_eq!(level.total_waves(), 2);
        assert_eq!(level.total_spawns(), 0);
    }
}
