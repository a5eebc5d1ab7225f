//! Integration tests for level generation across the full depth range.

use gridcrawl::{
    config, find_path, generate_dungeon, min_stair_distance, trap_count, DungeonGenerator,
    GenerationConfig, GenerationOutcome, LayoutStrategy, LevelDescriptor, Position,
};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use std::collections::HashSet;

fn reachable(level: &LevelDescriptor, target: Position) -> bool {
    find_path(level.player_start, target, &level.grid, &level.enemies).is_some()
}

fn assert_fully_connected(level: &LevelDescriptor) {
    let n = level.level;
    assert!(level.grid.is_walkable(level.player_start), "level {n}: start on wall");
    assert!(reachable(level, level.stairs), "level {n}: stairs unreachable");
    assert!(reachable(level, level.key), "level {n}: key unreachable");
    for enemy in &level.enemies {
        assert!(reachable(level, enemy.position), "level {n}: {} unreachable", enemy.id);
    }
}

/// Every level of a run, generated from one seed the way a game would.
#[test]
fn test_full_run_is_connected() {
    let mut rng = StdRng::seed_from_u64(2718);
    for n in 1..=config::MAX_LEVELS {
        let level = generate_dungeon(n, n > config::SPECIAL_EGG_LEVEL, &mut rng);
        assert_fully_connected(&level);

        let occupied = level.occupied_positions();
        let unique: HashSet<_> = occupied.iter().collect();
        assert_eq!(occupied.len(), unique.len(), "level {n}: tiles reused");
        assert!(occupied.iter().all(|&pos| level.grid.is_walkable(pos)));
    }
}

#[test]
fn test_stairs_are_far_from_start_when_possible() {
    let generator = DungeonGenerator::default();
    let mut violations = 0;
    let mut structured_violations = 0;

    for i in 0..1000u64 {
        let n = (i % config::MAX_LEVELS as u64) as u32 + 1;
        let (level, report) =
            generator.generate_with_report(n, false, &mut StdRng::seed_from_u64(i));
        let threshold = min_stair_distance(level.bounds);

        if level.player_start.manhattan_distance(level.stairs) < threshold {
            violations += 1;
            if report.layout != LayoutStrategy::Chaotic {
                structured_violations += 1;
            }
            // Only allowed when no floor tile was far enough away
            let farthest = level
                .grid
                .floor_positions()
                .into_iter()
                .map(|pos| pos.manhattan_distance(level.player_start))
                .max()
                .unwrap_or(0);
            assert!(farthest < threshold, "seed {i}: stairs placed too close");
        }
    }

    // Chaotic layouts often keep only a small main region
    assert!(violations <= 60, "{violations} close stairs out of 1000");
    assert!(
        structured_violations <= 10,
        "{structured_violations} close stairs outside chaotic layouts"
    );
}

#[test]
fn test_boss_only_on_tenth_levels() {
    let mut rng = StdRng::seed_from_u64(10);
    for n in 1..=config::MAX_LEVELS {
        let level = generate_dungeon(n, false, &mut rng);
        let bosses = level.enemies.iter().filter(|e| e.is_boss).count();
        if n % 10 == 0 {
            assert_eq!(level.boss_index(), Some(0), "level {n}");
            assert_eq!(bosses, 1);
        } else {
            assert_eq!(bosses, 0, "level {n}");
        }
    }
}

#[test]
fn test_traps_only_from_hazard_level() {
    let mut rng = StdRng::seed_from_u64(31);
    for n in 1..=config::MAX_LEVELS {
        let level = generate_dungeon(n, true, &mut rng);
        assert_eq!(level.traps.len() as u32, trap_count(n, level.biome), "level {n}");
        if n < config::HAZARD_START_LEVEL {
            assert!(level.traps.is_empty());
        }
    }
}

#[test]
fn test_egg_appears_once_per_run() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut unlocked = false;
    let mut eggs = Vec::new();

    for n in 1..=config::MAX_LEVELS {
        let level = generate_dungeon(n, unlocked, &mut rng);
        if level.special_egg.is_some() {
            eggs.push(n);
            unlocked = true;
        }
    }
    assert_eq!(eggs, vec![config::SPECIAL_EGG_LEVEL]);
}

#[test]
fn test_level_contents_follow_depth() {
    let mut rng = StdRng::seed_from_u64(5);
    for n in 1..=40 {
        let level = generate_dungeon(n, false, &mut rng);
        assert_eq!(level.merchant.is_some(), n % 2 == 1, "level {n}");
        assert!(level.altar.is_some());
        assert_eq!(level.potions.len(), 2);
        assert!(level.potions.iter().all(|p| p.heal_percent == 25));
        if n > 10 {
            assert_eq!(level.chests.len(), 2);
        } else {
            assert!((1..=2).contains(&level.chests.len()));
        }
        for (i, enemy) in level.enemies.iter().enumerate() {
            assert_eq!(enemy.id, format!("e-{n}-{i}"));
            assert!(level.biome.enemy_pool().contains(&enemy.kind.as_str()));
        }
        assert!(level.enemies.len() as u32 <= config::MAX_ENEMIES_PER_LEVEL);
    }
}

#[test]
fn test_usable_area_grows_with_depth() {
    let shallow = generate_dungeon(1, false, &mut StdRng::seed_from_u64(1));
    let deep = generate_dungeon(60, false, &mut StdRng::seed_from_u64(1));
    assert!(deep.bounds.area() > shallow.bounds.area());
    assert!(deep.bounds.width <= config::DEFAULT_MAP_WIDTH as i32 - 2);
    assert!(deep.bounds.height <= config::DEFAULT_MAP_HEIGHT as i32 - 2);
}

#[test]
fn test_same_seed_same_run() {
    let config = GenerationConfig::new(404);
    let generator = DungeonGenerator::new(config.clone());
    let mut first = gridcrawl::generation::utils::create_rng(&config);
    let mut second = gridcrawl::generation::utils::create_rng(&config);

    for n in [1, 2, 50, 99] {
        assert_eq!(
            generator.generate(n, false, &mut first),
            generator.generate(n, false, &mut second)
        );
    }
}

#[test]
fn test_reports_accept_early() {
    let generator = DungeonGenerator::new(GenerationConfig::for_testing(6));
    let mut rng = StdRng::seed_from_u64(6);
    for n in 1..=20 {
        let (_, report) = generator.generate_with_report(n, false, &mut rng);
        assert!(
            matches!(report.outcome, GenerationOutcome::Accepted { .. }),
            "level {n}: {:?}",
            report.outcome
        );
        assert!(report.attempts <= generator.config().max_attempts);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn generated_levels_are_connected(seed in any::<u64>(), n in 1_u32..=100) {
        let level = generate_dungeon(n, false, &mut StdRng::seed_from_u64(seed));
        prop_assert!(reachable(&level, level.stairs), "seed={seed}, level={n}: stairs");
        prop_assert!(reachable(&level, level.key), "seed={seed}, level={n}: key");
        for enemy in &level.enemies {
            prop_assert!(
                reachable(&level, enemy.position),
                "seed={seed}, level={n}: {} unreachable",
                enemy.id
            );
        }
    }
}
