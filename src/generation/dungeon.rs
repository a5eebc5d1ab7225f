//! # Dungeon Generation
//!
//! The retrying orchestrator: synthesize a layout, repair it, place entities,
//! validate, and repeat until a level passes.
//!
//! Generation always returns a level. Attempts that keep failing end in the
//! forced-open layout, whose single large region always validates.

use crate::game::{Grid, LevelDescriptor, Position};
use crate::generation::{
    place_entities, repair_connectivity, GenerationConfig, LayoutStrategy, PlacementContext,
    RepairSettings, TilePool,
};
use crate::utils::path_exists;
use log::{debug, warn};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// How the orchestrator arrived at the level it returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationOutcome {
    /// A randomized attempt passed validation
    Accepted { attempt: u32 },
    /// A randomized attempt past the early fallback index failed, so the
    /// forced-open layout was used straight away
    EarlyFallback { attempt: u32 },
    /// Every randomized attempt failed
    ForcedOpen,
}

/// Summary of one generation call, for logs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub level: u32,
    pub outcome: GenerationOutcome,
    /// Randomized attempts that ran, the accepted one included
    pub attempts: u32,
    /// Layout of the returned level
    pub layout: LayoutStrategy,
}

/// Level generator driven by a [`GenerationConfig`].
///
/// Holds no state between calls; everything random comes from the `rng` passed
/// to each call.
#[derive(Debug, Clone, Default)]
pub struct DungeonGenerator {
    config: GenerationConfig,
}

impl DungeonGenerator {
    /// Creates a generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::generation::utils::create_rng;
    /// use gridcrawl::{find_path, DungeonGenerator, GenerationConfig};
    ///
    /// let config = GenerationConfig::for_testing(9);
    /// let mut rng = create_rng(&config);
    /// let level = DungeonGenerator::new(config).generate(3, false, &mut rng);
    ///
    /// assert!(find_path(level.player_start, level.stairs, &level.grid, &level.enemies).is_some());
    /// ```
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generates the level for depth `level`.
    ///
    /// `special_unlocked` suppresses the special egg once it has been claimed.
    pub fn generate(
        &self,
        level: u32,
        special_unlocked: bool,
        rng: &mut StdRng,
    ) -> LevelDescriptor {
        self.generate_with_report(level, special_unlocked, rng).0
    }

    /// Like [`generate`](Self::generate), also reporting how the level was reached.
    pub fn generate_with_report(
        &self,
        level: u32,
        special_unlocked: bool,
        rng: &mut StdRng,
    ) -> (LevelDescriptor, GenerationReport) {
        self.run_attempts(level, rng, |forced_open, rng| {
            self.attempt(level, special_unlocked, forced_open, rng)
        })
    }

    /// Runs one attempt without validating it.
    ///
    /// With `forced_open` the layout is [`LayoutStrategy::Open`] and repair uses
    /// the larger forced carve radius.
    pub fn attempt(
        &self,
        level: u32,
        special_unlocked: bool,
        forced_open: bool,
        rng: &mut StdRng,
    ) -> (LevelDescriptor, LayoutStrategy) {
        let config = &self.config;
        let bounds = config.bounds_for_level(level);
        let mut grid = Grid::new(config.map_width, config.map_height);

        let (layout, carve_radius) = if forced_open {
            (LayoutStrategy::Open, config.forced_carve_radius)
        } else {
            let layout = config
                .forced_layout
                .unwrap_or_else(|| LayoutStrategy::choose(rng));
            (layout, config.fallback_carve_radius)
        };

        layout.synthesize(&mut grid, bounds, level, rng);
        let main_region = repair_connectivity(
            &mut grid,
            bounds,
            RepairSettings {
                min_region_size: config.min_region_size,
                carve_radius,
            },
        );

        let mut pool = TilePool::new(main_region);
        let ctx = PlacementContext {
            level,
            bounds,
            grid: &grid,
            special_unlocked,
            special_egg_level: config.special_egg_level,
        };
        let placement = place_entities(&ctx, &mut pool, rng);

        (placement.into_level(level, grid, bounds), layout)
    }

    /// Retry loop around an attempt function taking `(forced_open, rng)`.
    fn run_attempts<F>(
        &self,
        level: u32,
        rng: &mut StdRng,
        mut attempt: F,
    ) -> (LevelDescriptor, GenerationReport)
    where
        F: FnMut(bool, &mut StdRng) -> (LevelDescriptor, LayoutStrategy),
    {
        let config = &self.config;

        for index in 0..config.max_attempts {
            let (candidate, layout) = attempt(false, rng);
            if validate_level(&candidate, config.exhaustive_enemy_check) {
                debug!("level {level}: accepted {layout} layout on attempt {index}");
                let report = GenerationReport {
                    level,
                    outcome: GenerationOutcome::Accepted { attempt: index },
                    attempts: index + 1,
                    layout,
                };
                return (candidate, report);
            }

            if index > config.early_fallback_attempt {
                warn!("level {level}: attempt {index} failed validation, using forced-open layout");
                let (forced, layout) = attempt(true, rng);
                let report = GenerationReport {
                    level,
                    outcome: GenerationOutcome::EarlyFallback { attempt: index },
                    attempts: index + 1,
                    layout,
                };
                return (forced, report);
            }
        }

        warn!(
            "level {level}: {} attempts failed validation, using forced-open layout",
            config.max_attempts
        );
        let (forced, layout) = attempt(true, rng);
        let report = GenerationReport {
            level,
            outcome: GenerationOutcome::ForcedOpen,
            attempts: config.max_attempts,
            layout,
        };
        (forced, report)
    }
}

/// Checks that the player can reach the key, the key the stairs and the player
/// the stairs.
///
/// Enemies are checked too: only the first and last of the list by default, or
/// all of them when `exhaustive_enemies` is set.
pub fn validate_level(level: &LevelDescriptor, exhaustive_enemies: bool) -> bool {
    let grid = &level.grid;
    let start = level.player_start;

    if !path_exists(start, level.key, grid)
        || !path_exists(level.key, level.stairs, grid)
        || !path_exists(start, level.stairs, grid)
    {
        return false;
    }

    let reachable = |target: Position| path_exists(start, target, grid);
    if exhaustive_enemies {
        level.enemies.iter().all(|enemy| reachable(enemy.position))
    } else {
        level.enemies.first().map_or(true, |e| reachable(e.position))
            && level.enemies.last().map_or(true, |e| reachable(e.position))
    }
}

/// Generates a level with the default configuration.
///
/// # Examples
///
/// ```
/// use gridcrawl::generate_dungeon;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(2024);
/// let level = generate_dungeon(10, false, &mut rng);
/// assert_eq!(level.boss_index(), Some(0));
/// ```
pub fn generate_dungeon(level: u32, special_unlocked: bool, rng: &mut StdRng) -> LevelDescriptor {
    DungeonGenerator::default().generate(level, special_unlocked, rng)
}
