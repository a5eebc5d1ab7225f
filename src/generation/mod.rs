//! # Generation Module
//!
//! Procedural level generation: layout synthesis, connectivity repair, entity
//! placement and the retrying orchestrator that turns them into a level.
//!
//! Every step takes the random source explicitly, so a seed fully determines the
//! level that comes out.

pub mod dungeon;
pub mod layout;
pub mod placement;
pub mod repair;

pub use dungeon::*;
pub use layout::*;
pub use placement::*;
pub use repair::*;

use crate::config;
use crate::game::{Bounds, Position};
use crate::{GridcrawlError, GridcrawlResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for level generation.
///
/// Controls the grid size, the retry policy and a few test hooks. Missing fields
/// in a JSON file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Full grid width in tiles
    pub map_width: u32,
    /// Full grid height in tiles
    pub map_height: u32,
    /// Randomized attempts before the forced-open layout
    pub max_attempts: u32,
    /// Failing attempts past this index go straight to the forced-open layout
    pub early_fallback_attempt: u32,
    /// Main regions smaller than this get the fallback carve
    pub min_region_size: usize,
    /// Half-size of the fallback carve
    pub fallback_carve_radius: i32,
    /// Half-size of the carve on the forced-open attempt
    pub forced_carve_radius: i32,
    /// Level that may hold the special egg
    pub special_egg_level: u32,
    /// Always use this layout instead of a random one
    pub forced_layout: Option<LayoutStrategy>,
    /// Check every enemy for reachability instead of only the first and last
    pub exhaustive_enemy_check: bool,
}

impl GenerationConfig {
    /// Creates the standard generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.max_attempts, 50);
    /// assert!(config.early_fallback_attempt < config.max_attempts);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            map_width: config::DEFAULT_MAP_WIDTH,
            map_height: config::DEFAULT_MAP_HEIGHT,
            max_attempts: config::MAX_GENERATION_ATTEMPTS,
            early_fallback_attempt: config::EARLY_FALLBACK_ATTEMPT,
            min_region_size: config::MIN_REGION_SIZE,
            fallback_carve_radius: config::FALLBACK_CARVE_RADIUS,
            forced_carve_radius: config::FORCED_CARVE_RADIUS,
            special_egg_level: config::SPECIAL_EGG_LEVEL,
            forced_layout: None,
            exhaustive_enemy_check: false,
        }
    }

    /// Creates a configuration for testing with a smaller grid and a short retry budget.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            map_width: 50,
            map_height: 32,
            max_attempts: 10,
            early_fallback_attempt: 6,
            exhaustive_enemy_check: true,
            ..Self::new(seed)
        }
    }

    /// Reads a configuration from a JSON file and validates it.
    pub fn from_json_file(path: impl AsRef<Path>) -> GridcrawlResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can always produce a level.
    pub fn validate(&self) -> GridcrawlResult<()> {
        let invalid = |msg: String| Err(GridcrawlError::InvalidConfig(msg));

        if self.max_attempts == 0 {
            return invalid("max_attempts must be at least 1".to_string());
        }
        if self.early_fallback_attempt >= self.max_attempts {
            return invalid(format!(
                "early_fallback_attempt ({}) must be below max_attempts ({})",
                self.early_fallback_attempt, self.max_attempts
            ));
        }
        if self.min_region_size == 0 {
            return invalid("min_region_size must be at least 1".to_string());
        }
        if self.fallback_carve_radius < 0 || self.forced_carve_radius < 0 {
            return invalid("carve radii must not be negative".to_string());
        }

        // The carve sits on the center of the smallest usable rectangle and must
        // stay clear of its outer ring.
        let smallest = Bounds::for_level(0, self.map_width, self.map_height);
        let radius = self.fallback_carve_radius.max(self.forced_carve_radius);
        let center = smallest.center();
        if center.x - radius < 1
            || center.y - radius < 1
            || center.x + radius >= smallest.width - 1
            || center.y + radius >= smallest.height - 1
        {
            return invalid(format!(
                "a {}x{} grid is too small for a carve of radius {}",
                self.map_width, self.map_height, radius
            ));
        }

        Ok(())
    }

    /// Usable rectangle at `level` for this grid size.
    pub fn bounds_for_level(&self, level: u32) -> Bounds {
        Bounds::for_level(level, self.map_width, self.map_height)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// A rectangular room carved by the rooms layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Top-left corner of the room
    pub top_left: Position,
    pub width: i32,
    pub height: i32,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::{Position, Room};
    ///
    /// let room = Room::new(Position::new(5, 5), 10, 8);
    /// assert_eq!(room.center(), Position::new(10, 9));
    /// assert!(room.contains(Position::new(14, 12)));
    /// assert!(!room.contains(Position::new(15, 12)));
    /// ```
    pub fn new(top_left: Position, width: i32, height: i32) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    /// Gets the center position of the room.
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width / 2,
            self.top_left.y + self.height / 2,
        )
    }

    /// Gets the area of the room in tiles.
    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// Checks if a position is inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x < self.top_left.x + self.width
            && pos.y < self.top_left.y + self.height
    }

    /// Checks if this room overlaps with another room.
    pub fn overlaps(&self, other: &Room) -> bool {
        !(self.top_left.x >= other.top_left.x + other.width
            || other.top_left.x >= self.top_left.x + self.width
            || self.top_left.y >= other.top_left.y + other.height
            || other.top_left.y >= self.top_left.y + self.height)
    }

    /// Gets all positions within this room.
    pub fn positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.area().max(0) as usize);
        for y in self.top_left.y..(self.top_left.y + self.height) {
            for x in self.top_left.x..(self.top_left.x + self.width) {
                positions.push(Position::new(x, y));
            }
        }
        positions
    }
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}
