//! # Gridcrawl
//!
//! Procedural level generation and grid pathfinding for a turn-based dungeon crawler.
//!
//! ## Architecture Overview
//!
//! Every descent gets a freshly generated, fully connected level. The crate is split
//! into a handful of small layers:
//!
//! - **Game**: the world model (positions, the wall/floor grid, biomes, entities and
//!   the level descriptor) plus guidance overlays built on path queries
//! - **Generation**: layout synthesis, connectivity repair, entity placement and the
//!   retrying orchestrator that ties them together
//! - **Utils**: flood fill, region detection and breadth-first pathfinding
//! - **Rendering**: a plain-text preview used by the command line tool
//!
//! ## Determinism
//!
//! All randomness flows through an explicitly passed [`rand::rngs::StdRng`]. The same
//! seed, level number and configuration always produce the same level.

pub mod game;
pub mod generation;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Gridcrawl crate.
///
/// Generation and pathfinding never fail; this type only shows up at the
/// configuration and command line boundary.
#[derive(thiserror::Error, Debug)]
pub enum GridcrawlError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generation configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Command line argument could not be interpreted
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type used throughout the Gridcrawl codebase.
pub type GridcrawlResult<T> = Result<T, GridcrawlError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default grid width in tiles
    pub const DEFAULT_MAP_WIDTH: u32 = 80;

    /// Default grid height in tiles
    pub const DEFAULT_MAP_HEIGHT: u32 = 50;

    /// Deepest level of a full run
    pub const MAX_LEVELS: u32 = 100;

    /// Usable width at level zero
    pub const BASE_USABLE_WIDTH: u32 = 40;

    /// Usable height at level zero
    pub const BASE_USABLE_HEIGHT: u32 = 25;

    /// Randomized attempts before the forced-open layout is used
    pub const MAX_GENERATION_ATTEMPTS: u32 = 50;

    /// Failing attempts past this index skip straight to the forced-open layout
    pub const EARLY_FALLBACK_ATTEMPT: u32 = 40;

    /// Main regions smaller than this get the fallback carve
    pub const MIN_REGION_SIZE: usize = 20;

    /// Half-size of the fallback carve (7x7 block)
    pub const FALLBACK_CARVE_RADIUS: i32 = 3;

    /// Half-size of the carve used by the forced-open attempt (11x11 block)
    pub const FORCED_CARVE_RADIUS: i32 = 5;

    /// The one level that can hold the special egg
    pub const SPECIAL_EGG_LEVEL: u32 = 30;

    /// First level with traps and the rare NPC
    pub const HAZARD_START_LEVEL: u32 = 30;

    /// Upper bound on enemies per level
    pub const MAX_ENEMIES_PER_LEVEL: u32 = 30;
}
