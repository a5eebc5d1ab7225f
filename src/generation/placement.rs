//! # Entity Placement
//!
//! Puts the player, exit, key, monsters, loot and hazards onto a repaired grid.
//!
//! All placements draw from one shrinking pool of main-region tiles, in a fixed
//! order: earlier placements get first pick of well separated tiles, and no tile is
//! handed out twice.

use crate::config;
use crate::game::{
    Biome, Bounds, Chest, Enemy, EntityStats, Grid, LevelDescriptor, Npc, NpcKind, Position,
    Potion, Trap, TrapKind,
};
use crate::utils::{relax_distance, scaled_floor};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Returned when a draw finds the pool empty: the top-left interior cell.
pub const SAFE_DEFAULT_TILE: Position = Position { x: 1, y: 1 };

/// Separation thresholds are relaxed only while above this value.
const MIN_RELAXABLE_DISTANCE: u32 = 5;

const NPC_CHANCE: f64 = 0.15;
const ELITE_CHANCE: f64 = 0.05;
const ELITE_MULTIPLIER: f64 = 2.0;
const BOSS_LEVEL_INTERVAL: u32 = 10;
const BASE_ENEMIES: u32 = 4;
/// Usable tiles per extra enemy
const ENEMY_DENSITY_AREA: u32 = 150;
/// Past this level every level gets two chests
const GUARANTEED_SECOND_CHEST_LEVEL: u32 = 10;
const POTIONS_PER_LEVEL: usize = 2;
const POTION_HEAL_PERCENT: u32 = 25;
/// Levels per trap on trap-bearing levels
const TRAP_LEVEL_DIVISOR: u32 = 5;
const HAZARDOUS_TRAP_BONUS: u32 = 5;

/// Unclaimed main-region tiles for one generation attempt.
///
/// Order is preserved as tiles are removed, so draws are reproducible for a seed.
#[derive(Debug, Clone)]
pub struct TilePool {
    tiles: Vec<Position>,
}

impl TilePool {
    pub fn new(tiles: Vec<Position>) -> Self {
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.tiles.contains(&pos)
    }

    /// Remaining tiles, in pool order.
    pub fn tiles(&self) -> &[Position] {
        &self.tiles
    }

    /// Removes and returns a uniformly random tile, or [`SAFE_DEFAULT_TILE`] when
    /// the pool is empty.
    pub fn take_random_free(&mut self, rng: &mut StdRng) -> Position {
        if self.tiles.is_empty() {
            return SAFE_DEFAULT_TILE;
        }
        let idx = rng.gen_range(0..self.tiles.len());
        self.tiles.remove(idx)
    }

    /// Draws a tile at least `min_distance` (Manhattan) from every target.
    ///
    /// When no tile qualifies the threshold is cut to 70% and the search repeats,
    /// as long as it is still above 5; after that any free tile will do.
    pub fn take_far_from(
        &mut self,
        targets: &[Position],
        min_distance: u32,
        rng: &mut StdRng,
    ) -> Position {
        let mut threshold = min_distance;
        loop {
            let candidates: Vec<usize> = self
                .tiles
                .iter()
                .enumerate()
                .filter(|(_, tile)| {
                    targets
                        .iter()
                        .all(|target| tile.manhattan_distance(*target) >= threshold)
                })
                .map(|(idx, _)| idx)
                .collect();

            if let Some(&idx) = candidates.choose(rng) {
                return self.tiles.remove(idx);
            }
            if threshold <= MIN_RELAXABLE_DISTANCE {
                return self.take_random_free(rng);
            }
            threshold = relax_distance(threshold);
        }
    }

    /// Removes a tile picked by some other means. Unknown tiles are ignored.
    pub fn remove_tile(&mut self, pos: Position) {
        self.tiles.retain(|&tile| tile != pos);
    }
}

/// Stats for an enemy at `level`.
///
/// ```text
/// hp     = floor((40 + 15L) * m)
/// attack = floor((5 + 3L) * m)
/// armor  = floor((2 + 1.5L) * m)
/// speed  = 8 + L/10
/// ```
/// where `m` is 2 for elites and 1 otherwise. Speed is not scaled.
///
/// # Examples
///
/// ```
/// use gridcrawl::generate_enemy_stats;
///
/// let stats = generate_enemy_stats(10, true);
/// assert_eq!((stats.hp, stats.attack, stats.armor), (380, 70, 34));
/// ```
pub fn generate_enemy_stats(level: u32, elite: bool) -> EntityStats {
    let multiplier = if elite { ELITE_MULTIPLIER } else { 1.0 };
    let level = level as f64;
    let hp = scaled_floor(40.0 + 15.0 * level, multiplier);
    let armor = scaled_floor(2.0 + 1.5 * level, multiplier);
    EntityStats {
        hp,
        max_hp: hp,
        attack: scaled_floor(5.0 + 3.0 * level, multiplier),
        armor,
        max_armor: armor,
        speed: 8.0 + level / 10.0,
    }
}

/// Number of enemies for a level: `min(30, 4 + level/2 + area/150)`.
pub fn enemy_count(level: u32, bounds: Bounds) -> u32 {
    let base = BASE_ENEMIES + level / 2;
    let density_bonus = bounds.area() / ENEMY_DENSITY_AREA;
    config::MAX_ENEMIES_PER_LEVEL.min(base + density_bonus)
}

/// Number of traps for a level; zero below the hazard level.
pub fn trap_count(level: u32, biome: Biome) -> u32 {
    if level < config::HAZARD_START_LEVEL {
        return 0;
    }
    let bonus = if biome.is_hazardous() {
        HAZARDOUS_TRAP_BONUS
    } else {
        0
    };
    level / TRAP_LEVEL_DIVISOR + bonus
}

/// Minimum stairs/key separation: a quarter of the usable perimeter half-sum.
pub fn min_stair_distance(bounds: Bounds) -> u32 {
    ((bounds.width + bounds.height) / 4).max(0) as u32
}

/// Inputs that stay fixed for one placement run.
#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    pub level: u32,
    pub bounds: Bounds,
    pub grid: &'a Grid,
    /// Whether the one-time egg unlock has already happened
    pub special_unlocked: bool,
    pub special_egg_level: u32,
}

/// Everything the placer decided for one attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub player_start: Position,
    pub stairs: Position,
    pub key: Position,
    pub biome: Biome,
    pub npc: Option<Npc>,
    pub enemies: Vec<Enemy>,
    pub chests: Vec<Chest>,
    pub potions: Vec<Potion>,
    pub altar: Option<Position>,
    pub merchant: Option<Position>,
    pub traps: Vec<Trap>,
    pub special_egg: Option<Position>,
}

impl Placement {
    /// Assembles the final level around the grid the placement was made on.
    pub fn into_level(self, level: u32, grid: Grid, bounds: Bounds) -> LevelDescriptor {
        LevelDescriptor {
            level,
            grid,
            bounds,
            biome: self.biome,
            player_start: self.player_start,
            stairs: self.stairs,
            key: self.key,
            enemies: self.enemies,
            chests: self.chests,
            potions: self.potions,
            merchant: self.merchant,
            altar: self.altar,
            npc: self.npc,
            traps: self.traps,
            special_egg: self.special_egg,
        }
    }
}

/// Places every entity for one attempt, consuming tiles from `pool`.
pub fn place_entities(
    ctx: &PlacementContext<'_>,
    pool: &mut TilePool,
    rng: &mut StdRng,
) -> Placement {
    let level = ctx.level;

    let player_start = pool.take_random_free(rng);
    let separation = min_stair_distance(ctx.bounds);
    let stairs = pool.take_far_from(&[player_start], separation, rng);
    let key = pool.take_far_from(&[stairs, player_start], separation, rng);

    let biome = Biome::choose(level, rng);
    let npc = place_npc(ctx, pool, rng);
    let enemies = place_enemies(ctx, biome, pool, rng);

    let chest_count = if rng.gen_bool(0.5) || level > GUARANTEED_SECOND_CHEST_LEVEL {
        2
    } else {
        1
    };
    let chests = draw_tiles(pool, chest_count, rng)
        .into_iter()
        .enumerate()
        .map(|(i, position)| Chest {
            id: format!("c-{level}-{i}"),
            position,
        })
        .collect();

    let potions = draw_tiles(pool, POTIONS_PER_LEVEL, rng)
        .into_iter()
        .enumerate()
        .map(|(i, position)| Potion {
            id: format!("p-{level}-{i}"),
            position,
            heal_percent: POTION_HEAL_PERCENT,
        })
        .collect();

    let altar = (!pool.is_empty()).then(|| pool.take_random_free(rng));
    let merchant = (level % 2 != 0 && !pool.is_empty()).then(|| pool.take_random_free(rng));

    let traps = draw_tiles(pool, trap_count(level, biome) as usize, rng)
        .into_iter()
        .enumerate()
        .map(|(i, position)| Trap::new(format!("t-{level}-{i}"), position, TrapKind::choose(rng)))
        .collect();

    let special_egg = (level == ctx.special_egg_level && !ctx.special_unlocked && !pool.is_empty())
        .then(|| pool.take_random_free(rng));

    debug!(
        "placed level {level} ({biome}): start {player_start}, stairs {stairs}, key {key}, \
         {} enemies, {} tiles left",
        enemies.len(),
        pool.len()
    );

    Placement {
        player_start,
        stairs,
        key,
        biome,
        npc,
        enemies,
        chests,
        potions,
        altar,
        merchant,
        traps,
        special_egg,
    }
}

/// Draws up to `count` tiles, stopping early if the pool runs dry.
fn draw_tiles(pool: &mut TilePool, count: usize, rng: &mut StdRng) -> Vec<Position> {
    let mut tiles = Vec::with_capacity(count.min(pool.len()));
    for _ in 0..count {
        if pool.is_empty() {
            break;
        }
        tiles.push(pool.take_random_free(rng));
    }
    tiles
}

/// Rolls for the level's NPC and puts it on a tile with floor on all four sides.
fn place_npc(ctx: &PlacementContext<'_>, pool: &mut TilePool, rng: &mut StdRng) -> Option<Npc> {
    if !rng.gen_bool(NPC_CHANCE) {
        return None;
    }

    let open_tiles: Vec<Position> = pool
        .tiles()
        .iter()
        .copied()
        .filter(|tile| {
            tile.cardinal_adjacent_positions()
                .iter()
                .all(|&neighbour| ctx.grid.is_walkable(neighbour))
        })
        .collect();

    let position = *open_tiles.choose(rng)?;
    pool.remove_tile(position);

    let kind = NpcKind::choose(ctx.level >= config::HAZARD_START_LEVEL, rng);
    Some(Npc {
        id: format!("npc-{}", ctx.level),
        position,
        kind,
    })
}

fn place_enemies(
    ctx: &PlacementContext<'_>,
    biome: Biome,
    pool: &mut TilePool,
    rng: &mut StdRng,
) -> Vec<Enemy> {
    let level = ctx.level;
    let kinds = biome.enemy_pool();
    let target = enemy_count(level, ctx.bounds);
    let mut enemies = Vec::with_capacity(target as usize);

    for i in 0..target {
        if pool.is_empty() {
            break;
        }
        let position = pool.take_random_free(rng);
        let kind = kinds.choose(rng).copied().unwrap_or("rat");
        let is_elite = rng.gen_bool(ELITE_CHANCE);
        enemies.push(Enemy {
            id: format!("e-{level}-{i}"),
            position,
            kind: kind.to_string(),
            stats: generate_enemy_stats(level, is_elite),
            is_elite,
            is_boss: level % BOSS_LEVEL_INTERVAL == 0 && i == 0,
        });
    }

    enemies
}
