//! # Level Descriptor
//!
//! The generator's output. Built in one go at level entry and handed to the caller
//! by value; the generator keeps nothing once it returns.

use crate::game::{Biome, Bounds, Chest, Enemy, Grid, Npc, Position, Potion, Trap};
use serde::{Deserialize, Serialize};

/// A complete, playable level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// Depth counter this level was generated for
    pub level: u32,
    pub grid: Grid,
    /// Usable rectangle of the grid at this depth
    pub bounds: Bounds,
    pub biome: Biome,
    pub player_start: Position,
    /// Locked exit
    pub stairs: Position,
    pub key: Position,
    pub enemies: Vec<Enemy>,
    pub chests: Vec<Chest>,
    pub potions: Vec<Potion>,
    pub merchant: Option<Position>,
    pub altar: Option<Position>,
    pub npc: Option<Npc>,
    pub traps: Vec<Trap>,
    /// Only on the egg level, and only until the unlock has happened
    pub special_egg: Option<Position>,
}

impl LevelDescriptor {
    /// Positions of every placed entity, player start included.
    ///
    /// Placement draws each tile from a shrinking pool, so on a freshly generated
    /// level no position repeats.
    pub fn occupied_positions(&self) -> Vec<Position> {
        let mut positions = vec![self.player_start, self.stairs, self.key];
        positions.extend(self.enemies.iter().map(|e| e.position));
        positions.extend(self.chests.iter().map(|c| c.position));
        positions.extend(self.potions.iter().map(|p| p.position));
        positions.extend(self.merchant);
        positions.extend(self.altar);
        positions.extend(self.npc.as_ref().map(|n| n.position));
        positions.extend(self.traps.iter().map(|t| t.position));
        positions.extend(self.special_egg);
        positions
    }

    /// Index of the boss enemy, if this level has one.
    pub fn boss_index(&self) -> Option<usize> {
        self.enemies.iter().position(|e| e.is_boss)
    }
}
