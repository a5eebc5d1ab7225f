//! # Level Entities
//!
//! Everything the placer puts on a level besides the grid itself. These are plain
//! data; the caller's state machine owns behaviour such as combat and traps firing.

use crate::game::Position;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Combat stat block shared by enemies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityStats {
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub armor: u32,
    pub max_armor: u32,
    pub speed: f64,
}

/// A hostile creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: String,
    pub position: Position,
    /// Type tag drawn from the biome's enemy pool
    pub kind: String,
    pub stats: EntityStats,
    pub is_elite: bool,
    /// Only ever set on the first enemy of a level that is a multiple of 10
    pub is_boss: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chest {
    pub id: String,
    pub position: Position,
}

/// A healing potion lying on the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Potion {
    pub id: String,
    pub position: Position,
    /// Share of max hp restored, in percent
    pub heal_percent: u32,
}

/// Non-hostile characters that can show up once per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpcKind {
    MerchantWounded,
    Prisoner,
    Alchemist,
    Idol,
    Knight,
    Child,
    Voice,
    Guard,
    /// Rare; only from level 30 on
    Cartographer,
}

impl NpcKind {
    /// Roster available on every level.
    pub const COMMON: [NpcKind; 8] = [
        NpcKind::MerchantWounded,
        NpcKind::Prisoner,
        NpcKind::Alchemist,
        NpcKind::Idol,
        NpcKind::Knight,
        NpcKind::Child,
        NpcKind::Voice,
        NpcKind::Guard,
    ];

    /// Uniform pick from the roster unlocked at this depth.
    pub fn choose(rare_unlocked: bool, rng: &mut StdRng) -> NpcKind {
        let mut roster = Self::COMMON.to_vec();
        if rare_unlocked {
            roster.push(NpcKind::Cartographer);
        }
        *roster.choose(rng).unwrap_or(&NpcKind::Prisoner)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    pub id: String,
    pub position: Position,
    pub kind: NpcKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapKind {
    Spike,
    Poison,
    Alarm,
    Explosive,
}

impl TrapKind {
    pub const ALL: [TrapKind; 4] = [
        TrapKind::Spike,
        TrapKind::Poison,
        TrapKind::Alarm,
        TrapKind::Explosive,
    ];

    pub fn choose(rng: &mut StdRng) -> TrapKind {
        *Self::ALL.choose(rng).unwrap_or(&TrapKind::Spike)
    }
}

/// A floor hazard. Both flags start false and are flipped by the caller during play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trap {
    pub id: String,
    pub position: Position,
    pub kind: TrapKind,
    pub triggered: bool,
    pub revealed: bool,
}

impl Trap {
    pub fn new(id: String, position: Position, kind: TrapKind) -> Self {
        Self {
            id,
            position,
            kind,
            triggered: false,
            revealed: false,
        }
    }
}
