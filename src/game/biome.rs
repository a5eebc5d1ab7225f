//! # Biomes
//!
//! Level themes. A biome picks the enemy pool and decides whether a deep level
//! gets extra traps; rendering is left to the caller.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Named visual and difficulty flavour of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Cave,
    Forest,
    Snow,
    Desert,
    Ruins,
    Catacombs,
    Ossuary,
    Mechanical,
    Corrupted,
    Inferno,
    Astral,
    Matrix,
    Void,
    Furnace,
    Swamp,
    Temple,
    Chaos,
    Hive,
}

/// Level past which extreme biomes become likely.
const EXTREME_BIOME_LEVEL: u32 = 80;

/// Chance of drawing from the extreme subset once past [`EXTREME_BIOME_LEVEL`].
const EXTREME_BIOME_CHANCE: f64 = 0.6;

impl Biome {
    /// Every biome, in draw order.
    pub const ALL: [Biome; 18] = [
        Biome::Cave,
        Biome::Forest,
        Biome::Snow,
        Biome::Desert,
        Biome::Ruins,
        Biome::Catacombs,
        Biome::Ossuary,
        Biome::Mechanical,
        Biome::Corrupted,
        Biome::Inferno,
        Biome::Astral,
        Biome::Matrix,
        Biome::Void,
        Biome::Furnace,
        Biome::Swamp,
        Biome::Temple,
        Biome::Chaos,
        Biome::Hive,
    ];

    /// The small, more dangerous subset favoured on very deep levels.
    pub const EXTREME: [Biome; 6] = [
        Biome::Void,
        Biome::Inferno,
        Biome::Matrix,
        Biome::Astral,
        Biome::Chaos,
        Biome::Furnace,
    ];

    /// Picks the biome for a level.
    ///
    /// Uniform over all biomes, except past level 80 where the extreme subset
    /// wins 60% of the time.
    pub fn choose(level: u32, rng: &mut StdRng) -> Biome {
        let pool: &[Biome] =
            if level > EXTREME_BIOME_LEVEL && rng.gen_bool(EXTREME_BIOME_CHANCE) {
                &Self::EXTREME
            } else {
                &Self::ALL
            };
        *pool.choose(rng).unwrap_or(&Biome::Cave)
    }

    /// Hazardous biomes add five traps on trap-bearing levels.
    pub fn is_hazardous(self) -> bool {
        matches!(
            self,
            Biome::Inferno
                | Biome::Void
                | Biome::Matrix
                | Biome::Corrupted
                | Biome::Mechanical
                | Biome::Furnace
                | Biome::Chaos
                | Biome::Hive
        )
    }

    /// Whether this biome belongs to the extreme subset.
    pub fn is_extreme(self) -> bool {
        Self::EXTREME.contains(&self)
    }

    /// Enemy type tags that can spawn in this biome.
    pub fn enemy_pool(self) -> &'static [&'static str] {
        match self {
            Biome::Cave => &["bat", "rat", "slime", "goblin"],
            Biome::Forest => &["wolf", "spider", "bandit", "treant"],
            Biome::Snow => &["ice_wolf", "yeti", "frost_wraith"],
            Biome::Desert => &["scorpion", "mummy", "sand_worm"],
            Biome::Ruins => &["skeleton", "golem", "bandit"],
            Biome::Catacombs => &["skeleton", "ghoul", "zombie"],
            Biome::Ossuary => &["bone_knight", "lich", "ghoul"],
            Biome::Mechanical => &["automaton", "turret", "clockwork_spider"],
            Biome::Corrupted => &["abomination", "cultist", "tainted_beast"],
            Biome::Inferno => &["imp", "hellhound", "demon"],
            Biome::Astral => &["star_spawn", "void_angel", "comet_wisp"],
            Biome::Matrix => &["glitch", "virus", "sentinel"],
            Biome::Void => &["shade", "void_horror", "null_walker"],
            Biome::Furnace => &["magma_golem", "fire_elemental", "salamander"],
            Biome::Swamp => &["bog_lurker", "leech", "witch"],
            Biome::Temple => &["guardian", "fanatic", "idol_construct"],
            Biome::Chaos => &["chaos_spawn", "warp_beast", "shifter"],
            Biome::Hive => &["drone", "brood_mother", "larva"],
        }
    }

    /// Lowercase name used in logs and text output.
    pub fn name(self) -> &'static str {
        match self {
            Biome::Cave => "cave",
            Biome::Forest => "forest",
            Biome::Snow => "snow",
            Biome::Desert => "desert",
            Biome::Ruins => "ruins",
            Biome::Catacombs => "catacombs",
            Biome::Ossuary => "ossuary",
            Biome::Mechanical => "mechanical",
            Biome::Corrupted => "corrupted",
            Biome::Inferno => "inferno",
            Biome::Astral => "astral",
            Biome::Matrix => "matrix",
            Biome::Void => "void",
            Biome::Furnace => "furnace",
            Biome::Swamp => "swamp",
            Biome::Temple => "temple",
            Biome::Chaos => "chaos",
            Biome::Hive => "hive",
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
