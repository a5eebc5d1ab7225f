//! # Layout Synthesis
//!
//! Raw wall/floor layouts. Each strategy writes floor into the usable rectangle of
//! an all-wall grid; none of them promise connectivity, which is the repairer's job.

use crate::game::{Bounds, Grid, Position, TileType};
use crate::generation::Room;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maze wall density on shallow levels.
const MAZE_DENSITY: f64 = 0.25;
/// Maze wall density past [`MAZE_DENSE_LEVEL`].
const MAZE_DENSITY_DEEP: f64 = 0.35;
const MAZE_DENSE_LEVEL: u32 = 20;

/// Room side lengths are drawn from `ROOM_MIN_SIZE..ROOM_MAX_SIZE`.
const ROOM_MIN_SIZE: i32 = 4;
const ROOM_MAX_SIZE: i32 = 10;
/// Placement retries spent looking for a spot that overlaps no earlier room.
const ROOM_PLACEMENT_TRIES: u32 = 8;

/// Row spacing of the corridors layout's horizontal lanes.
const CORRIDOR_ROW_STEP: usize = 4;
/// Column spacing of the corridors layout's vertical lanes.
const CORRIDOR_COLUMN_STEP: usize = 8;

const SYMMETRIC_FLOOR_CHANCE: f64 = 0.6;
const CHAOTIC_FLOOR_CHANCE: f64 = 0.55;

/// The six layout strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutStrategy {
    /// Everything inside a two-tile margin is floor
    Open,
    /// Odd/odd pillars plus randomly opened walls
    Maze,
    /// Rectangular rooms joined by L-shaped corridors
    Rooms,
    /// A lattice of fixed lanes plus random punches
    Corridors,
    /// Random left half mirrored onto the right, with a center lane
    Symmetric,
    /// Independent coin flips per cell
    Chaotic,
}

impl LayoutStrategy {
    pub const ALL: [LayoutStrategy; 6] = [
        LayoutStrategy::Open,
        LayoutStrategy::Maze,
        LayoutStrategy::Rooms,
        LayoutStrategy::Corridors,
        LayoutStrategy::Symmetric,
        LayoutStrategy::Chaotic,
    ];

    /// Picks a strategy uniformly at random.
    pub fn choose(rng: &mut StdRng) -> LayoutStrategy {
        *Self::ALL.choose(rng).unwrap_or(&LayoutStrategy::Open)
    }

    pub fn name(self) -> &'static str {
        match self {
            LayoutStrategy::Open => "open",
            LayoutStrategy::Maze => "maze",
            LayoutStrategy::Rooms => "rooms",
            LayoutStrategy::Corridors => "corridors",
            LayoutStrategy::Symmetric => "symmetric",
            LayoutStrategy::Chaotic => "chaotic",
        }
    }

    /// Writes this strategy's floor into `grid`, touching only cells inside `bounds`.
    pub fn synthesize(self, grid: &mut Grid, bounds: Bounds, level: u32, rng: &mut StdRng) {
        match self {
            LayoutStrategy::Open => synthesize_open(grid, bounds),
            LayoutStrategy::Maze => synthesize_maze(grid, bounds, level, rng),
            LayoutStrategy::Rooms => {
                synthesize_rooms(grid, bounds, level, rng);
            }
            LayoutStrategy::Corridors => synthesize_corridors(grid, bounds, level, rng),
            LayoutStrategy::Symmetric => synthesize_symmetric(grid, bounds, rng),
            LayoutStrategy::Chaotic => synthesize_chaotic(grid, bounds, rng),
        }
    }
}

impl std::fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn set_floor(grid: &mut Grid, x: i32, y: i32) {
    grid.set_tile(Position::new(x, y), TileType::Floor);
}

fn synthesize_open(grid: &mut Grid, bounds: Bounds) {
    for y in 2..bounds.height - 2 {
        for x in 2..bounds.width - 2 {
            set_floor(grid, x, y);
        }
    }
}

fn synthesize_maze(grid: &mut Grid, bounds: Bounds, level: u32, rng: &mut StdRng) {
    let density = if level > MAZE_DENSE_LEVEL {
        MAZE_DENSITY_DEEP
    } else {
        MAZE_DENSITY
    };

    for y in 1..bounds.height - 1 {
        for x in 1..bounds.width - 1 {
            if (x % 2 == 1 && y % 2 == 1) || rng.gen_bool(1.0 - density) {
                set_floor(grid, x, y);
            }
        }
    }
}

/// Places and carves the rooms layout, returning the rooms in carve order.
fn synthesize_rooms(grid: &mut Grid, bounds: Bounds, level: u32, rng: &mut StdRng) -> Vec<Room> {
    let room_count = (bounds.area() / 100 + level / 5).max(1);
    let mut rooms: Vec<Room> = Vec::new();

    for _ in 0..room_count {
        let width = rng.gen_range(ROOM_MIN_SIZE..ROOM_MAX_SIZE);
        let height = rng.gen_range(ROOM_MIN_SIZE..ROOM_MAX_SIZE);
        let max_x = bounds.width - width - 2;
        let max_y = bounds.height - height - 2;
        if max_x <= 1 || max_y <= 1 {
            continue;
        }

        let mut candidate = random_room(width, height, max_x, max_y, rng);
        for _ in 1..ROOM_PLACEMENT_TRIES {
            if !rooms.iter().any(|room| room.overlaps(&candidate)) {
                break;
            }
            candidate = random_room(width, height, max_x, max_y, rng);
        }

        for pos in candidate.positions() {
            grid.set_tile(pos, TileType::Floor);
        }
        rooms.push(candidate);
    }

    for pair in rooms.windows(2) {
        let horizontal_first = rng.gen_bool(0.5);
        carve_l_corridor(grid, pair[0].center(), pair[1].center(), horizontal_first);
    }

    rooms
}

fn random_room(width: i32, height: i32, max_x: i32, max_y: i32, rng: &mut StdRng) -> Room {
    let x = rng.gen_range(1..=max_x);
    let y = rng.gen_range(1..=max_y);
    Room::new(Position::new(x, y), width, height)
}

/// Carves an orthogonal two-segment corridor between two points, inclusive.
fn carve_l_corridor(grid: &mut Grid, start: Position, end: Position, horizontal_first: bool) {
    let corner = if horizontal_first {
        Position::new(end.x, start.y)
    } else {
        Position::new(start.x, end.y)
    };

    for (from, to) in [(start, corner), (corner, end)] {
        for y in from.y.min(to.y)..=from.y.max(to.y) {
            for x in from.x.min(to.x)..=from.x.max(to.x) {
                set_floor(grid, x, y);
            }
        }
    }
}

fn synthesize_corridors(grid: &mut Grid, bounds: Bounds, level: u32, rng: &mut StdRng) {
    for y in (3..bounds.height - 3).step_by(CORRIDOR_ROW_STEP) {
        for x in 2..bounds.width - 2 {
            set_floor(grid, x, y);
        }
    }
    for x in (3..bounds.width - 3).step_by(CORRIDOR_COLUMN_STEP) {
        for y in 1..bounds.height - 1 {
            set_floor(grid, x, y);
        }
    }

    if bounds.width - 2 > 2 && bounds.height - 2 > 2 {
        for _ in 0..level {
            let x = rng.gen_range(2..bounds.width - 2);
            let y = rng.gen_range(2..bounds.height - 2);
            set_floor(grid, x, y);
        }
    }
}

fn synthesize_symmetric(grid: &mut Grid, bounds: Bounds, rng: &mut StdRng) {
    let half = bounds.width / 2;
    for y in 2..bounds.height - 2 {
        for x in 2..half {
            if rng.gen_bool(SYMMETRIC_FLOOR_CHANCE) {
                set_floor(grid, x, y);
                set_floor(grid, bounds.width - x - 1, y);
            }
        }
    }

    let lane = bounds.height / 2;
    for x in 2..bounds.width - 2 {
        set_floor(grid, x, lane);
    }
}

fn synthesize_chaotic(grid: &mut Grid, bounds: Bounds, rng: &mut StdRng) {
    for y in 2..bounds.height - 2 {
        for x in 2..bounds.width - 2 {
            if rng.gen_bool(CHAOTIC_FLOOR_CHANCE) {
                set_floor(grid, x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::path_exists;
    use rand::SeedableRng;

    fn synthesize(strategy: LayoutStrategy, level: u32, seed: u64) -> (Grid, Bounds) {
        let bounds = Bounds::for_level(level, 80, 50);
        let mut grid = Grid::new(80, 50);
        let mut rng = StdRng::seed_from_u64(seed);
        strategy.synthesize(&mut grid, bounds, level, &mut rng);
        (grid, bounds)
    }

    #[test]
    fn test_strategies_stay_inside_usable_rectangle() {
        for strategy in LayoutStrategy::ALL {
            for level in [1, 15, 40, 100] {
                let (grid, bounds) = synthesize(strategy, level, 3);
                for pos in grid.floor_positions() {
                    assert!(
                        pos.x >= 1
                            && pos.y >= 1
                            && pos.x < bounds.width - 1
                            && pos.y < bounds.height - 1,
                        "{strategy} wrote floor at {pos} outside {bounds:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_open_fills_interior() {
        let (grid, bounds) = synthesize(LayoutStrategy::Open, 1, 0);
        assert_eq!(
            grid.floor_count(),
            ((bounds.width - 4) * (bounds.height - 4)) as usize
        );
        assert_eq!(grid.get_tile(Position::new(1, 1)), TileType::Wall);
        assert_eq!(grid.get_tile(Position::new(2, 2)), TileType::Floor);
    }

    #[test]
    fn test_maze_keeps_pillars() {
        let (grid, bounds) = synthesize(LayoutStrategy::Maze, 25, 9);
        for y in (1..bounds.height - 1).step_by(2) {
            for x in (1..bounds.width - 1).step_by(2) {
                assert!(grid.is_walkable(Position::new(x, y)));
            }
        }
        // Roughly 65% of the rest opened at density 0.35
        let interior = ((bounds.width - 2) * (bounds.height - 2)) as usize;
        assert!(grid.floor_count() > interior / 2);
    }

    #[test]
    fn test_corridor_lanes() {
        let (grid, bounds) = synthesize(LayoutStrategy::Corridors, 0, 1);
        for x in 2..bounds.width - 2 {
            assert!(grid.is_walkable(Position::new(x, 3)));
            assert!(grid.is_walkable(Position::new(x, 7)));
        }
        for y in 1..bounds.height - 1 {
            assert!(grid.is_walkable(Position::new(3, y)));
            assert!(grid.is_walkable(Position::new(11, y)));
        }
        assert!(!grid.is_walkable(Position::new(4, 4)));
    }

    #[test]
    fn test_symmetric_mirrors_left_half() {
        let (grid, bounds) = synthesize(LayoutStrategy::Symmetric, 7, 21);
        for y in 2..bounds.height - 2 {
            for x in 2..bounds.width / 2 {
                let left = grid.get_tile(Position::new(x, y));
                let right = grid.get_tile(Position::new(bounds.width - x - 1, y));
                assert_eq!(left, right, "row {y} column {x}");
            }
        }
        let lane = bounds.height / 2;
        assert!(path_exists(
            Position::new(2, lane),
            Position::new(bounds.width - 3, lane),
            &grid
        ));
    }

    #[test]
    fn test_chaotic_density() {
        let (grid, bounds) = synthesize(LayoutStrategy::Chaotic, 1, 5);
        let interior = ((bounds.width - 4) * (bounds.height - 4)) as f64;
        let ratio = grid.floor_count() as f64 / interior;
        assert!((0.45..0.65).contains(&ratio), "floor ratio {ratio}");
    }

    #[test]
    fn test_rooms_are_chained_by_corridors() {
        let bounds = Bounds::for_level(12, 80, 50);
        let mut grid = Grid::new(80, 50);
        let mut rng = StdRng::seed_from_u64(77);
        let rooms = synthesize_rooms(&mut grid, bounds, 12, &mut rng);

        assert!(!rooms.is_empty());
        for pair in rooms.windows(2) {
            assert!(path_exists(pair[0].center(), pair[1].center(), &grid));
        }
        for room in &rooms {
            assert!(room.top_left.x >= 1 && room.top_left.x + room.width <= bounds.width - 2);
        }
    }

    #[test]
    fn test_l_corridor_carving() {
        let mut grid = Grid::new(20, 20);
        let start = Position::new(5, 5);
        let end = Position::new(15, 15);

        carve_l_corridor(&mut grid, start, end, true);
        assert!(grid.is_walkable(Position::new(15, 5)));
        assert!(!grid.is_walkable(Position::new(5, 15)));
        assert_eq!(grid.floor_count(), 21);
        assert!(path_exists(start, end, &grid));
    }
}
