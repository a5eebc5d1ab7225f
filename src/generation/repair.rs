//! # Connectivity Repair
//!
//! Turns a raw layout into a single connected floor region. Everything placed
//! later relies on this: after repair every floor cell reaches every other.

use crate::game::{Bounds, Grid, Position, TileType};
use crate::utils::largest_floor_region;
use log::trace;
use std::collections::HashSet;

/// Settings for one repair pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairSettings {
    /// Main regions smaller than this get the fallback carve
    pub min_region_size: usize,
    /// Half-size of the square block carved on the usable center
    pub carve_radius: i32,
}

/// Keeps only the largest floor region and returns it.
///
/// When that region is smaller than `min_region_size`, a square block centered on
/// the usable rectangle is carved first and the region is recomputed, so the block
/// and whatever floor it touches become the main region. Every floor cell outside
/// the main region is turned back into wall.
///
/// Running this on an already repaired grid changes nothing.
pub fn repair_connectivity(
    grid: &mut Grid,
    bounds: Bounds,
    settings: RepairSettings,
) -> Vec<Position> {
    let mut main_region = largest_floor_region(grid);

    if main_region.len() < settings.min_region_size {
        let side = settings.carve_radius * 2 + 1;
        trace!(
            "main region has {} cells, carving {side}x{side} block at {}",
            main_region.len(),
            bounds.center()
        );
        carve_block(grid, bounds.center(), settings.carve_radius);
        main_region = largest_floor_region(grid);
    }

    let keep: HashSet<Position> = main_region.iter().copied().collect();
    for pos in grid.floor_positions() {
        if !keep.contains(&pos) {
            grid.set_tile(pos, TileType::Wall);
        }
    }

    main_region
}

fn carve_block(grid: &mut Grid, center: Position, radius: i32) {
    for y in center.y - radius..=center.y + radius {
        for x in center.x - radius..=center.x + radius {
            grid.set_tile(Position::new(x, y), TileType::Floor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::LayoutStrategy;
    use crate::utils::floor_region_count;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SETTINGS: RepairSettings = RepairSettings {
        min_region_size: 20,
        carve_radius: 3,
    };

    #[test]
    fn test_disconnected_pockets_are_demoted() {
        let mut grid = Grid::from_rows(&[
            "############",
            "#.....##.###",
            "#.....##.###",
            "#.....####.#",
            "#.....######",
            "############",
        ]);
        let region = repair_connectivity(&mut grid, Bounds::new(12, 6), RepairSettings {
            min_region_size: 5,
            carve_radius: 1,
        });

        assert_eq!(region.len(), 20);
        assert_eq!(grid.floor_count(), 20);
        assert_eq!(floor_region_count(&grid), 1);
        assert!(!grid.is_walkable(Position::new(8, 1)));
        assert!(!grid.is_walkable(Position::new(10, 3)));
    }

    #[test]
    fn test_sparse_grid_gets_center_block() {
        let mut grid = Grid::new(40, 30);
        // A lone pocket far from the center
        grid.set_tile(Position::new(2, 2), TileType::Floor);
        grid.set_tile(Position::new(3, 2), TileType::Floor);

        let bounds = Bounds::new(38, 28);
        let region = repair_connectivity(&mut grid, bounds, SETTINGS);

        assert_eq!(region.len(), 49);
        assert_eq!(grid.floor_count(), 49);
        assert!(grid.is_walkable(bounds.center()));
        assert!(!grid.is_walkable(Position::new(2, 2)));
    }

    #[test]
    fn test_carve_absorbs_touching_floor() {
        let mut grid = Grid::new(40, 30);
        let bounds = Bounds::new(38, 28);
        let center = bounds.center();
        // Short spur sticking out of where the block will land
        for x in center.x + 4..center.x + 7 {
            grid.set_tile(Position::new(x, center.y), TileType::Floor);
        }

        let region = repair_connectivity(&mut grid, bounds, SETTINGS);
        assert_eq!(region.len(), 52);
        assert_eq!(floor_region_count(&grid), 1);
    }

    #[test]
    fn test_empty_grid_gets_block() {
        let mut grid = Grid::new(40, 30);
        let region = repair_connectivity(&mut grid, Bounds::new(40, 25), SETTINGS);
        assert_eq!(region.len(), 49);
    }

    #[test]
    fn test_repair_is_idempotent() {
        for (seed, strategy) in LayoutStrategy::ALL.into_iter().enumerate() {
            let bounds = Bounds::for_level(20, 80, 50);
            let mut grid = Grid::new(80, 50);
            let mut rng = StdRng::seed_from_u64(seed as u64);
            strategy.synthesize(&mut grid, bounds, 20, &mut rng);

            let first_region = repair_connectivity(&mut grid, bounds, SETTINGS);
            let repaired = grid.clone();
            let second_region = repair_connectivity(&mut grid, bounds, SETTINGS);

            assert_eq!(grid, repaired, "{strategy} changed on second repair");
            assert_eq!(first_region.len(), second_region.len());
            assert_eq!(floor_region_count(&grid), 1);
        }
    }
}
