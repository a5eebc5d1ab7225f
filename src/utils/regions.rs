//! # Region Detection
//!
//! Flood fill over 4-connected floor cells and largest-region extraction.

use crate::game::{Grid, Position};
use std::collections::VecDeque;

/// Visited set over a grid, shared across repeated flood fills so no cell is
/// explored twice during a whole-grid scan.
#[derive(Debug, Clone)]
pub struct VisitedMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl VisitedMask {
    /// Creates an empty mask sized for `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            cells: vec![false; grid.cell_count()],
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).map(|idx| self.cells[idx]).unwrap_or(false)
    }

    /// Marks a cell. Returns true if it was not marked before.
    pub fn insert(&mut self, pos: Position) -> bool {
        match self.index(pos) {
            Some(idx) if !self.cells[idx] => {
                self.cells[idx] = true;
                true
            }
            _ => false,
        }
    }
}

/// Collects the 4-connected non-wall region containing `origin`.
///
/// Every cell reached is marked in `visited`; cells already marked are treated as
/// explored and skipped. The result includes `origin` and is in breadth-first order.
///
/// # Examples
///
/// ```
/// use gridcrawl::{flood_fill_region, Grid, Position, VisitedMask};
///
/// let grid = Grid::from_rows(&["#####", "#..##", "##..#", "#####"]);
/// let mut visited = VisitedMask::for_grid(&grid);
/// let region = flood_fill_region(Position::new(1, 1), &grid, &mut visited);
/// assert_eq!(region.len(), 4);
/// ```
pub fn flood_fill_region(
    origin: Position,
    grid: &Grid,
    visited: &mut VisitedMask,
) -> Vec<Position> {
    let mut region = vec![origin];
    let mut queue = VecDeque::from([origin]);
    visited.insert(origin);

    while let Some(pos) = queue.pop_front() {
        for next in pos.cardinal_adjacent_positions() {
            if grid.is_walkable(next) && visited.insert(next) {
                region.push(next);
                queue.push_back(next);
            }
        }
    }

    region
}

/// Finds the largest 4-connected floor region of the grid.
///
/// Scans row-major; when two regions tie the one found first wins. Returns an
/// empty list for a grid with no floor.
pub fn largest_floor_region(grid: &Grid) -> Vec<Position> {
    let mut visited = VisitedMask::for_grid(grid);
    let mut largest = Vec::new();

    for pos in grid.positions() {
        if grid.is_walkable(pos) && !visited.contains(pos) {
            let region = flood_fill_region(pos, grid, &mut visited);
            if region.len() > largest.len() {
                largest = region;
            }
        }
    }

    largest
}

/// Counts the separate 4-connected floor regions of the grid.
pub fn floor_region_count(grid: &Grid) -> usize {
    let mut visited = VisitedMask::for_grid(grid);
    let mut count = 0;

    for pos in grid.positions() {
        if grid.is_walkable(pos) && !visited.contains(pos) {
            flood_fill_region(pos, grid, &mut visited);
            count += 1;
        }
    }

    count
}
