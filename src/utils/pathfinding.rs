//! # Pathfinding Algorithms
//!
//! Breadth-first search on the 4-connected walkable grid.
//!
//! Validation during generation and runtime queries (click-to-move, guidance
//! overlays) go through the same search so they can never disagree about which
//! cells connect.

use crate::game::{Enemy, Grid, Position};
use ::pathfinding::prelude::bfs;

/// Runs the shared search. The returned route starts with `start` itself.
///
/// Edges join orthogonally adjacent in-bounds cells that are not walls;
/// neighbours are expanded down, up, right, left. The search keeps its own
/// visited set, so it terminates even when `start` is sealed in.
fn breadth_first_search(start: Position, end: Position, grid: &Grid) -> Option<Vec<Position>> {
    bfs(
        &start,
        |&pos| {
            pos.cardinal_adjacent_positions()
                .into_iter()
                .filter(|&next| grid.is_walkable(next))
        },
        |&pos| pos == end,
    )
}

/// Finds a shortest path from `start` to `end`.
///
/// The result lists the steps after `start`, ending with `end`; it is empty when
/// the two coincide. Returns `None` when `end` cannot be reached.
///
/// Enemies are accepted for future use but never block a tile: occupied cells
/// stay traversable.
///
/// # Examples
///
/// ```
/// use gridcrawl::{find_path, Grid, Position};
///
/// let grid = Grid::from_rows(&["#####", "#...#", "#####"]);
/// let path = find_path(Position::new(1, 1), Position::new(3, 1), &grid, &[]).unwrap();
/// assert_eq!(path, vec![Position::new(2, 1), Position::new(3, 1)]);
/// ```
pub fn find_path(
    start: Position,
    end: Position,
    grid: &Grid,
    _enemies: &[Enemy],
) -> Option<Vec<Position>> {
    breadth_first_search(start, end, grid).map(|mut route| {
        route.remove(0);
        route
    })
}

/// Whether `end` is reachable from `start`, using the same rules as [`find_path`].
pub fn path_exists(start: Position, end: Position, grid: &Grid) -> bool {
    breadth_first_search(start, end, grid).is_some()
}
