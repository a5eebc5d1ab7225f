//! # Guidance Overlays
//!
//! Path queries the surrounding game runs between turns: the compass (nearest
//! enemy), the map (route to the stairs), the key reveal and click-to-move queues.
//! An unreachable target never errors; the overlay is simply empty.

use crate::game::{Direction, Enemy, Grid, LevelDescriptor, Position};
use crate::utils::find_path;
use serde::{Deserialize, Serialize};

/// Overlay paths shown on the map for the current turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guides {
    /// Path to the closest reachable enemy, if the player holds a compass
    pub compass: Vec<Position>,
    /// Path to the stairs, if the player holds a map
    pub map: Vec<Position>,
}

impl Guides {
    /// Recomputes both overlays from `from`.
    pub fn compute(
        level: &LevelDescriptor,
        from: Position,
        has_compass: bool,
        has_map: bool,
    ) -> Self {
        let compass = if has_compass {
            nearest_enemy_path(from, &level.grid, &level.enemies).unwrap_or_default()
        } else {
            Vec::new()
        };
        let map = if has_map {
            stairs_path(from, level).unwrap_or_default()
        } else {
            Vec::new()
        };
        Self { compass, map }
    }
}

/// Shortest path to whichever enemy takes the fewest steps to reach.
///
/// The earliest enemy in the list wins ties. Returns `None` when the list is empty
/// or no enemy is reachable.
pub fn nearest_enemy_path(from: Position, grid: &Grid, enemies: &[Enemy]) -> Option<Vec<Position>> {
    enemies
        .iter()
        .filter_map(|enemy| find_path(from, enemy.position, grid, enemies))
        .fold(None, |best: Option<Vec<Position>>, path| match best {
            Some(current) if current.len() <= path.len() => Some(current),
            _ => Some(path),
        })
}

/// Route to the level exit.
pub fn stairs_path(from: Position, level: &LevelDescriptor) -> Option<Vec<Position>> {
    find_path(from, level.stairs, &level.grid, &level.enemies)
}

/// Route to the key, revealed by some altar blessings.
pub fn key_path(from: Position, level: &LevelDescriptor) -> Option<Vec<Position>> {
    find_path(from, level.key, &level.grid, &level.enemies)
}

/// Steps to queue after the player clicks `target`.
///
/// Empty when the target is unreachable or is the player's own tile, in which
/// case the caller should drop any queued movement.
pub fn move_queue(
    start: Position,
    target: Position,
    grid: &Grid,
    enemies: &[Enemy],
) -> Vec<Position> {
    find_path(start, target, grid, enemies).unwrap_or_default()
}

/// Converts a step list from [`find_path`] into cardinal moves.
///
/// Stops at the first pair of positions that are not orthogonal neighbours.
pub fn path_directions(start: Position, path: &[Position]) -> Vec<Direction> {
    let mut prev = start;
    path.iter()
        .map_while(|&step| {
            let direction = Direction::from_delta(step - prev);
            prev = step;
            direction
        })
        .collect()
}
