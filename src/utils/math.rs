//! # Game Mathematics
//!
//! Distance and scaling helpers used by placement.

use crate::game::Position;

/// Factor applied to a separation threshold each time it cannot be met.
const RELAXATION_FACTOR: f64 = 0.7;

/// Manhattan distance between two grid positions.
///
/// All "minimum separation" and "nearby" checks use this metric.
///
/// # Examples
///
/// ```
/// use gridcrawl::{manhattan_distance, Position};
///
/// assert_eq!(manhattan_distance(Position::new(1, 1), Position::new(4, 5)), 7);
/// ```
pub fn manhattan_distance(a: Position, b: Position) -> u32 {
    a.manhattan_distance(b)
}

/// Next, looser separation threshold: `floor(distance * 0.7)`.
pub fn relax_distance(distance: u32) -> u32 {
    (distance as f64 * RELAXATION_FACTOR).floor() as u32
}

/// `floor(value * multiplier)` clamped at zero, for stat scaling.
pub fn scaled_floor(value: f64, multiplier: f64) -> u32 {
    (value * multiplier).floor().max(0.0) as u32
}
