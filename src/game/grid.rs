//! # Level Grid
//!
//! The fixed-size wall/floor grid and the usable rectangle that grows with depth.

use crate::config;
use crate::game::Position;
use serde::{Deserialize, Serialize};

/// Contents of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Wall,
    Floor,
}

impl TileType {
    /// Whether the tile can be walked on.
    pub fn is_passable(self) -> bool {
        matches!(self, TileType::Floor)
    }
}

/// Usable sub-rectangle of the grid, anchored at the origin.
///
/// Layout strategies only ever write inside these bounds; every cell outside
/// stays a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Usable rectangle for a level, capped two tiles short of the grid size.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::Bounds;
    ///
    /// let bounds = Bounds::for_level(10, 80, 50);
    /// assert_eq!(bounds, Bounds::new(48, 30));
    ///
    /// let deep = Bounds::for_level(100, 80, 50);
    /// assert_eq!(deep, Bounds::new(78, 48));
    /// ```
    pub fn for_level(level: u32, map_width: u32, map_height: u32) -> Self {
        let width_growth = level.saturating_mul(4) / 5;
        let height_growth = level / 2;
        let width = map_width
            .saturating_sub(2)
            .min(config::BASE_USABLE_WIDTH.saturating_add(width_growth));
        let height = map_height
            .saturating_sub(2)
            .min(config::BASE_USABLE_HEIGHT.saturating_add(height_growth));
        Self::new(width as i32, height as i32)
    }

    /// Area of the usable rectangle in tiles.
    pub fn area(&self) -> u32 {
        (self.width.max(0) * self.height.max(0)) as u32
    }

    /// Center cell of the usable rectangle.
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Checks if a position lies inside the usable rectangle.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }
}

/// Fixed-size 2D wall/floor grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: u32,
    pub height: u32,
    tiles: Vec<TileType>,
}

impl Grid {
    /// Creates a grid filled with walls.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcrawl::{Grid, Position, TileType};
    ///
    /// let grid = Grid::new(10, 8);
    /// assert_eq!(grid.get_tile(Position::new(3, 3)), TileType::Wall);
    /// assert_eq!(grid.floor_count(), 0);
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileType::Wall; (width * height) as usize],
        }
    }

    /// Builds a grid from text rows where `#` is a wall and anything else is floor.
    ///
    /// Rows shorter than the longest row are padded with walls. Handy for tests
    /// and for callers that keep hand-made layouts.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0) as u32;
        let mut grid = Self::new(width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch != '#' {
                    grid.set_tile(Position::new(x as i32, y as i32), TileType::Floor);
                }
            }
        }
        grid
    }

    /// Checks if a position is within the grid.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.is_valid_position(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// Gets the tile at a position. Anything off the grid reads as a wall.
    pub fn get_tile(&self, pos: Position) -> TileType {
        self.index(pos)
            .map(|idx| self.tiles[idx])
            .unwrap_or(TileType::Wall)
    }

    /// Sets the tile at a position. Writes off the grid are ignored.
    pub fn set_tile(&mut self, pos: Position, tile: TileType) {
        if let Some(idx) = self.index(pos) {
            self.tiles[idx] = tile;
        }
    }

    /// Whether a position is on the grid and not a wall.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get_tile(pos).is_passable()
    }

    /// Number of cells on the grid.
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    /// Number of floor cells.
    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_passable()).count()
    }

    /// All floor positions in row-major order.
    pub fn floor_positions(&self) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.is_walkable(pos))
            .collect()
    }

    /// Every position on the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_grow_with_level() {
        assert_eq!(Bounds::for_level(1, 80, 50), Bounds::new(40, 25));
        assert_eq!(Bounds::for_level(5, 80, 50), Bounds::new(44, 27));
        assert_eq!(Bounds::for_level(45, 80, 50), Bounds::new(76, 47));
        // Both dimensions cap two tiles short of the grid
        assert_eq!(Bounds::for_level(99, 80, 50), Bounds::new(78, 48));
    }

    #[test]
    fn test_bounds_geometry() {
        let bounds = Bounds::new(40, 25);
        assert_eq!(bounds.area(), 1000);
        assert_eq!(bounds.center(), Position::new(20, 12));
        assert!(bounds.contains(Position::new(0, 0)));
        assert!(bounds.contains(Position::new(39, 24)));
        assert!(!bounds.contains(Position::new(40, 24)));
        assert!(!bounds.contains(Position::new(-1, 3)));
    }

    #[test]
    fn test_out_of_bounds_reads_as_wall() {
        let mut grid = Grid::new(4, 4);
        grid.set_tile(Position::new(9, 9), TileType::Floor);
        assert_eq!(grid.floor_count(), 0);
        assert_eq!(grid.get_tile(Position::new(-1, 0)), TileType::Wall);
        assert!(!grid.is_walkable(Position::new(4, 0)));
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(&["###", "#.#", "#"]);
        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 3);
        assert_eq!(grid.floor_positions(), vec![Position::new(1, 1)]);
        assert_eq!(grid.get_tile(Position::new(2, 2)), TileType::Wall);
    }
}
