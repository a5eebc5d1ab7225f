//! # ASCII Preview
//!
//! One character per tile, one line per row: `#` wall, `.` floor, `@` start,
//! `>` stairs, `k` key, `:` path overlay; other entities get their own letters.

use crate::game::{LevelDescriptor, Position, TileType};
use std::collections::HashMap;

/// Draws the level as text.
///
/// `overlay` marks a path (as returned by the pathfinder) on otherwise empty floor.
///
/// # Examples
///
/// ```
/// use gridcrawl::{render_level, generate_dungeon};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let level = generate_dungeon(1, false, &mut StdRng::seed_from_u64(1));
/// let text = render_level(&level, None);
/// assert_eq!(text.lines().count(), level.grid.height as usize);
/// assert_eq!(text.matches('@').count(), 1);
/// ```
pub fn render_level(level: &LevelDescriptor, overlay: Option<&[Position]>) -> String {
    let glyphs = entity_glyphs(level);
    let path: Vec<Position> = overlay.map(<[Position]>::to_vec).unwrap_or_default();

    let width = level.grid.width as usize;
    let mut out = String::with_capacity((width + 1) * level.grid.height as usize);
    for y in 0..level.grid.height as i32 {
        for x in 0..level.grid.width as i32 {
            let pos = Position::new(x, y);
            let glyph = match glyphs.get(&pos) {
                Some(&glyph) => glyph,
                None if path.contains(&pos) => ':',
                None => match level.grid.get_tile(pos) {
                    TileType::Wall => '#',
                    TileType::Floor => '.',
                },
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn entity_glyphs(level: &LevelDescriptor) -> HashMap<Position, char> {
    let mut glyphs = HashMap::new();
    glyphs.extend(level.traps.iter().map(|t| (t.position, '^')));
    glyphs.extend(level.chests.iter().map(|c| (c.position, 'C')));
    glyphs.extend(level.potions.iter().map(|p| (p.position, '!')));
    glyphs.extend(level.altar.map(|pos| (pos, 'A')));
    glyphs.extend(level.merchant.map(|pos| (pos, 'M')));
    glyphs.extend(level.npc.as_ref().map(|n| (n.position, 'N')));
    glyphs.extend(level.special_egg.map(|pos| (pos, '*')));
    glyphs.extend(level.enemies.iter().map(|e| {
        let glyph = if e.is_boss {
            'B'
        } else if e.is_elite {
            'E'
        } else {
            'e'
        };
        (e.position, glyph)
    }));
    glyphs.insert(level.key, 'k');
    glyphs.insert(level.stairs, '>');
    glyphs.insert(level.player_start, '@');
    glyphs
}
