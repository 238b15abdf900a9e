//! Tile colors, the first-player marker, and the wall layout.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Col, Row, BOARD_SIZE, TILE_COLORS};

/// Tile colors (order fixed; the discriminant is `rank - 1`)
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Blue = 0,
    Yellow = 1,
    Red = 2,
    Black = 3,
    Teal = 4, // "light blue"
}

impl Color {
    /// Convert from u8 index to Color
    pub fn from_index(idx: u8) -> Option<Color> {
        match idx {
            0 => Some(Color::Blue),
            1 => Some(Color::Yellow),
            2 => Some(Color::Red),
            3 => Some(Color::Black),
            4 => Some(Color::Teal),
            _ => None,
        }
    }

    /// Position in [`ALL_COLORS`], for per-color count arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Fixed rank 1..=5. Only used to derive the wall column.
    pub const fn rank(self) -> usize {
        self as usize + 1
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Red => "red",
            Color::Black => "black",
            Color::Teal => "teal",
        };
        f.write_str(name)
    }
}

pub const ALL_COLORS: [Color; TILE_COLORS] = [
    Color::Blue,
    Color::Yellow,
    Color::Red,
    Color::Black,
    Color::Teal,
];

/// Anything that can sit in the center pool or on a floor line.
///
/// The first-player marker is its own variant rather than a sixth color, so
/// it can never be handed to a pattern line, the wall, or the discard pile.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Token {
    Tile(Color),
    Marker,
}

impl Token {
    /// The tile's color, or `None` for the marker.
    pub const fn color(self) -> Option<Color> {
        match self {
            Token::Tile(color) => Some(color),
            Token::Marker => None,
        }
    }

    pub const fn is_marker(self) -> bool {
        matches!(self, Token::Marker)
    }
}

impl From<Color> for Token {
    fn from(color: Color) -> Self {
        Token::Tile(color)
    }
}

// =============================================================================
// Wall layout (colored side)
// =============================================================================

/// Wall: 5x5 grid, each cell either empty (None) or occupied by a color
pub type Wall = [[Option<Color>; BOARD_SIZE]; BOARD_SIZE];

/// Column that `color` occupies in `row`: `(rank + row - 1) mod 5`.
pub const fn wall_column(row: Row, color: Color) -> Col {
    (color.rank() + row - 1) % BOARD_SIZE
}

/// Color that belongs at `(row, col)`. Inverse of [`wall_column`].
pub const fn wall_color(row: Row, col: Col) -> Color {
    match (col + BOARD_SIZE - row % BOARD_SIZE) % BOARD_SIZE {
        0 => Color::Blue,
        1 => Color::Yellow,
        2 => Color::Red,
        3 => Color::Black,
        _ => Color::Teal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_is_one_based() {
        assert_eq!(Color::Blue.rank(), 1);
        assert_eq!(Color::Teal.rank(), 5);
        for color in ALL_COLORS {
            assert_eq!(Color::from_index(color as u8), Some(color));
        }
        assert_eq!(Color::from_index(5), None);
    }

    #[test]
    fn test_wall_column_rotates_each_row() {
        // Row 0 is the identity layout; each row below shifts one to the right
        assert_eq!(wall_column(0, Color::Blue), 0);
        assert_eq!(wall_column(0, Color::Teal), 4);
        assert_eq!(wall_column(1, Color::Blue), 1);
        assert_eq!(wall_column(1, Color::Teal), 0);
        assert_eq!(wall_column(4, Color::Yellow), 0);
        assert_eq!(wall_column(4, Color::Blue), 4);
    }

    #[test]
    fn test_wall_layout_is_latin_square() {
        for row in 0..BOARD_SIZE {
            let mut seen = [false; BOARD_SIZE];
            for color in ALL_COLORS {
                let col = wall_column(row, color);
                assert!(!seen[col], "two colors share ({row},{col})");
                seen[col] = true;
                assert_eq!(wall_color(row, col), color);
            }
        }
        for col in 0..BOARD_SIZE {
            let mut seen = [false; TILE_COLORS];
            for row in 0..BOARD_SIZE {
                let color = wall_color(row, col);
                assert!(!seen[color.index()], "column {col} repeats {color}");
                seen[color.index()] = true;
            }
        }
    }

    #[test]
    fn test_marker_has_no_color() {
        assert_eq!(Token::Marker.color(), None);
        assert!(Token::Marker.is_marker());
        assert_eq!(Token::from(Color::Red).color(), Some(Color::Red));
    }
}
