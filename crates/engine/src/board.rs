//! Player boards: wall, pattern lines, floor line, and the scoring rules.

use std::iter;

use crate::{
    wall_column, Col, Color, InvariantError, MoveError, PatternLine, Row, Token, Wall, ALL_COLORS,
    BOARD_SIZE, COLOR_BONUS, COLUMN_BONUS, FLOOR_CAPACITY, FLOOR_PENALTY, ROW_BONUS, TILE_COLORS,
};

/// Complete state for one player.
///
/// `Clone` gives an independent deep copy, so move-evaluation code can try
/// drafts and scoring on a copy without touching the game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerBoard {
    pub(crate) wall: Wall,
    pub(crate) score: u32,
    pub(crate) pattern_lines: [PatternLine; BOARD_SIZE],
    pub(crate) floor_line: Vec<Token>,
}

impl Default for PlayerBoard {
    fn default() -> Self {
        Self::empty()
    }
}

impl PlayerBoard {
    pub fn empty() -> Self {
        PlayerBoard {
            wall: [[None; BOARD_SIZE]; BOARD_SIZE],
            score: 0,
            pattern_lines: std::array::from_fn(PatternLine::for_row),
            floor_line: Vec::with_capacity(FLOOR_CAPACITY),
        }
    }

    pub fn wall(&self) -> &Wall {
        &self.wall
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn pattern_lines(&self) -> &[PatternLine; BOARD_SIZE] {
        &self.pattern_lines
    }

    pub fn floor_line(&self) -> &[Token] {
        &self.floor_line
    }

    pub fn holds_marker(&self) -> bool {
        self.floor_line.contains(&Token::Marker)
    }

    fn floor_room(&self) -> usize {
        FLOOR_CAPACITY.saturating_sub(self.floor_line.len())
    }

    // =========================================================================
    // Receiving drafted tiles
    // =========================================================================

    /// Put up to the remaining floor room of `count` tiles on the floor line.
    /// Returns the tiles that did not fit; they belong in the discard pile.
    pub fn add_to_floor_line(&mut self, color: Color, count: usize) -> Vec<Color> {
        let placed = count.min(self.floor_room());
        self.floor_line
            .extend(iter::repeat_n(Token::Tile(color), placed));
        vec![color; count - placed]
    }

    /// Put the first-player marker on the floor line.
    ///
    /// The marker always gets a slot. On a full floor the last colored tile
    /// is bumped off and returned for discarding.
    pub fn place_marker(&mut self) -> Option<Color> {
        let mut bumped = None;
        if self.floor_room() == 0 {
            let last_tile = self.floor_line.iter().rposition(|token| !token.is_marker());
            if let Some(idx) = last_tile {
                bumped = self.floor_line.remove(idx).color();
            }
        }
        self.floor_line.push(Token::Marker);
        bumped
    }

    /// Whether `color` tiles may go to pattern line `row`.
    pub fn check_pattern_line(&self, row: Row, color: Color) -> Result<(), MoveError> {
        let line = self
            .pattern_lines
            .get(row)
            .ok_or(MoveError::NoSuchPatternLine(row))?;

        // Wall constraint: can't stage a color already on that wall row
        if self.wall[row][wall_column(row, color)].is_some() {
            return Err(MoveError::ColorOnWall { row, color });
        }

        line.check_open(color)
    }

    /// Stage `count` tiles of `color` on pattern line `row`.
    ///
    /// Overflow goes to the floor line; whatever the floor cannot hold is
    /// returned for the discard pile. Nothing changes on error.
    pub fn add_to_pattern_line(
        &mut self,
        row: Row,
        color: Color,
        count: usize,
    ) -> Result<Vec<Color>, MoveError> {
        self.check_pattern_line(row, color)?;
        let overflow = self.pattern_lines[row].fill(count, color)?;
        Ok(self.add_to_floor_line(color, overflow))
    }

    // =========================================================================
    // Scoring
    // =========================================================================

    /// End-of-round wall tiling and scoring.
    ///
    /// Every full pattern line moves one tile to the wall and scores it; the
    /// rest of the line is discarded. Then the floor penalty applies and the
    /// floor is cleared (colored tiles discarded, the marker dropped for the
    /// caller to return to the center). The score never falls below zero.
    ///
    /// Returns the tiles for the discard pile.
    pub fn score_round(&mut self) -> Result<Vec<Color>, InvariantError> {
        // Every destination cell must be free before anything moves
        for (row, line) in self.pattern_lines.iter().enumerate() {
            if let Some(color) = line.color().filter(|_| line.is_full()) {
                let col = wall_column(row, color);
                if self.wall[row][col].is_some() {
                    return Err(InvariantError::WallCellOccupied { row, col });
                }
            }
        }

        let mut discard = Vec::new();
        let mut delta = 0i32;

        for row in 0..BOARD_SIZE {
            let line = self.pattern_lines[row];
            let Some(color) = line.color().filter(|_| line.is_full()) else {
                continue;
            };
            let col = wall_column(row, color);
            self.wall[row][col] = Some(color);
            delta += placement_score(&self.wall, row, col) as i32;
            discard.extend(iter::repeat_n(color, line.count() - 1));
            self.pattern_lines[row].clear();
        }

        if !self.floor_line.is_empty() {
            delta += floor_penalty(self.floor_line.len());
            discard.extend(self.floor_line.drain(..).filter_map(Token::color));
        }

        self.score = self.score.saturating_add_signed(delta);
        Ok(discard)
    }

    /// Award endgame bonuses. Returns the bonus added.
    pub fn score_endgame(&mut self) -> u32 {
        let bonus = self.complete_rows() as u32 * ROW_BONUS
            + self.complete_columns() as u32 * COLUMN_BONUS
            + self.complete_colors() as u32 * COLOR_BONUS;
        self.score += bonus;
        bonus
    }

    pub fn has_complete_row(&self) -> bool {
        self.wall.iter().any(|row| row.iter().all(Option::is_some))
    }

    pub fn complete_rows(&self) -> usize {
        self.wall
            .iter()
            .filter(|row| row.iter().all(Option::is_some))
            .count()
    }

    pub fn complete_columns(&self) -> usize {
        (0..BOARD_SIZE)
            .filter(|&col| self.wall.iter().all(|row| row[col].is_some()))
            .count()
    }

    /// Colors with all five of their wall cells occupied
    pub fn complete_colors(&self) -> usize {
        ALL_COLORS
            .iter()
            .filter(|&&color| {
                (0..BOARD_SIZE).all(|row| self.wall[row][wall_column(row, color)] == Some(color))
            })
            .count()
    }

    /// Per-color tile counts over wall, pattern lines, and floor line.
    pub fn tile_counts(&self) -> [usize; TILE_COLORS] {
        let mut counts = [0; TILE_COLORS];
        for color in self.wall.iter().flatten().flatten() {
            counts[color.index()] += 1;
        }
        for line in &self.pattern_lines {
            if let Some(color) = line.color() {
                counts[color.index()] += line.count();
            }
        }
        for color in self.floor_line.iter().filter_map(|token| token.color()) {
            counts[color.index()] += 1;
        }
        counts
    }
}

/// Score for the tile just placed at `(row, col)`.
///
/// `H` and `V` are the lengths of the horizontal and vertical runs through
/// the cell, the cell included. An isolated tile scores 1; a tile with
/// neighbors in only one direction scores that run; otherwise `H + V`.
pub fn placement_score(wall: &Wall, row: Row, col: Col) -> u32 {
    let occupied = |r: usize, c: usize| wall[r][c].is_some();

    let horiz = 1
        + (0..col).rev().take_while(|&c| occupied(row, c)).count()
        + (col + 1..BOARD_SIZE).take_while(|&c| occupied(row, c)).count();
    let vert = 1
        + (0..row).rev().take_while(|&r| occupied(r, col)).count()
        + (row + 1..BOARD_SIZE).take_while(|&r| occupied(r, col)).count();

    let score = match (horiz, vert) {
        (1, v) => v,
        (h, 1) => h,
        (h, v) => h + v,
    };
    score as u32
}

/// Penalty for a floor line holding `len` tokens. Only the first
/// [`FLOOR_CAPACITY`] slots count.
pub fn floor_penalty(len: usize) -> i32 {
    FLOOR_PENALTY.iter().take(len).sum()
}
