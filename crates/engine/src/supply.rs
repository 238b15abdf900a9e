//! Tile supply: the draw pile (bag) and the discard pile (lid).

use rand::Rng;

use crate::{Color, ALL_COLORS, TILES_PER_COLOR, TILE_COLORS};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TileSupply {
    draw_pile: Vec<Color>,
    discard_pile: Vec<Color>,
}

impl TileSupply {
    /// Fresh supply: every tile of the game in the draw pile, discard empty.
    ///
    /// The pile is not shuffled; [`draw`](Self::draw) picks uniformly.
    pub fn full() -> Self {
        let draw_pile = ALL_COLORS
            .iter()
            .flat_map(|&color| std::iter::repeat_n(color, TILES_PER_COLOR))
            .collect();
        TileSupply {
            draw_pile,
            discard_pile: Vec::new(),
        }
    }

    pub fn draw_pile(&self) -> &[Color] {
        &self.draw_pile
    }

    pub fn discard_pile(&self) -> &[Color] {
        &self.discard_pile
    }

    pub fn discard(&mut self, tiles: impl IntoIterator<Item = Color>) {
        self.discard_pile.extend(tiles);
    }

    /// Move every discarded tile back into the draw pile.
    pub fn replenish(&mut self) {
        self.draw_pile.append(&mut self.discard_pile);
    }

    /// Draw a single tile uniformly at random, without replacement.
    /// Returns None if the draw pile is empty.
    pub fn draw(&mut self, rng: &mut impl Rng) -> Option<Color> {
        if self.draw_pile.is_empty() {
            return None;
        }
        let pick = rng.random_range(0..self.draw_pile.len());
        Some(self.draw_pile.swap_remove(pick))
    }

    /// Pull one `color` tile out of the draw pile, for staging test positions.
    #[cfg(test)]
    pub(crate) fn take_color(&mut self, color: Color) -> bool {
        match self.draw_pile.iter().position(|&tile| tile == color) {
            Some(idx) => {
                self.draw_pile.swap_remove(idx);
                true
            }
            None => false,
        }
    }

    /// Per-color counts over both piles.
    pub fn counts(&self) -> [usize; TILE_COLORS] {
        let mut counts = [0; TILE_COLORS];
        for color in self.draw_pile.iter().chain(&self.discard_pile) {
            counts[color.index()] += 1;
        }
        counts
    }
}
