//! Pattern lines: the per-row staging buffers of a player board.

use crate::{Color, MoveError, Row};

/// A single pattern line (one of 5 rows, capacities 1-5).
///
/// Holds tiles of at most one color. `color` is `None` exactly when `count`
/// is 0, and `count` never exceeds `capacity`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PatternLine {
    capacity: usize,
    color: Option<Color>,
    count: usize,
}

impl PatternLine {
    pub const fn empty(capacity: usize) -> Self {
        PatternLine {
            capacity,
            color: None,
            count: 0,
        }
    }

    /// Empty line for wall row `row` (capacity `row + 1`).
    pub const fn for_row(row: Row) -> Self {
        Self::empty(row + 1)
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub const fn color(&self) -> Option<Color> {
        self.color
    }

    pub const fn count(&self) -> usize {
        self.count
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub const fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    /// True if `color` tiles may be added: the line is empty, or holds
    /// `color` and has room left.
    pub fn open_for_tile(&self, color: Color) -> bool {
        self.check_open(color).is_ok()
    }

    /// Like [`open_for_tile`](Self::open_for_tile), but says why not.
    pub fn check_open(&self, color: Color) -> Result<(), MoveError> {
        let row = self.capacity.saturating_sub(1);
        if self.is_full() {
            return Err(MoveError::LineFull { row });
        }
        match self.color {
            Some(held) if held != color => Err(MoveError::LineHoldsOtherColor { row, held, color }),
            _ => Ok(()),
        }
    }

    /// Add `count` tiles of `color`. Returns how many did not fit.
    ///
    /// Fails without touching the line if it is not open for `color`.
    pub fn fill(&mut self, count: usize, color: Color) -> Result<usize, MoveError> {
        self.check_open(color)?;
        if count == 0 {
            return Ok(0);
        }
        let placed = count.min(self.capacity - self.count);
        self.color = Some(color);
        self.count += placed;
        Ok(count - placed)
    }

    pub fn clear(&mut self) {
        self.color = None;
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_empty_line_without_overflow() {
        let mut line = PatternLine::for_row(2);
        assert_eq!(line.fill(2, Color::Blue), Ok(0));
        assert_eq!(line.color(), Some(Color::Blue));
        assert_eq!(line.count(), 2);
        assert!(!line.is_full());
    }

    #[test]
    fn test_fill_overflow() {
        let mut line = PatternLine::for_row(1);
        assert_eq!(line.fill(1, Color::Red), Ok(0));
        assert_eq!(line.fill(4, Color::Red), Ok(3));
        assert_eq!(line.count(), 2);
        assert!(line.is_full());
    }

    #[test]
    fn test_open_for_tile() {
        let mut line = PatternLine::for_row(3);
        assert!(line.open_for_tile(Color::Black));
        line.fill(1, Color::Black).unwrap();
        assert!(line.open_for_tile(Color::Black));
        assert!(!line.open_for_tile(Color::Yellow));
        line.fill(3, Color::Black).unwrap();
        assert!(!line.open_for_tile(Color::Black), "full line is closed");
    }

    #[test]
    fn test_fill_closed_line_is_rejected_without_mutation() {
        let mut line = PatternLine::for_row(2);
        line.fill(1, Color::Teal).unwrap();
        let before = line;

        assert_eq!(
            line.fill(2, Color::Red),
            Err(MoveError::LineHoldsOtherColor {
                row: 2,
                held: Color::Teal,
                color: Color::Red,
            })
        );
        assert_eq!(line, before);

        let mut full = PatternLine::for_row(0);
        full.fill(1, Color::Blue).unwrap();
        assert_eq!(
            full.fill(1, Color::Blue),
            Err(MoveError::LineFull { row: 0 })
        );
    }

    #[test]
    fn test_clear_resets_color() {
        let mut line = PatternLine::for_row(0);
        line.fill(1, Color::Yellow).unwrap();
        line.clear();
        assert!(line.is_empty());
        assert_eq!(line.color(), None);
    }

    mod proptest_fill {
        use super::*;
        use crate::ALL_COLORS;
        use proptest::prelude::*;

        proptest! {
            /// Filling count n of capacity c with k tiles gives min(n+k, c) and overflow max(0, n+k-c)
            #[test]
            fn fill_law(row in 0usize..5, start in 0usize..5, k in 1usize..12, color_idx in 0usize..5) {
                let color = ALL_COLORS[color_idx];
                let mut line = PatternLine::for_row(row);
                let cap = line.capacity();
                let start = start % cap;
                if start > 0 {
                    prop_assert_eq!(line.fill(start, color), Ok(0));
                }

                let overflow = line.fill(k, color);
                prop_assert_eq!(overflow, Ok((start + k).saturating_sub(cap)));
                prop_assert_eq!(line.count(), (start + k).min(cap));
                prop_assert_eq!(line.color(), Some(color));
            }
        }
    }
}
