//! Engine errors.
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`MoveError`] | A draft the rules reject. Expected for untrusted input; never mutates state. |
//! | [`InvariantError`] | Internal bookkeeping is broken (lost tiles, double marker). A bug. |
//! | [`ConfigError`] | A [`GameConfig`](crate::GameConfig) the engine cannot run. |
//! | [`EngineError`] | Returned by lifecycle calls; wraps the above plus phase misuse. |

use thiserror::Error;

use crate::{Color, Phase, PlayerIdx, Row, Source};

/// Why a draft was rejected.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum MoveError {
    #[error("moves are only accepted while drafting, not during {0:?}")]
    WrongPhase(Phase),

    #[error("it is player {expected}'s turn, not player {actual}'s")]
    NotPlayersTurn {
        expected: PlayerIdx,
        actual: PlayerIdx,
    },

    #[error("factory {0} does not exist")]
    NoSuchFactory(usize),

    #[error("pattern line {0} does not exist")]
    NoSuchPatternLine(Row),

    #[error("{from} holds no {color} tiles")]
    ColorNotInSource { from: Source, color: Color },

    #[error("wall row {row} already holds {color}")]
    ColorOnWall { row: Row, color: Color },

    #[error("pattern line {row} holds {held}, cannot take {color}")]
    LineHoldsOtherColor { row: Row, held: Color, color: Color },

    #[error("pattern line {row} is full")]
    LineFull { row: Row },
}

/// Broken engine bookkeeping. Structurally impossible in a correct engine.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum InvariantError {
    #[error("draw pile holds {available} tiles after replenishing, {needed} needed")]
    DrawPileExhausted { needed: usize, available: usize },

    #[error("{color} count is {found}, expected {expected}")]
    TileCount {
        color: Color,
        expected: usize,
        found: usize,
    },

    #[error("found {0} first-player markers, expected exactly 1")]
    MarkerCount(usize),

    #[error("wall cell ({row},{col}) is already occupied")]
    WallCellOccupied { row: Row, col: usize },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("unsupported player count {0} (expected 2..=4)")]
    UnsupportedPlayerCount(usize),
}

/// Error returned by the round lifecycle operations of [`Model`](crate::Model).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum EngineError {
    #[error("{operation} is not allowed during {phase:?}")]
    WrongPhase {
        operation: &'static str,
        phase: Phase,
    },

    #[error("endgame bonuses were already awarded")]
    EndgameAlreadyScored,

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_messages() {
        let err = MoveError::ColorNotInSource {
            from: Source::Factory(3),
            color: Color::Red,
        };
        assert_eq!(err.to_string(), "factory 3 holds no red tiles");

        let err = MoveError::LineHoldsOtherColor {
            row: 2,
            held: Color::Blue,
            color: Color::Black,
        };
        assert_eq!(
            err.to_string(),
            "pattern line 2 holds blue, cannot take black"
        );
    }

    #[test]
    fn test_engine_error_wraps_invariant() {
        let err: EngineError = InvariantError::MarkerCount(2).into();
        assert_eq!(
            err.to_string(),
            "invariant violated: found 2 first-player markers, expected exactly 1"
        );
    }
}
