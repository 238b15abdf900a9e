//! Draft moves.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Color, Row};

/// Source of tiles for drafting
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Source {
    Factory(usize), // index 0..factory_count
    Center,
}

/// Destination for drafted tiles
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Destination {
    PatternLine(Row), // 0..=4
    Floor,
}

/// A draft: take every `color` tile from `source` and send them to `destination`.
///
/// The color is a [`Color`], so the first-player marker can never be drafted
/// on purpose; it only travels along with a center draft.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub source: Source,
    pub color: Color,
    pub destination: Destination,
}

impl Move {
    pub const fn new(source: Source, color: Color, destination: Destination) -> Self {
        Move {
            source,
            color,
            destination,
        }
    }

    pub const fn from_center(&self) -> bool {
        matches!(self.source, Source::Center)
    }

    pub const fn to_floor(&self) -> bool {
        matches!(self.destination, Destination::Floor)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Factory(idx) => write!(f, "factory {idx}"),
            Source::Center => f.write_str("center"),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::PatternLine(row) => write!(f, "pattern line {row}"),
            Destination::Floor => f.write_str("floor"),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} to {}", self.color, self.source, self.destination)
    }
}
