//! Tile-Drafting Game Engine
//!
//! Rules engine for a two-player tile-drafting board game in the Azul family.
//! Players draft colored tiles from shared factories and the center into the
//! pattern lines of their boards, move completed lines onto a scoring wall,
//! and pay penalties for tiles dropped on the floor line. The game ends after
//! the round in which some wall row fills up.
//!
//! The central object is [`Model`]. A driver (UI, AI, test harness) runs it as
//! a round state machine:
//!
//! ```
//! use mosaic_engine::{Model, Phase};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut model = Model::start();
//! model.setup_round(&mut rng).unwrap();
//!
//! while model.phase() != Phase::GameOver {
//!     if model.phase() == Phase::Setup {
//!         model.setup_round(&mut rng).unwrap();
//!     }
//!     let mv = model.legal_moves()[0];
//!     model.make_move(mv).unwrap();
//!     if model.round_over() {
//!         model.cleanup_round().unwrap();
//!     }
//! }
//! model.score_endgame().unwrap();
//! let _winner = model.winner();
//! ```
//!
//! The only randomness is the factory deal, which takes an explicit
//! [`rand::Rng`] so games replay exactly from a seed.

mod board;
mod config;
mod error;
mod model;
mod moves;
mod pattern_line;
mod supply;
mod tile;

pub use board::*;
pub use config::*;
pub use error::*;
pub use model::*;
pub use moves::*;
pub use pattern_line::*;
pub use supply::*;
pub use tile::*;

// =============================================================================
// Basic types and rule constants
// =============================================================================

/// Index into the players of a game: 0..player_count
pub type PlayerIdx = usize;

/// Wall / pattern-line row index (0..=4)
pub type Row = usize;

/// Wall column index (0..=4)
pub type Col = usize;

pub const BOARD_SIZE: usize = 5;
pub const TILE_COLORS: usize = 5;
pub const TILES_PER_COLOR: usize = 20;
pub const FACTORY_CAPACITY: usize = 4;
pub const FLOOR_CAPACITY: usize = 7;

/// Floor penalties, one per floor slot (fixed table)
pub const FLOOR_PENALTY: [i32; FLOOR_CAPACITY] = [-1, -1, -2, -2, -2, -3, -3];

/// Endgame bonus per fully occupied wall row
pub const ROW_BONUS: u32 = 2;
/// Endgame bonus per fully occupied wall column
pub const COLUMN_BONUS: u32 = 7;
/// Endgame bonus per color with all five of its wall cells occupied
pub const COLOR_BONUS: u32 = 10;
