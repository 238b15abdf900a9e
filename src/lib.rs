//! Tile-drafting board game engine
//!
//! Two players draft colored tiles from shared factories onto their boards,
//! tile a scoring wall each round, and race to complete a wall row.
//!
//! This crate re-exports the engine crate for convenience.

pub use mosaic_engine::*;
