//! Configuration module for crossword
//!
//! Holds the puzzle constants (grid size, points per word) and where the
//! clue list comes from. Values come from defaults, an optional TOML file,
//! and command-line overrides, in that order.

pub mod game;

pub use game::{ConfigError, GameConfig};
