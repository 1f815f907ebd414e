//! Crossword puzzle engine
//!
//! Loads a clue list, places it on a fixed-size grid and runs a single
//! interactive game: focus and highlight handling, letter entry, per-word
//! completion checks, scoring and a solve timer.

pub mod app;
pub mod config;
pub mod domain;
pub mod input;
pub mod source;
pub mod ui;
