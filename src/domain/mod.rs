//! Domain logic and core data structures
//!
//! This module contains pure puzzle logic that is independent
//! of how clues are loaded and how the board is presented.

pub mod completion;
pub mod core;
pub mod grid;
pub mod highlight;
pub mod navigation;
pub mod word;

pub use self::core::{GridCoords, Orientation, normalize_letter};
pub use grid::{Cell, Grid, PlacementError};
pub use word::{WordEntry, WordId};
