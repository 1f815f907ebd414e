//! Focus movement between cells
//!
//! Typing advances focus one cell along the active word's orientation and
//! backspace on an empty cell steps back. It's completely pure and testable
//! without any front-end.
//!
//! With no active word the direction defaults to across.

use crate::domain::core::{GridCoords, Orientation};
use crate::domain::grid::Grid;

/// Direction used when no word is highlighted
pub const DEFAULT_ORIENTATION: Orientation = Orientation::Across;

/// Step direction relative to the reading order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

/// Returns the neighbour of `from` in `step` direction if focus may move there
///
/// The neighbour must exist inside the grid, must not be blacked-out and
/// must not be locked by a solved word. Otherwise focus stays put and this
/// returns `None`.
pub fn neighbour(
    grid: &Grid,
    from: GridCoords,
    orientation: Option<Orientation>,
    step: Step,
) -> Option<GridCoords> {
    let orientation = orientation.unwrap_or(DEFAULT_ORIENTATION);
    let target = match step {
        Step::Next => from.next(orientation)?,
        Step::Previous => from.previous(orientation)?,
    };

    grid.cell(target)
        .filter(|cell| cell.is_focusable())
        .map(|_| target)
}
