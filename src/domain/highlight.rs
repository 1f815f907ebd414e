//! Word highlighting and selection resolution
//!
//! This module decides which word a focused cell or clicked clue refers to.
//! A cell can belong to at most one across and one down word. When it belongs
//! to both, the orientation of the previously active word wins; with no
//! previous word, the across word wins.

use crate::domain::core::{GridCoords, Orientation};
use crate::domain::word::{WordEntry, WordId};

/// Currently highlighted word and focused cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Index into the entry list of the highlighted word
    active: Option<usize>,
    /// Cell that receives typed letters
    focus: Option<GridCoords>,
}

impl Selection {
    /// Creates a new, empty selection
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn focus(&self) -> Option<GridCoords> {
        self.focus
    }

    /// Checks if neither a word nor a cell is selected
    pub fn is_empty(&self) -> bool {
        self.active.is_none() && self.focus.is_none()
    }

    /// Replaces the highlighted word, returning true when it changed
    pub fn set_active(&mut self, index: Option<usize>) -> bool {
        let changed = self.active != index;
        self.active = index;
        changed
    }

    /// Moves focus, returning true when it changed
    pub fn set_focus(&mut self, coords: GridCoords) -> bool {
        let changed = self.focus != Some(coords);
        self.focus = Some(coords);
        changed
    }

    /// Drops focus, returning true when a cell was focused
    pub fn clear_focus(&mut self) -> bool {
        self.focus.take().is_some()
    }

    /// Resets the selection to empty state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Indices of all entries occupying `coords`, in list order
pub fn words_at(entries: &[WordEntry], coords: GridCoords) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.contains(coords))
        .map(|(index, _)| index)
        .collect()
}

/// Picks the word to highlight for a focused cell
///
/// Preference order:
/// 1. a match sharing the orientation of `previous`
/// 2. the across match
/// 3. the first match in list order
///
/// Returns `None` when no entry covers the cell.
pub fn resolve_word_at(
    entries: &[WordEntry],
    coords: GridCoords,
    previous: Option<Orientation>,
) -> Option<usize> {
    let matches = words_at(entries, coords);

    if let Some(orientation) = previous {
        if let Some(&index) = matches.iter().find(|&&i| entries[i].orientation == orientation) {
            return Some(index);
        }
    }

    matches
        .iter()
        .copied()
        .min_by_key(|&i| (entries[i].orientation, i))
}

/// Finds the entry index for a word id
pub fn find_word(entries: &[WordEntry], word_id: WordId) -> Option<usize> {
    entries.iter().position(|entry| entry.word_id() == word_id)
}
