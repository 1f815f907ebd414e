//! Word completion checking
//!
//! Compares the letters entered along each unsolved word with its answer.
//! The check itself is pure: it reports which words became solved and
//! whether the whole puzzle is now complete, and leaves locking, scoring and
//! event emission to the session.

use crate::domain::grid::Grid;
use crate::domain::word::WordEntry;

/// Result of one completion pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionReport {
    /// Indices of entries that went from unsolved to solved in this pass
    pub newly_solved: Vec<usize>,
    /// True when every entry is solved after this pass
    pub all_solved: bool,
}

impl CompletionReport {
    pub fn has_changes(&self) -> bool {
        !self.newly_solved.is_empty()
    }
}

/// Returns true when the letters along `entry` spell its answer exactly
pub fn is_word_complete(grid: &Grid, entry: &WordEntry) -> bool {
    let path = entry.cells();
    if path.len() != entry.len() {
        return false;
    }

    grid.read_letters(&path) == entry.answer_string()
}

/// Checks every unsolved entry and marks the ones that are now complete
///
/// `solved` is indexed like `entries`. Entries already marked solved are
/// skipped and never re-evaluated, so a second pass over an unchanged grid
/// reports no new solutions.
pub fn check_words(grid: &Grid, entries: &[WordEntry], solved: &mut [bool]) -> CompletionReport {
    let mut report = CompletionReport::default();

    for (index, entry) in entries.iter().enumerate() {
        let Some(flag) = solved.get_mut(index) else {
            continue;
        };
        if *flag {
            continue;
        }

        if is_word_complete(grid, entry) {
            *flag = true;
            report.newly_solved.push(index);
        }
    }

    report.all_solved = !entries.is_empty() && solved.iter().take(entries.len()).all(|s| *s);
    report
}
