//! Outbound game events
//!
//! The controller never touches a presentation layer directly. Every visible
//! state change is reported through `GameListener`, which a front-end
//! implements to redraw cells, move a cursor, show the win screen and so on.

use crate::domain::core::GridCoords;
use crate::domain::word::WordId;

/// Receiver for state changes produced by the controller
///
/// All methods default to doing nothing so a listener only implements the
/// events it cares about.
pub trait GameListener {
    /// A cell's letter was set (`Some`) or cleared (`None`)
    fn on_cell_changed(&mut self, _coords: GridCoords, _letter: Option<char>) {}

    /// Input focus moved to a new cell
    fn on_focus_changed(&mut self, _coords: GridCoords) {}

    /// The highlighted word changed, `None` clears the highlight
    fn on_highlight_changed(&mut self, _word: Option<WordId>) {}

    /// A word was filled in correctly and locked
    fn on_word_solved(&mut self, _word: WordId, _points: u32) {}

    /// Every word is solved; carries the stopped timer value
    fn on_puzzle_solved(&mut self, _elapsed_secs: u64) {}
}

/// Listener that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl GameListener for NoopListener {}

/// A recorded game event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    CellChanged { coords: GridCoords, letter: Option<char> },
    FocusChanged(GridCoords),
    HighlightChanged(Option<WordId>),
    WordSolved { word: WordId, points: u32 },
    PuzzleSolved { elapsed_secs: u64 },
}

/// Listener that keeps every event in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Returns and clears the recorded events
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn solved_words(&self) -> Vec<WordId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                GameEvent::WordSolved { word, .. } => Some(*word),
                _ => None,
            })
            .collect()
    }

    pub fn puzzle_solved_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, GameEvent::PuzzleSolved { .. }))
            .count()
    }
}

impl GameListener for EventLog {
    fn on_cell_changed(&mut self, coords: GridCoords, letter: Option<char>) {
        self.events.push(GameEvent::CellChanged { coords, letter });
    }

    fn on_focus_changed(&mut self, coords: GridCoords) {
        self.events.push(GameEvent::FocusChanged(coords));
    }

    fn on_highlight_changed(&mut self, word: Option<WordId>) {
        self.events.push(GameEvent::HighlightChanged(word));
    }

    fn on_word_solved(&mut self, word: WordId, points: u32) {
        self.events.push(GameEvent::WordSolved { word, points });
    }

    fn on_puzzle_solved(&mut self, elapsed_secs: u64) {
        self.events.push(GameEvent::PuzzleSolved { elapsed_secs });
    }
}
