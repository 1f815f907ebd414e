//! Game controller and coordination layer
//!
//! The controller owns every piece of mutable game state (grid letters,
//! solved flags, selection, score, timer) and is the only thing that mutates
//! it. Each operation runs synchronously: input is applied, focus and
//! highlight are resolved, the completion checker runs, and the listener is
//! told about every visible change before the call returns.
//!
//! Requests naming a coordinate or word that does not exist, or a cell that
//! cannot take input, are no-ops and return `false`.

use tracing::{debug, info};

use crate::app::events::GameListener;
use crate::app::state::{GameState, StateEvent, StateMachine};
use crate::app::timer::GameTimer;
use crate::domain::completion::{CompletionReport, check_words};
use crate::domain::core::{GridCoords, Orientation, normalize_letter};
use crate::domain::grid::{Cell, Grid};
use crate::domain::highlight::{Selection, find_word, resolve_word_at};
use crate::domain::navigation::{Step, neighbour};
use crate::domain::word::{WordEntry, WordId};
use crate::source::Puzzle;

/// Single-session crossword controller
///
/// Only constructible from a loaded `Puzzle`, so the grid can never be
/// queried before the clue list has arrived.
pub struct GameController<L: GameListener> {
    entries: Vec<WordEntry>,
    grid: Grid,
    /// Indexed like `entries`
    solved: Vec<bool>,
    selection: Selection,
    score: u32,
    points_per_word: u32,
    timer: GameTimer,
    state: GameState,
    listener: L,
}

impl<L: GameListener> GameController<L> {
    /// Starts a game on a loaded puzzle; the timer starts now
    ///
    /// # Arguments
    /// * `puzzle` - Validated entries and the grid they were placed on
    /// * `points_per_word` - Score awarded for each solved word
    /// * `listener` - Receiver for every visible state change
    pub fn new(puzzle: Puzzle, points_per_word: u32, listener: L) -> Self {
        let Puzzle { entries, grid } = puzzle;
        let state = StateMachine::process_event(GameState::Loading, StateEvent::PuzzleLoaded);
        info!(words = entries.len(), "game started");

        Self {
            solved: vec![false; entries.len()],
            entries,
            grid,
            selection: Selection::new(),
            score: 0,
            points_per_word,
            timer: GameTimer::start(),
            state,
            listener,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn timer(&self) -> &GameTimer {
        &self.timer
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn focus(&self) -> Option<GridCoords> {
        self.selection.focus()
    }

    /// Currently highlighted word
    pub fn active_word(&self) -> Option<&WordEntry> {
        self.selection.active().and_then(|index| self.entries.get(index))
    }

    fn active_orientation(&self) -> Option<Orientation> {
        self.active_word().map(|entry| entry.orientation)
    }

    /// Cells of the highlighted word, empty when nothing is highlighted
    pub fn highlighted_cells(&self) -> Vec<GridCoords> {
        self.active_word().map(WordEntry::cells).unwrap_or_default()
    }

    pub fn is_solved(&self, word: WordId) -> bool {
        find_word(&self.entries, word)
            .and_then(|index| self.solved.get(index).copied())
            .unwrap_or(false)
    }

    pub fn solved_count(&self) -> usize {
        self.solved.iter().filter(|solved| **solved).count()
    }

    /// Returns the cell at `coords` if it can take input right now
    fn input_cell(&self, coords: GridCoords) -> Option<&Cell> {
        if !self.state.accepts_input() {
            return None;
        }
        self.grid.cell(coords).filter(|cell| cell.is_focusable())
    }

    /// Focuses a cell and highlights the word it belongs to
    ///
    /// On a cell shared by two words the orientation of the currently
    /// highlighted word is kept; with no highlight the across word wins.
    ///
    /// # Returns
    /// false when the cell is outside the grid, blacked-out or locked
    pub fn focus_cell(&mut self, coords: GridCoords) -> bool {
        if self.input_cell(coords).is_none() {
            debug!(%coords, "focus ignored");
            return false;
        }

        if self.selection.set_focus(coords) {
            self.listener.on_focus_changed(coords);
        }

        let preferred = resolve_word_at(&self.entries, coords, self.active_orientation());
        if preferred.is_some() {
            self.set_highlight(preferred);
        }
        true
    }

    /// Highlights a word from the clue list and focuses its first open cell
    ///
    /// Cells locked by a solved crossing word are skipped. When every cell of
    /// the word is locked, focus is dropped so typing cannot land in another
    /// word.
    ///
    /// # Arguments
    /// * `word` - Id of the clue, e.g. `down-2`
    ///
    /// # Returns
    /// false when no entry has that id
    pub fn select_clue(&mut self, word: WordId) -> bool {
        let Some(index) = find_word(&self.entries, word) else {
            debug!(%word, "clue selection ignored, no such word");
            return false;
        };

        self.set_highlight(Some(index));
        let first_open = self.entries[index]
            .cells()
            .into_iter()
            .find(|&coords| self.input_cell(coords).is_some());

        match first_open {
            Some(coords) => {
                if self.selection.set_focus(coords) {
                    self.listener.on_focus_changed(coords);
                }
            }
            None => {
                if self.selection.clear_focus() {
                    debug!(%word, "every cell solved, focus cleared");
                }
            }
        }
        true
    }

    fn set_highlight(&mut self, index: Option<usize>) {
        if self.selection.set_active(index) {
            let word = index.map(|i| self.entries[i].word_id());
            debug!(?word, "highlight changed");
            self.listener.on_highlight_changed(word);
        }
    }

    fn set_letter(&mut self, coords: GridCoords, letter: Option<char>) {
        let Some(cell) = self.grid.cell_mut(coords) else {
            return;
        };
        if cell.letter != letter {
            cell.letter = letter;
            self.listener.on_cell_changed(coords, letter);
        }
    }

    /// Types a letter into a cell
    ///
    /// The letter is stored uppercase and the completion checker runs. Focus
    /// then moves to the next cell of the highlighted word that can still
    /// take input, skipping cells the check may just have locked. At the end
    /// of the word focus stays put.
    ///
    /// # Arguments
    /// * `coords` - Zero-based cell receiving the letter
    /// * `ch` - Typed character, any case
    ///
    /// # Returns
    /// false when `ch` is not a letter or the cell cannot take input
    pub fn enter_letter(&mut self, coords: GridCoords, ch: char) -> bool {
        let Some(letter) = normalize_letter(ch) else {
            debug!(%coords, ?ch, "ignored non-letter input");
            return false;
        };
        if self.input_cell(coords).is_none() {
            debug!(%coords, "letter ignored, cell not editable");
            return false;
        }

        if self.focus() != Some(coords) {
            self.focus_cell(coords);
        }
        self.set_letter(coords, Some(letter));
        self.check_completion();

        if let Some(next) = self.next_open_cell(coords) {
            self.focus_cell(next);
        }
        true
    }

    /// Next cell after `from` that can take input, within the highlighted word
    fn next_open_cell(&self, from: GridCoords) -> Option<GridCoords> {
        let Some(entry) = self.active_word() else {
            return neighbour(&self.grid, from, None, Step::Next);
        };

        let position = entry.position_of(from)?;
        entry
            .cells()
            .into_iter()
            .skip(position + 1)
            .find(|&coords| self.grid.cell(coords).is_some_and(Cell::is_focusable))
    }

    /// Backspace on a cell
    ///
    /// A filled cell is cleared in place. On an empty cell focus steps back
    /// one cell along the highlighted word if that cell can take input.
    ///
    /// # Returns
    /// false when the cell cannot take input
    pub fn backspace(&mut self, coords: GridCoords) -> bool {
        let Some(cell) = self.input_cell(coords).copied() else {
            return false;
        };

        if self.focus() != Some(coords) {
            self.focus_cell(coords);
        }

        if cell.letter.is_some() {
            self.set_letter(coords, None);
            self.check_completion();
        } else if let Some(previous) =
            neighbour(&self.grid, coords, self.active_orientation(), Step::Previous)
        {
            self.focus_cell(previous);
        }
        true
    }

    /// Clears a cell without moving focus
    ///
    /// # Returns
    /// false when the cell cannot take input
    pub fn delete_letter(&mut self, coords: GridCoords) -> bool {
        if self.input_cell(coords).is_none() {
            return false;
        }
        self.set_letter(coords, None);
        self.check_completion();
        true
    }

    /// Runs the completion checker over every unsolved word
    ///
    /// Newly solved words are locked, scored and reported once. When the last
    /// word is solved the timer stops and the win is reported once.
    ///
    /// # Returns
    /// The words solved by this pass and whether the puzzle is complete
    pub fn check_completion(&mut self) -> CompletionReport {
        let report = check_words(&self.grid, &self.entries, &mut self.solved);

        for &index in &report.newly_solved {
            let entry = &self.entries[index];
            let word = entry.word_id();
            for coords in entry.cells() {
                if let Some(cell) = self.grid.cell_mut(coords) {
                    cell.locked = true;
                }
            }
            self.score += self.points_per_word;
            info!(%word, score = self.score, "word solved");
            self.listener.on_word_solved(word, self.points_per_word);
        }

        if report.all_solved && self.state == GameState::Playing {
            self.timer.stop();
            let elapsed_secs = self.timer.elapsed_secs();
            self.state = StateMachine::process_event(
                self.state.clone(),
                StateEvent::PuzzleSolved { elapsed_secs },
            );
            info!(elapsed_secs, score = self.score, "puzzle solved");
            self.listener.on_puzzle_solved(elapsed_secs);
        }

        report
    }

    /// Clears the board and starts over with the same words
    pub fn restart(&mut self) {
        let (width, height) = self.grid.dimensions();
        let filled: Vec<GridCoords> = (0..height)
            .flat_map(|y| (0..width).map(move |x| GridCoords::new(x, y)))
            .filter(|&coords| self.grid.cell(coords).is_some_and(|cell| cell.letter.is_some()))
            .collect();

        self.grid.clear_letters();
        for coords in filled {
            self.listener.on_cell_changed(coords, None);
        }

        self.solved.fill(false);
        self.score = 0;
        self.timer = GameTimer::start();
        self.set_highlight(None);
        self.selection.reset();
        self.state = StateMachine::process_event(self.state.clone(), StateEvent::Restart);
        info!("game restarted");
    }
}
