//! Read-only snapshot of the board for presentation

use crate::app::controller::GameController;
use crate::app::events::GameListener;
use crate::app::state::GameState;
use crate::domain::core::{GridCoords, Orientation};
use crate::domain::word::WordId;

/// How one cell should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub coords: GridCoords,
    pub blacked_out: bool,
    pub clue_number: Option<u32>,
    pub letter: Option<char>,
    /// Part of a solved word
    pub locked: bool,
    /// Part of the highlighted word
    pub highlighted: bool,
    /// Receives typed letters
    pub focused: bool,
}

/// One line of the clue list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueView {
    pub word: WordId,
    pub clue: String,
    pub solved: bool,
    pub active: bool,
}

/// Everything a front-end needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub width: u32,
    pub height: u32,
    /// Row-major, `width * height` cells
    pub cells: Vec<CellView>,
    /// Clues in load order
    pub clues: Vec<ClueView>,
    pub elapsed_secs: u64,
    pub score: u32,
    pub won: bool,
}

impl BoardView {
    pub fn from_controller<L: GameListener>(game: &GameController<L>) -> Self {
        let grid = game.grid();
        let (width, height) = grid.dimensions();
        let highlighted = game.highlighted_cells();
        let focus = game.focus();
        let active = game.active_word().map(|entry| entry.word_id());

        let cells = grid
            .rows()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter().enumerate().map(move |(x, cell)| (GridCoords::new(x as u32, y as u32), *cell))
            })
            .map(|(coords, cell)| CellView {
                coords,
                blacked_out: cell.blacked_out,
                clue_number: cell.clue_number,
                letter: cell.letter,
                locked: cell.locked,
                highlighted: highlighted.contains(&coords),
                focused: focus == Some(coords),
            })
            .collect();

        let clues = game
            .entries()
            .iter()
            .map(|entry| {
                let word = entry.word_id();
                ClueView {
                    word,
                    clue: entry.clue.clone(),
                    solved: game.is_solved(word),
                    active: active == Some(word),
                }
            })
            .collect();

        Self {
            width,
            height,
            cells,
            clues,
            elapsed_secs: game.timer().elapsed_secs(),
            score: game.score(),
            won: matches!(game.state(), GameState::Won { .. }),
        }
    }

    pub fn cell(&self, coords: GridCoords) -> Option<&CellView> {
        if coords.x >= self.width || coords.y >= self.height {
            return None;
        }
        self.cells.get(coords.y as usize * self.width as usize + coords.x as usize)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Clues of one orientation, keeping load order
    pub fn clues_for(&self, orientation: Orientation) -> impl Iterator<Item = &ClueView> {
        self.clues
            .iter()
            .filter(move |clue| clue.word.orientation == orientation)
    }

    pub fn solved_count(&self) -> usize {
        self.clues.iter().filter(|clue| clue.solved).count()
    }
}
