//! Grid model and word placement
//!
//! This module handles the logical cell matrix of a puzzle. A grid starts
//! fully blacked-out; placing word entries opens the cells they cover and
//! numbers their start cells. Placement validates every path against the
//! grid bounds and rejects the whole puzzle on the first bad entry.

use thiserror::Error;
use tracing::debug;

use crate::domain::core::GridCoords;
use crate::domain::word::{WordEntry, WordId};

/// Errors that can occur while building a grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Grid dimensions are invalid (zero)
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A word's path leaves the grid
    #[error("{word} does not fit on a {width}x{height} grid (start {start_x},{start_y}, length {length})")]
    OutOfBounds {
        word: WordId,
        start_x: u32,
        start_y: u32,
        length: usize,
        width: u32,
        height: u32,
    },

    /// Two crossing words need different letters in the same cell
    #[error("{first} and {second} disagree at {coords}: '{first_letter}' vs '{second_letter}'")]
    ConflictingLetters {
        coords: GridCoords,
        first: WordId,
        first_letter: char,
        second: WordId,
        second_letter: char,
    },
}

/// A single grid square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// True when no word occupies this cell
    pub blacked_out: bool,
    /// Clue number shown in the corner of a start cell
    pub clue_number: Option<u32>,
    /// Letter currently entered by the player
    pub letter: Option<char>,
    /// Set once a word through this cell is solved
    pub locked: bool,
}

impl Cell {
    /// A fresh blacked-out cell
    pub const BLACK: Cell = Cell {
        blacked_out: true,
        clue_number: None,
        letter: None,
        locked: false,
    };

    /// True for cells a player can type into
    pub fn is_active(&self) -> bool {
        !self.blacked_out
    }

    /// True for cells focus can move onto
    pub fn is_focusable(&self) -> bool {
        !self.blacked_out && !self.locked
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Fixed-size rectangular matrix of cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a fully blacked-out grid
    ///
    /// # Example
    /// ```rust
    /// use crossword::domain::grid::Grid;
    ///
    /// let grid = Grid::new(15, 15).unwrap();
    /// assert_eq!(grid.dimensions(), (15, 15));
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self, PlacementError> {
        if width == 0 || height == 0 {
            return Err(PlacementError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: vec![Cell::BLACK; width as usize * height as usize],
        })
    }

    /// Creates a grid and places every entry on it
    ///
    /// # Arguments
    /// * `width` - Number of columns
    /// * `height` - Number of rows
    /// * `entries` - Words in load order; earlier entries keep shared clue numbers
    ///
    /// # Returns
    /// The placed grid, or the first dimension, bounds or crossing error
    pub fn with_entries(
        width: u32,
        height: u32,
        entries: &[WordEntry],
    ) -> Result<Self, PlacementError> {
        let mut grid = Self::new(width, height)?;
        grid.place(entries)?;
        Ok(grid)
    }

    /// Returns the grid dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn contains_coords(&self, coords: GridCoords) -> bool {
        coords.x < self.width && coords.y < self.height
    }

    fn index(&self, coords: GridCoords) -> Option<usize> {
        self.contains_coords(coords)
            .then(|| coords.y as usize * self.width as usize + coords.x as usize)
    }

    pub fn cell(&self, coords: GridCoords) -> Option<&Cell> {
        self.cells.get(self.index(coords)?)
    }

    pub fn cell_mut(&mut self, coords: GridCoords) -> Option<&mut Cell> {
        let index = self.index(coords)?;
        self.cells.get_mut(index)
    }

    /// Iterates rows top to bottom, each as a slice of cells
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Walks every entry onto the grid
    ///
    /// Opens each covered cell and sets the clue number of each start cell.
    /// When two entries start on the same cell the first-placed entry keeps
    /// its number. The grid is left untouched if any entry fails validation.
    ///
    /// # Arguments
    /// * `entries` - Words to place, validated as a whole before any cell changes
    ///
    /// # Returns
    /// `OutOfBounds` for a path leaving the grid, `ConflictingLetters` for two
    /// words disagreeing on a shared cell
    pub fn place(&mut self, entries: &[WordEntry]) -> Result<(), PlacementError> {
        let mut paths = Vec::with_capacity(entries.len());
        for entry in entries {
            paths.push(self.path_for(entry)?);
        }
        check_crossings(entries, &paths)?;

        for (entry, path) in entries.iter().zip(&paths) {
            for (i, &coords) in path.iter().enumerate() {
                let Some(cell) = self.cell_mut(coords) else {
                    continue;
                };
                cell.blacked_out = false;
                if i == 0 && cell.clue_number.is_none() {
                    cell.clue_number = Some(entry.id);
                }
            }
            debug!(word = %entry.word_id(), len = path.len(), "placed word");
        }

        Ok(())
    }

    /// Computes an entry's in-bounds path or reports why it does not fit
    fn path_for(&self, entry: &WordEntry) -> Result<Vec<GridCoords>, PlacementError> {
        let out_of_bounds = || PlacementError::OutOfBounds {
            word: entry.word_id(),
            start_x: entry.start_x,
            start_y: entry.start_y,
            length: entry.len(),
            width: self.width,
            height: self.height,
        };

        let path = entry.cells();
        if path.len() != entry.len() || !path.iter().all(|&c| self.contains_coords(c)) {
            return Err(out_of_bounds());
        }
        Ok(path)
    }

    /// Reads the letters currently entered along `path`
    ///
    /// Empty cells contribute nothing, so a partially filled word yields a
    /// shorter string than its answer.
    pub fn read_letters(&self, path: &[GridCoords]) -> String {
        path.iter()
            .filter_map(|&coords| self.cell(coords).and_then(|cell| cell.letter))
            .collect()
    }

    /// Clears all entered letters and locks, keeping the structure
    pub fn clear_letters(&mut self) {
        for cell in &mut self.cells {
            cell.letter = None;
            cell.locked = false;
        }
    }
}

fn check_crossings(entries: &[WordEntry], paths: &[Vec<GridCoords>]) -> Result<(), PlacementError> {
    for (i, (first, first_path)) in entries.iter().zip(paths).enumerate() {
        for (second, second_path) in entries.iter().zip(paths).skip(i + 1) {
            for (a, coords) in first_path.iter().enumerate() {
                let Some(b) = second_path.iter().position(|c| c == coords) else {
                    continue;
                };
                if first.answer[a] != second.answer[b] {
                    return Err(PlacementError::ConflictingLetters {
                        coords: *coords,
                        first: first.word_id(),
                        first_letter: first.answer[a],
                        second: second.word_id(),
                        second_letter: second.answer[b],
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::core::Orientation::{Across, Down};

    fn coords(x: u32, y: u32) -> GridCoords {
        GridCoords::new(x, y)
    }

    #[test]
    fn grid_creation_valid() {
        let grid = Grid::new(15, 10).unwrap();
        assert_eq!(grid.dimensions(), (15, 10));
        assert!(grid.rows().flatten().all(|cell| *cell == Cell::BLACK));
        assert_eq!(grid.rows().count(), 10);
    }

    #[test]
    fn grid_creation_invalid_dimensions() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(PlacementError::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(matches!(
            Grid::new(5, 0),
            Err(PlacementError::InvalidDimensions { width: 5, height: 0 })
        ));
    }

    #[test]
    fn placement_opens_word_cells() {
        let entries = [WordEntry::new(1, Across, 1, 1, "CAT", "Feline")];
        let grid = Grid::with_entries(15, 15, &entries).unwrap();

        for x in 0..3 {
            assert!(grid.cell(coords(x, 0)).unwrap().is_active());
        }
        assert!(grid.cell(coords(3, 0)).unwrap().blacked_out);
        assert!(grid.cell(coords(0, 1)).unwrap().blacked_out);
        assert_eq!(grid.cell(coords(0, 0)).unwrap().clue_number, Some(1));
        assert_eq!(grid.cell(coords(1, 0)).unwrap().clue_number, None);
    }

    #[test]
    fn first_placed_entry_keeps_shared_start_number() {
        let entries = [
            WordEntry::new(1, Across, 1, 1, "CAT", ""),
            WordEntry::new(2, Down, 1, 1, "COW", ""),
        ];
        let grid = Grid::with_entries(15, 15, &entries).unwrap();
        assert_eq!(grid.cell(coords(0, 0)).unwrap().clue_number, Some(1));
        assert!(grid.cell(coords(0, 2)).unwrap().is_active());
    }

    #[test]
    fn crossing_mid_word_does_not_renumber() {
        // DOWN-2 starts above the A of CAT and passes through it
        let entries = [
            WordEntry::new(1, Across, 1, 2, "CAT", ""),
            WordEntry::new(2, Down, 2, 1, "BAD", ""),
        ];
        let grid = Grid::with_entries(5, 5, &entries).unwrap();
        assert_eq!(grid.cell(coords(1, 0)).unwrap().clue_number, Some(2));
        assert_eq!(grid.cell(coords(1, 1)).unwrap().clue_number, None);
        assert_eq!(grid.cell(coords(0, 1)).unwrap().clue_number, Some(1));
    }

    #[test]
    fn out_of_bounds_rejects_whole_puzzle() {
        let entries = [
            WordEntry::new(1, Across, 1, 1, "CAT", ""),
            WordEntry::new(2, Across, 4, 2, "HORSE", ""),
        ];
        let mut grid = Grid::new(6, 6).unwrap();
        let result = grid.place(&entries);
        assert!(matches!(result, Err(PlacementError::OutOfBounds { length: 5, .. })));
        // Nothing was placed
        assert!(grid.cell(coords(0, 0)).unwrap().blacked_out);
    }

    #[test]
    fn zero_start_is_out_of_bounds() {
        let entries = [WordEntry::new(1, Down, 0, 1, "CAT", "")];
        assert!(matches!(
            Grid::with_entries(5, 5, &entries),
            Err(PlacementError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn word_ending_on_last_cell_fits() {
        let entries = [WordEntry::new(1, Down, 3, 1, "ABC", "")];
        let grid = Grid::with_entries(3, 3, &entries).unwrap();
        assert!(grid.cell(coords(2, 2)).unwrap().is_active());
    }

    #[test]
    fn conflicting_crossing_letters_are_rejected() {
        let entries = [
            WordEntry::new(1, Across, 1, 1, "CAT", ""),
            WordEntry::new(2, Down, 1, 1, "DOG", ""),
        ];
        let result = Grid::with_entries(5, 5, &entries);
        assert!(matches!(
            result,
            Err(PlacementError::ConflictingLetters { first_letter: 'C', second_letter: 'D', .. })
        ));
    }

    #[test]
    fn read_letters_skips_empty_cells() {
        let entries = [WordEntry::new(1, Across, 1, 1, "CAT", "")];
        let mut grid = Grid::with_entries(5, 5, &entries).unwrap();
        grid.cell_mut(coords(0, 0)).unwrap().letter = Some('C');
        grid.cell_mut(coords(2, 0)).unwrap().letter = Some('T');
        assert_eq!(grid.read_letters(&entries[0].cells()), "CT");

        grid.clear_letters();
        assert_eq!(grid.read_letters(&entries[0].cells()), "");
        assert!(grid.cell(coords(0, 0)).unwrap().is_active());
    }

    #[test]
    fn out_of_range_lookups_are_none() {
        let grid = Grid::new(3, 3).unwrap();
        assert!(grid.cell(coords(3, 0)).is_none());
        assert!(grid.cell(coords(0, 3)).is_none());
        assert!(!grid.contains_coords(coords(3, 3)));
    }
}
