//! Word entries and their placement geometry
//!
//! A `WordEntry` is one clue/answer record with its position on the grid.
//! Entries are immutable once loaded; solved state lives in the game session.

use std::fmt;

use crate::domain::core::{GridCoords, Orientation};

/// Unique key of a word: orientation plus clue number (`across-1`, `down-2`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordId {
    pub orientation: Orientation,
    pub number: u32,
}

impl WordId {
    pub fn new(orientation: Orientation, number: u32) -> Self {
        Self { orientation, number }
    }

    /// Parses the `across-1` form produced by `Display`
    pub fn parse(value: &str) -> Option<Self> {
        let (orientation, number) = value.trim().split_once('-')?;
        let orientation = Orientation::parse(orientation)?;
        let number = number.parse().ok()?;
        Some(Self::new(orientation, number))
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.orientation, self.number)
    }
}

/// One clue/answer record with grid placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    /// Clue number shown in the start cell
    pub id: u32,
    pub orientation: Orientation,
    /// One-based column of the first letter
    pub start_x: u32,
    /// One-based row of the first letter
    pub start_y: u32,
    /// Uppercase answer letters
    pub answer: Vec<char>,
    pub clue: String,
}

impl WordEntry {
    /// Creates an entry, normalising the answer to uppercase
    ///
    /// No validation happens here; `source::into_entries` rejects malformed
    /// records before they reach the grid.
    pub fn new(
        id: u32,
        orientation: Orientation,
        start_x: u32,
        start_y: u32,
        answer: &str,
        clue: impl Into<String>,
    ) -> Self {
        Self {
            id,
            orientation,
            start_x,
            start_y,
            answer: answer.chars().flat_map(char::to_uppercase).collect(),
            clue: clue.into(),
        }
    }

    pub fn word_id(&self) -> WordId {
        WordId::new(self.orientation, self.id)
    }

    pub fn len(&self) -> usize {
        self.answer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answer.is_empty()
    }

    pub fn answer_string(&self) -> String {
        self.answer.iter().collect()
    }

    /// Zero-based coordinates of the first letter
    ///
    /// `None` when the one-based start is 0 on either axis.
    pub fn start(&self) -> Option<GridCoords> {
        Some(GridCoords::new(
            self.start_x.checked_sub(1)?,
            self.start_y.checked_sub(1)?,
        ))
    }

    /// Zero-based coordinates of every letter in reading order
    ///
    /// Empty when the start is invalid. Coordinates are not bounds-checked
    /// against any grid.
    pub fn cells(&self) -> Vec<GridCoords> {
        let Some(start) = self.start() else {
            return Vec::new();
        };

        (0..self.answer.len() as u32)
            .map_while(|step| start.advanced(self.orientation, step))
            .collect()
    }

    /// Returns the letter index at `coords` if this entry occupies it
    pub fn position_of(&self, coords: GridCoords) -> Option<usize> {
        let start = self.start()?;
        let (along, fixed_matches) = match self.orientation {
            Orientation::Across => (coords.x.checked_sub(start.x)?, coords.y == start.y),
            Orientation::Down => (coords.y.checked_sub(start.y)?, coords.x == start.x),
        };

        let along = along as usize;
        (fixed_matches && along < self.answer.len()).then_some(along)
    }

    pub fn contains(&self, coords: GridCoords) -> bool {
        self.position_of(coords).is_some()
    }
}
