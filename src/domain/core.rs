//! Core domain types and operations
//!
//! This module defines the coordinate and orientation primitives shared by
//! every other part of the puzzle logic. All coordinates are zero-based grid
//! indices; the one-based values found in clue data are converted at the
//! edge (see `WordEntry::start`).

use std::fmt;

/// Zero-based grid position, `x` is the column and `y` the row
///
/// - (0,0) = top-left cell
/// - (1,0) = top row, second column
/// - (0,1) = second row, first column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoords {
    pub x: u32,
    pub y: u32,
}

impl GridCoords {
    /// Creates new grid coordinates
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Returns the coordinates `steps` cells further along `orientation`
    ///
    /// Returns `None` on arithmetic overflow. Bounds against a concrete grid
    /// are checked by the caller.
    pub fn advanced(self, orientation: Orientation, steps: u32) -> Option<Self> {
        match orientation {
            Orientation::Across => self.x.checked_add(steps).map(|x| Self::new(x, self.y)),
            Orientation::Down => self.y.checked_add(steps).map(|y| Self::new(self.x, y)),
        }
    }

    /// Returns the neighbouring cell one step forward along `orientation`
    pub fn next(self, orientation: Orientation) -> Option<Self> {
        self.advanced(orientation, 1)
    }

    /// Returns the neighbouring cell one step back along `orientation`
    ///
    /// `None` when already on the first row/column.
    pub fn previous(self, orientation: Orientation) -> Option<Self> {
        match orientation {
            Orientation::Across => self.x.checked_sub(1).map(|x| Self::new(x, self.y)),
            Orientation::Down => self.y.checked_sub(1).map(|y| Self::new(self.x, y)),
        }
    }
}

impl fmt::Display for GridCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Direction a word reads in
///
/// Ordering puts `Across` before `Down`; the highlight selector relies on it
/// when a shared cell has no preferred orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    /// Left to right
    Across,
    /// Top to bottom
    Down,
}

impl Orientation {
    /// Lowercase name used in word ids and clue data
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Across => "across",
            Orientation::Down => "down",
        }
    }

    /// Parses a lowercase or capitalised orientation name
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "across" => Some(Orientation::Across),
            "down" => Some(Orientation::Down),
            _ => None,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalises a typed or loaded character into a grid letter
///
/// Returns the uppercase form of an alphabetic character, or `None` for
/// anything else (digits, punctuation, whitespace, or characters whose
/// uppercase form expands to more than one character).
pub fn normalize_letter(ch: char) -> Option<char> {
    if !ch.is_alphabetic() {
        return None;
    }

    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => Some(single),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_step_along_orientation() {
        let origin = GridCoords::new(2, 3);
        assert_eq!(origin.next(Orientation::Across), Some(GridCoords::new(3, 3)));
        assert_eq!(origin.next(Orientation::Down), Some(GridCoords::new(2, 4)));
        assert_eq!(origin.previous(Orientation::Across), Some(GridCoords::new(1, 3)));
        assert_eq!(origin.previous(Orientation::Down), Some(GridCoords::new(2, 2)));
        assert_eq!(origin.advanced(Orientation::Across, 4), Some(GridCoords::new(6, 3)));
    }

    #[test]
    fn previous_stops_at_grid_edge() {
        let corner = GridCoords::new(0, 0);
        assert_eq!(corner.previous(Orientation::Across), None);
        assert_eq!(corner.previous(Orientation::Down), None);
    }

    #[test]
    fn orientation_parsing() {
        assert_eq!(Orientation::parse("across"), Some(Orientation::Across));
        assert_eq!(Orientation::parse("Down"), Some(Orientation::Down));
        assert_eq!(Orientation::parse("diagonal"), None);
        assert!(Orientation::Across < Orientation::Down);
    }

    #[test]
    fn letter_normalization() {
        assert_eq!(normalize_letter('c'), Some('C'));
        assert_eq!(normalize_letter('Ñ'), Some('Ñ'));
        assert_eq!(normalize_letter('ñ'), Some('Ñ'));
        assert_eq!(normalize_letter('7'), None);
        assert_eq!(normalize_letter(' '), None);
        // 'ß' uppercases to "SS"
        assert_eq!(normalize_letter('ß'), None);
    }
}
