//! Command-line parsing for the terminal front-end
//!
//! One command per line. Coordinates are one-based like the clue data, so
//! `focus 1 1` is the top-left cell.

use std::path::PathBuf;

use crate::domain::core::GridCoords;
use crate::domain::word::WordId;

/// Errors that can occur while parsing a command line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("'{0}' is not a one-based coordinate")]
    InvalidCoordinate(String),
    #[error("'{0}' is not a word id like across-1 or down-2")]
    InvalidWordId(String),
}

/// Actions the player can take
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Focus a cell (zero-based after parsing)
    Focus(GridCoords),
    /// Highlight a word from the clue list
    Clue(WordId),
    /// Type letters one by one at the focused cell
    Type(String),
    /// Backspace at the focused cell
    Backspace,
    /// Clear the focused cell
    Delete,
    /// Run the completion checker
    Check,
    /// Print board, clues and status
    Show,
    /// Render the board to a PNG file
    Render(PathBuf),
    Restart,
    Help,
    Quit,
}

impl Command {
    /// Usage text printed by `help`
    pub const HELP: &'static str = "\
commands:
  focus X Y     focus the cell at column X, row Y (1-based)
  clue ID       highlight a word, e.g. clue across-1
  type LETTERS  type letters starting at the focused cell
  back          backspace at the focused cell
  del           clear the focused cell
  check         check all words
  show          print the board and clues
  render PATH   save the board as a PNG
  restart       clear the board and start over
  quit          leave the game";

    /// Parses one input line; blank lines yield `None`
    ///
    /// # Example
    /// ```rust
    /// use crossword::input::Command;
    /// use crossword::domain::GridCoords;
    ///
    /// let command = Command::parse("focus 2 3").unwrap();
    /// assert_eq!(command, Some(Command::Focus(GridCoords::new(1, 2))));
    /// ```
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(None);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "focus" | "f" => {
                let missing = CommandError::MissingArgument {
                    command: "focus",
                    expected: "two coordinates, e.g. focus 1 1",
                };
                let x = parts.next().ok_or_else(|| missing.clone())?;
                let y = parts.next().ok_or(missing)?;
                Command::Focus(GridCoords::new(parse_coordinate(x)?, parse_coordinate(y)?))
            }
            "clue" | "c" => {
                let id = parts.next().ok_or(CommandError::MissingArgument {
                    command: "clue",
                    expected: "a word id, e.g. clue across-1",
                })?;
                Command::Clue(WordId::parse(id).ok_or_else(|| CommandError::InvalidWordId(id.into()))?)
            }
            "type" | "t" => {
                let letters: String = parts.collect();
                if letters.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "type",
                        expected: "letters to enter",
                    });
                }
                Command::Type(letters)
            }
            "back" | "backspace" | "b" => Command::Backspace,
            "del" | "delete" | "d" => Command::Delete,
            "check" => Command::Check,
            "show" | "s" => Command::Show,
            "render" => {
                let path = parts.next().ok_or(CommandError::MissingArgument {
                    command: "render",
                    expected: "an output path",
                })?;
                Command::Render(PathBuf::from(path))
            }
            "restart" => Command::Restart,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_coordinate(value: &str) -> Result<u32, CommandError> {
    value
        .parse::<u32>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| CommandError::InvalidCoordinate(value.to_string()))
}
