//! Game lifecycle state management
//!
//! Defines the game state machine and its transitions. A game starts in
//! `Loading`, becomes `Playing` once the clue list is placed on the grid and
//! ends in `Won`. A failed load is terminal: the only way out is a fresh
//! start of the program.

/// Main game state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GameState {
    /// Waiting for the clue list; no input is accepted
    #[default]
    Loading,
    /// Puzzle is on the grid and accepting input
    Playing,
    /// Every word is solved
    Won { elapsed_secs: u64 },
    /// The clue list could not be loaded
    Unplayable { reason: String },
}

impl GameState {
    /// True while letters may be entered
    pub fn accepts_input(&self) -> bool {
        matches!(self, GameState::Playing)
    }
}

/// Possible state transition events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    /// Clue list loaded and placed
    PuzzleLoaded,
    /// Fetching or validating the clue list failed
    LoadFailed(String),
    /// The completion checker found every word solved
    PuzzleSolved { elapsed_secs: u64 },
    /// Player asked for a fresh board
    Restart,
}

/// State machine for game state transitions
pub struct StateMachine;

impl StateMachine {
    /// Processes a state event and returns the new state
    ///
    /// Events that make no sense in the current state leave it unchanged.
    pub fn process_event(current_state: GameState, event: StateEvent) -> GameState {
        match (current_state, event) {
            (GameState::Loading, StateEvent::PuzzleLoaded) => GameState::Playing,

            (GameState::Loading, StateEvent::LoadFailed(reason)) => {
                GameState::Unplayable { reason }
            }

            (GameState::Playing, StateEvent::PuzzleSolved { elapsed_secs }) => {
                GameState::Won { elapsed_secs }
            }

            // Restart keeps the loaded puzzle and clears the board
            (GameState::Playing | GameState::Won { .. }, StateEvent::Restart) => GameState::Playing,

            // Invalid transitions - ignore event
            (state, _) => state,
        }
    }
}
