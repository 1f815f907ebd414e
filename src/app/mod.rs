//! Application orchestration layer
//!
//! This module owns the game session: the controller that applies input,
//! the lifecycle state machine, the stopwatch and the outbound event seam.

pub mod controller;
pub mod events;
pub mod state;
pub mod timer;

pub use controller::GameController;
pub use events::{EventLog, GameEvent, GameListener, NoopListener};
pub use state::{GameState, StateEvent, StateMachine};
pub use timer::{GameTimer, format_clock};
