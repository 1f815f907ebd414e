//! Player input
//!
//! Turns terminal command lines into game commands. Parsing is pure; the
//! binary applies the resulting `Command` to the controller.

pub mod command;

pub use command::{Command, CommandError};
