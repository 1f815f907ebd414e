//! Presentation layer
//!
//! Everything here reads a `BoardView` snapshot taken from the controller,
//! so text output and PNG rendering never reach into game state directly.

pub mod renderer;
pub mod text;
pub mod view;

pub use renderer::{BoardLayout, BoardRenderer, RendererError};
pub use view::{BoardView, CellView, ClueView};
