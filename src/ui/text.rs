//! Plain-text board rendering for the terminal
//!
//! Each cell is three characters wide:
//! - `###` blacked-out
//! - ` A ` / ` . ` filled or empty
//! - `<A>` part of the highlighted word
//! - `[A]` focused cell

use crate::app::timer::format_clock;
use crate::domain::core::Orientation;
use crate::ui::view::{BoardView, CellView};

fn cell_text(cell: &CellView) -> String {
    if cell.blacked_out {
        return "###".to_string();
    }

    let glyph = cell.letter.unwrap_or('.');
    let (open, close) = if cell.focused {
        ('[', ']')
    } else if cell.highlighted {
        ('<', '>')
    } else {
        (' ', ' ')
    };
    format!("{open}{glyph}{close}")
}

/// Renders the grid with one-based row and column rulers
pub fn render_board(view: &BoardView) -> String {
    let mut out = String::from("   ");
    for x in 1..=view.width {
        out.push_str(&format!("{:^3}", x % 100));
    }
    out.push('\n');

    for (y, row) in view.rows().enumerate() {
        out.push_str(&format!("{:>2} ", y + 1));
        for cell in row {
            out.push_str(&cell_text(cell));
        }
        out.push('\n');
    }
    out
}

/// Renders the across and down clue lists as `<id>. <clue>`
///
/// `>` marks the highlighted word and `✓` a solved one.
pub fn render_clues(view: &BoardView) -> String {
    let mut out = String::new();
    for (title, orientation) in [("ACROSS", Orientation::Across), ("DOWN", Orientation::Down)] {
        out.push_str(title);
        out.push('\n');
        for clue in view.clues_for(orientation) {
            let marker = if clue.active { '>' } else { ' ' };
            let solved = if clue.solved { " ✓" } else { "" };
            out.push_str(&format!("{marker} {}. {}{solved}\n", clue.word.number, clue.clue));
        }
    }
    out
}

/// One-line status: clock, score and progress
pub fn render_status(view: &BoardView) -> String {
    let mut status = format!(
        "time {}  score {}  solved {}/{}",
        format_clock(view.elapsed_secs),
        view.score,
        view.solved_count(),
        view.clues.len()
    );
    if view.won {
        status.push_str("  -- puzzle complete!");
    }
    status
}
