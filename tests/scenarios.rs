//! End-to-end game scenarios driven through the public API

use crossword::app::{EventLog, GameController, GameEvent, GameState};
use crossword::domain::Orientation::{Across, Down};
use crossword::domain::{GridCoords, WordEntry, WordId};
use crossword::source::Puzzle;
use pretty_assertions::assert_eq;

fn at(x: u32, y: u32) -> GridCoords {
    GridCoords::new(x, y)
}

fn game(entries: Vec<WordEntry>, width: u32, height: u32) -> GameController<EventLog> {
    let puzzle = Puzzle::new(entries, width, height).unwrap();
    GameController::new(puzzle, 10, EventLog::new())
}

fn crossing() -> Vec<WordEntry> {
    vec![
        WordEntry::new(1, Across, 1, 1, "CAT", "Feline"),
        WordEntry::new(2, Down, 1, 1, "COW", "Bovine"),
    ]
}

#[test]
fn single_word_puzzle_is_won_by_filling_it() {
    let mut game = game(vec![WordEntry::new(1, Across, 1, 1, "CAT", "Feline")], 15, 15);

    game.enter_letter(at(0, 0), 'C');
    game.enter_letter(at(1, 0), 'A');
    assert_eq!(game.solved_count(), 0);
    game.enter_letter(at(2, 0), 'T');

    let across = WordId::new(Across, 1);
    assert!(game.is_solved(across));
    assert_eq!(game.score(), 10);
    assert!(matches!(game.state(), GameState::Won { .. }));
    assert!(!game.timer().is_running());

    let log = game.listener();
    assert_eq!(log.solved_words(), vec![across]);
    assert_eq!(log.puzzle_solved_count(), 1);
    let Some(GameEvent::PuzzleSolved { elapsed_secs }) = log.events().last().cloned() else {
        panic!("last event should be the win, got {:?}", log.events().last());
    };
    assert_eq!(elapsed_secs, game.timer().elapsed_secs());
}

#[test]
fn crossing_words_share_the_start_cell() {
    let mut game = game(crossing(), 15, 15);

    let start = game.grid().cell(at(0, 0)).copied().unwrap();
    assert_eq!(start.clue_number, Some(1));
    assert!(start.is_active());

    game.enter_letter(at(0, 0), 'c');
    let letter = game.grid().cell(at(0, 0)).and_then(|cell| cell.letter);
    assert_eq!(letter, Some('C'));
    for entry in game.entries() {
        assert_eq!(entry.answer[0], 'C', "{} should start with C", entry.word_id());
    }
    assert_eq!(game.solved_count(), 0);
}

#[test]
fn shared_cell_without_history_highlights_across() {
    let mut game = game(crossing(), 15, 15);

    assert!(game.focus_cell(at(0, 0)));
    let active = game.active_word().map(WordEntry::word_id);
    assert_eq!(active, Some(WordId::new(Across, 1)));
    assert_eq!(game.highlighted_cells(), vec![at(0, 0), at(1, 0), at(2, 0)]);
}

#[test]
fn shared_cell_keeps_down_after_down_selection() {
    let mut game = game(crossing(), 15, 15);

    game.select_clue(WordId::new(Down, 2));
    game.focus_cell(at(0, 1));
    game.focus_cell(at(0, 0));

    let active = game.active_word().map(WordEntry::word_id);
    assert_eq!(active, Some(WordId::new(Down, 2)));
}

#[test]
fn backspace_at_word_start_steps_into_crossing_word() {
    // EAR starts at (1,1); the cell before it belongs to COW
    let mut entries = crossing();
    entries.push(WordEntry::new(3, Across, 2, 2, "EAR", "Hearing organ"));
    let mut game = game(entries, 5, 5);

    game.select_clue(WordId::new(Across, 3));
    assert_eq!(game.focus(), Some(at(1, 1)));

    game.backspace(at(1, 1));
    assert_eq!(game.focus(), Some(at(0, 1)));
    let active = game.active_word().map(WordEntry::word_id);
    assert_eq!(active, Some(WordId::new(Down, 2)));
}

#[test]
fn backspace_at_word_start_stays_at_edge_or_black_cell() {
    let mut game = game(
        vec![
            WordEntry::new(1, Across, 1, 1, "CAT", ""),
            WordEntry::new(2, Across, 2, 3, "AT", ""),
        ],
        4,
        4,
    );

    game.select_clue(WordId::new(Across, 1));
    game.backspace(at(0, 0));
    assert_eq!(game.focus(), Some(at(0, 0)));

    // (0,2) is blacked out
    game.select_clue(WordId::new(Across, 2));
    game.backspace(at(1, 2));
    assert_eq!(game.focus(), Some(at(1, 2)));
}

#[test]
fn placed_paths_are_never_black() {
    let mut entries = crossing();
    entries.push(WordEntry::new(3, Across, 2, 2, "EAR", ""));
    let game = game(entries, 6, 6);

    for entry in game.entries() {
        for coords in entry.cells() {
            let cell = game.grid().cell(coords).unwrap();
            assert!(!cell.blacked_out, "{coords} on {} is black", entry.word_id());
        }
    }
}

#[test]
fn clue_numbers_mark_exactly_the_start_cells() {
    let mut entries = crossing();
    entries.push(WordEntry::new(3, Across, 2, 2, "EAR", ""));
    let game = game(entries, 6, 6);

    let starts: Vec<GridCoords> = game.entries().iter().filter_map(WordEntry::start).collect();
    for y in 0..6 {
        for x in 0..6 {
            let coords = at(x, y);
            let numbered = game.grid().cell(coords).unwrap().clue_number.is_some();
            assert_eq!(numbered, starts.contains(&coords), "clue number at {coords}");
        }
    }
}

#[test]
fn completion_check_is_idempotent() {
    let mut game = game(crossing(), 15, 15);
    for (x, ch) in [(0, 'C'), (1, 'A'), (2, 'T')] {
        game.enter_letter(at(x, 0), ch);
    }
    let events = game.listener_mut().drain();
    assert_eq!(
        events.iter().filter(|event| matches!(event, GameEvent::WordSolved { .. })).count(),
        1
    );

    let report = game.check_completion();
    assert!(!report.has_changes());
    assert!(game.listener().events().is_empty());
    assert_eq!(game.score(), 10);
}

#[test]
fn solved_words_are_locked() {
    let mut game = game(crossing(), 15, 15);
    for (x, ch) in [(0, 'c'), (1, 'a'), (2, 't')] {
        game.enter_letter(at(x, 0), ch);
    }
    assert!(game.is_solved(WordId::new(Across, 1)));

    assert!(!game.enter_letter(at(1, 0), 'X'));
    assert!(!game.delete_letter(at(1, 0)));
    assert!(!game.backspace(at(2, 0)));
    assert_eq!(game.grid().cell(at(1, 0)).and_then(|cell| cell.letter), Some('A'));

    game.check_completion();
    assert!(game.is_solved(WordId::new(Across, 1)));
}

#[test]
fn wrong_letter_leaves_word_unsolved_until_fixed() {
    let mut game = game(crossing(), 15, 15);
    game.select_clue(WordId::new(Down, 2));
    for ch in ['C', 'O', 'X'] {
        let focus = game.focus().unwrap();
        game.enter_letter(focus, ch);
    }
    assert!(!game.is_solved(WordId::new(Down, 2)));

    game.enter_letter(at(0, 2), 'W');
    assert!(game.is_solved(WordId::new(Down, 2)));
    assert_eq!(game.state(), &GameState::Playing);
}

#[test]
fn restart_after_win_plays_again() {
    let mut game = game(vec![WordEntry::new(1, Across, 1, 1, "CAT", "")], 5, 5);
    for (x, ch) in [(0, 'C'), (1, 'A'), (2, 'T')] {
        game.enter_letter(at(x, 0), ch);
    }
    assert!(matches!(game.state(), GameState::Won { .. }));

    game.restart();
    assert_eq!(game.state(), &GameState::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.focus(), None);
    assert!(game.timer().is_running());
    assert!(game.enter_letter(at(0, 0), 'C'));
}
