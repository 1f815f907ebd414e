use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crossword::app::{GameController, GameListener, GameState, StateEvent, StateMachine, format_clock};
use crossword::config::{ConfigError, GameConfig};
use crossword::domain::{GridCoords, WordId};
use crossword::input::Command;
use crossword::source::{self, LoadError};
use crossword::ui::text::{render_board, render_clues, render_status};
use crossword::ui::{BoardRenderer, BoardView, RendererError};

/// Terminal crossword
#[derive(Debug, Parser)]
#[command(name = "crossword", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Clue endpoint, overrides `clue_url`
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Local JSON clue list, overrides `clue_file`
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Points awarded per solved word
    #[arg(long)]
    points: Option<u32>,

    /// Font used for letters in rendered PNG boards
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Could not load the puzzle: {0}")]
    Load(#[from] LoadError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl Cli {
    fn into_config(self) -> Result<GameConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(url) = self.url {
            config.clue_url = url;
        }
        if let Some(file) = self.file {
            config.clue_file = Some(file);
        }
        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(points) = self.points {
            config.points_per_word = points;
        }
        if let Some(font) = self.font {
            config.font_path = Some(font);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Prints scoring events as they happen
struct ConsoleListener;

impl GameListener for ConsoleListener {
    fn on_cell_changed(&mut self, coords: GridCoords, letter: Option<char>) {
        debug!(%coords, ?letter, "cell changed");
    }

    fn on_focus_changed(&mut self, coords: GridCoords) {
        debug!(%coords, "focus changed");
    }

    fn on_highlight_changed(&mut self, word: Option<WordId>) {
        debug!(?word, "highlight changed");
    }

    fn on_word_solved(&mut self, word: WordId, points: u32) {
        println!("solved {word}! +{points}");
    }

    fn on_puzzle_solved(&mut self, elapsed_secs: u64) {
        println!("puzzle complete in {}", format_clock(elapsed_secs));
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crossword=info")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = cli.into_config()?;

    let state = GameState::default();
    let puzzle = match source::load_puzzle(&config) {
        Ok(puzzle) => puzzle,
        Err(err) => {
            let state = StateMachine::process_event(state, StateEvent::LoadFailed(err.to_string()));
            error!(?state, "puzzle unplayable");
            return Err(err.into());
        }
    };

    let renderer = match &config.font_path {
        Some(path) => BoardRenderer::with_font_file(path)?,
        None => BoardRenderer::new(),
    };

    let mut game = GameController::new(puzzle, config.points_per_word, ConsoleListener);
    show(&game);
    println!("{}", Command::HELP);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        apply(&mut game, &renderer, command);
    }

    info!(score = game.score(), "leaving game");
    Ok(())
}

fn apply(game: &mut GameController<ConsoleListener>, renderer: &BoardRenderer, command: Command) {
    match command {
        Command::Focus(coords) => {
            if !game.focus_cell(coords) {
                println!("cell {} cannot take input", one_based(coords));
                return;
            }
        }
        Command::Clue(word) => {
            if !game.select_clue(word) {
                println!("no clue {word}");
                return;
            }
        }
        Command::Type(letters) => {
            for ch in letters.chars() {
                let Some(focus) = game.focus() else {
                    println!("focus a cell first (focus X Y or clue ID)");
                    break;
                };
                if !game.enter_letter(focus, ch) {
                    println!("'{ch}' not entered at {}", one_based(focus));
                    break;
                }
            }
        }
        Command::Backspace => match game.focus() {
            Some(focus) => {
                game.backspace(focus);
            }
            None => {
                println!("no focused cell");
                return;
            }
        },
        Command::Delete => match game.focus() {
            Some(focus) => {
                game.delete_letter(focus);
            }
            None => {
                println!("no focused cell");
                return;
            }
        },
        Command::Check => {
            let report = game.check_completion();
            if !report.has_changes() {
                println!("{} of {} words solved", game.solved_count(), game.entries().len());
            }
        }
        Command::Show => {
            let view = BoardView::from_controller(game);
            println!("{}", render_clues(&view));
        }
        Command::Render(path) => {
            render(game, renderer, &path);
            return;
        }
        Command::Restart => game.restart(),
        Command::Help => {
            println!("{}", Command::HELP);
            return;
        }
        Command::Quit => return,
    }
    show(game);
}

fn render(game: &GameController<ConsoleListener>, renderer: &BoardRenderer, path: &Path) {
    let view = BoardView::from_controller(game);
    match renderer.render_png(&view, path) {
        Ok(()) => println!("board saved to {}", path.display()),
        Err(err) => println!("{err}"),
    }
}

fn show(game: &GameController<ConsoleListener>) {
    let view = BoardView::from_controller(game);
    print!("{}", render_board(&view));
    println!("{}", render_status(&view));
}

/// Coordinates as the player types them
fn one_based(coords: GridCoords) -> String {
    format!("({}, {})", coords.x + 1, coords.y + 1)
}
