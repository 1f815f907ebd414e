//! Clue list loading
//!
//! Fetches the clue list once at startup, either over HTTP or from a local
//! JSON file, validates every record and places the words on a grid. Any
//! malformed record fails the whole load; a partially built puzzle is never
//! returned.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::domain::core::{Orientation, normalize_letter};
use crate::domain::grid::{Grid, PlacementError};
use crate::domain::word::{WordEntry, WordId};

pub type Result<T> = std::result::Result<T, LoadError>;

/// Why the clue list could not be turned into a playable puzzle
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not read clue file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("clue list is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("clue list is empty")]
    Empty,

    #[error("record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("duplicate word {word}")]
    DuplicateWord { word: WordId },

    #[error("puzzle does not fit the grid: {0}")]
    Placement(#[from] PlacementError),
}

/// One record as served by the clue endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClueRecord {
    #[serde(rename = "ID")]
    pub id: u32,
    pub orientation: String,
    pub start_x: u32,
    pub start_y: u32,
    pub answer: String,
    pub clue: String,
}

impl ClueRecord {
    fn into_entry(self, index: usize) -> Result<WordEntry> {
        let invalid = |reason: String| LoadError::InvalidRecord { index, reason };

        let orientation = Orientation::parse(&self.orientation)
            .ok_or_else(|| invalid(format!("unknown orientation {:?}", self.orientation)))?;

        if self.id == 0 {
            return Err(invalid("clue number must be at least 1".into()));
        }
        if self.start_x == 0 || self.start_y == 0 {
            return Err(invalid(format!(
                "start ({}, {}) is not 1-based",
                self.start_x, self.start_y
            )));
        }

        let answer = self.answer.trim();
        if answer.is_empty() {
            return Err(invalid("answer is empty".into()));
        }
        let letters = answer
            .chars()
            .map(normalize_letter)
            .collect::<Option<String>>()
            .ok_or_else(|| invalid(format!("answer {answer:?} contains non-letters")))?;

        Ok(WordEntry::new(
            self.id,
            orientation,
            self.start_x,
            self.start_y,
            &letters,
            self.clue.trim(),
        ))
    }
}

/// A loaded, validated and placed puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub entries: Vec<WordEntry>,
    pub grid: Grid,
}

impl Puzzle {
    /// Places `entries` on a fresh `width` x `height` grid
    pub fn new(entries: Vec<WordEntry>, width: u32, height: u32) -> Result<Self> {
        let grid = Grid::with_entries(width, height, &entries)?;
        Ok(Self { entries, grid })
    }
}

/// Parses the JSON array served by the clue endpoint
pub fn parse_clues(json: &str) -> Result<Vec<ClueRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Validates records and converts them into word entries, keeping order
pub fn into_entries(records: Vec<ClueRecord>) -> Result<Vec<WordEntry>> {
    if records.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut seen = HashSet::with_capacity(records.len());
    let mut entries = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let entry = record.into_entry(index)?;
        if !seen.insert(entry.word_id()) {
            return Err(LoadError::DuplicateWord { word: entry.word_id() });
        }
        entries.push(entry);
    }

    Ok(entries)
}

/// Reads a clue list from a local JSON file
pub fn load_clues_file(path: &Path) -> Result<Vec<ClueRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_clues(&content)
}

/// Fetches the clue list from `url` with `?action=<action>`
pub fn fetch_clues(url: &str, action: &str, timeout: Duration) -> Result<Vec<ClueRecord>> {
    let client = Client::builder()
        .connect_timeout(timeout.min(Duration::from_secs(5)))
        .timeout(timeout)
        .build()?;

    request_clues(&client, url, action)
}

/// Sends the clue request on an existing client
///
/// Non-2xx responses fail with `LoadError::Http` before the body is read.
pub fn request_clues(client: &Client, url: &str, action: &str) -> Result<Vec<ClueRecord>> {
    debug!(url, action, "requesting clue list");
    let body = client
        .get(url)
        .query(&[("action", action)])
        .send()?
        .error_for_status()?
        .text()?;

    parse_clues(&body)
}

/// Loads the clue list named by `config` and builds the puzzle
pub fn load_puzzle(config: &GameConfig) -> Result<Puzzle> {
    let records = match &config.clue_file {
        Some(path) => load_clues_file(path)?,
        None => fetch_clues(
            &config.clue_url,
            &config.clue_action,
            Duration::from_secs(config.request_timeout_secs),
        )?,
    };

    let entries = into_entries(records)?;
    let puzzle = Puzzle::new(entries, config.grid_width, config.grid_height)?;
    info!(
        words = puzzle.entries.len(),
        width = config.grid_width,
        height = config.grid_height,
        "puzzle loaded"
    );
    Ok(puzzle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    const SAMPLE: &str = r#"[
        {"ID": 1, "Orientation": "across", "StartX": 1, "StartY": 1, "Answer": "cat", "Clue": "Feline "},
        {"ID": 2, "Orientation": "down", "StartX": 1, "StartY": 1, "Answer": "COW", "Clue": "Bovine"}
    ]"#;

    fn record(orientation: &str, answer: &str) -> ClueRecord {
        ClueRecord {
            id: 1,
            orientation: orientation.into(),
            start_x: 1,
            start_y: 1,
            answer: answer.into(),
            clue: "clue".into(),
        }
    }

    #[test]
    fn parses_endpoint_records() {
        let records = parse_clues(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[1].orientation, "down");

        let entries = into_entries(records).unwrap();
        assert_eq!(entries[0].answer_string(), "CAT");
        assert_eq!(entries[0].clue, "Feline");
        assert_eq!(entries[1].word_id(), WordId::new(Orientation::Down, 2));
    }

    #[test]
    fn missing_field_fails_the_load() {
        let json = r#"[{"ID": 1, "Orientation": "across", "StartX": 1, "Answer": "CAT", "Clue": ""}]"#;
        assert!(matches!(parse_clues(json), Err(LoadError::Json(_))));
    }

    #[test]
    fn wrongly_typed_field_fails_the_load() {
        let json = r#"[{"ID": "one", "Orientation": "across", "StartX": 1, "StartY": 1, "Answer": "CAT", "Clue": ""}]"#;
        assert!(matches!(parse_clues(json), Err(LoadError::Json(_))));
    }

    #[test]
    fn invalid_records_are_rejected() {
        assert!(matches!(
            into_entries(vec![record("across", "")]),
            Err(LoadError::InvalidRecord { index: 0, .. })
        ));
        assert!(matches!(
            into_entries(vec![record("across", "C4T")]),
            Err(LoadError::InvalidRecord { .. })
        ));
        assert!(matches!(
            into_entries(vec![record("sideways", "CAT")]),
            Err(LoadError::InvalidRecord { .. })
        ));

        let mut zero_start = record("down", "CAT");
        zero_start.start_y = 0;
        assert!(matches!(into_entries(vec![zero_start]), Err(LoadError::InvalidRecord { .. })));
    }

    #[test]
    fn duplicate_word_ids_are_rejected() {
        let result = into_entries(vec![record("across", "CAT"), record("across", "COW")]);
        assert!(matches!(result, Err(LoadError::DuplicateWord { .. })));

        // Same number in both orientations is fine
        assert!(into_entries(vec![record("across", "CAT"), record("down", "COW")]).is_ok());
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(matches!(into_entries(Vec::new()), Err(LoadError::Empty)));
    }

    #[test]
    fn load_puzzle_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = GameConfig {
            clue_file: Some(file.path().to_path_buf()),
            ..GameConfig::default()
        };
        let puzzle = load_puzzle(&config).unwrap();
        assert_eq!(puzzle.entries.len(), 2);
        assert_eq!(puzzle.grid.dimensions(), (15, 15));
    }

    #[test]
    fn placement_failure_rejects_the_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = GameConfig {
            grid_width: 2,
            grid_height: 2,
            clue_file: Some(file.path().to_path_buf()),
            ..GameConfig::default()
        };
        assert!(matches!(
            load_puzzle(&config),
            Err(LoadError::Placement(PlacementError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_clues_file(Path::new("/no/such/clues.json"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    /// Serves one HTTP response on a local port and returns the request line
    fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/clues", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                if header.trim().is_empty() {
                    break;
                }
            }
            reader.get_mut().write_all(response.as_bytes()).unwrap();
            request_line
        });

        (url, handle)
    }

    fn local_client() -> Client {
        Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    #[test]
    fn fetch_sends_action_and_parses_body() {
        let (url, server) = serve_once("200 OK", SAMPLE);

        let records = request_clues(&local_client(), &url, "getClues").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].answer, "cat");

        let request_line = server.join().unwrap();
        assert!(request_line.starts_with("GET /clues?action=getClues "), "{request_line}");
    }

    #[test]
    fn server_error_is_a_fetch_error() {
        let (url, server) = serve_once("500 Internal Server Error", "");

        match request_clues(&local_client(), &url, "getClues") {
            Err(LoadError::Http(err)) => {
                assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
            }
            other => panic!("expected an HTTP error, got {other:?}"),
        }
        server.join().unwrap();
    }

    #[test]
    fn malformed_body_fails_the_fetch() {
        let (url, server) = serve_once("200 OK", "[{\"ID\": 1}]");
        assert!(matches!(
            request_clues(&local_client(), &url, "getClues"),
            Err(LoadError::Json(_))
        ));
        server.join().unwrap();
    }

    #[test]
    fn unreachable_endpoint_is_a_fetch_error() {
        // Bind then drop to get a port nobody listens on
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}/clues");
        assert!(matches!(
            request_clues(&local_client(), &url, "getClues"),
            Err(LoadError::Http(_))
        ));
    }
}
