//! Tournament input files for the command-line harness.
//!
//! The engine itself never reads or writes storage. The binary loads a
//! tournament directory laid out as:
//! - `roster.jsonl`: one `Player` per line
//! - `games.jsonl`: one `Game` per line

mod jsonl;

pub use jsonl::*;

use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

use crate::models::{Game, Player};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Locations of a tournament's input files.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn roster_path(&self) -> PathBuf {
        self.data_dir.join("roster.jsonl")
    }

    pub fn games_path(&self) -> PathBuf {
        self.data_dir.join("games.jsonl")
    }

    /// Load the roster and game log. The roster must exist; a missing game
    /// log means no games have been played.
    pub fn load(&self) -> Result<(Vec<Player>, Vec<Game>), StorageError> {
        let roster_reader: JsonlReader<Player> = JsonlReader::new(self.roster_path());
        if !roster_reader.exists() {
            return Err(StorageError::PathNotFound(self.roster_path()));
        }
        let roster = roster_reader.read_all()?;
        let games = JsonlReader::<Game>::new(self.games_path()).read_all()?;

        info!(
            "Loaded {} players and {} games from {:?}",
            roster.len(),
            games.len(),
            self.data_dir
        );
        Ok((roster, games))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
