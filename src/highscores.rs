//! Highscore persistence
//!
//! A single integer in a plain-text file. A missing or unreadable file is
//! never fatal: the session starts from 0 and keeps trying to save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighscoreError {
    #[error("highscore file {path} could not be accessed")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("highscore file {path} does not hold a number: {contents:?}")]
    Parse { path: PathBuf, contents: String },
}

/// Where the highscore lives between sessions
pub trait HighscoreStore {
    fn load(&mut self) -> Result<u64, HighscoreError>;
    fn save(&mut self, score: u64) -> Result<(), HighscoreError>;
}

/// Load the stored highscore, falling back to 0 on any error
pub fn load_or_zero(store: &mut dyn HighscoreStore) -> u64 {
    match store.load() {
        Ok(score) => {
            log::info!("Loaded highscore {score}");
            score
        }
        Err(e) => {
            log::warn!("{e}; starting from 0");
            0
        }
    }
}

/// Highscore stored as text at a filesystem path
#[derive(Debug, Clone)]
pub struct FileHighscoreStore {
    path: PathBuf,
}

impl FileHighscoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> HighscoreError {
        HighscoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HighscoreStore for FileHighscoreStore {
    fn load(&mut self) -> Result<u64, HighscoreError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        contents.trim().parse().map_err(|_| HighscoreError::Parse {
            path: self.path.clone(),
            contents: contents.trim().to_string(),
        })
    }

    fn save(&mut self, score: u64) -> Result<(), HighscoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, score.to_string()).map_err(|e| self.io_error(e))?;
        log::debug!("Highscore {score} saved to {}", self.path.display());
        Ok(())
    }
}

/// Highscore kept in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryHighscoreStore {
    pub score: Option<u64>,
    pub saves: Vec<u64>,
}

impl HighscoreStore for MemoryHighscoreStore {
    fn load(&mut self) -> Result<u64, HighscoreError> {
        Ok(self.score.unwrap_or(0))
    }

    fn save(&mut self, score: u64) -> Result<(), HighscoreError> {
        self.score = Some(score);
        self.saves.push(score);
        Ok(())
    }
}
