//! Best score stores.
//!
//! Scores are keyed by [`BEST_SCORE_KEY`]. A store with nothing saved loads
//! as `None`, which [`load_best_score`] turns into 0.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Fixed identifier the best score is stored under.
pub const BEST_SCORE_KEY: &str = "2048-best-score";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backing file is not a JSON object of scores
    #[error("store format error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Somewhere the best score survives between sessions.
pub trait BestScoreStore {
    /// Load the stored best score, `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<u32>, StoreError>;

    /// Save the best score.
    fn save(&mut self, best_score: u32) -> Result<(), StoreError>;
}

/// Load the best score, defaulting to 0 when nothing is stored.
pub fn load_best_score<S: BestScoreStore + ?Sized>(store: &S) -> Result<u32, StoreError> {
    Ok(store.load()?.unwrap_or(0))
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process store, lost on exit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    best_score: Option<u32>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.best_score)
    }

    fn save(&mut self, best_score: u32) -> Result<(), StoreError> {
        self.best_score = Some(best_score);
        Ok(())
    }
}

// =============================================================================
// JSON FILE STORE
// =============================================================================

/// Store backed by a JSON object on disk, e.g. `{"2048-best-score": 1024}`.
///
/// Other keys in the file are preserved on save.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the given path. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, u32>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl BestScoreStore for JsonFileStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.read_entries()?.get(BEST_SCORE_KEY).copied())
    }

    fn save(&mut self, best_score: u32) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(BEST_SCORE_KEY.to_string(), best_score);

        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        debug!("Saved best score {} to {}", best_score, self.path.display());
        Ok(())
    }
}
