//! High-score persistence.
//!
//! [`ScoreStore`] keeps the best score in memory and mirrors it into a
//! key-value medium ([`KvBackend`]). Every medium failure is logged and
//! absorbed: the game keeps running on the in-memory value.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, error, warn};
use thiserror::Error;

use crate::types::HIGH_SCORE_KEY;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage medium unavailable")]
    Unavailable,
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("invalid score value {0:?}")]
    InvalidScoreValue(String),
}

/// A string-keyed storage medium.
pub trait KvBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Volatile medium, for tests and hosts without a writable disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slots: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.to_string(), value.to_string());
        Self { slots }
    }
}

impl KvBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.slots.remove(key);
        Ok(())
    }
}

/// All slots live in one JSON object on disk: `{"snakeGameHighScore": "120"}`.
///
/// The file is re-read on every access so that two running games do not
/// clobber unrelated slots. A missing file reads as empty. A file that is
/// not valid JSON is renamed to `<path>.corrupt` before the next write
/// starts a fresh one, so its contents are never silently lost.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unparsable file is moved before it is rewritten.
    pub fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, slots: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let text = serde_json::to_string_pretty(slots)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl KvBackend for JsonFileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut slots = match self.load() {
            Ok(slots) => slots,
            Err(StoreError::Corrupt(e)) => {
                let aside = self.corrupt_path();
                warn!(
                    "score file {} is corrupt ({}); moving it to {}",
                    self.path.display(),
                    e,
                    aside.display()
                );
                fs::rename(&self.path, &aside)?;
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        slots.insert(key.to_string(), value.to_string());
        self.save(&slots)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut slots = self.load()?;
        if slots.remove(key).is_some() {
            self.save(&slots)?;
        }
        Ok(())
    }
}

/// Parse a stored or user-supplied score: a decimal, non-negative integer.
pub fn parse_score(raw: &str) -> Result<u32, StoreError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| StoreError::InvalidScoreValue(raw.to_string()))
}

/// The persistent high score.
pub struct ScoreStore {
    backend: Option<Box<dyn KvBackend>>,
    high_score: u32,
}

impl ScoreStore {
    /// Open the store on `backend`, loading the persisted value.
    ///
    /// `None` means no medium is available; the store then works purely in
    /// memory for the lifetime of the process.
    pub fn new(backend: Option<Box<dyn KvBackend>>) -> Self {
        let mut store = Self {
            backend,
            high_score: 0,
        };
        if store.backend.is_none() {
            warn!("score storage is not available; high scores will not persist");
        }
        store.load();
        store
    }

    /// Store over a fresh [`MemoryBackend`].
    pub fn volatile() -> Self {
        Self::new(Some(Box::new(MemoryBackend::new())))
    }

    pub fn is_persistent(&self) -> bool {
        self.backend.is_some()
    }

    /// Re-read the medium. Absent, unreadable or malformed values leave the
    /// in-memory value untouched.
    pub fn load(&mut self) {
        let Some(backend) = self.backend.as_ref() else {
            return;
        };
        match backend.read(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => match parse_score(&raw) {
                Ok(score) => self.high_score = score,
                Err(e) => warn!("ignoring stored high score: {}", e),
            },
            Ok(None) => {}
            Err(e) => error!("error loading high score: {}", e),
        }
    }

    pub fn get(&self) -> u32 {
        self.high_score
    }

    /// Record `score` if it beats the stored value.
    ///
    /// Returns `true` when the score was accepted and persisted (or accepted
    /// with no medium configured). A failed write still updates the
    /// in-memory value but returns `false`.
    pub fn set(&mut self, score: u32) -> bool {
        if score <= self.high_score {
            return false;
        }
        self.high_score = score;
        let Some(backend) = self.backend.as_mut() else {
            return true;
        };
        match backend.write(HIGH_SCORE_KEY, &score.to_string()) {
            Ok(()) => {
                debug!("high score persisted: {}", score);
                true
            }
            Err(e) => {
                error!("error updating high score: {}", e);
                false
            }
        }
    }

    /// [`set`](Self::set) for untyped input. Anything that is not a decimal
    /// non-negative integer is rejected without touching the store.
    pub fn set_raw(&mut self, raw: &str) -> bool {
        match parse_score(raw) {
            Ok(score) => self.set(score),
            Err(e) => {
                debug!("{}", e);
                false
            }
        }
    }

    /// Reset to 0 and drop the persisted record.
    pub fn clear(&mut self) {
        self.high_score = 0;
        if let Some(backend) = self.backend.as_mut() {
            if let Err(e) = backend.remove(HIGH_SCORE_KEY) {
                error!("error resetting high score: {}", e);
            }
        }
    }
}

impl std::fmt::Debug for ScoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreStore")
            .field("persistent", &self.backend.is_some())
            .field("high_score", &self.high_score)
            .finish()
    }
}
