//! Best-score persistence
//!
//! The engine reads the stored best score once at construction and writes it
//! back only when a finished session beats it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where the best score lives between sessions
pub trait BestScoreStore {
    /// Stored best score (0 when nothing was stored yet)
    fn get(&self) -> u64;
    /// Replace the stored best score
    fn set(&mut self, score: u64);
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u64,
}

/// In-memory store, used by tests and by hosts without storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(best: u64) -> Self {
        Self { best }
    }
}

impl BestScoreStore for MemoryStore {
    fn get(&self) -> u64 {
        self.best
    }

    fn set(&mut self, score: u64) {
        self.best = score;
    }
}

/// JSON file store for native hosts
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for JsonFileStore {
    fn get(&self) -> u64 {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No best score at {}, starting fresh", self.path.display());
                return 0;
            }
        };

        match serde_json::from_str::<BestScore>(&json) {
            Ok(best) => {
                log::info!("Loaded best score {}", best.score);
                best.score
            }
            Err(e) => {
                log::warn!("Ignoring unreadable best score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn set(&mut self, score: u64) {
        let json = match serde_json::to_string(&BestScore { score }) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode best score: {}", e);
                return;
            }
        };

        match fs::write(&self.path, json) {
            Ok(()) => log::info!("Best score {} saved to {}", score, self.path.display()),
            Err(e) => log::warn!("Could not save best score to {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("thermal_asteroids_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::with_score(10);
        assert_eq!(store.get(), 10);
        store.set(250);
        assert_eq!(store.get(), 250);
    }

    #[test]
    fn test_json_store_round_trip() {
        let path = temp_path("round_trip");
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get(), 0);

        store.set(1_350);
        assert_eq!(JsonFileStore::new(&path).get(), 1_350);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_json_store_ignores_garbage() {
        let path = temp_path("garbage");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(JsonFileStore::new(&path).get(), 0);
        let _ = fs::remove_file(&path);
    }
}
