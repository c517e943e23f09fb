//! On-disk persistence for watchlists.

use crate::error::Result;
use crate::state::{Watchlist, WatchlistState};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedWatchlists {
    version: u32,
    lists: Vec<Watchlist>,
}

/// Reads and writes the watchlist collection as a JSON file.
#[derive(Debug, Clone)]
pub struct WatchlistStore {
    path: PathBuf,
}

impl WatchlistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved watchlists. A missing file is an empty collection.
    pub fn load(&self) -> Result<Vec<Watchlist>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let persisted: PersistedWatchlists = serde_json::from_str(&content)?;
        tracing::info!(
            path = %self.path.display(),
            count = persisted.lists.len(),
            "Loaded watchlists"
        );
        Ok(persisted.lists)
    }

    /// Load, falling back to an empty collection if the file is unreadable.
    ///
    /// An unreadable file is moved aside to `<name>.bak` first, so the next
    /// save cannot destroy it.
    pub fn load_or_default(&self) -> Vec<Watchlist> {
        self.load().unwrap_or_else(|e| {
            let backup = self.backup_path();
            match std::fs::rename(&self.path, &backup) {
                Ok(()) => tracing::warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %e,
                    "Unreadable watchlist file moved aside"
                ),
                Err(rename_err) => tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    rename_error = %rename_err,
                    "Ignoring unreadable watchlist file"
                ),
            }
            Vec::new()
        })
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }

    /// Write the whole collection, replacing the file atomically.
    pub fn save(&self, lists: &[Watchlist]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let persisted = PersistedWatchlists {
            version: FORMAT_VERSION,
            lists: lists.to_vec(),
        };
        let content = serde_json::to_string_pretty(&persisted)?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = lists.len(), "Saved watchlists");
        Ok(())
    }
}

/// Writes watchlists whenever their revision moves past the one on disk.
#[derive(Debug)]
pub struct WatchlistSync {
    store: WatchlistStore,
    saved_revision: u64,
}

impl WatchlistSync {
    /// Track `store`, treating `revision` as already on disk.
    pub fn new(store: WatchlistStore, revision: u64) -> Self {
        Self {
            store,
            saved_revision: revision,
        }
    }

    pub fn store(&self) -> &WatchlistStore {
        &self.store
    }

    /// Save if the state changed since the last successful write.
    ///
    /// Returns whether a write happened. A failed write leaves the saved
    /// revision alone, so the next call tries again.
    pub fn sync(&mut self, state: &WatchlistState) -> Result<bool> {
        if state.revision == self.saved_revision {
            return Ok(false);
        }
        self.store.save(&state.lists)?;
        self.saved_revision = state.revision;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WatchlistStock;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Watchlist> {
        vec![
            Watchlist {
                name: "Tech".into(),
                stocks: vec![WatchlistStock {
                    symbol: "IBM".into(),
                    name: "IBM".into(),
                    price: "185.00".into(),
                    change_percentage: "0.4%".into(),
                }],
            },
            Watchlist::new("Empty"),
        ]
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = WatchlistStore::new(dir.path().join("watchlists.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("watchlists.json");

        WatchlistStore::new(&path).save(&sample()).unwrap();
        let reloaded = WatchlistStore::new(&path).load().unwrap();

        assert_eq!(reloaded, sample());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = WatchlistStore::new(dir.path().join("watchlists.json"));
        store.save(&sample()).unwrap();
        store.save(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watchlists.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = WatchlistStore::new(&path);
        assert!(store.load().is_err());
        assert!(store.load_or_default().is_empty());

        // the bad file is kept aside and a later save does not touch it
        let backup = dir.path().join("watchlists.json.bak");
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "{ not json");
        store.save(&sample()).unwrap();
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "{ not json");
    }

    #[test]
    fn test_sync_writes_only_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watchlists.json");
        let mut state = WatchlistState::default();
        let mut sync = WatchlistSync::new(WatchlistStore::new(&path), state.revision);

        assert!(!sync.sync(&state).unwrap());
        assert!(!path.exists());

        state.create("Tech");
        state.add("Tech", sample()[0].stocks[0].clone());
        assert!(sync.sync(&state).unwrap());
        let saved = sync.store().load().unwrap();
        assert!(saved[0].contains("IBM"));

        // nothing new to write
        assert!(!sync.sync(&state).unwrap());
    }

    #[test]
    fn test_failed_sync_retries() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the file should be makes the rename fail
        let path = dir.path().join("watchlists.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), "").unwrap();

        let mut state = WatchlistState::default();
        let mut sync = WatchlistSync::new(WatchlistStore::new(&path), state.revision);
        state.create("Tech");

        assert!(sync.sync(&state).is_err());

        std::fs::remove_dir_all(&path).unwrap();
        assert!(sync.sync(&state).unwrap());
        assert_eq!(sync.store().load().unwrap()[0].name, "Tech");
    }
}
