//! Per-user lines-of-code cache.
//!
//! The file maps `owner/name` to the commit count the totals were computed
//! at. It is read once, updated in memory, and written back whole; there is
//! no locking, the last writer wins.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// `None` when the stored entry has no count; such an entry is never fresh.
    #[serde(default)]
    pub commit_count: Option<u64>,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub my_commits: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocCache {
    entries: BTreeMap<String, CacheEntry>,
}

impl LocCache {
    /// The stored entry, but only while it was computed at `commit_count`.
    pub fn fresh(&self, repo: &str, commit_count: u64) -> Option<&CacheEntry> {
        self.entries
            .get(repo)
            .filter(|entry| entry.commit_count == Some(commit_count))
    }

    pub fn get(&self, repo: &str) -> Option<&CacheEntry> {
        self.entries.get(repo)
    }

    pub fn insert(&mut self, repo: &str, entry: CacheEntry) {
        self.entries.insert(repo.to_string(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// File name for `username`'s cache: 16 hex chars of SHA-256 plus `.json`.
pub fn cache_file_name(username: &str) -> String {
    let digest = Sha256::digest(username.as_bytes());
    format!("{}.json", &hex::encode(digest)[..16])
}

/// Location of one user's cache file.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    path: PathBuf,
}

impl CacheStore {
    pub fn new(dir: impl AsRef<Path>, username: &str) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let path = dir.join(cache_file_name(username));
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable files load as an empty cache.
    pub fn load(&self) -> LocCache {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %self.path.display(), "no usable cache file: {e}");
                return LocCache::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(cache) => cache,
            Err(e) => {
                debug!(path = %self.path.display(), "ignoring malformed cache file: {e}");
                LocCache::default()
            }
        }
    }

    pub fn save(&self, cache: &LocCache) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create cache directory {}", self.dir.display()))?;
        let json = serde_json::to_string_pretty(cache).context("Failed to serialize cache")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write cache file {}", self.path.display()))?;
        debug!(path = %self.path.display(), entries = cache.len(), "cache saved");
        Ok(())
    }
}
