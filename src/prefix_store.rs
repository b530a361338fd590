//! # Feature: Guild Prefixes
//!
//! Per-guild command prefixes kept in memory and mirrored to a JSON file.
//! The whole file is rewritten on every change.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: JSON-file backed store shared by the gateway handler and the HTTP API

use dashmap::DashMap;
use log::{debug, info};
use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::StoreError;

/// Prefix used by any guild without an entry.
pub const DEFAULT_PREFIX: &str = "!";
/// Longest accepted prefix, in characters.
pub const MAX_PREFIX_LEN: usize = 3;

#[derive(Clone)]
pub struct PrefixStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    prefixes: DashMap<String, String>,
    // Serializes file rewrites; the snapshot is taken while holding it.
    write_lock: Mutex<()>,
}

impl PrefixStore {
    /// Creates an empty store bound to `path` without touching the disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_prefixes(path, HashMap::new())
    }

    fn with_prefixes(path: impl Into<PathBuf>, prefixes: HashMap<String, String>) -> Self {
        PrefixStore {
            inner: Arc::new(Inner {
                path: path.into(),
                prefixes: prefixes.into_iter().collect(),
                write_lock: Mutex::new(()),
            }),
        }
    }

    /// Loads the store from `path`. A missing or blank file yields an empty store.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No prefix file at {}, starting empty", path.display());
                return Ok(Self::new(path));
            }
            Err(source) => return Err(StoreError::LoadFailure { path, source }),
        };

        if contents.trim().is_empty() {
            return Ok(Self::new(path));
        }

        let prefixes: HashMap<String, String> = match serde_json::from_str(&contents) {
            Ok(prefixes) => prefixes,
            Err(source) => return Err(StoreError::Corrupt { path, source }),
        };

        info!("Loaded {} guild prefixes from {}", prefixes.len(), path.display());
        Ok(Self::with_prefixes(path, prefixes))
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    pub fn len(&self) -> usize {
        self.inner.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.prefixes.is_empty()
    }

    /// Prefix for `guild_id`, or [`DEFAULT_PREFIX`].
    pub fn get(&self, guild_id: &str) -> String {
        self.inner
            .prefixes
            .get(guild_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string())
    }

    pub fn validate_prefix(prefix: &str) -> Result<(), StoreError> {
        let len = prefix.chars().count();
        if len == 0 || len > MAX_PREFIX_LEN {
            return Err(StoreError::InvalidPrefix);
        }
        Ok(())
    }

    /// Stores `prefix` for `guild_id` and rewrites the backing file.
    ///
    /// On `PersistenceFailure` the in-memory value has already changed and is
    /// not rolled back.
    pub async fn set(&self, guild_id: &str, prefix: &str) -> Result<(), StoreError> {
        Self::validate_prefix(prefix)?;

        self.inner
            .prefixes
            .insert(guild_id.to_string(), prefix.to_string());
        debug!("Prefix for guild {} set to '{}'", guild_id, prefix);

        self.persist().await
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let _guard = self.inner.write_lock.lock().await;

        let snapshot: BTreeMap<String, String> = self
            .inner
            .prefixes
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        let path = &self.inner.path;
        let failure = |source: std::io::Error| StoreError::PersistenceFailure {
            path: path.clone(),
            source,
        };

        let bytes = serde_json::to_vec(&snapshot).map_err(|e| failure(e.into()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(failure)?;
        }

        let tmp_path = temp_path_for(path);
        tokio::fs::write(&tmp_path, &bytes).await.map_err(failure)?;
        if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(failure(e));
        }

        debug!("Wrote {} prefixes to {}", snapshot.len(), path.display());
        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
