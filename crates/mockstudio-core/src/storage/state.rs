//! Typed persistence layer with auto-save bookkeeping.
//!
//! Sits between the editor and a blob [`Storage`] backend: serializes the
//! working session and the project library under well-known keys, and
//! tracks dirtiness so callers can save on an interval instead of on
//! every keystroke.

use crate::project::ProjectLibrary;
use crate::session::Snapshot;
use crate::storage::{Storage, StorageError, StorageResult};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Key for the working session blob.
pub const SESSION_KEY: &str = "design-studio-v2-state";

/// Key for the project library blob.
pub const PROJECTS_KEY: &str = "design-studio-projects";

/// Manages persistence of the working session and the project library.
pub struct StateStore<S: Storage> {
    /// Storage backend.
    storage: Arc<S>,
    /// Auto-save interval.
    interval: Duration,
    /// Last save timestamp.
    last_save: Option<Instant>,
    /// Whether the session has unsaved changes.
    dirty: bool,
}

impl<S: Storage> StateStore<S> {
    /// Create a new state store over the given storage backend.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            last_save: None,
            dirty: false,
        }
    }

    /// Set the auto-save interval.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Mark the session as having unsaved changes.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if the session has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Check if enough time has passed for an auto-save.
    pub fn should_save(&self) -> bool {
        if !self.dirty {
            return false;
        }

        match self.last_save {
            Some(last) => last.elapsed() >= self.interval,
            None => true, // Never saved, should save
        }
    }

    /// Save the session if needed (dirty + interval elapsed).
    /// Returns true if save was performed.
    pub async fn maybe_save_session(&mut self, snapshot: &Snapshot) -> StorageResult<bool> {
        if !self.should_save() {
            return Ok(false);
        }

        self.save_session(snapshot).await?;
        Ok(true)
    }

    /// Force save the working session immediately.
    pub async fn save_session(&mut self, snapshot: &Snapshot) -> StorageResult<()> {
        let json = serde_json::to_string(snapshot)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.put(SESSION_KEY, &json).await?;

        self.last_save = Some(Instant::now());
        self.dirty = false;

        Ok(())
    }

    /// Load the working session.
    ///
    /// A missing blob yields the default session; a corrupt blob is
    /// logged and also yields the default, so a bad save never wedges
    /// startup.
    pub async fn load_session(&self) -> Snapshot {
        let json = match self.storage.get(SESSION_KEY).await {
            Ok(json) => json,
            Err(StorageError::NotFound(_)) => return Snapshot::default(),
            Err(e) => {
                log::warn!("failed to read session blob: {e}");
                return Snapshot::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("corrupt session blob, starting fresh: {e}");
                Snapshot::default()
            }
        }
    }

    /// Save the project library.
    pub async fn save_library(&self, library: &ProjectLibrary) -> StorageResult<()> {
        let json = serde_json::to_string(library)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.put(PROJECTS_KEY, &json).await
    }

    /// Load the project library, degrading to empty on missing or
    /// corrupt data.
    pub async fn load_library(&self) -> ProjectLibrary {
        let json = match self.storage.get(PROJECTS_KEY).await {
            Ok(json) => json,
            Err(StorageError::NotFound(_)) => return ProjectLibrary::new(),
            Err(e) => {
                log::warn!("failed to read project library blob: {e}");
                return ProjectLibrary::new();
            }
        };
        match serde_json::from_str(&json) {
            Ok(library) => library,
            Err(e) => {
                log::warn!("corrupt project library blob, starting empty: {e}");
                ProjectLibrary::new()
            }
        }
    }

    /// Clear the persisted working session.
    pub async fn clear_session(&self) -> StorageResult<()> {
        self.storage.remove(SESSION_KEY).await
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

/// Create a platform-appropriate storage backend.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<Arc<crate::storage::FileStorage>> {
    Ok(Arc::new(crate::storage::FileStorage::default_location()?))
}
