//! Persistence service: periodic flush of local state to a JSON file.
//!
//! DESIGN
//! ======
//! Stores raise a shared [`DirtyFlag`] on every mutation. A background task
//! wakes on an interval, and when the flag is up it snapshots users,
//! sessions, profiles, settings, and user-created campaigns into one JSON
//! document. The document is written to a temporary sibling file and renamed
//! over the target so a crash mid-write never leaves a truncated file.
//!
//! The flag is taken before the snapshot and raised again if the write
//! fails, so a mutation racing the write is never lost and a failed write is
//! retried on the next tick.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::campaign::Campaign;
use crate::domain::profile::Profile;
use crate::domain::settings::UserSettings;
use crate::domain::user::User;
use crate::services::session::SessionSnapshot;
use crate::state::AppState;

/// Shared "something changed" marker. Clones observe the same flag.
#[derive(Clone, Default, Debug)]
pub struct DirtyFlag(Arc<AtomicBool>);

impl DirtyFlag {
    pub fn mark(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clear the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed state file: {0}")]
    Json(#[from] serde_json::Error),
}

impl crate::error::ErrorCode for PersistenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "E_PERSISTENCE_IO",
            Self::Json(_) => "E_PERSISTENCE_FORMAT",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// On-disk document. Top-level keys are fixed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalSnapshot {
    #[serde(default)]
    pub users: Vec<User>,
    /// `(token, user_id)` pairs.
    #[serde(default)]
    pub sessions: Vec<(String, Uuid)>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub settings: Vec<(Uuid, UserSettings)>,
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
}

// =============================================================================
// SNAPSHOT / RESTORE
// =============================================================================

pub async fn snapshot(state: &AppState) -> LocalSnapshot {
    let SessionSnapshot { users, sessions } = state.sessions.snapshot();
    LocalSnapshot {
        users,
        sessions,
        profiles: state.profiles.snapshot(),
        settings: state.settings.snapshot(),
        campaigns: state.campaigns.export_local().await,
    }
}

pub async fn restore(state: &AppState, snapshot: LocalSnapshot) {
    info!(
        users = snapshot.users.len(),
        sessions = snapshot.sessions.len(),
        profiles = snapshot.profiles.len(),
        campaigns = snapshot.campaigns.len(),
        "persistence: restoring local state"
    );
    state
        .sessions
        .restore(SessionSnapshot { users: snapshot.users, sessions: snapshot.sessions });
    state.profiles.restore(snapshot.profiles);
    state.settings.restore(snapshot.settings);
    state.campaigns.restore_local(snapshot.campaigns).await;
}

// =============================================================================
// FILE IO
// =============================================================================

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> PersistenceError + '_ {
    move |source| PersistenceError::Io { path: path.to_path_buf(), source }
}

/// Load a snapshot. A missing file is `Ok(None)`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub async fn load(path: &Path) -> Result<Option<LocalSnapshot>, PersistenceError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_err(path)(e)),
    }
}

/// Write `snapshot` to `path` through a temporary file and rename.
///
/// # Errors
///
/// Returns an error if serialization, the write, or the rename fails.
pub async fn save(path: &Path, snapshot: &LocalSnapshot) -> Result<(), PersistenceError> {
    let bytes = serde_json::to_vec_pretty(snapshot)?;
    let tmp = tmp_path(path);
    tokio::fs::write(&tmp, bytes).await.map_err(io_err(&tmp))?;
    tokio::fs::rename(&tmp, path).await.map_err(io_err(path))?;
    Ok(())
}

// =============================================================================
// BACKGROUND TASK
// =============================================================================

/// Spawn the background persistence task. Returns a handle for shutdown.
pub fn spawn_persistence_task(state: AppState, path: PathBuf, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            flush_if_dirty(&state, &path).await;
        }
    })
}

/// Write local state if anything changed since the last successful flush.
/// Returns whether a write happened.
pub async fn flush_if_dirty(state: &AppState, path: &Path) -> bool {
    if !state.dirty.take() {
        return false;
    }

    let snapshot = snapshot(state).await;
    match save(path, &snapshot).await {
        Ok(()) => true,
        Err(e) => {
            state.dirty.mark();
            error!(error = %e, path = %path.display(), "persistence flush failed");
            false
        }
    }
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
