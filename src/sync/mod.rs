//! Sync mirror: a best-effort remote copy of the three collections.
//!
//! The local database is always the source of truth. Uploads are queued on an
//! outbox drained by a worker thread ([`worker::SyncWorker`]); remote changes
//! are picked up by polling ([`watch::RemoteWatch`]) and replace the local
//! collections wholesale.

pub mod dir;
pub mod retry;
pub mod watch;
pub mod worker;

use crate::config::Config;
use crate::core::state::AppState;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use dir::DirMirror;
pub use retry::RetryConfig;
pub use watch::RemoteWatch;
pub use worker::{SyncOutcome, SyncWorker};

/// The remote document: all three collections plus the time of the upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(flatten)]
    pub state: AppState,
    pub updated_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn of(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            updated_at: Utc::now(),
        }
    }
}

/// Remote side of the mirror.
pub trait SyncMirror: Send {
    fn upload(&self, snapshot: &Snapshot) -> AppResult<()>;

    /// `Ok(None)` when nothing has been uploaded under this key yet.
    fn download(&self) -> AppResult<Option<Snapshot>>;

    /// Human description, used in status lines and the internal log.
    fn describe(&self) -> String;
}

/// Build the configured mirror, or `None` when sync is disabled.
pub fn mirror_from_config(cfg: &Config) -> AppResult<Option<DirMirror>> {
    if !cfg.sync.enabled {
        return Ok(None);
    }
    let dir = cfg
        .sync
        .dir
        .as_deref()
        .ok_or_else(|| AppError::SyncNotConfigured("missing sync.dir".into()))?;
    let code = cfg
        .sync
        .code
        .as_deref()
        .ok_or_else(|| AppError::SyncNotConfigured("missing sync.code".into()))?;

    Ok(Some(DirMirror::new(dir, code)?))
}
