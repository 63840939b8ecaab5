//! Remote change detection.
//!
//! A remote snapshot is accepted only when it is more than one second newer
//! than our last sync. This keeps us from re-applying our own uploads; it is
//! a heuristic and can still lose a local change made between two polls.

use super::{Snapshot, SyncMirror};
use crate::errors::AppResult;
use chrono::{DateTime, Duration, Utc};

const FRESHNESS_MARGIN_MS: i64 = 1000;

#[derive(Debug, Clone, Default)]
pub struct RemoteWatch {
    last_sync: Option<DateTime<Utc>>,
}

impl RemoteWatch {
    pub fn new(last_sync: Option<DateTime<Utc>>) -> Self {
        Self { last_sync }
    }

    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.last_sync
    }

    /// Record a successful upload or download.
    pub fn mark_synced(&mut self, at: DateTime<Utc>) {
        self.last_sync = Some(match self.last_sync {
            Some(prev) if prev > at => prev,
            _ => at,
        });
    }

    pub fn is_newer(&self, snapshot: &Snapshot) -> bool {
        match self.last_sync {
            None => true,
            Some(last) => {
                snapshot.updated_at > last + Duration::milliseconds(FRESHNESS_MARGIN_MS)
            }
        }
    }

    /// Fetch the remote document and return it if it should replace local data.
    pub fn check(&mut self, mirror: &dyn SyncMirror) -> AppResult<Option<Snapshot>> {
        match mirror.download()? {
            Some(snapshot) if self.is_newer(&snapshot) => {
                self.mark_synced(snapshot.updated_at);
                Ok(Some(snapshot))
            }
            _ => Ok(None),
        }
    }
}
