//! Outbox worker: uploads queued snapshots on its own thread.
//!
//! Local commits enqueue a snapshot and return immediately. When several
//! snapshots are waiting only the newest is uploaded. Outcomes are handed
//! back by [`SyncWorker::finish`] so the caller can record them.

use super::retry::{RetryConfig, retry_with_backoff};
use super::{Snapshot, SyncMirror};
use chrono::{DateTime, Utc};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

enum Job {
    Upload(Box<Snapshot>),
    Shutdown,
}

/// Result of one (possibly retried) upload.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    pub target: String,
    pub snapshot_time: DateTime<Utc>,
    pub attempts: u32,
    pub error: Option<String>,
}

impl SyncOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub struct SyncWorker {
    tx: Sender<Job>,
    handle: Option<JoinHandle<Vec<SyncOutcome>>>,
}

impl SyncWorker {
    pub fn spawn<M: SyncMirror + 'static>(mirror: M, retry: RetryConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || run(mirror, retry, rx));
        Self {
            tx,
            handle: Some(handle),
        }
    }

    /// Queue a snapshot for upload. Never blocks on the mirror.
    pub fn enqueue(&self, snapshot: Snapshot) {
        // A dead worker only means the upload is skipped; the local commit stands.
        let _ = self.tx.send(Job::Upload(Box::new(snapshot)));
    }

    /// Drain the queue, stop the worker and return every outcome.
    pub fn finish(mut self) -> Vec<SyncOutcome> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Vec<SyncOutcome> {
        let _ = self.tx.send(Job::Shutdown);
        match self.handle.take() {
            Some(h) => h.join().unwrap_or_default(),
            None => Vec::new(),
        }
    }
}

impl Drop for SyncWorker {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.shutdown();
        }
    }
}

fn run<M: SyncMirror>(mirror: M, retry: RetryConfig, rx: Receiver<Job>) -> Vec<SyncOutcome> {
    let mut outcomes = Vec::new();

    while let Ok(job) = rx.recv() {
        let mut latest = match job {
            Job::Upload(s) => s,
            Job::Shutdown => break,
        };

        // coalesce everything already queued
        let mut stop = false;
        while let Ok(next) = rx.try_recv() {
            match next {
                Job::Upload(s) => latest = s,
                Job::Shutdown => {
                    stop = true;
                    break;
                }
            }
        }

        let (result, attempts) = retry_with_backoff(&retry, || mirror.upload(&latest));
        outcomes.push(SyncOutcome {
            target: mirror.describe(),
            snapshot_time: latest.updated_at,
            attempts,
            error: result.err().map(|e| e.to_string()),
        });

        if stop {
            break;
        }
    }

    outcomes
}
