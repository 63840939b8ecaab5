use crate::config::Config;
use crate::core::state::{AppState, Collection};
use crate::db::initialize::init_db;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::storage::{self, SyncState};
use crate::errors::AppResult;
use crate::models::{ClassDraft, ClassGroup, NewRecord, Record, Student, StudentDraft};
use crate::sync::retry::retry_with_backoff;
use crate::sync::{
    RemoteWatch, RetryConfig, Snapshot, SyncMirror, SyncOutcome, SyncWorker, mirror_from_config,
};
use crate::ui::messages::warning;
use rusqlite::Connection;

/// What `pull` did with the remote document.
#[derive(Debug, Clone, PartialEq)]
pub enum PullResult {
    /// Remote data replaced the local collections.
    Applied { records: usize, students: usize, classes: usize },
    /// Remote is not newer than our last sync.
    UpToDate,
    /// Nothing remote yet; local data was uploaded instead.
    Seeded(SyncOutcome),
    /// The remote document could not be read; local data is untouched.
    Failed(String),
}

/// Application controller: owns the database, the in-memory collections and
/// the sync outbox. Every mutation is committed locally before an upload is
/// queued; a failed upload never undoes a commit.
pub struct Tracker {
    pool: DbPool,
    state: AppState,
    outbox: Option<SyncWorker>,
}

impl Tracker {
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let pool = DbPool::new(&cfg.database)?;
        let outbox = mirror_from_config(cfg)?
            .map(|mirror| SyncWorker::spawn(mirror, RetryConfig::from(&cfg.sync)));
        Self::with_pool(pool, outbox)
    }

    /// Open on an existing connection; `outbox` receives a snapshot after
    /// every commit.
    pub fn with_pool(pool: DbPool, outbox: Option<SyncWorker>) -> AppResult<Self> {
        init_db(&pool.conn)?;
        let state = storage::load_state(&pool.conn)?;
        Ok(Self {
            pool,
            state,
            outbox,
        })
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::with_pool(DbPool::in_memory()?, None)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    fn commit(&mut self, which: Collection, operation: &str, target: &str, message: &str) -> AppResult<()> {
        if let Err(e) = storage::save_one(&self.pool.conn, &self.state, which) {
            // keep memory in line with what is actually stored
            self.state = storage::load_state(&self.pool.conn)?;
            return Err(e);
        }

        ttlog_quiet(&self.pool.conn, operation, target, message);

        if let Some(outbox) = &self.outbox {
            outbox.enqueue(Snapshot::of(&self.state));
        }
        Ok(())
    }

    // ---------------------------
    // Records
    // ---------------------------
    pub fn add_record(&mut self, input: NewRecord) -> AppResult<Record> {
        let record = self.state.add_record(input);
        let message = format!(
            "{} {} {}h × {} = {:.2}",
            record.date_str(),
            record.course_name,
            record.hours,
            record.rate,
            record.salary
        );
        self.commit(
            Collection::Records,
            "add",
            &record.id.to_string(),
            &message,
        )?;
        Ok(record)
    }

    /// `Ok(false)` when no record has this id (nothing is written).
    pub fn delete_record(&mut self, id: i64) -> AppResult<bool> {
        if !self.state.delete_record(id) {
            return Ok(false);
        }
        self.commit(Collection::Records, "del", &id.to_string(), "Record deleted")?;
        Ok(true)
    }

    // ---------------------------
    // Students
    // ---------------------------
    pub fn add_student(&mut self, draft: StudentDraft) -> AppResult<Student> {
        let student = self.state.add_student(draft)?;
        self.commit(
            Collection::Students,
            "student_add",
            &student.id.to_string(),
            &student.name,
        )?;
        Ok(student)
    }

    pub fn update_student(&mut self, id: i64, draft: StudentDraft) -> AppResult<Option<Student>> {
        let updated = self.state.update_student(id, draft)?;
        if let Some(s) = &updated {
            self.commit(Collection::Students, "student_update", &id.to_string(), &s.name)?;
        }
        Ok(updated)
    }

    pub fn delete_student(&mut self, id: i64) -> AppResult<bool> {
        if !self.state.delete_student(id) {
            return Ok(false);
        }
        self.commit(
            Collection::Students,
            "student_del",
            &id.to_string(),
            "Student deleted",
        )?;
        Ok(true)
    }

    // ---------------------------
    // Classes
    // ---------------------------
    pub fn add_class(&mut self, draft: ClassDraft) -> AppResult<ClassGroup> {
        let class = self.state.add_class(draft)?;
        self.commit(
            Collection::Classes,
            "class_add",
            &class.id.to_string(),
            &class.name,
        )?;
        Ok(class)
    }

    pub fn update_class(&mut self, id: i64, draft: ClassDraft) -> AppResult<Option<ClassGroup>> {
        let updated = self.state.update_class(id, draft)?;
        if let Some(c) = &updated {
            self.commit(Collection::Classes, "class_update", &id.to_string(), &c.name)?;
        }
        Ok(updated)
    }

    pub fn delete_class(&mut self, id: i64) -> AppResult<bool> {
        if !self.state.delete_class(id) {
            return Ok(false);
        }
        self.commit(
            Collection::Classes,
            "class_del",
            &id.to_string(),
            "Class deleted",
        )?;
        Ok(true)
    }

    // ---------------------------
    // Wholesale replacement
    // ---------------------------

    /// Overwrite all three collections and persist them in one transaction.
    /// Nothing is queued for upload.
    pub fn replace_all(&mut self, incoming: AppState, operation: &str, target: &str) -> AppResult<()> {
        self.pool.with_tx(|tx| -> AppResult<()> {
            for which in Collection::ALL {
                storage::save_one(tx, &incoming, which)?;
            }
            Ok(())
        })?;

        let message = format!(
            "{} records, {} students, {} classes",
            incoming.records.len(),
            incoming.students.len(),
            incoming.classes.len()
        );
        self.state.replace_all(incoming);
        ttlog_quiet(&self.pool.conn, operation, target, &message);
        Ok(())
    }

    /// Apply a remote snapshot (full overwrite, no merge).
    pub fn apply_remote(&mut self, snapshot: Snapshot, source: &str) -> AppResult<()> {
        let at = snapshot.updated_at;
        self.replace_all(snapshot.state, "sync_pull", source)?;
        self.record_sync(at)
    }

    // ---------------------------
    // Sync bookkeeping
    // ---------------------------
    pub fn sync_state(&self) -> AppResult<SyncState> {
        storage::load_sync_state(&self.pool.conn)
    }

    fn record_sync(&self, at: chrono::DateTime<chrono::Utc>) -> AppResult<()> {
        let mut st = storage::load_sync_state(&self.pool.conn)?;
        if st.last_sync.is_none_or(|prev| prev < at) {
            st.last_sync = Some(at);
            storage::save_sync_state(&self.pool.conn, &st)?;
        }
        Ok(())
    }

    fn record_outcome(&self, outcome: &SyncOutcome) -> AppResult<()> {
        match &outcome.error {
            None => {
                ttlog_quiet(
                    &self.pool.conn,
                    "sync_push",
                    &outcome.target,
                    &format!("Uploaded after {} attempt(s)", outcome.attempts),
                );
                self.record_sync(outcome.snapshot_time)
            }
            Some(err) => {
                ttlog_quiet(
                    &self.pool.conn,
                    "sync_error",
                    &outcome.target,
                    &format!("{} (after {} attempt(s))", err, outcome.attempts),
                );
                warning(format!("Sync failed, local data kept: {}", err));
                Ok(())
            }
        }
    }

    /// Upload the current state now, retrying per `retry`.
    pub fn push_now(&self, mirror: &dyn SyncMirror, retry: &RetryConfig) -> AppResult<SyncOutcome> {
        let snapshot = Snapshot::of(&self.state);
        let (result, attempts) = retry_with_backoff(retry, || mirror.upload(&snapshot));
        let outcome = SyncOutcome {
            target: mirror.describe(),
            snapshot_time: snapshot.updated_at,
            attempts,
            error: result.err().map(|e| e.to_string()),
        };
        self.record_outcome(&outcome)?;
        Ok(outcome)
    }

    /// Download the remote document and apply it when it is newer than the
    /// last sync (or unconditionally with `force`). An empty remote is
    /// seeded with the local data.
    pub fn pull_now(
        &mut self,
        mirror: &dyn SyncMirror,
        retry: &RetryConfig,
        force: bool,
    ) -> AppResult<PullResult> {
        let (remote, attempts) = retry_with_backoff(retry, || mirror.download());

        let snapshot = match remote {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Ok(PullResult::Seeded(self.push_now(mirror, retry)?)),
            Err(e) => {
                let message = e.to_string();
                ttlog_quiet(
                    &self.pool.conn,
                    "sync_error",
                    &mirror.describe(),
                    &format!("{} (after {} attempt(s))", message, attempts),
                );
                return Ok(PullResult::Failed(message));
            }
        };

        let watch = RemoteWatch::new(self.sync_state()?.last_sync);
        if !force && !watch.is_newer(&snapshot) {
            return Ok(PullResult::UpToDate);
        }

        let counts = PullResult::Applied {
            records: snapshot.state.records.len(),
            students: snapshot.state.students.len(),
            classes: snapshot.state.classes.len(),
        };
        self.apply_remote(snapshot, &mirror.describe())?;
        Ok(counts)
    }

    /// Wait for queued uploads and record their outcomes in the log.
    pub fn finish(mut self) -> AppResult<Vec<SyncOutcome>> {
        let outcomes = self.drain_outbox();
        for o in &outcomes {
            self.record_outcome(o)?;
        }
        Ok(outcomes)
    }

    fn drain_outbox(&mut self) -> Vec<SyncOutcome> {
        match self.outbox.take() {
            Some(worker) => worker.finish(),
            None => Vec::new(),
        }
    }
}

impl Drop for Tracker {
    // Reached when a command fails before `finish`: uploads already queued
    // still complete and their outcomes still reach the log.
    fn drop(&mut self) {
        for o in self.drain_outbox() {
            if let Err(e) = self.record_outcome(&o) {
                warning(format!("Could not record sync outcome: {}", e));
            }
        }
    }
}
