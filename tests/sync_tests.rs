use chrono::{Duration as ChronoDuration, NaiveDate, NaiveTime, Utc};
use rtutorlog::core::state::AppState;
use rtutorlog::core::tracker::{PullResult, Tracker};
use rtutorlog::db::pool::DbPool;
use rtutorlog::errors::{AppError, AppResult};
use rtutorlog::models::{NewRecord, StudentDraft};
use rtutorlog::sync::retry::retry_with_backoff;
use rtutorlog::sync::{DirMirror, RemoteWatch, RetryConfig, Snapshot, SyncMirror, SyncWorker};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(2),
    }
}

fn one_record_state() -> AppState {
    let mut state = AppState::default();
    let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    state.add_record(NewRecord::new(date, "Math", 2.0, 150.0));
    state
}

/// Mirror that always fails, counting the calls.
struct FailingMirror {
    calls: Arc<AtomicU32>,
}

impl SyncMirror for FailingMirror {
    fn upload(&self, _snapshot: &Snapshot) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Sync("mirror offline".into()))
    }

    fn download(&self) -> AppResult<Option<Snapshot>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Sync("mirror offline".into()))
    }

    fn describe(&self) -> String {
        "failing".into()
    }
}

#[test]
fn sync_codes_are_validated() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();

    assert!(DirMirror::new(root, "family-2024").is_ok());
    for bad in ["abc", "../escape", "with space", ""] {
        assert!(
            matches!(DirMirror::new(root, bad), Err(AppError::InvalidSyncCode(_))),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn dir_mirror_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mirror = DirMirror::new(dir.path().to_str().unwrap(), "abcd1234").unwrap();

    assert!(mirror.download().unwrap().is_none());

    let snapshot = Snapshot::of(&one_record_state());
    mirror.upload(&snapshot).unwrap();

    assert!(mirror.document_path().exists());
    let back = mirror.download().unwrap().unwrap();
    assert_eq!(back, snapshot);
}

#[test]
fn snapshot_document_keeps_collection_keys() {
    let snapshot = Snapshot::of(&one_record_state());
    let json = serde_json::to_value(&snapshot).unwrap();

    assert!(json["records"].is_array());
    assert!(json["students"].is_array());
    assert!(json["classes"].is_array());
    assert!(json["updatedAt"].is_string());
}

#[test]
fn retry_delays_double_and_cap() {
    let cfg = RetryConfig::default();
    assert_eq!(cfg.delay_for(1), Duration::from_millis(200));
    assert_eq!(cfg.delay_for(2), Duration::from_millis(400));
    assert_eq!(cfg.delay_for(3), Duration::from_millis(800));
    assert_eq!(cfg.delay_for(6), Duration::from_secs(2));
}

#[test]
fn retry_stops_after_max_attempts() {
    let calls = AtomicU32::new(0);
    let (result, attempts) = retry_with_backoff(&fast_retry(3), || -> AppResult<()> {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Sync("nope".into()))
    });

    assert!(result.is_err());
    assert_eq!(attempts, 3);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn retry_returns_first_success() {
    let calls = AtomicU32::new(0);
    let (result, attempts) = retry_with_backoff(&fast_retry(5), || {
        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n < 2 {
            Err(AppError::Sync("flaky".into()))
        } else {
            Ok(n)
        }
    });

    assert_eq!(result.unwrap(), 2);
    assert_eq!(attempts, 2);
}

#[test]
fn worker_uploads_and_reports_success() {
    let dir = tempfile::tempdir().unwrap();
    let mirror = DirMirror::new(dir.path().to_str().unwrap(), "worker01").unwrap();
    let reader = mirror.clone();

    let worker = SyncWorker::spawn(mirror, fast_retry(3));
    let snapshot = Snapshot::of(&one_record_state());
    worker.enqueue(snapshot.clone());
    let outcomes = worker.finish();

    assert!(!outcomes.is_empty());
    assert!(outcomes.iter().all(|o| o.is_ok()));
    assert_eq!(reader.download().unwrap().unwrap(), snapshot);
}

#[test]
fn worker_retries_a_failing_mirror() {
    let calls = Arc::new(AtomicU32::new(0));
    let worker = SyncWorker::spawn(
        FailingMirror {
            calls: Arc::clone(&calls),
        },
        fast_retry(4),
    );

    worker.enqueue(Snapshot::of(&AppState::default()));
    let outcomes = worker.finish();

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].attempts, 4);
    assert!(outcomes[0].error.as_deref().unwrap_or("").contains("mirror offline"));
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test]
fn remote_watch_needs_more_than_a_second() {
    let last = Utc::now();
    let mut watch = RemoteWatch::new(Some(last));

    let mut snapshot = Snapshot::of(&AppState::default());
    snapshot.updated_at = last + ChronoDuration::milliseconds(500);
    assert!(!watch.is_newer(&snapshot));

    snapshot.updated_at = last + ChronoDuration::milliseconds(1500);
    assert!(watch.is_newer(&snapshot));

    watch.mark_synced(snapshot.updated_at);
    watch.mark_synced(last);
    assert_eq!(watch.last_sync(), Some(snapshot.updated_at));

    assert!(RemoteWatch::new(None).is_newer(&snapshot));
}

#[test]
fn remote_watch_check_applies_only_fresh_documents() {
    let dir = tempfile::tempdir().unwrap();
    let mirror = DirMirror::new(dir.path().to_str().unwrap(), "watch001").unwrap();
    let mut watch = RemoteWatch::new(None);

    assert!(watch.check(&mirror).unwrap().is_none());

    mirror.upload(&Snapshot::of(&one_record_state())).unwrap();
    assert!(watch.check(&mirror).unwrap().is_some());
    // same document again: already seen
    assert!(watch.check(&mirror).unwrap().is_none());
}

#[test]
fn tracker_outbox_mirrors_commits() {
    let dir = tempfile::tempdir().unwrap();
    let mirror = DirMirror::new(dir.path().to_str().unwrap(), "outbox01").unwrap();
    let reader = mirror.clone();

    let worker = SyncWorker::spawn(mirror, fast_retry(3));
    let mut tracker = Tracker::with_pool(DbPool::in_memory().unwrap(), Some(worker)).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    tracker
        .add_record(NewRecord::new(date, "Math", 2.0, 150.0))
        .unwrap();
    let local = tracker.state().clone();

    let outcomes = tracker.finish().unwrap();
    assert!(outcomes.iter().all(|o| o.is_ok()));

    let remote = reader.download().unwrap().unwrap();
    assert_eq!(remote.state, local);
}

#[test]
fn queued_uploads_are_logged_when_a_command_bails_out() {
    let dir = tempfile::tempdir().unwrap();
    let mirror = DirMirror::new(dir.path().to_str().unwrap(), "bailout1").unwrap();
    let db = dir.path().join("local.sqlite");
    let db = db.to_str().unwrap();

    let worker = SyncWorker::spawn(mirror, fast_retry(3));
    let mut tracker = Tracker::with_pool(DbPool::new(db).unwrap(), Some(worker)).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    tracker
        .add_record(NewRecord::new(date, "Math", 1.0, 100.0))
        .unwrap();

    // the handler returns early with an error, `finish` is never reached
    let bad = StudentDraft {
        name: "  ".into(),
        grade: None,
        course: "Math".into(),
        start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        rate: 100.0,
    };
    assert!(tracker.add_student(bad).is_err());
    drop(tracker);

    let reopened = Tracker::with_pool(DbPool::new(db).unwrap(), None).unwrap();
    let pushes = rtutorlog::db::log::load_log(reopened.conn(), Some("sync_push")).unwrap();
    assert_eq!(pushes.len(), 1);
    assert!(reopened.sync_state().unwrap().last_sync.is_some());
}

#[test]
fn failed_uploads_never_undo_local_commits() {
    let calls = Arc::new(AtomicU32::new(0));
    let worker = SyncWorker::spawn(FailingMirror { calls }, fast_retry(2));

    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("local.sqlite");
    let db = db.to_str().unwrap();

    let mut tracker = Tracker::with_pool(DbPool::new(db).unwrap(), Some(worker)).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    tracker
        .add_record(NewRecord::new(date, "Math", 1.0, 100.0))
        .unwrap();
    let outcomes = tracker.finish().unwrap();
    assert!(outcomes.iter().all(|o| !o.is_ok()));

    let reopened = Tracker::with_pool(DbPool::new(db).unwrap(), None).unwrap();
    assert_eq!(reopened.state().records.len(), 1);
    assert_eq!(reopened.sync_state().unwrap().last_sync, None);
    let errors = rtutorlog::db::log::load_log(reopened.conn(), Some("sync_error")).unwrap();
    assert!(!errors.is_empty());
}

#[test]
fn pull_seeds_applies_and_skips() {
    let dir = tempfile::tempdir().unwrap();
    let mirror = DirMirror::new(dir.path().to_str().unwrap(), "shared01").unwrap();
    let retry = fast_retry(2);

    // first device: nothing remote yet, local data is uploaded
    let mut a = Tracker::in_memory().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    a.add_record(NewRecord::new(date, "Math", 2.0, 150.0)).unwrap();
    match a.pull_now(&mirror, &retry, false).unwrap() {
        PullResult::Seeded(outcome) => assert!(outcome.is_ok()),
        other => panic!("expected seeding, got {other:?}"),
    }
    assert!(a.sync_state().unwrap().last_sync.is_some());

    // second device: remote replaces its (empty) data
    let mut b = Tracker::in_memory().unwrap();
    assert_eq!(
        b.pull_now(&mirror, &retry, false).unwrap(),
        PullResult::Applied {
            records: 1,
            students: 0,
            classes: 0
        }
    );
    assert_eq!(b.state(), a.state());

    // nothing new since
    assert_eq!(b.pull_now(&mirror, &retry, false).unwrap(), PullResult::UpToDate);
    assert!(matches!(
        b.pull_now(&mirror, &retry, true).unwrap(),
        PullResult::Applied { .. }
    ));
}

#[test]
fn pull_from_unreachable_mirror_keeps_local_data() {
    let calls = Arc::new(AtomicU32::new(0));
    let mirror = FailingMirror {
        calls: Arc::clone(&calls),
    };

    let mut tracker = Tracker::in_memory().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    tracker
        .add_record(NewRecord::new(date, "Math", 2.0, 150.0))
        .unwrap();

    let result = tracker.pull_now(&mirror, &fast_retry(3), false).unwrap();
    assert!(matches!(result, PullResult::Failed(_)));
    assert_eq!(tracker.state().records.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}
