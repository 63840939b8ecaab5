use crate::cli::parser::{Commands, SyncAction};
use crate::config::Config;
use crate::core::tracker::{PullResult, Tracker};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::sync::{RemoteWatch, RetryConfig, SyncMirror, mirror_from_config};
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{CYAN, GREY, RESET};
use std::thread;
use std::time::Duration;

fn print_status(tracker: &Tracker, cfg: &Config, mirror: Option<&dyn SyncMirror>) -> AppResult<()> {
    let none = format!("{GREY}--{RESET}");

    println!("{}• Enabled:{} {}", CYAN, RESET, cfg.sync.enabled);
    println!(
        "{}• Directory:{} {}",
        CYAN,
        RESET,
        cfg.sync.dir.clone().unwrap_or_else(|| none.clone())
    );
    println!(
        "{}• Sync code:{} {}",
        CYAN,
        RESET,
        cfg.sync.code.clone().unwrap_or_else(|| none.clone())
    );

    let last = tracker
        .sync_state()?
        .last_sync
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| none.clone());
    println!("{}• Last sync:{} {}", CYAN, RESET, last);

    if let Some(mirror) = mirror {
        println!("{}• Document:{} {}", CYAN, RESET, mirror.describe());
        let remote = match mirror.download() {
            Ok(Some(s)) => s.updated_at.to_rfc3339(),
            Ok(None) => "not uploaded yet".to_string(),
            Err(e) => format!("unreadable ({e})"),
        };
        println!("{}• Remote updated:{} {}", CYAN, RESET, remote);
    }
    Ok(())
}

fn watch(
    tracker: &mut Tracker,
    mirror: &dyn SyncMirror,
    interval: Duration,
    once: bool,
) -> AppResult<()> {
    let mut remote = RemoteWatch::new(tracker.sync_state()?.last_sync);
    info(format!(
        "Watching {} every {}s (Ctrl+C to stop)",
        mirror.describe(),
        interval.as_secs()
    ));

    loop {
        match remote.check(mirror) {
            Ok(Some(snapshot)) => {
                let records = snapshot.state.records.len();
                tracker.apply_remote(snapshot, &mirror.describe())?;
                success(format!("Remote change applied ({} records).", records));
            }
            Ok(None) => {}
            Err(e) => {
                ttlog_quiet(tracker.conn(), "sync_error", &mirror.describe(), &e.to_string());
                warning(format!("Sync check failed: {}", e));
            }
        }

        if once {
            return Ok(());
        }
        thread::sleep(interval);
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sync { action } = cmd {
        // uploads here are explicit, so no background outbox
        let mut tracker = Tracker::with_pool(DbPool::new(&cfg.database)?, None)?;
        let mirror = mirror_from_config(cfg)?;
        let retry = RetryConfig::from(&cfg.sync);

        if let SyncAction::Status = action {
            return print_status(&tracker, cfg, mirror.as_ref().map(|m| m as &dyn SyncMirror));
        }

        let mirror = mirror.ok_or_else(|| {
            AppError::SyncNotConfigured(
                "pass --sync-dir and --sync-code, or set sync.enabled/dir/code in the config"
                    .into(),
            )
        })?;

        match action {
            SyncAction::Push => {
                let outcome = tracker.push_now(&mirror, &retry)?;
                if outcome.is_ok() {
                    success(format!("Uploaded to {}", outcome.target));
                }
            }
            SyncAction::Pull { force } => match tracker.pull_now(&mirror, &retry, *force)? {
                PullResult::Applied {
                    records,
                    students,
                    classes,
                } => success(format!(
                    "Remote data applied: {} records, {} students, {} classes",
                    records, students, classes
                )),
                PullResult::UpToDate => info("Local data is up to date."),
                PullResult::Seeded(outcome) => {
                    if outcome.is_ok() {
                        info("No shared data yet; local data uploaded.");
                    }
                }
                PullResult::Failed(e) => warning(format!("Sync failed, local data kept: {}", e)),
            },
            SyncAction::Watch { interval, once } => {
                let secs = interval.unwrap_or(cfg.sync.watch_interval_secs).max(1);
                watch(&mut tracker, &mirror, Duration::from_secs(secs), *once)?;
            }
            SyncAction::Status => {}
        }
    }
    Ok(())
}
