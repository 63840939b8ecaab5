use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tracker::Tracker;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success};
use crate::utils::formatting::money_with;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut tracker = Tracker::open(cfg)?;

        let Some(record) = tracker.state().record(*id) else {
            info(format!("No session with ID {}.", id));
            return Ok(());
        };

        let question = format!(
            "Delete session #{} ({} {} {})?",
            record.id,
            record.date_str(),
            record.course_name,
            money_with(&cfg.currency, record.salary)
        );
        if !*yes && !confirm(question) {
            info("Nothing deleted.");
            return Ok(());
        }

        if tracker.delete_record(*id)? {
            success(format!("Session #{} deleted.", id));
        }

        tracker.finish()?;
    }

    Ok(())
}
