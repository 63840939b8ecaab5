use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::selection::{class_of, headcount};
use crate::core::tracker::Tracker;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{RESET, color_for_kind, colorize_optional};
use crate::utils::formatting::{bold, dash_if_empty, hours, money_with, plain_number};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let tracker = Tracker::open(cfg)?;
        let state = tracker.state();

        let record = state.record(*id).ok_or(AppError::NotFound {
            kind: "Session",
            id: *id,
        })?;
        let class = class_of(state, record);

        let kind = if class.is_some() { "Class" } else { "Student" };
        println!(
            "{} {}{}{}",
            bold(&format!("Session #{}", record.id)),
            color_for_kind(class.is_some()),
            kind,
            RESET
        );
        println!("  Date    : {}", record.date_str());
        println!(
            "  Time    : {}",
            colorize_optional(&record.time_range().unwrap_or_else(|| "-".into()))
        );
        println!("  Name    : {}", colorize_optional(&dash_if_empty(&record.student_name)));
        println!(
            "  Grade   : {}",
            colorize_optional(&dash_if_empty(record.grade.as_deref().unwrap_or("")))
        );
        println!("  Course  : {}", record.course_name);
        if class.is_some() {
            println!("  People  : {}", headcount(state, record));
        }
        println!("  Hours   : {}", hours(record.hours));
        println!("  Rate    : {}", plain_number(record.rate));
        println!("  Pay     : {}", money_with(&cfg.currency, record.salary));
        println!(
            "  Notes   : {}",
            colorize_optional(&dash_if_empty(record.notes.as_deref().unwrap_or("")))
        );

        tracker.finish()?;
    }
    Ok(())
}
