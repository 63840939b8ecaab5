use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::form::{SessionForm, build_record};
use crate::core::tracker::Tracker;
use crate::errors::{AppError, AppResult};
use crate::models::SourceRef;
use crate::ui::messages::success;
use crate::utils::date::{parse_date, today};
use crate::utils::formatting::{hours, money_with};
use crate::utils::parse_amount;
use crate::utils::time::parse_optional_time;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        student,
        class,
        name,
        grade,
        course,
        start,
        end,
        hours: hours_arg,
        rate,
        notes,
    } = cmd
    {
        let date = match date {
            Some(d) => parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => today(),
        };

        let selection = match (student, class) {
            (Some(id), _) => Some(SourceRef::student(*id)),
            (None, Some(id)) => Some(SourceRef::class(*id)),
            (None, None) => None,
        };

        let form = SessionForm {
            selection,
            name: name.clone(),
            grade: grade.clone(),
            course: course.clone(),
            start: parse_optional_time(start.as_ref())?,
            end: parse_optional_time(end.as_ref())?,
            hours: hours_arg.as_deref().map(parse_amount).transpose()?,
            rate: rate.as_deref().map(parse_amount).transpose()?,
            notes: notes.clone(),
        };

        let mut tracker = Tracker::open(cfg)?;
        let input = build_record(tracker.state(), date, &form, cfg.default_rate)?;
        let record = tracker.add_record(input)?;

        success(format!(
            "Session #{} added: {} {} ({}h × {} = {})",
            record.id,
            record.date_str(),
            record.course_name,
            hours(record.hours),
            record.rate,
            money_with(&cfg.currency, record.salary)
        ));

        tracker.finish()?;
    }

    Ok(())
}
