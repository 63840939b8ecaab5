use crate::cli::commands::required_time;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::utils::formatting::hours as fmt_hours;
use crate::utils::parse_amount;
use crate::utils::time::{end_from_hours, format_time, hours_between};

pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Calc { start, end, hours } = cmd {
        let start = required_time(start)?;

        match (end, hours) {
            (Some(end), _) => {
                let end = required_time(end)?;
                println!(
                    "{} → {} = {} h",
                    format_time(start),
                    format_time(end),
                    fmt_hours(hours_between(start, end))
                );
            }
            (None, Some(h)) => {
                let h = parse_amount(h)?;
                println!(
                    "{} + {} h = {}",
                    format_time(start),
                    fmt_hours(h),
                    format_time(end_from_hours(start, h)?)
                );
            }
            (None, None) => {}
        }
    }
    Ok(())
}
