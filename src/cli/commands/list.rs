use crate::cli::commands::{month_filter, record_table};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::records::{filtered_by_month, sorted_descending};
use crate::core::summary::MonthlyTotals;
use crate::core::tracker::Tracker;
use crate::errors::AppResult;
use crate::utils::date::month_title;
use crate::utils::formatting::{hours, money_with};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { month } = cmd {
        let month = month_filter(month)?;
        let tracker = Tracker::open(cfg)?;
        let state = tracker.state();

        let records = sorted_descending(filtered_by_month(&state.records, month.as_deref()));

        if records.is_empty() {
            match &month {
                Some(m) => println!("No sessions in {}.", month_title(m)),
                None => println!("No sessions recorded yet."),
            }
            return Ok(());
        }

        let totals = MonthlyTotals::of(records.iter().copied());
        print!("{}", record_table(state, records, &cfg.currency).render());
        println!(
            "\n{} sessions, {} h, {}",
            totals.count,
            hours(totals.total_hours),
            money_with(&cfg.currency, totals.total_pay)
        );

        tracker.finish()?;
    }
    Ok(())
}
