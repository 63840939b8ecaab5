use crate::cli::commands::month_or_current;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary::{distinct_months, grand_total_pay, monthly_totals};
use crate::core::tracker::Tracker;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RESET};
use crate::utils::date::month_title;
use crate::utils::formatting::{hours, money_with};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { month, months } = cmd {
        let tracker = Tracker::open(cfg)?;
        let records = &tracker.state().records;

        if *months {
            let mut table = Table::new(vec![
                Column::left("Month"),
                Column::right("Sessions"),
                Column::right("Hours"),
                Column::right("Pay"),
            ]);
            for m in distinct_months(records) {
                let t = monthly_totals(records, &m);
                table.add_row(vec![
                    m,
                    t.count.to_string(),
                    hours(t.total_hours),
                    money_with(&cfg.currency, t.total_pay),
                ]);
            }
            if table.is_empty() {
                println!("No sessions recorded yet.");
            } else {
                print!("{}", table.render());
            }
        } else {
            let month = month_or_current(month)?;
            let totals = monthly_totals(records, &month);

            println!("{}{}{}", CYAN, month_title(&month), RESET);
            println!("  Sessions : {}", totals.count);
            println!("  Hours    : {}", hours(totals.total_hours));
            println!(
                "  Pay      : {}{}{}",
                GREEN,
                money_with(&cfg.currency, totals.total_pay),
                RESET
            );
        }

        println!(
            "\nAll-time pay: {}",
            money_with(&cfg.currency, grand_total_pay(records))
        );

        tracker.finish()?;
    }
    Ok(())
}
