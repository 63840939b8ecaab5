use crate::cli::commands::{month_or_current, record_table};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary::{MonthlyTotals, PreviewSection, month_preview};
use crate::core::tracker::Tracker;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{BLUE, MAGENTA, RESET};
use crate::utils::date::month_title;
use crate::utils::formatting::{hours, money_with};

fn totals_line(label: &str, t: &MonthlyTotals, currency: &str) -> String {
    format!(
        "{}: {} sessions, {} h, {}",
        label,
        t.count,
        hours(t.total_hours),
        money_with(currency, t.total_pay)
    )
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Preview { month } = cmd {
        let month = month_or_current(month)?;
        let tracker = Tracker::open(cfg)?;
        let state = tracker.state();
        let preview = month_preview(state, &month);

        header(format!("Sessions of {}", month_title(&month)));

        if preview.totals.count == 0 {
            println!("No sessions in this month.");
            return Ok(());
        }

        let sections: [(&str, &str, &PreviewSection); 2] = [
            ("Individual sessions", BLUE, &preview.individuals),
            ("Class sessions", MAGENTA, &preview.classes),
        ];
        for (title, color, section) in sections {
            if section.rows.is_empty() {
                continue;
            }
            println!("\n{}{}{}", color, title, RESET);
            let table = record_table(state, section.rows.iter().map(|r| r.record), &cfg.currency);
            print!("{}", table.render());
            println!("{}", totals_line("Subtotal", &section.totals, &cfg.currency));
        }

        println!("\n{}", totals_line("Total", &preview.totals, &cfg.currency));

        tracker.finish()?;
    }
    Ok(())
}
