use crate::db::log::{LogEntry, load_log};
use crate::errors::AppResult;
use crate::utils::formatting::pad_right;
use ansi_term::Colour;
use regex::Regex;
use rusqlite::Connection;
use std::sync::OnceLock;
use unicode_width::UnicodeWidthStr;

const MAX_OP_WIDTH: usize = 60;

fn ansi_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static regex"))
}

fn strip_ansi(s: &str) -> String {
    ansi_re().replace_all(s, "").into_owned()
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "student_add" | "class_add" => Colour::Green,
        "del" | "student_del" | "class_del" => Colour::Red,
        "student_update" | "class_update" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "sync_push" | "sync_pull" => Colour::Cyan,
        "sync_error" => Colour::RGB(255, 85, 85),
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)`, truncated to `MAX_OP_WIDTH` visible columns with
/// only the operation word colored.
fn op_label(entry: &LogEntry) -> String {
    let plain = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let visible = if plain.width() > MAX_OP_WIDTH {
        let mut s: String = plain.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_operation(&entry.operation);
    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(conn: &Connection, operation: Option<&str>) -> AppResult<()> {
        let entries = load_log(conn, operation)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let dates: Vec<String> = entries
            .iter()
            .map(|e| {
                chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%F %T").to_string())
                    .unwrap_or_else(|_| e.date.clone())
            })
            .collect();
        let labels: Vec<String> = entries.iter().map(op_label).collect();

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = dates.iter().map(|d| d.width()).max().unwrap_or(10);
        let op_w = labels
            .iter()
            .map(|l| strip_ansi(l).width())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);

        println!("📜 Internal log:\n");

        for ((entry, date), label) in entries.iter().zip(&dates).zip(&labels) {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(label).width()));
            println!(
                "{:>id_w$}: {} | {}{} => {}",
                entry.id,
                pad_right(date, date_w),
                label,
                padding,
                entry.message,
                id_w = id_w
            );
        }

        Ok(())
    }
}
