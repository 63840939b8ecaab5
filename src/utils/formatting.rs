//! Formatting utilities used for CLI and export outputs.

use crate::errors::{AppError, AppResult};
use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Left-align `s` in `width` terminal columns (CJK names take two columns).
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

pub fn pad_left(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", " ".repeat(width.saturating_sub(w)), s)
}

pub fn money(v: f64) -> String {
    format!("{:.2}", v)
}

pub fn money_with(symbol: &str, v: f64) -> String {
    format!("{}{:.2}", symbol, v)
}

pub fn hours(v: f64) -> String {
    format!("{:.1}", v)
}

/// Rate/hours as typed by the user: no trailing `.0` noise for whole numbers.
pub fn plain_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Checked parser for hours and rates.
///
/// Rejects anything that is not a finite, non-negative decimal, so a bad
/// value never reaches a salary or an aggregate.
pub fn parse_amount(s: &str) -> AppResult<f64> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidNumber(s.to_string()))?;

    if !v.is_finite() || v < 0.0 {
        return Err(AppError::InvalidNumber(s.to_string()));
    }

    Ok(v)
}

/// Round to `decimals` places for display totals.
pub fn round_to(v: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (v * f).round() / f
}

pub fn dash_if_empty(s: &str) -> String {
    if s.trim().is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}
