use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// `YYYY-MM` of the given date.
pub fn month_of(d: &NaiveDate) -> String {
    format!("{:04}-{:02}", d.year(), d.month())
}

/// Month key of "now", the default month when none is selected.
pub fn current_month_key() -> String {
    month_of(&today())
}

/// Validate and normalize a `YYYY-MM` month key.
pub fn parse_month(p: &str) -> Option<String> {
    let p = p.trim();
    if p.len() != 7 {
        return None;
    }
    NaiveDate::parse_from_str(&(p.to_string() + "-01"), "%Y-%m-%d")
        .ok()
        .map(|d| month_of(&d))
}

pub fn month_name(month: &str) -> &'static str {
    match month {
        "01" => "January",
        "02" => "February",
        "03" => "March",
        "04" => "April",
        "05" => "May",
        "06" => "June",
        "07" => "July",
        "08" => "August",
        "09" => "September",
        "10" => "October",
        "11" => "November",
        "12" => "December",
        _ => "Unknown",
    }
}

/// Human title for a month key, e.g. `2024-03` → `March 2024`.
pub fn month_title(key: &str) -> String {
    match key.split_once('-') {
        Some((year, month)) => format!("{} {}", month_name(month), year),
        None => key.to_string(),
    }
}
