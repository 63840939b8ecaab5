//! Serde helpers that keep the stored JSON compatible with the blobs written
//! by the browser version of the tracker (`"HH:MM"` strings, empty strings for
//! absent values, numbers that may have been saved as text).

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

const TIME_FORMAT: &str = "%H:%M";

fn parse_clock(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Required `HH:MM` clock value.
pub mod hhmm {
    use super::*;

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format(TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse_clock(raw.trim())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time '{raw}'")))
    }
}

/// Optional `HH:MM` clock value; `""` and `null` read as absent.
pub mod hhmm_opt {
    use super::*;

    pub fn serialize<S: Serializer>(t: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => s.serialize_str(&t.format(TIME_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(v) => parse_clock(v)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid time '{v}'"))),
        }
    }
}

/// Optional free text; `""` reads as absent.
pub fn empty_as_none<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Decimal that may be stored as a number, a numeric string or `null`.
/// Anything unreadable loads as `0.0`.
pub fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let raw: Option<NumberOrText> = Option::deserialize(d)?;
    let v = match raw {
        Some(NumberOrText::Number(n)) => n,
        Some(NumberOrText::Text(t)) => t.trim().parse().unwrap_or(0.0),
        None => 0.0,
    };
    Ok(if v.is_finite() { v } else { 0.0 })
}

/// Class headcount; unreadable or zero sizes load as 1.
pub fn lenient_size<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let v = lenient_f64(d)?;
    Ok(if v >= 1.0 { v as u32 } else { 1 })
}
