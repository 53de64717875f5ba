//! Textual date formats used at the hub's boundaries.
//!
//! Event fields are typed as `yyyy-MM-dd HH:mm`. Lottery periods accept an
//! optional seconds component on read but are always written without it.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";
const SECOND_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Layouts checked before chrono sees the input; chrono alone accepts
// unpadded fields, two-digit years and a leading sign.
const DATE_LAYOUT: &str = "dddd-dd-dd";
const MINUTE_LAYOUT: &str = "dddd-dd-dd dd:dd";
const SECOND_LAYOUT: &str = "dddd-dd-dd dd:dd:dd";

/// `d` matches one ASCII digit, every other layout byte must match exactly.
fn matches_layout(raw: &str, layout: &str) -> bool {
    raw.len() == layout.len()
        && raw.bytes().zip(layout.bytes()).all(|(byte, slot)| match slot {
            b'd' => byte.is_ascii_digit(),
            literal => byte == literal,
        })
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if !matches_layout(trimmed, DATE_LAYOUT) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
}

/// Strict `yyyy-MM-dd HH:mm`.
pub fn parse_minutes(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if !matches_layout(trimmed, MINUTE_LAYOUT) {
        return None;
    }
    NaiveDateTime::parse_from_str(trimmed, MINUTE_FORMAT).ok()
}

/// `yyyy-MM-dd HH:mm[:ss]`, truncated to the minute.
pub fn parse_minutes_lenient(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if matches_layout(trimmed, SECOND_LAYOUT) {
        NaiveDateTime::parse_from_str(trimmed, SECOND_FORMAT)
            .ok()
            .and_then(|value| value.with_second(0))
    } else {
        parse_minutes(trimmed)
    }
}

pub fn format_minutes(value: &NaiveDateTime) -> String {
    value.format(MINUTE_FORMAT).to_string()
}

/// Serde adapter for event date-times.
pub mod minutes {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_minutes(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_minutes(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("failed to parse '{raw}' as yyyy-MM-dd HH:mm"))
        })
    }
}

/// Serde adapter for lottery period bounds.
pub mod minutes_lenient {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_minutes(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_minutes_lenient(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("failed to parse '{raw}' as yyyy-MM-dd HH:mm[:ss]"))
        })
    }
}
