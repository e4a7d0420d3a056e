//! Display formatting for raw API values (en-US, USD).
//!
//! All functions are pure. Input that does not parse is returned unchanged so
//! a view never shows less than the backend sent.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// `123456` → `"$1,234.56"`, `-500` → `"-$5.00"`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = abs / 100;
    let rem = abs % 100;
    format!("{sign}${}.{rem:02}", group_thousands(dollars))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `"2026-03-05"` → `"Thu, Mar 5, 2026"`.
pub fn format_date(iso: &str) -> String {
    match parse_date(iso) {
        Some(date) => format_naive_date(date),
        None => iso.to_string(),
    }
}

pub fn format_naive_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// `"14:30"` or `"14:30:00"` → `"2:30 PM"`.
pub fn format_time(hhmm: &str) -> String {
    match parse_time(hhmm) {
        Some(time) => time.format("%-I:%M %p").to_string(),
        None => hhmm.to_string(),
    }
}

/// RFC 3339 timestamp → `"Mar 5, 2026, 2:30 PM"` (UTC).
pub fn format_datetime(rfc3339: &str) -> String {
    match DateTime::parse_from_rfc3339(rfc3339.trim()) {
        Ok(dt) => format_utc(dt.with_timezone(&Utc)),
        Err(_) => rfc3339.to_string(),
    }
}

pub fn format_utc(dt: DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// `45` → `"45 min"`, `60` → `"1 hr"`, `150` → `"2 hr 30 min"`.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} hr"),
        (h, m) => format!("{h} hr {m} min"),
    }
}

/// Parse `YYYY-MM-DD`, tolerating a trailing time component.
pub fn parse_date(iso: &str) -> Option<NaiveDate> {
    let trimmed = iso.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .ok()
}
