// Time normalization for schedule cells.
//
// Purpose
// - Turn human-typed times ("7:00", " 15:30 ", "9:05h") into canonical values.
//
// Responsibilities
// - Never fail loudly: every helper returns None when the input cannot be read.
// - Do not validate ordering. Negative durations are returned as they are.

use chrono::{Duration, NaiveTime, Timelike};

/// Parses `H:MM` / `HH:MM` after dropping every character that is not a digit or ':'.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ':')
        .collect();
    let (hours, minutes) = cleaned.split_once(':')?;
    if !(1..=2).contains(&hours.len()) || minutes.len() != 2 || minutes.contains(':') {
        return None;
    }
    NaiveTime::from_hms_opt(hours.parse().ok()?, minutes.parse().ok()?, 0)
}

/// Canonical `HH:MM` for a raw cell value.
pub fn format_time(raw: &str) -> Option<String> {
    parse_time(raw).map(|t| t.format("%H:%M").to_string())
}

/// Minutes between two raw times, `end - start`.
pub fn calculate_duration(start: &str, end: &str) -> Option<i64> {
    let start = parse_time(start)?;
    let end = parse_time(end)?;
    Some(minutes_between(start, end))
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    end.signed_duration_since(start).num_minutes()
}

/// Wraps past midnight.
pub fn add_one_second(time: NaiveTime) -> NaiveTime {
    time.overflowing_add_signed(Duration::seconds(1)).0
}

/// `HH:MM[:SS]` plus one second, as `HH:MM:SS`. Missing seconds count as zero.
pub fn add_one_second_to_time_string(time: &str) -> Option<String> {
    let mut parts = time.trim().split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    let seconds: u32 = match parts.next() {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    let time = NaiveTime::from_hms_opt(hours, minutes, seconds)?;
    let next = add_one_second(time);
    Some(format!(
        "{:02}:{:02}:{:02}",
        next.hour(),
        next.minute(),
        next.second()
    ))
}
