use chrono::{NaiveTime, Timelike};

/// Minutes since midnight
pub type Minutes = u32;

pub const MINUTES_PER_HOUR: Minutes = 60;
pub const MINUTES_PER_DAY: Minutes = 24 * MINUTES_PER_HOUR;

/// Parse time string in strict HH:MM format into minutes since midnight
///
/// Only two-digit hours 00-23 and minutes 00-59 are accepted, so "9:30" and
/// "24:00" are both rejected.
pub fn parse_time(time_str: &str) -> Option<Minutes> {
    let bytes = time_str.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    if !bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 2 || b.is_ascii_digit())
    {
        return None;
    }

    let time = NaiveTime::parse_from_str(time_str, "%H:%M").ok()?;
    Some(time.hour() * MINUTES_PER_HOUR + time.minute())
}

/// Format minutes since midnight as HH:MM, wrapping past the end of the day
pub fn format_minutes(minutes: Minutes) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", minutes / MINUTES_PER_HOUR, minutes % MINUTES_PER_HOUR)
}

/// Format a duration in minutes as a short human-readable string
pub fn format_duration(minutes: Minutes) -> String {
    let hours = minutes / MINUTES_PER_HOUR;
    let mins = minutes % MINUTES_PER_HOUR;

    match (hours, mins) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}
