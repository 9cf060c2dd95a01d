//! Display formatting for video cards and the watch page.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$").expect("duration pattern is valid")
});

/// Largest unit first; the first unit with a count of at least one wins.
const TIME_AGO_UNITS: &[(&str, i64)] = &[
    ("year", 31_536_000),
    ("month", 2_592_000),
    ("week", 604_800),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
];

/// Format a view count as `1.2M views`, `3.4K views`, `12 views` or `No views`.
pub fn format_view_count(count: Option<u64>) -> String {
    match count {
        None => "No views".to_string(),
        Some(n) if n >= 1_000_000 => format!("{:.1}M views", n as f64 / 1_000_000.0),
        Some(n) if n >= 1_000 => format!("{:.1}K views", n as f64 / 1_000.0),
        Some(n) => format!("{n} views"),
    }
}

/// Parse an ISO-8601 duration (`PT1H2M3S`, `P1DT2H`) into whole seconds.
///
/// Returns `None` for anything that is not a day/time duration, or when the
/// total does not fit in a `u64`.
pub fn parse_duration(iso: &str) -> Option<u64> {
    let caps = ISO_DURATION.captures(iso.trim())?;

    [(1, 86_400u64), (2, 3_600), (3, 60), (4, 1)].into_iter().try_fold(0u64, |total, (group, unit)| {
        let count: u64 = match caps.get(group) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        total.checked_add(count.checked_mul(unit)?)
    })
}

/// Format an ISO-8601 duration as `m:ss` or `h:mm:ss`; empty when unparseable.
pub fn format_duration(iso: &str) -> String {
    let Some(total) = parse_duration(iso) else {
        return String::new();
    };

    let hours = total / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    if hours > 0 { format!("{hours}:{minutes:02}:{seconds:02}") } else { format!("{minutes}:{seconds:02}") }
}

/// Relative publish time such as `3 days ago`, or `Just now` under a minute.
pub fn format_time_ago(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - published).num_seconds();

    for (unit, seconds) in TIME_AGO_UNITS {
        let count = elapsed / seconds;
        if count >= 1 {
            let plural = if count > 1 { "s" } else { "" };
            return format!("{count} {unit}{plural} ago");
        }
    }

    "Just now".to_string()
}

/// Absolute publish date such as `Oct 16, 2026`.
pub fn format_publish_date(published: DateTime<Utc>) -> String {
    published.format("%b %-d, %Y").to_string()
}
