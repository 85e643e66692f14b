use chrono::{Local, NaiveDateTime, TimeZone};
use regex::Regex;

use crate::app::models::DateRange;

/// Call-log path: date window only, no keyword stage.
pub fn filter_by_date(text: &str, range: &DateRange) -> String {
    filter_lines(text, None, range)
}

/// SMS path: case-insensitive keyword containment, then the date window.
pub fn filter_by_keyword_and_date(text: &str, keyword: Option<&str>, range: &DateRange) -> String {
    filter_lines(text, keyword, range)
}

fn filter_lines(text: &str, keyword: Option<&str>, range: &DateRange) -> String {
    let keyword = keyword
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_lowercase);
    let date_re = match Regex::new(r"date=(\d+)") {
        Ok(re) => re,
        // Unreachable for a literal pattern; retain everything rather than
        // silently dropping evidence.
        Err(_) => return text.to_string(),
    };

    let retained: Vec<&str> = text
        .split('\n')
        .filter(|line| {
            if let Some(ref needle) = keyword {
                if !line.to_lowercase().contains(needle.as_str()) {
                    return false;
                }
            }
            match extract_timestamp(&date_re, line) {
                // No parseable date field: the line cannot be date-filtered
                // and is always retained.
                None => true,
                Some(instant) => range_contains(range, instant),
            }
        })
        .collect();

    retained.join("\n")
}

/// Both bounds compare against local midnight of the given date, so the `to`
/// bound excludes that date's later hours. Boundary behavior is documented
/// upstream and deliberately left as-is.
fn range_contains(range: &DateRange, instant: NaiveDateTime) -> bool {
    if let Some(from) = range.from {
        if let Some(start) = from.and_hms_opt(0, 0, 0) {
            if instant < start {
                return false;
            }
        }
    }
    if let Some(to) = range.to {
        if let Some(end) = to.and_hms_opt(0, 0, 0) {
            if instant > end {
                return false;
            }
        }
    }
    true
}

/// Pulls the `date=<epoch-millis>` field out of a record line and converts it
/// to local calendar time. Unparseable digits (overflow, out-of-range epoch)
/// count as "no timestamp".
fn extract_timestamp(date_re: &Regex, line: &str) -> Option<NaiveDateTime> {
    let caps = date_re.captures(line)?;
    let millis: i64 = caps[1].parse().ok()?;
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.naive_local())
}
