//! Value parsers for rule string parts.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{RuleError, RuleResult};
use crate::rule::core::{Frequency, RecurrenceRule, Weekday};

/// Parts collected before `FREQ` is known to be present.
#[derive(Default)]
struct RuleParts {
    freq: Option<String>,
    interval: Option<u32>,
    by_day: BTreeSet<Weekday>,
    by_month_day: Option<u8>,
    until: Option<NaiveDateTime>,
    count: Option<u32>,
}

/// ## Summary
/// Parses a rule string such as `FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE`.
///
/// Keys are matched case-insensitively and may appear in any order. Unknown
/// keys, parts without `=`, unknown `BYDAY` tokens and malformed `INTERVAL`,
/// `BYMONTHDAY`, `UNTIL` or `COUNT` values are dropped. A missing `INTERVAL`
/// (or one that is not a positive integer) means 1.
///
/// ## Errors
/// Returns `RuleError::MissingFrequency` if there is no `FREQ` part and
/// `RuleError::UnknownFrequency` if it is not daily, weekly, monthly or yearly.
pub fn parse_rule(s: &str) -> RuleResult<RecurrenceRule> {
    let mut parts = RuleParts::default();

    for part in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((key, value)) = part.split_once('=') else {
            tracing::debug!(part, "Dropping rule part without '='");
            continue;
        };
        parse_rule_part(&mut parts, key.trim(), value.trim());
    }

    let freq = match parts.freq {
        Some(value) => Frequency::parse(&value).ok_or(RuleError::UnknownFrequency(value))?,
        None => return Err(RuleError::MissingFrequency),
    };

    Ok(RecurrenceRule {
        freq,
        interval: parts.interval.unwrap_or(1),
        by_day: parts.by_day,
        by_month_day: parts.by_month_day,
        until: parts.until,
        count: parts.count,
    })
}

/// Parses a single rule key-value pair.
fn parse_rule_part(parts: &mut RuleParts, key: &str, value: &str) {
    match key.to_ascii_uppercase().as_str() {
        "FREQ" => parts.freq = Some(value.to_string()),
        "INTERVAL" => {
            parts.interval = parse_positive(value);
            if parts.interval.is_none() {
                tracing::debug!(value, "Invalid INTERVAL, falling back to 1");
            }
        }
        "BYDAY" => parts.by_day = parse_byday(value),
        "BYMONTHDAY" => parts.by_month_day = parse_month_day(value),
        "UNTIL" => {
            parts.until = parse_until(value);
            if parts.until.is_none() {
                tracing::debug!(value, "Dropping malformed UNTIL");
            }
        }
        "COUNT" => {
            parts.count = parse_positive(value);
            if parts.count.is_none() {
                tracing::debug!(value, "Dropping malformed COUNT");
            }
        }
        _ => tracing::trace!(key, "Ignoring unsupported rule part"),
    }
}

/// Parses a strictly positive decimal integer.
fn parse_positive(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|n| *n > 0)
}

/// Parses a BYDAY list, keeping only plain two-letter weekday codes.
fn parse_byday(value: &str) -> BTreeSet<Weekday> {
    value
        .split(',')
        .filter_map(|token| {
            let weekday = Weekday::parse(token);
            if weekday.is_none() {
                tracing::debug!(token, "Dropping unrecognized BYDAY token");
            }
            weekday
        })
        .collect()
}

/// Parses the first usable entry of a BYMONTHDAY list.
///
/// Negative (from-end) month days are outside the supported subset.
fn parse_month_day(value: &str) -> Option<u8> {
    let mut days = value
        .split(',')
        .filter_map(|token| token.trim().parse::<u8>().ok())
        .filter(|day| (1..=31).contains(day));

    let day = days.next();
    if day.is_none() {
        tracing::debug!(value, "Dropping unusable BYMONTHDAY");
    } else if days.next().is_some() {
        tracing::debug!(value, "Only the first BYMONTHDAY entry is supported");
    }
    day
}

/// ## Summary
/// Parses an `UNTIL` value.
///
/// Accepts `YYYYMMDDTHHMMSSZ`, the floating `YYYYMMDDTHHMMSS` and the date-only
/// `YYYYMMDD`; a bare date means the end of that day. The trailing `Z` is read
/// as a naive wall-clock value like every other time in this crate.
#[must_use]
pub fn parse_until(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    let value = value.strip_suffix('Z').unwrap_or(value);

    if value.contains('T') {
        NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").ok()
    } else {
        NaiveDate::parse_from_str(value, "%Y%m%d")
            .ok()
            .and_then(|date| date.and_hms_opt(23, 59, 59))
    }
}

impl FromStr for RecurrenceRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rule(s)
    }
}
