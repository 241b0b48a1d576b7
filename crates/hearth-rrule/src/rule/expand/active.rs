//! Whether a recurring series is still running.

use chrono::NaiveDateTime;

use super::generator::OccurrenceGenerator;
use crate::rule::codec::rule_to_pattern;
use crate::rule::core::{RecurrenceEnd, RecurrencePattern};

/// ## Summary
/// Reports whether the series described by `rule` has not yet concluded at `now`.
///
/// A rule without a usable `FREQ` describes no series and is never active.
///
/// ## Side Effects
/// None - pure function.
#[must_use]
pub fn is_recurrence_active(rule: &str, anchor: NaiveDateTime, now: NaiveDateTime) -> bool {
    rule_to_pattern(rule).is_some_and(|pattern| is_pattern_active(&pattern, anchor, now))
}

/// ## Summary
/// Reports whether `pattern`, anchored at `anchor`, has not yet concluded at `now`.
///
/// - `never`: always active.
/// - `until`: active while `now` is on or before the end date.
/// - `count`: active while some occurrence within the count is at or after
///   `now`. A series that cannot produce its occurrences is inactive.
#[must_use]
pub fn is_pattern_active(
    pattern: &RecurrencePattern,
    anchor: NaiveDateTime,
    now: NaiveDateTime,
) -> bool {
    match pattern.end {
        RecurrenceEnd::Never => true,
        RecurrenceEnd::Until { end_date } => now.date() <= end_date,
        RecurrenceEnd::Count { .. } => !OccurrenceGenerator::new(pattern, anchor)
            .generate(1, Some(now))
            .is_empty(),
    }
}
