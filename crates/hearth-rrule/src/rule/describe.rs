//! Human-readable sentences for recurrence patterns.

use super::core::{Frequency, RecurrenceEnd, RecurrencePattern, Weekday};

/// Format of the end date in descriptions, e.g. `Dec 31, 2025`.
const END_DATE_FORMAT: &str = "%b %-d, %Y";

/// ## Summary
/// Renders a pattern as an English sentence, e.g.
/// "Every 2 weeks on Monday and Wednesday, until Dec 31, 2025".
///
/// Never fails; degenerate patterns produce plain frequency phrasing.
///
/// ## Side Effects
/// None - pure function.
#[must_use]
pub fn describe(pattern: &RecurrencePattern) -> String {
    let unit = pattern.frequency.unit();
    let mut text = match pattern.interval {
        0 | 1 => format!("Every {unit}"),
        n => format!("Every {n} {unit}s"),
    };

    match pattern.frequency {
        Frequency::Weekly if !pattern.days_of_week.is_empty() => {
            let names: Vec<&str> = pattern.days_of_week.iter().copied().map(Weekday::name).collect();
            text.push_str(&format!(" on {}", join_names(&names)));
        }
        Frequency::Monthly => {
            if let Some(day) = pattern.day_of_month {
                text.push_str(&format!(" on the {}", ordinal(day)));
            }
        }
        _ => {}
    }

    match pattern.end {
        RecurrenceEnd::Never => {}
        RecurrenceEnd::Until { end_date } => {
            text.push_str(&format!(", until {}", end_date.format(END_DATE_FORMAT)));
        }
        RecurrenceEnd::Count { occurrences: 1 } => text.push_str(", once"),
        RecurrenceEnd::Count { occurrences } => {
            text.push_str(&format!(", {occurrences} times"));
        }
    }

    text
}

impl RecurrencePattern {
    /// Renders the pattern as an English sentence. See [`describe`].
    #[must_use]
    pub fn describe(&self) -> String {
        describe(self)
    }
}

/// Joins names as "A", "A and B" or "A, B and C".
fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

fn ordinal(day: u8) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}
