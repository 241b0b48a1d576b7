//! Conversion between [`RecurrencePattern`]s and persisted rule strings.

use super::core::{Frequency, RecurrenceEnd, RecurrencePattern, RecurrenceRule};
use super::parse::parse_rule;

impl RecurrencePattern {
    /// ## Summary
    /// Converts the pattern into its rule form.
    ///
    /// `daysOfWeek` is only carried for weekly patterns and `dayOfMonth` only for
    /// monthly ones. An `until` end becomes the last second of the end date.
    #[must_use]
    pub fn to_rule(&self) -> RecurrenceRule {
        let mut rule = RecurrenceRule::new(self.frequency);
        rule.interval = self.interval.max(1);

        if self.frequency == Frequency::Weekly {
            rule.by_day.clone_from(&self.days_of_week);
        }
        if self.frequency == Frequency::Monthly {
            rule.by_month_day = self.day_of_month;
        }

        match self.end {
            RecurrenceEnd::Never => {}
            // Last second of the end date, so the whole day is included.
            RecurrenceEnd::Until { end_date } => rule.until = end_date.and_hms_opt(23, 59, 59),
            RecurrenceEnd::Count { occurrences } => rule.count = Some(occurrences),
        }

        rule
    }

    /// ## Summary
    /// Builds a pattern from a parsed rule.
    ///
    /// When a rule carries both `UNTIL` and `COUNT`, `UNTIL` wins. Weekday and
    /// month-day selections that do not apply to the rule's frequency are
    /// dropped so the result always validates.
    #[must_use]
    pub fn from_rule(rule: &RecurrenceRule) -> Self {
        let end = match (rule.until, rule.count) {
            (Some(until), _) => RecurrenceEnd::Until {
                end_date: until.date(),
            },
            (None, Some(occurrences)) => RecurrenceEnd::Count { occurrences },
            (None, None) => RecurrenceEnd::Never,
        };

        Self {
            frequency: rule.freq,
            interval: rule.interval.max(1),
            days_of_week: if rule.freq == Frequency::Weekly {
                rule.by_day.clone()
            } else {
                std::collections::BTreeSet::new()
            },
            day_of_month: rule.by_month_day.filter(|_| rule.freq == Frequency::Monthly),
            end,
        }
    }
}

/// ## Summary
/// Serializes a pattern into a rule string such as
/// `FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE;UNTIL=20251231T235959Z`.
///
/// ## Side Effects
/// None - pure function.
#[must_use]
pub fn pattern_to_rule(pattern: &RecurrencePattern) -> String {
    pattern.to_rule().to_string()
}

/// ## Summary
/// Parses a rule string into a pattern, failing open.
///
/// Returns `None` when the rule has no usable `FREQ`; callers treat that as
/// "not recurring". Everything else that is malformed is dropped.
#[must_use]
pub fn rule_to_pattern(rule: &str) -> Option<RecurrencePattern> {
    match parse_rule(rule) {
        Ok(parsed) => Some(RecurrencePattern::from_rule(&parsed)),
        Err(err) => {
            tracing::debug!(error = %err, rule, "Treating rule as non-recurring");
            None
        }
    }
}
