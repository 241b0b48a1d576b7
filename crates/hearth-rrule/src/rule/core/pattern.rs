//! Structured recurrence pattern exchanged with the UI and API layers.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Frequency, Weekday};
use crate::error::{RuleError, RuleResult};

/// How a series ends.
///
/// Serialized as the `endType` tag with `endDate` or `occurrences` alongside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "endType", rename_all = "lowercase")]
pub enum RecurrenceEnd {
    /// The series never ends.
    #[default]
    Never,
    /// The series ends at the end of `end_date`.
    Until {
        #[serde(rename = "endDate")]
        end_date: NaiveDate,
    },
    /// The series has exactly `occurrences` occurrences in total.
    Count { occurrences: u32 },
}

/// A recurrence as entered by a user or produced by an assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePattern {
    pub frequency: Frequency,

    #[serde(default = "default_interval")]
    pub interval: u32,

    /// Weekly only. Empty means the anchor's own weekday.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub days_of_week: BTreeSet<Weekday>,

    /// Monthly only. Clamped to the length of each target month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u8>,

    #[serde(flatten)]
    pub end: RecurrenceEnd,
}

const fn default_interval() -> u32 {
    1
}

impl RecurrencePattern {
    /// Creates a pattern repeating every period of `frequency`, forever.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            days_of_week: BTreeSet::new(),
            day_of_month: None,
            end: RecurrenceEnd::Never,
        }
    }

    #[must_use]
    pub fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    #[must_use]
    pub fn weekly() -> Self {
        Self::new(Frequency::Weekly)
    }

    #[must_use]
    pub fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    #[must_use]
    pub fn yearly() -> Self {
        Self::new(Frequency::Yearly)
    }

    /// Sets the interval.
    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the selected weekdays.
    #[must_use]
    pub fn on_days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.days_of_week = days.into_iter().collect();
        self
    }

    /// Sets the day of month.
    #[must_use]
    pub fn on_month_day(mut self, day: u8) -> Self {
        self.day_of_month = Some(day);
        self
    }

    /// Ends the series after `end_date`.
    #[must_use]
    pub fn until(mut self, end_date: NaiveDate) -> Self {
        self.end = RecurrenceEnd::Until { end_date };
        self
    }

    /// Ends the series after `occurrences` occurrences.
    #[must_use]
    pub fn with_count(mut self, occurrences: u32) -> Self {
        self.end = RecurrenceEnd::Count { occurrences };
        self
    }

    /// Last date of the series, if it ends on a date.
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        match self.end {
            RecurrenceEnd::Until { end_date } => Some(end_date),
            RecurrenceEnd::Never | RecurrenceEnd::Count { .. } => None,
        }
    }

    /// Total occurrence count, if the series ends after a count.
    #[must_use]
    pub fn count(&self) -> Option<u32> {
        match self.end {
            RecurrenceEnd::Count { occurrences } => Some(occurrences),
            RecurrenceEnd::Never | RecurrenceEnd::Until { .. } => None,
        }
    }

    /// ## Summary
    /// Checks the invariants the type system does not enforce.
    ///
    /// ## Errors
    /// Returns `RuleError::InvalidPattern` if the interval or count is zero, the
    /// day of month is outside 1-31, or a weekly/monthly-only field is set on
    /// another frequency.
    pub fn validate(&self) -> RuleResult<()> {
        if self.interval == 0 {
            return Err(RuleError::InvalidPattern(
                "interval must be at least 1".to_string(),
            ));
        }

        if !self.days_of_week.is_empty() && self.frequency != Frequency::Weekly {
            return Err(RuleError::InvalidPattern(format!(
                "daysOfWeek is only valid for weekly patterns, not {}",
                self.frequency
            )));
        }

        if let Some(day) = self.day_of_month {
            if self.frequency != Frequency::Monthly {
                return Err(RuleError::InvalidPattern(format!(
                    "dayOfMonth is only valid for monthly patterns, not {}",
                    self.frequency
                )));
            }
            if !(1..=31).contains(&day) {
                return Err(RuleError::InvalidPattern(format!(
                    "dayOfMonth {day} is not in 1..=31"
                )));
            }
        }

        if self.end == (RecurrenceEnd::Count { occurrences: 0 }) {
            return Err(RuleError::InvalidPattern(
                "occurrences must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
