//! Event value types.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use hearth_rrule::rule::{RecurrencePattern, pattern_to_rule, rule_to_pattern};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ServiceError, ServiceResult};

/// A stored calendar event, possibly the anchor of a recurring series.
///
/// `payload` holds every field the calendar does not interpret (title, color,
/// location, ...). It is copied unchanged onto each instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseEvent<P> {
    pub id: String,
    pub start: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    /// Persisted rule string; absent or blank means a one-off event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(flatten)]
    pub payload: P,
}

impl<P> BaseEvent<P> {
    /// Creates a one-off event.
    #[must_use]
    pub fn new(id: impl Into<String>, start: NaiveDateTime, payload: P) -> Self {
        Self {
            id: id.into(),
            start,
            end: None,
            rule: None,
            payload,
        }
    }

    /// Sets the end timestamp.
    #[must_use]
    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets the rule string as stored.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// ## Summary
    /// Makes the event recur according to `pattern`.
    ///
    /// ## Errors
    /// Returns `ServiceError::RuleError` if the pattern does not validate.
    pub fn with_pattern(mut self, pattern: &RecurrencePattern) -> ServiceResult<Self> {
        pattern.validate()?;
        self.rule = Some(pattern_to_rule(pattern));
        Ok(self)
    }

    /// The rule string, if it is non-blank.
    #[must_use]
    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref().map(str::trim).filter(|rule| !rule.is_empty())
    }

    /// The structured pattern, if the rule string decodes.
    #[must_use]
    pub fn pattern(&self) -> Option<RecurrencePattern> {
        self.rule().and_then(rule_to_pattern)
    }
}

/// Identity of an event instance.
///
/// One-off events keep their own id; recurring instances pair the series id
/// with the occurrence start, so re-expanding a window yields the same ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId {
    pub origin_id: String,
    pub occurrence: Option<NaiveDateTime>,
}

impl InstanceId {
    #[must_use]
    pub fn single(origin_id: impl Into<String>) -> Self {
        Self {
            origin_id: origin_id.into(),
            occurrence: None,
        }
    }

    #[must_use]
    pub fn occurrence(origin_id: impl Into<String>, start: NaiveDateTime) -> Self {
        Self {
            origin_id: origin_id.into(),
            occurrence: Some(start),
        }
    }

    /// Occurrence start as milliseconds since the Unix epoch, reading the
    /// wall-clock value as UTC.
    #[must_use]
    pub fn occurrence_millis(&self) -> Option<i64> {
        self.occurrence
            .map(|start| start.and_utc().timestamp_millis())
    }

    #[must_use]
    pub fn is_occurrence(&self) -> bool {
        self.occurrence.is_some()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.occurrence_millis() {
            Some(millis) => write!(f, "{}@{millis}", self.origin_id),
            None => write!(f, "{}", self.origin_id),
        }
    }
}

impl Serialize for InstanceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A concrete, displayable event: a one-off event or one occurrence of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInstance<P> {
    pub id: InstanceId,
    pub start: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(flatten)]
    pub payload: P,
}

impl<P: Clone> EventInstance<P> {
    /// The event itself, unchanged.
    #[must_use]
    pub fn single(base: &BaseEvent<P>) -> Self {
        Self {
            id: InstanceId::single(base.id.clone()),
            start: base.start,
            end: base.end,
            rule: base.rule.clone(),
            payload: base.payload.clone(),
        }
    }
}

/// Inclusive range of date-times a calendar view displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DisplayWindow {
    /// ## Summary
    /// Creates a window from `start` to `end`, both inclusive.
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidWindow` if `start` is after `end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> ServiceResult<Self> {
        if start > end {
            return Err(ServiceError::InvalidWindow(format!(
                "start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// ## Summary
    /// Creates a window covering whole days, from the start of `first` to the
    /// last second of `last`.
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidWindow` if `first` is after `last`.
    pub fn days(first: NaiveDate, last: NaiveDate) -> ServiceResult<Self> {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        Self::new(first.and_time(NaiveTime::MIN), last.and_time(end_of_day))
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

impl fmt::Display for DisplayWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
