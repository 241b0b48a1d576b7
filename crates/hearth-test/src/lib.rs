//! Hearth integration test support.
//!
//! Household fixtures shared by the integration suite.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hearth_calendar::BaseEvent;

/// Fields a household calendar stores beside the recurrence data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chore {
    pub title: String,
    pub assignee: Option<String>,
}

impl Chore {
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            assignee: None,
        }
    }

    #[must_use]
    pub fn assigned_to(mut self, assignee: &str) -> Self {
        self.assignee = Some(assignee.to_string());
        self
    }
}

/// ## Summary
/// Builds a naive date-time, panicking on an invalid value.
///
/// ## Panics
/// If the components do not form a valid date-time.
#[must_use]
pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .unwrap_or_else(|| panic!("invalid datetime {y}-{m}-{d} {h}:{min}"))
}

/// ## Summary
/// Creates an event with a fresh random id.
#[must_use]
pub fn chore_event(title: &str, start: NaiveDateTime) -> BaseEvent<Chore> {
    BaseEvent::new(Uuid::new_v4().to_string(), start, Chore::new(title))
}
