//! Recurrence rule models.
//!
//! [`RecurrenceRule`] mirrors the persisted rule string part by part, while
//! [`RecurrencePattern`] is the structured form exchanged with the UI and API.

mod pattern;
mod rrule;

pub use pattern::{RecurrenceEnd, RecurrencePattern};
pub use rrule::{Frequency, RecurrenceRule, Weekday};
