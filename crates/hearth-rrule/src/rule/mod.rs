//! Recurrence rule subset used by Hearth calendars.
//!
//! Rule strings are a small subset of RFC 5545 RRULE values:
//! `FREQ`, `INTERVAL`, `BYDAY`, `BYMONTHDAY`, `UNTIL` and `COUNT`.
//! All date-times are naive wall-clock values.

pub mod codec;
pub mod core;
pub mod describe;
pub mod expand;
pub mod parse;


pub use codec::{pattern_to_rule, rule_to_pattern};
pub use self::core::{Frequency, RecurrenceEnd, RecurrencePattern, RecurrenceRule, Weekday};
pub use describe::describe;
pub use expand::{OccurrenceGenerator, is_pattern_active, is_recurrence_active, occurrences};
pub use parse::parse_rule;
