//! Occurrence generation.
//!
//! Turns a rule and an anchor into the dates on which the series repeats, and
//! answers whether a series is still running at a given instant.

mod active;
mod generator;

pub use active::{is_pattern_active, is_recurrence_active};
pub use generator::{DEFAULT_CEILING_FACTOR, OccurrenceGenerator, occurrences};
