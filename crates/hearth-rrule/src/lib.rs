//! Recurrence rules for Hearth calendar events.
//!
//! Converts between structured [`rule::RecurrencePattern`]s and persisted rule
//! strings, generates the occurrence dates a rule implies and renders rules as
//! human-readable sentences.

pub mod error;
pub mod rule;
