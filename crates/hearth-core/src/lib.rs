//! Shared configuration and error types for the Hearth recurrence engine.

pub mod config;
pub mod error;
