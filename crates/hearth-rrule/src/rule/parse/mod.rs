//! Rule string parsing.
//!
//! Parsing is lenient by design: unknown keys and malformed optional parts are
//! dropped so that rules written by richer producers still load. Only a
//! missing or unsupported `FREQ` is an error.

mod values;

pub use values::{parse_rule, parse_until};
