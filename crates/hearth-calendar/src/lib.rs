//! Calendar views over recurring Hearth events.
//!
//! Base events carry a rule string; the [`materialize::Materializer`] turns
//! them into the concrete instances a display window shows.

pub mod error;
pub mod event;
pub mod materialize;

pub use event::{BaseEvent, DisplayWindow, EventInstance, InstanceId};
pub use materialize::{ExpandOptions, Materializer, expand_events};
