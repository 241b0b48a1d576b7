//! Expansion of base events into the instances of a display window.

use chrono::NaiveDateTime;
use hearth_core::config::{DEFAULT_CEILING_FACTOR, DEFAULT_EXPANSION_CAP, RecurrenceConfig};
use hearth_rrule::rule::{OccurrenceGenerator, RecurrencePattern, is_pattern_active};

use crate::error::ServiceResult;
use crate::event::{BaseEvent, DisplayWindow, EventInstance, InstanceId};

/// Bounds applied to every series during expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Maximum occurrences generated per series.
    pub expansion_cap: usize,
    /// Generator iteration ceiling multiplier.
    pub ceiling_factor: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            expansion_cap: DEFAULT_EXPANSION_CAP,
            ceiling_factor: DEFAULT_CEILING_FACTOR,
        }
    }
}

impl From<&RecurrenceConfig> for ExpandOptions {
    fn from(config: &RecurrenceConfig) -> Self {
        Self {
            expansion_cap: config.expansion_cap,
            ceiling_factor: config.ceiling_factor,
        }
    }
}

/// Turns base events into the concrete instances of a window.
#[derive(Debug, Clone, Default)]
pub struct Materializer {
    options: ExpandOptions,
}

impl Materializer {
    #[must_use]
    pub const fn new(options: ExpandOptions) -> Self {
        Self { options }
    }

    /// ## Summary
    /// Creates a materializer from the `recurrence` settings section.
    ///
    /// ## Errors
    /// Returns `ServiceError::CoreError` if a bound is zero.
    pub fn from_config(config: &RecurrenceConfig) -> ServiceResult<Self> {
        config.validate()?;
        Ok(Self::new(ExpandOptions::from(config)))
    }

    #[must_use]
    pub const fn options(&self) -> ExpandOptions {
        self.options
    }

    /// ## Summary
    /// Expands `events` into the instances shown in `window`, sorted by start.
    ///
    /// One-off events, and events whose rule does not decode, pass through
    /// once, unchanged and unfiltered. A series that has concluded at `now` is
    /// dropped entirely. Every other series yields one instance per occurrence
    /// inside the window, at the base event's time of day and with its
    /// duration.
    ///
    /// Instances with the same start are ordered by origin id, then by input
    /// order.
    ///
    /// ## Side Effects
    /// None - pure function.
    #[must_use]
    #[tracing::instrument(skip_all, fields(events = events.len(), window = %window))]
    pub fn expand<P: Clone>(
        &self,
        events: &[BaseEvent<P>],
        window: &DisplayWindow,
        now: NaiveDateTime,
    ) -> Vec<EventInstance<P>> {
        let mut instances = Vec::with_capacity(events.len());
        let mut dropped_series = 0_usize;

        for event in events {
            let Some(pattern) = event.pattern() else {
                instances.push(EventInstance::single(event));
                continue;
            };

            if !is_pattern_active(&pattern, event.start, now) {
                tracing::trace!(event_id = %event.id, "Series has concluded, skipping");
                dropped_series += 1;
                continue;
            }

            instances.extend(self.expand_series(event, &pattern, window));
        }

        instances.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then_with(|| a.id.origin_id.cmp(&b.id.origin_id))
        });

        tracing::debug!(
            instances = instances.len(),
            dropped_series,
            "Expanded events"
        );
        instances
    }

    /// Instances of one active series inside `window`.
    fn expand_series<P: Clone>(
        &self,
        event: &BaseEvent<P>,
        pattern: &RecurrencePattern,
        window: &DisplayWindow,
    ) -> Vec<EventInstance<P>> {
        let time = event.start.time();
        let duration = event.end.map(|end| end.signed_duration_since(event.start));

        OccurrenceGenerator::new(pattern, event.start)
            .with_ceiling_factor(self.options.ceiling_factor)
            .generate(self.options.expansion_cap, Some(window.start()))
            .into_iter()
            .map(|date| date.and_time(time))
            .take_while(|start| *start <= window.end())
            .map(|start| EventInstance {
                id: InstanceId::occurrence(event.id.clone(), start),
                start,
                end: duration.and_then(|duration| start.checked_add_signed(duration)),
                rule: event.rule.clone(),
                payload: event.payload.clone(),
            })
            .collect()
    }
}

/// ## Summary
/// Expands `events` over `window` with the default bounds.
///
/// See [`Materializer::expand`].
#[must_use]
pub fn expand_events<P: Clone>(
    events: &[BaseEvent<P>],
    window: &DisplayWindow,
    now: NaiveDateTime,
) -> Vec<EventInstance<P>> {
    Materializer::default().expand(events, window, now)
}
