//! Occurrence generation algorithm.
//!
//! Weekly patterns with explicit weekdays are walked week by week; every other
//! pattern is a single cursor stepped from the anchor. Both count occurrences
//! from the series origin, even when a lower bound hides the early ones.

use std::ops::ControlFlow;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::rule::codec::rule_to_pattern;
use crate::rule::core::{Frequency, RecurrencePattern};

/// Default multiplier applied to `limit` to obtain the iteration ceiling.
pub const DEFAULT_CEILING_FACTOR: usize = 100;

/// ## Summary
/// Generates the occurrence dates of a pattern anchored at a start date-time.
///
/// Occurrences are calendar dates; the anchor's time of day is only used to
/// compare them against a lower bound.
#[derive(Debug, Clone)]
pub struct OccurrenceGenerator<'a> {
    pattern: &'a RecurrencePattern,
    anchor: NaiveDateTime,
    ceiling_factor: usize,
}

impl<'a> OccurrenceGenerator<'a> {
    /// Creates a generator for `pattern` starting at `anchor`.
    #[must_use]
    pub fn new(pattern: &'a RecurrencePattern, anchor: NaiveDateTime) -> Self {
        Self {
            pattern,
            anchor,
            ceiling_factor: DEFAULT_CEILING_FACTOR,
        }
    }

    /// Sets the iteration ceiling multiplier (at least 1).
    #[must_use]
    pub fn with_ceiling_factor(mut self, factor: usize) -> Self {
        self.ceiling_factor = factor.max(1);
        self
    }

    /// ## Summary
    /// Returns up to `limit` occurrence dates in strictly increasing order.
    ///
    /// Occurrences whose date-time (date plus anchor time) is before
    /// `lower_bound` are counted against a `count` end but not returned.
    /// Generation stops silently after `limit * ceiling_factor` iterations.
    ///
    /// ## Side Effects
    /// None - pure function.
    #[must_use]
    pub fn generate(&self, limit: usize, lower_bound: Option<NaiveDateTime>) -> Vec<NaiveDate> {
        if limit == 0 || self.pattern.count() == Some(0) {
            return Vec::new();
        }

        let mut sink = Sink {
            limit,
            until: self.pattern.end_date(),
            count: self.pattern.count().map(u64::from),
            lower_bound,
            time: self.anchor.time(),
            generated: 0,
            dates: Vec::new(),
        };
        let max_iterations = limit.saturating_mul(self.ceiling_factor);

        if self.pattern.frequency == Frequency::Weekly && !self.pattern.days_of_week.is_empty() {
            self.generate_weekdays(&mut sink, max_iterations);
        } else {
            self.generate_stepped(&mut sink, max_iterations);
        }

        tracing::trace!(
            frequency = %self.pattern.frequency,
            generated = sink.generated,
            returned = sink.dates.len(),
            "Generated occurrences"
        );
        sink.dates
    }

    fn interval(&self) -> u64 {
        u64::from(self.pattern.interval.max(1))
    }

    /// Walks the anchor's week and every `interval`-th week after it.
    fn generate_weekdays(&self, sink: &mut Sink, max_iterations: usize) {
        let anchor = self.anchor.date();
        let anchor_index = anchor.weekday().num_days_from_sunday();
        let Some(week_zero) = anchor.checked_sub_days(Days::new(u64::from(anchor_index))) else {
            return;
        };
        let days = &self.pattern.days_of_week;
        let stride = 7 * self.interval();

        // Whole weeks that end before the lower bound only need counting.
        let first_week = sink
            .lower_bound
            .map_or(0, |lower| days_between(week_zero, lower.date()) / stride);
        let skipped = if first_week == 0 {
            0
        } else {
            let in_first_week = days
                .iter()
                .filter(|day| u32::from(day.index()) >= anchor_index)
                .count() as u64;
            in_first_week + (first_week - 1) * days.len() as u64
        };
        if sink.skip(skipped).is_break() {
            return;
        }

        for (iteration, week) in (first_week..).enumerate() {
            if iteration >= max_iterations {
                tracing::trace!(max_iterations, "Iteration ceiling reached");
                return;
            }
            let Some(week_start) = week
                .checked_mul(stride)
                .and_then(|offset| week_zero.checked_add_days(Days::new(offset)))
            else {
                return;
            };

            for day in days {
                let Some(date) = week_start.checked_add_days(Days::new(u64::from(day.index())))
                else {
                    return;
                };
                if date < anchor {
                    continue;
                }
                if sink.offer(date).is_break() {
                    return;
                }
            }
        }
    }

    /// Steps a single cursor from the anchor by the pattern's frequency.
    fn generate_stepped(&self, sink: &mut Sink, max_iterations: usize) {
        let first_step = sink
            .lower_bound
            .map_or(0, |lower| self.steps_before(lower.date()));
        if sink.skip(first_step).is_break() {
            return;
        }

        for (iteration, step) in (first_step..).enumerate() {
            if iteration >= max_iterations {
                tracing::trace!(max_iterations, "Iteration ceiling reached");
                return;
            }
            let Some(date) = self.step_date(step) else {
                tracing::trace!(step, "Occurrence is out of the representable date range");
                return;
            };
            if sink.offer(date).is_break() {
                return;
            }
        }
    }

    /// Number of leading steps whose dates are all before `lower`.
    fn steps_before(&self, lower: NaiveDate) -> u64 {
        let anchor = self.anchor.date();
        if lower <= anchor {
            return 0;
        }
        let interval = self.interval();
        match self.pattern.frequency {
            Frequency::Daily => days_between(anchor, lower) / interval,
            Frequency::Weekly => days_between(anchor, lower) / (7 * interval),
            Frequency::Monthly => months_between(anchor, lower) / interval,
            Frequency::Yearly => months_between(anchor, lower) / (12 * interval),
        }
    }

    /// Date of the `step`-th cursor position, computed from the anchor so that
    /// clamping one month never shifts the following ones.
    fn step_date(&self, step: u64) -> Option<NaiveDate> {
        let anchor = self.anchor.date();
        if step == 0 {
            return Some(anchor);
        }
        let offset = step.checked_mul(self.interval())?;
        match self.pattern.frequency {
            Frequency::Daily => anchor.checked_add_days(Days::new(offset)),
            Frequency::Weekly => anchor.checked_add_days(Days::new(offset.checked_mul(7)?)),
            Frequency::Monthly => {
                let day = self.pattern.day_of_month.map_or(anchor.day(), u32::from);
                shift_months(anchor, offset, day)
            }
            Frequency::Yearly => shift_months(anchor, offset.checked_mul(12)?, anchor.day()),
        }
    }
}

/// Collects accepted occurrences and tracks the end conditions.
struct Sink {
    limit: usize,
    until: Option<NaiveDate>,
    count: Option<u64>,
    lower_bound: Option<NaiveDateTime>,
    time: NaiveTime,
    /// Occurrences produced since the series origin, returned or not.
    generated: u64,
    dates: Vec<NaiveDate>,
}

impl Sink {
    /// Records occurrences that were skipped without being produced.
    fn skip(&mut self, skipped: u64) -> ControlFlow<()> {
        self.generated = skipped;
        if self.count.is_some_and(|count| skipped >= count) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    /// Offers the next candidate, which must be on or after the anchor.
    fn offer(&mut self, date: NaiveDate) -> ControlFlow<()> {
        if self.until.is_some_and(|until| date > until) {
            return ControlFlow::Break(());
        }

        self.generated += 1;
        if self
            .lower_bound
            .is_none_or(|lower| date.and_time(self.time) >= lower)
        {
            self.dates.push(date);
        }

        if self.dates.len() >= self.limit || self.count.is_some_and(|count| self.generated >= count)
        {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// ## Summary
/// Generates occurrence dates for a rule string.
///
/// A rule without a usable `FREQ` has no occurrences.
///
/// ## Side Effects
/// None - pure function.
#[must_use]
pub fn occurrences(
    rule: &str,
    anchor: NaiveDateTime,
    limit: usize,
    lower_bound: Option<NaiveDateTime>,
) -> Vec<NaiveDate> {
    rule_to_pattern(rule).map_or_else(Vec::new, |pattern| {
        OccurrenceGenerator::new(&pattern, anchor).generate(limit, lower_bound)
    })
}

/// Whole days from `from` to `to`, zero if `to` is not later.
fn days_between(from: NaiveDate, to: NaiveDate) -> u64 {
    u64::try_from(to.signed_duration_since(from).num_days()).unwrap_or(0)
}

/// Calendar months from `from`'s month to `to`'s month, zero if not later.
fn months_between(from: NaiveDate, to: NaiveDate) -> u64 {
    let months = (i64::from(to.year()) - i64::from(from.year())) * 12
        + i64::from(to.month0())
        - i64::from(from.month0());
    u64::try_from(months).unwrap_or(0)
}

/// Moves `date` forward by `months`, placing it on `day` clamped to the
/// length of the target month.
fn shift_months(date: NaiveDate, months: u64, day: u32) -> Option<NaiveDate> {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::try_from(months).ok()?;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(year, month)))
}

/// Returns the number of days in a month.
fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .or_else(|| NaiveDate::from_ymd_opt(year + 1, 1, 1))
        .map_or(31, |d| d.pred_opt().map_or(31, |p| p.day()))
}
