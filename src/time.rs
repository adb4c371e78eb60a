//! Time-of-day rules and time-list generation.

use crate::DateUtilsError;
use crate::adapter::DateAdapter;
use crate::types::TimeInterval;
use crate::utils::DateUtils;

/// Bounds and lists restricting which times of day can be picked.
///
/// Only hour and minute of each value matter; the calendar day is ignored.
#[derive(Debug, Clone, Copy)]
pub struct TimeConstraints<'a, D> {
    pub min_time:      Option<D>,
    pub max_time:      Option<D>,
    pub exclude_times: Option<&'a [D]>,
    pub include_times: Option<&'a [D]>,
}

impl<D> Default for TimeConstraints<'_, D> {
    fn default() -> Self {
        Self { min_time: None, max_time: None, exclude_times: None, include_times: None }
    }
}

impl<A: DateAdapter> DateUtils<'_, A> {
    /// Whether some entry of `times` has the same hour and minute as `time`.
    pub fn is_time_disabled(&self, time: A::Date, times: &[A::Date]) -> bool {
        let (hour, minute) = (self.get_hours(time), self.get_minutes(time));
        times.iter().any(|&other| self.get_hours(other) == hour && self.get_minutes(other) == minute)
    }

    /// Whether `time` falls outside `[min_time, max_time]` once all three are
    /// moved onto today's date. A `min_time` later than `max_time` disables
    /// every time.
    ///
    /// # Errors
    /// Returns `DateUtilsError::MissingTimeBounds` unless both bounds are set.
    pub fn is_time_in_disabled_range(
        &self,
        time: A::Date,
        constraints: &TimeConstraints<'_, A::Date>,
    ) -> Result<bool, DateUtilsError> {
        let (Some(min_time), Some(max_time)) = (constraints.min_time, constraints.max_time) else {
            return Err(DateUtilsError::MissingTimeBounds);
        };

        let base = self.adapter().now();
        let time = self.on_day(base, time);
        let min = self.on_day(base, min_time);
        let max = self.on_day(base, max_time);

        match self.adapter().is_within_range(time, min, max) {
            Ok(within) => Ok(!within),
            Err(err) => {
                tracing::warn!(%err, "time bounds are inverted, treating time as disabled");
                Ok(true)
            },
        }
    }

    /// Whether a time-list entry cannot be picked: outside the min/max bounds,
    /// excluded, or missing from the include list.
    ///
    /// # Errors
    /// Returns `DateUtilsError::MissingTimeBounds` when exactly one of
    /// `min_time` and `max_time` is set.
    pub fn is_time_slot_disabled(
        &self,
        time: A::Date,
        constraints: &TimeConstraints<'_, A::Date>,
    ) -> Result<bool, DateUtilsError> {
        let out_of_range = match (constraints.min_time, constraints.max_time) {
            (None, None) => false,
            _ => self.is_time_in_disabled_range(time, constraints)?,
        };

        Ok(out_of_range
            || constraints.exclude_times.is_some_and(|times| self.is_time_disabled(time, times))
            || constraints.include_times.is_some_and(|times| !self.is_time_disabled(time, times)))
    }

    /// Injected times strictly between `current_time` and the next slot.
    ///
    /// `multiplier` is the index of the slot starting at `current_time`;
    /// matching entries are returned as given, in input order.
    pub fn times_to_inject_after(
        &self,
        start_of_day: A::Date,
        current_time: A::Date,
        multiplier: u32,
        interval: TimeInterval,
        injected: &[A::Date],
    ) -> Vec<A::Date> {
        let next_time =
            self.add_minutes(start_of_day, (i64::from(multiplier) + 1) * i64::from(interval.get()));

        injected
            .iter()
            .copied()
            .filter(|&time| {
                let injected_time = self.add_minutes(
                    self.add_hours(start_of_day, i64::from(self.get_hours(time))),
                    i64::from(self.get_minutes(time)),
                );
                self.is_after(injected_time, current_time) && self.is_before(injected_time, next_time)
            })
            .collect()
    }

    /// Every entry of today's time list: one slot per `interval` minutes from
    /// midnight, each followed by the injected times that fall before the
    /// next slot.
    pub fn time_slots(&self, interval: TimeInterval, inject_times: Option<&[A::Date]>) -> Vec<A::Date> {
        let base = self.start_of_today();
        let sorted = inject_times.map(|times| {
            let mut times = times.to_vec();
            times.sort_by_key(|&time| self.get_time(time));
            times
        });

        let mut slots = Vec::with_capacity(interval.slots_per_day() as usize);
        for multiplier in 0..interval.slots_per_day() {
            let current_time = self.add_minutes(base, i64::from(multiplier) * i64::from(interval.get()));
            slots.push(current_time);

            if let Some(injected) = &sorted {
                slots.extend(self.times_to_inject_after(base, current_time, multiplier, interval, injected));
            }
        }

        slots
    }

    /// Whether `time` does not sit on the `interval` grid, i.e. was injected.
    pub fn is_injected_time(&self, time: A::Date, interval: TimeInterval) -> bool {
        (self.get_hours(time) * 60 + self.get_minutes(time)) % interval.get() != 0
    }

    /// `time`'s hour and minute on `day`
    fn on_day(&self, day: A::Date, time: A::Date) -> A::Date {
        let adapter = self.adapter();
        adapter.set_hours(adapter.set_minutes(adapter.date(day), self.get_minutes(time)), self.get_hours(time))
    }
}
