//! Rules deciding which days, months, quarters and years can be picked.
//!
//! Every bound is optional and an absent bound never disables anything.

use std::fmt;

use crate::adapter::DateAdapter;
use crate::consts::{JANUARY, MONTHS_IN_YEAR};
use crate::types::{YearGroupSize, YearsPeriod};
use crate::utils::DateUtils;

/// Constraints shared by the day, month, quarter and year pickers.
///
/// `include_dates` is an allow list: when present, a value matching none of
/// its entries is disabled, so `Some(&[])` disables everything.
#[derive(Clone, Copy)]
pub struct DisabledOptions<'a, D> {
    pub min_date:         Option<D>,
    pub max_date:         Option<D>,
    pub exclude_dates:    Option<&'a [D]>,
    pub include_dates:    Option<&'a [D]>,
    /// Returns `false` for values that must be disabled
    pub filter_date:      Option<&'a dyn Fn(&D) -> bool>,
    /// Page size of the year grid
    pub year_item_number: YearGroupSize,
}

impl<D> Default for DisabledOptions<'_, D> {
    fn default() -> Self {
        Self {
            min_date:         None,
            max_date:         None,
            exclude_dates:    None,
            include_dates:    None,
            filter_date:      None,
            year_item_number: YearGroupSize::default(),
        }
    }
}

impl<D: fmt::Debug> fmt::Debug for DisabledOptions<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisabledOptions")
            .field("min_date", &self.min_date)
            .field("max_date", &self.max_date)
            .field("exclude_dates", &self.exclude_dates)
            .field("include_dates", &self.include_dates)
            .field("filter_date", &self.filter_date.map(|_| "<fn>"))
            .field("year_item_number", &self.year_item_number)
            .finish()
    }
}

impl<A: DateAdapter> DateUtils<'_, A> {
    /// Shared shape of the day, month and quarter rules.
    fn is_disabled_by(
        &self,
        value: A::Date,
        options: &DisabledOptions<'_, A::Date>,
        same: impl Fn(A::Date, A::Date) -> bool,
    ) -> bool {
        self.is_out_of_bounds(value, options)
            || options.exclude_dates.is_some_and(|dates| dates.iter().any(|&date| same(value, date)))
            || options.include_dates.is_some_and(|dates| !dates.iter().any(|&date| same(value, date)))
            || options.filter_date.is_some_and(|filter| !filter(&self.adapter().date(value)))
    }

    pub fn is_day_disabled(&self, day: A::Date, options: &DisabledOptions<'_, A::Date>) -> bool {
        self.is_disabled_by(day, options, |a, b| self.is_same_day(Some(a), Some(b)))
    }

    /// Whether `day` is in the exclude list, ignoring every other rule
    pub fn is_day_excluded(&self, day: A::Date, options: &DisabledOptions<'_, A::Date>) -> bool {
        options.exclude_dates.is_some_and(|dates| dates.iter().any(|&date| self.is_same_day(Some(day), Some(date))))
    }

    pub fn is_month_disabled(&self, month: A::Date, options: &DisabledOptions<'_, A::Date>) -> bool {
        self.is_disabled_by(month, options, |a, b| self.is_same_month(Some(a), Some(b)))
    }

    pub fn is_quarter_disabled(&self, quarter: A::Date, options: &DisabledOptions<'_, A::Date>) -> bool {
        self.is_disabled_by(quarter, options, |a, b| self.is_same_quarter(Some(a), Some(b)))
    }

    /// Whether January 1st of `year` falls outside the min/max bounds.
    pub fn is_year_disabled(&self, year: i32, options: &DisabledOptions<'_, A::Date>) -> bool {
        self.is_out_of_bounds(self.first_of_month(year, JANUARY), options)
    }

    /// Calendar day before `min_date` or after `max_date`.
    pub fn is_out_of_bounds(&self, day: A::Date, options: &DisabledOptions<'_, A::Date>) -> bool {
        options.min_date.is_some_and(|min| self.difference_in_calendar_days(day, min) < 0)
            || options.max_date.is_some_and(|max| self.difference_in_calendar_days(day, max) > 0)
    }

    /// Whether navigating to the month before `day` is impossible.
    pub fn month_disabled_before(&self, day: A::Date, options: &DisabledOptions<'_, A::Date>) -> bool {
        let previous_month = self.add_months(day, -1);
        options.min_date.is_some_and(|min| self.difference_in_calendar_months(min, previous_month) > 0)
            || options.include_dates.is_some_and(|dates| {
                dates.iter().all(|&date| self.difference_in_calendar_months(date, previous_month) > 0)
            })
    }

    /// Whether navigating to the month after `day` is impossible.
    pub fn month_disabled_after(&self, day: A::Date, options: &DisabledOptions<'_, A::Date>) -> bool {
        let next_month = self.add_months(day, 1);
        options.max_date.is_some_and(|max| self.difference_in_calendar_months(next_month, max) > 0)
            || options.include_dates.is_some_and(|dates| {
                dates.iter().all(|&date| self.difference_in_calendar_months(next_month, date) > 0)
            })
    }

    /// Whether navigating to the year before `day` is impossible.
    pub fn year_disabled_before(&self, day: A::Date, options: &DisabledOptions<'_, A::Date>) -> bool {
        let previous_year = self.add_months(day, -year_in_months(1));
        options.min_date.is_some_and(|min| self.difference_in_calendar_years(min, previous_year) > 0)
            || options.include_dates.is_some_and(|dates| {
                dates.iter().all(|&date| self.difference_in_calendar_years(date, previous_year) > 0)
            })
    }

    /// Whether navigating to the year after `day` is impossible.
    pub fn year_disabled_after(&self, day: A::Date, options: &DisabledOptions<'_, A::Date>) -> bool {
        let next_year = self.add_months(day, year_in_months(1));
        options.max_date.is_some_and(|max| self.difference_in_calendar_years(next_year, max) > 0)
            || options.include_dates.is_some_and(|dates| {
                dates.iter().all(|&date| self.difference_in_calendar_years(next_year, date) > 0)
            })
    }

    /// Whether the previous page of the year grid lies entirely before `min_date`.
    ///
    /// A `min_date` in year 0 never disables.
    pub fn years_disabled_before(&self, day: A::Date, options: &DisabledOptions<'_, A::Date>) -> bool {
        let group = options.year_item_number;
        let previous = self.start_of_year(self.add_months(day, -year_in_months(group.years())));
        let period = YearsPeriod::containing(self.get_year(previous), group);
        options.min_date.map(|min| self.get_year(min)).is_some_and(|year| year != 0 && year > period.end_period)
    }

    /// Whether the next page of the year grid lies entirely after `max_date`.
    pub fn years_disabled_after(&self, day: A::Date, options: &DisabledOptions<'_, A::Date>) -> bool {
        let group = options.year_item_number;
        let next = self.add_months(day, year_in_months(group.years()));
        let period = YearsPeriod::containing(self.get_year(next), group);
        options.max_date.map(|max| self.get_year(max)).is_some_and(|year| year != 0 && year < period.start_period)
    }

    /// Earliest selectable date: the earliest included date on or after
    /// `min_date`, or `min_date` itself without an include list.
    pub fn effective_min_date(&self, options: &DisabledOptions<'_, A::Date>) -> Option<A::Date> {
        match (options.include_dates, options.min_date) {
            (Some(dates), Some(min)) => {
                let candidates: Vec<_> =
                    dates.iter().copied().filter(|&date| self.difference_in_calendar_days(date, min) >= 0).collect();
                self.min(&candidates)
            },
            (Some(dates), None) => self.min(dates),
            (None, min) => min,
        }
    }

    /// Latest selectable date: the latest included date on or before
    /// `max_date`, or `max_date` itself without an include list.
    pub fn effective_max_date(&self, options: &DisabledOptions<'_, A::Date>) -> Option<A::Date> {
        match (options.include_dates, options.max_date) {
            (Some(dates), Some(max)) => {
                let candidates: Vec<_> =
                    dates.iter().copied().filter(|&date| self.difference_in_calendar_days(date, max) <= 0).collect();
                self.max(&candidates)
            },
            (Some(dates), None) => self.max(dates),
            (None, max) => max,
        }
    }
}

fn year_in_months(years: i32) -> i32 {
    years.saturating_mul(i32::try_from(MONTHS_IN_YEAR).unwrap_or(12))
}
