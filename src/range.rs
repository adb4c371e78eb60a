use serde::{Deserialize, Serialize};

use crate::adapter::DateAdapter;
use crate::disabled::DisabledOptions;
use crate::types::Quarter;
use crate::utils::DateUtils;

/// Which end of a range the user is currently picking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Picking the start while the end is fixed
    Start,
    /// Picking the end while the start is fixed
    End,
    /// Picking both ends in one gesture
    Range,
}

/// A (possibly half-finished) date range plus the day under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeSelection<D> {
    pub start_date:     Option<D>,
    pub end_date:       Option<D>,
    /// Day currently hovered or focused while picking
    pub selecting_date: Option<D>,
    pub mode:           Option<SelectionMode>,
}

impl<D> Default for RangeSelection<D> {
    fn default() -> Self {
        Self { start_date: None, end_date: None, selecting_date: None, mode: None }
    }
}

/// Position of `value` within the `(start_year, start)..=(end_year, end)` span
/// as seen from `day_year`.
fn in_year_span(start_year: i32, start: u32, end_year: i32, end: u32, value: u32, day_year: i32) -> bool {
    if start_year == end_year && start_year == day_year {
        start <= value && value <= end
    } else if start_year < end_year {
        (day_year == start_year && start <= value)
            || (day_year == end_year && value <= end)
            || (start_year < day_year && day_year < end_year)
    } else {
        false
    }
}

impl<A: DateAdapter> DateUtils<'_, A> {
    /// Whether `day` lies between the start of `start`'s day and the end of
    /// `end`'s day. An inverted range is reported as not containing `day`.
    pub fn is_day_in_range(&self, day: A::Date, start: A::Date, end: A::Date) -> bool {
        let start = self.start_of_day(start);
        let end = self.adapter().end_of_day(self.adapter().date(end));
        self.adapter().is_within_range(self.adapter().date(day), start, end).unwrap_or_else(|err| {
            tracing::debug!(%err, "range check failed, treating day as outside");
            false
        })
    }

    /// Whether zero-based `month` of `day`'s year lies within `start..=end`.
    pub fn is_month_in_range(&self, start: A::Date, end: A::Date, month: u32, day: A::Date) -> bool {
        in_year_span(
            self.get_year(start),
            self.get_month(start),
            self.get_year(end),
            self.get_month(end),
            month,
            self.get_year(day),
        )
    }

    /// Whether `quarter` of `day`'s year lies within `start..=end`.
    pub fn is_quarter_in_range(&self, start: A::Date, end: A::Date, quarter: Quarter, day: A::Date) -> bool {
        in_year_span(
            self.get_year(start),
            u32::from(self.get_quarter(start).get()),
            self.get_year(end),
            u32::from(self.get_quarter(end).get()),
            u32::from(quarter.get()),
            self.get_year(day),
        )
    }

    /// Inside a completed range
    pub fn is_in_range(&self, day: A::Date, selection: &RangeSelection<A::Date>) -> bool {
        match (selection.start_date, selection.end_date) {
            (Some(start), Some(end)) => self.is_day_in_range(day, start, end),
            _ => false,
        }
    }

    /// First day of a completed range
    pub fn is_range_start(&self, day: A::Date, selection: &RangeSelection<A::Date>) -> bool {
        match (selection.start_date, selection.end_date) {
            (Some(start), Some(_)) => self.is_same_day(Some(start), Some(day)),
            _ => false,
        }
    }

    /// Last day of a completed range
    pub fn is_range_end(&self, day: A::Date, selection: &RangeSelection<A::Date>) -> bool {
        match (selection.start_date, selection.end_date) {
            (Some(_), Some(end)) => self.is_same_day(Some(end), Some(day)),
            _ => false,
        }
    }

    /// Inside the range the user would get by picking `selecting_date` now.
    ///
    /// Disabled days are never part of it.
    pub fn is_in_selecting_range(
        &self,
        day: A::Date,
        selection: &RangeSelection<A::Date>,
        options: &DisabledOptions<'_, A::Date>,
    ) -> bool {
        let (Some(mode), Some(selecting)) = (selection.mode, selection.selecting_date) else {
            return false;
        };
        if self.is_day_disabled(day, options) {
            return false;
        }

        let not_after = |a, b| !self.is_after(a, b);
        let not_before = |a, b| !self.is_before(a, b);
        match (mode, selection.start_date, selection.end_date) {
            (SelectionMode::Start, _, Some(end)) if not_after(selecting, end) => {
                self.is_day_in_range(day, selecting, end)
            },
            (SelectionMode::End, Some(start), _) | (SelectionMode::Range, Some(start), None)
                if not_before(selecting, start) =>
            {
                self.is_day_in_range(day, start, selecting)
            },
            _ => false,
        }
    }

    /// First day of the selecting range
    pub fn is_selecting_range_start(
        &self,
        day: A::Date,
        selection: &RangeSelection<A::Date>,
        options: &DisabledOptions<'_, A::Date>,
    ) -> bool {
        if !self.is_in_selecting_range(day, selection, options) {
            return false;
        }
        let anchor =
            if selection.mode == Some(SelectionMode::Start) { selection.selecting_date } else { selection.start_date };
        self.is_same_day(Some(day), anchor)
    }

    /// Last day of the selecting range
    pub fn is_selecting_range_end(
        &self,
        day: A::Date,
        selection: &RangeSelection<A::Date>,
        options: &DisabledOptions<'_, A::Date>,
    ) -> bool {
        if !self.is_in_selecting_range(day, selection, options) {
            return false;
        }
        let anchor =
            if selection.mode == Some(SelectionMode::End) { selection.selecting_date } else { selection.end_date };
        self.is_same_day(Some(day), anchor)
    }
}
