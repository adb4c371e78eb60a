//! Month grid and dropdown computations.

use serde::{Deserialize, Serialize};

use crate::adapter::DateAdapter;
use crate::consts::{DAYS_IN_WEEK, FIXED_HEIGHT_STANDARD_WEEK_COUNT, SATURDAY, SUNDAY};
use crate::locale::LocaleSpec;
use crate::utils::DateUtils;

/// Layout switches of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthGridOptions {
    /// Always show six weeks
    pub fixed_height:    bool,
    /// Show one more week after the last regular one
    pub peek_next_month: bool,
}

impl<A: DateAdapter> DateUtils<'_, A> {
    /// First day of every week row shown for `day`'s month.
    ///
    /// Rows start at the locale's week start on or before the 1st. Without
    /// `fixed_height`, rows continue while they still touch the month. Rows
    /// stop early once the adapter cannot step another week.
    pub fn month_weeks(
        &self,
        day: A::Date,
        locale: Option<LocaleSpec<'_>>,
        options: MonthGridOptions,
    ) -> Vec<A::Date> {
        let mut weeks = Vec::with_capacity(FIXED_HEIGHT_STANDARD_WEEK_COUNT + 1);
        let mut current_week_start = self.start_of_week(self.start_of_month(day), locale);
        let mut break_after_next_push = false;

        loop {
            weeks.push(current_week_start);
            if break_after_next_push {
                break;
            }

            let next_week_start = self.add_weeks(current_week_start, 1);
            if next_week_start == current_week_start {
                break;
            }
            current_week_start = next_week_start;
            let is_final_week = if options.fixed_height {
                weeks.len() >= FIXED_HEIGHT_STANDARD_WEEK_COUNT
            } else {
                !self.is_week_in_month(current_week_start, day)
            };

            if is_final_week {
                if !options.peek_next_month {
                    break;
                }
                break_after_next_push = true;
            }
        }

        weeks
    }

    /// Whether the week starting at `week_start` has a day in `day`'s month.
    pub fn is_week_in_month(&self, week_start: A::Date, day: A::Date) -> bool {
        let week_end = self.add_days(week_start, DAYS_IN_WEEK - 1);
        self.is_same_month(Some(week_start), Some(day)) || self.is_same_month(Some(week_end), Some(day))
    }

    pub fn is_weekend(&self, day: A::Date) -> bool {
        matches!(self.get_day(day), SUNDAY | SATURDAY)
    }

    /// Whether `day` belongs to a month other than zero-based `month`.
    pub fn is_outside_month(&self, day: A::Date, month: u32) -> bool {
        self.get_month(day) != month
    }

    /// Start of every month from `min`'s month through `max`'s month, or
    /// through the last month the adapter can reach.
    pub fn month_year_options(&self, min: A::Date, max: A::Date) -> Vec<A::Date> {
        let last = self.start_of_month(max);
        let mut current = self.start_of_month(min);
        let mut options = Vec::new();

        while !self.is_after(current, last) {
            options.push(current);
            let next = self.add_months(current, 1);
            if next == current {
                break;
            }
            current = next;
        }

        options
    }
}
