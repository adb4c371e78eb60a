//! Year-grid windowing.

use serde::Serialize;

use crate::adapter::DateAdapter;
use crate::disabled::DisabledOptions;
use crate::types::{YearGroupSize, YearsPeriod};
use crate::utils::DateUtils;

/// One cell of the year grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearItem<D> {
    pub year:        i32,
    /// January 1st of `year`, midnight
    pub date:        D,
    pub is_disabled: bool,
    /// `year` is the current year
    pub is_current:  bool,
}

impl<A: DateAdapter> DateUtils<'_, A> {
    /// Window of `group` years containing `date`'s year.
    pub fn years_period(&self, date: A::Date, group: YearGroupSize) -> YearsPeriod {
        YearsPeriod::containing(self.get_year(date), group)
    }

    /// Cells of the year-grid page containing `date`, sized by
    /// `options.year_item_number`.
    pub fn year_grid(&self, date: A::Date, options: &DisabledOptions<'_, A::Date>) -> Vec<YearItem<A::Date>> {
        let current_year = self.get_year(self.adapter().now());
        self.years_period(date, options.year_item_number)
            .years()
            .map(|year| YearItem {
                year,
                date: self.start_of_year(self.set_year(date, year)),
                is_disabled: self.is_year_disabled(year, options),
                is_current: year == current_year,
            })
            .collect()
    }
}
