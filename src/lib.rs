//! Calendar math for date pickers.
//!
//! [`DateUtils`] layers date-picker semantics (locale-aware parsing and
//! formatting, day/month/quarter/year disabling rules, range checks, year
//! windows, highlight indexing, time-list generation) over any
//! [`DateAdapter`]. [`ChronoAdapter`] is the bundled adapter.

mod adapter;
mod calendar;
mod chrono_adapter;
mod compare;
mod consts;
mod disabled;
mod highlight;
mod locale;
pub mod pattern;
mod period;
mod prelude;
mod range;
mod time;
mod types;
mod utils;

#[cfg(test)]
mod test_utils;

pub use adapter::{AdapterError, DateAdapter, FormatKey, Formats};
pub use calendar::MonthGridOptions;
pub use chrono_adapter::ChronoAdapter;
pub use consts::*;
pub use disabled::DisabledOptions;
pub use highlight::{HighlightEntry, HighlightMap};
pub use locale::{FormatLong, Locale, LocaleRegistry, LocaleSpec, LongWidths, Ordinal};
pub use pattern::FormatError;
pub use period::YearItem;
pub use range::{RangeSelection, SelectionMode};
pub use time::TimeConstraints;
pub use types::{Quarter, TimeInterval, YearGroupSize, YearsPeriod};
pub use utils::{DateUtils, TimeOfDay, add_zero};

use crate::prelude::*;

/// Error type for date-utility operations that can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateUtilsError {
    /// A time-range check was asked for without both bounds.
    #[error("Both min_time and max_time are required")]
    MissingTimeBounds,

    /// The locale's first-week rule is outside `1..=7`.
    #[error("Invalid first_week_contains_date: {0} (must be 1-7)")]
    InvalidFirstWeekContainsDate(u8),

    #[error("Invalid quarter: {0} (must be 1-4)")]
    InvalidQuarter(u8),

    #[error("Invalid year group size: {0} (must be 1-{max})", max = i32::MAX)]
    InvalidYearGroupSize(u32),

    #[error("Invalid time interval: {0} minutes (must be 1-{max})", max = MINUTES_IN_DAY)]
    InvalidTimeInterval(u32),

    /// Error reported by the date adapter.
    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

/// One pattern, or several patterns tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub enum FormatSpec<'a> {
    Single(&'a str),
    List(&'a [&'a str]),
}

impl<'a> FormatSpec<'a> {
    /// The pattern used for display: the only one, or the first of a list
    pub fn primary(&self) -> Option<&'a str> {
        match *self {
            Self::Single(format) => Some(format),
            Self::List(formats) => formats.first().copied(),
        }
    }
}
