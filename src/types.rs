use crate::consts::{DEFAULT_TIME_INTERVAL_MINUTES, DEFAULT_YEAR_ITEM_NUMBER, MINUTES_IN_DAY, MONTHS_IN_QUARTER};
use crate::prelude::*;
use crate::DateUtilsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::{NonZeroU32, NonZeroU8};
use std::ops::RangeInclusive;

/// Number of quarters in a year
const QUARTERS_IN_YEAR: u8 = 4;

/// A quarter of the year guaranteed to be in the range `1..=4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quarter(NonZeroU8);

impl Quarter {
    /// Creates a new Quarter, validating that it's in `1..=4`
    ///
    /// # Errors
    /// Returns `DateUtilsError::InvalidQuarter` if the value is 0 or > 4.
    pub fn new(value: u8) -> Result<Self, DateUtilsError> {
        let non_zero = NonZeroU8::new(value).ok_or(DateUtilsError::InvalidQuarter(value))?;
        if value > QUARTERS_IN_YEAR {
            return Err(DateUtilsError::InvalidQuarter(value));
        }
        Ok(Self(non_zero))
    }

    /// Quarter containing a zero-based month
    pub fn from_month(month: u32) -> Self {
        let index = (month % 12) / MONTHS_IN_QUARTER;
        // index is in 0..=3
        Self(NonZeroU8::MIN.saturating_add(u8::try_from(index).unwrap_or(0)))
    }

    /// Zero-based month that opens this quarter
    pub const fn first_month(self) -> u32 {
        (self.0.get() as u32 - 1) * MONTHS_IN_QUARTER
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Quarter {
    type Error = DateUtilsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quarter> for u8 {
    fn from(quarter: Quarter) -> Self {
        quarter.0.get()
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

/// How many years one page of the year grid shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct YearGroupSize(NonZeroU32);

impl YearGroupSize {
    /// # Errors
    /// Returns `DateUtilsError::InvalidYearGroupSize` for 0 or sizes that do not fit an `i32`.
    pub fn new(value: u32) -> Result<Self, DateUtilsError> {
        if i32::try_from(value).is_err() {
            return Err(DateUtilsError::InvalidYearGroupSize(value));
        }
        NonZeroU32::new(value).map(Self).ok_or(DateUtilsError::InvalidYearGroupSize(value))
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Size as a signed year count
    pub(crate) fn years(self) -> i32 {
        i32::try_from(self.0.get()).unwrap_or(i32::MAX)
    }
}

impl Default for YearGroupSize {
    fn default() -> Self {
        Self(NonZeroU32::MIN.saturating_add(DEFAULT_YEAR_ITEM_NUMBER - 1))
    }
}

impl TryFrom<u32> for YearGroupSize {
    type Error = DateUtilsError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<YearGroupSize> for u32 {
    fn from(size: YearGroupSize) -> Self {
        size.0.get()
    }
}

/// Minutes between two generated entries of a time list, `1..=1440`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TimeInterval(NonZeroU32);

impl TimeInterval {
    /// # Errors
    /// Returns `DateUtilsError::InvalidTimeInterval` for 0 or more than a day.
    pub fn new(minutes: u32) -> Result<Self, DateUtilsError> {
        if minutes > MINUTES_IN_DAY {
            return Err(DateUtilsError::InvalidTimeInterval(minutes));
        }
        NonZeroU32::new(minutes).map(Self).ok_or(DateUtilsError::InvalidTimeInterval(minutes))
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// How many slots start within one day, counting a trailing partial slot
    pub const fn slots_per_day(self) -> u32 {
        MINUTES_IN_DAY.div_ceil(self.0.get())
    }
}

impl Default for TimeInterval {
    fn default() -> Self {
        Self(NonZeroU32::MIN.saturating_add(DEFAULT_TIME_INTERVAL_MINUTES - 1))
    }
}

impl TryFrom<u32> for TimeInterval {
    type Error = DateUtilsError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TimeInterval> for u32 {
    fn from(interval: TimeInterval) -> Self {
        interval.0.get()
    }
}

/// Window of years shown by one page of the year grid (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{start_period}-{end_period}")]
pub struct YearsPeriod {
    pub start_period: i32,
    pub end_period:   i32,
}

impl YearsPeriod {
    /// Window containing `year`: the end is `year` rounded up to a multiple of `group`.
    /// Bounds past the `i32` range are clamped to it.
    pub fn containing(year: i32, group: YearGroupSize) -> Self {
        let (year, size) = (i64::from(year), i64::from(group.years()));
        let quotient = year.div_euclid(size);
        let rounded_up = if year.rem_euclid(size) == 0 { quotient } else { quotient + 1 };
        let end_period = rounded_up * size;
        Self { start_period: clamp_year(end_period - (size - 1)), end_period: clamp_year(end_period) }
    }

    /// Every year of the window, ascending
    pub const fn years(&self) -> RangeInclusive<i32> {
        self.start_period..=self.end_period
    }
}

fn clamp_year(year: i64) -> i32 {
    i32::try_from(year).unwrap_or(if year < 0 { i32::MIN } else { i32::MAX })
}
