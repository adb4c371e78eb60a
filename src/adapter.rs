//! The date-arithmetic backend contract.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::pattern::FormatError;

/// Error type for adapter operations that can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// Interval start lies after its end.
    #[error("Invalid interval: start ({start}) is after end ({end})")]
    InvalidInterval { start: String, end: String },

    /// Pattern could not be formatted.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Named patterns an adapter uses for its built-in labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Formats {
    pub weekday:        String,
    pub weekday_short:  String,
    pub weekday_min:    String,
    pub day_of_month:   String,
    pub full_time:      String,
    pub full_date:      String,
    pub keyboard_date:  String,
    pub month:          String,
    pub month_short:    String,
    pub month_and_year: String,
    pub year:           String,
}

impl Default for Formats {
    fn default() -> Self {
        Self {
            weekday:        "EEEE".into(),
            weekday_short:  "EEE".into(),
            weekday_min:    "EEEEEE".into(),
            day_of_month:   "d".into(),
            full_time:      "p".into(),
            full_date:      "PP".into(),
            keyboard_date:  "P".into(),
            month:          "LLLL".into(),
            month_short:    "LLL".into(),
            month_and_year: "LLLL yyyy".into(),
            year:           "yyyy".into(),
        }
    }
}

/// Selects one entry of [`Formats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKey {
    Weekday,
    WeekdayShort,
    WeekdayMin,
    DayOfMonth,
    FullTime,
    FullDate,
    KeyboardDate,
    Month,
    MonthShort,
    MonthAndYear,
    Year,
}

impl Formats {
    /// Pattern registered for `key`
    pub fn get(&self, key: FormatKey) -> &str {
        match key {
            FormatKey::Weekday => &self.weekday,
            FormatKey::WeekdayShort => &self.weekday_short,
            FormatKey::WeekdayMin => &self.weekday_min,
            FormatKey::DayOfMonth => &self.day_of_month,
            FormatKey::FullTime => &self.full_time,
            FormatKey::FullDate => &self.full_date,
            FormatKey::KeyboardDate => &self.keyboard_date,
            FormatKey::Month => &self.month,
            FormatKey::MonthShort => &self.month_short,
            FormatKey::MonthAndYear => &self.month_and_year,
            FormatKey::Year => &self.year,
        }
    }
}

/// Primitive date operations supplied by a date library.
///
/// Months are zero-based (January is `0`) and weekdays count days since
/// Sunday. Setters roll over the way calendar arithmetic does: setting the
/// hour to 25 lands on 01:00 of the next day, and setting a month whose
/// length is shorter than the current day clamps to that month's last day.
pub trait DateAdapter {
    /// Opaque date-time value
    type Date: Copy + PartialEq + Debug;

    /// Current date-time
    fn now(&self) -> Self::Date;

    /// Normalizes a value before it is compared or formatted
    fn date(&self, value: Self::Date) -> Self::Date;

    /// Parses `value` with a field pattern. Missing fields come from `now()`.
    fn parse(&self, value: &str, format: &str, locale: Option<&Locale>) -> Option<Self::Date>;

    /// Parses `value` the way the platform's native date constructor would.
    fn parse_native(&self, value: &str) -> Option<Self::Date>;

    fn is_valid(&self, date: &Self::Date) -> bool;

    /// Formats with a field pattern.
    ///
    /// # Errors
    /// Returns `AdapterError::Format` when the pattern contains unsupported letters.
    fn format_by_string(&self, date: Self::Date, format: &str, locale: Option<&Locale>)
    -> Result<String, AdapterError>;

    /// The adapter's table of named patterns
    fn formats(&self) -> &Formats;

    /// Formats with one of the adapter's named patterns.
    ///
    /// # Errors
    /// Same as [`DateAdapter::format_by_string`].
    fn format(&self, date: Self::Date, key: FormatKey, locale: Option<&Locale>) -> Result<String, AdapterError> {
        self.format_by_string(date, self.formats().get(key), locale)
    }

    fn add_months(&self, date: Self::Date, amount: i32) -> Self::Date;
    fn add_weeks(&self, date: Self::Date, amount: i64) -> Self::Date;
    fn add_days(&self, date: Self::Date, amount: i64) -> Self::Date;
    fn add_hours(&self, date: Self::Date, amount: i64) -> Self::Date;
    fn add_minutes(&self, date: Self::Date, amount: i64) -> Self::Date;
    fn add_seconds(&self, date: Self::Date, amount: i64) -> Self::Date;

    fn set_hours(&self, date: Self::Date, hours: u32) -> Self::Date;
    fn set_minutes(&self, date: Self::Date, minutes: u32) -> Self::Date;
    fn set_seconds(&self, date: Self::Date, seconds: u32) -> Self::Date;
    fn set_month(&self, date: Self::Date, month: u32) -> Self::Date;
    fn set_year(&self, date: Self::Date, year: i32) -> Self::Date;

    fn get_hours(&self, date: Self::Date) -> u32;
    fn get_minutes(&self, date: Self::Date) -> u32;
    fn get_seconds(&self, date: Self::Date) -> u32;
    fn get_year(&self, date: Self::Date) -> i32;
    fn get_month(&self, date: Self::Date) -> u32;
    fn get_weekday(&self, date: Self::Date) -> u32;
    /// Milliseconds since the epoch, wall-clock
    fn get_timestamp(&self, date: Self::Date) -> i64;

    fn is_before(&self, date: Self::Date, other: Self::Date) -> bool;
    fn is_after(&self, date: Self::Date, other: Self::Date) -> bool;
    fn is_equal(&self, date: Self::Date, other: Self::Date) -> bool;
    fn is_same_day(&self, date: Self::Date, other: Self::Date) -> bool;

    fn start_of_day(&self, date: Self::Date) -> Self::Date;
    /// Start of the week containing `date`, using the locale's first weekday
    fn start_of_week(&self, date: Self::Date, locale: Option<&Locale>) -> Self::Date;
    fn start_of_month(&self, date: Self::Date) -> Self::Date;
    fn end_of_day(&self, date: Self::Date) -> Self::Date;

    /// Whether `date` lies in `[start, end]`.
    ///
    /// # Errors
    /// Returns `AdapterError::InvalidInterval` when `start` is after `end`.
    fn is_within_range(&self, date: Self::Date, start: Self::Date, end: Self::Date) -> Result<bool, AdapterError>;
}
