//! [`DateAdapter`] over `chrono::NaiveDateTime`.

use chrono::{DateTime, Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, Timelike};

use crate::adapter::{AdapterError, DateAdapter, Formats};
use crate::consts::{DAYS_IN_WEEK, MAX_YEAR, MONTHS_IN_YEAR};
use crate::locale::Locale;
use crate::pattern::{self, DateParts};

/// Layouts accepted by [`ChronoAdapter::parse_native`] after ISO-8601 and RFC 3339/2822.
const NATIVE_DATE_TIME_LAYOUTS: &[&str] =
    &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%m/%d/%Y %H:%M:%S", "%m/%d/%Y %H:%M"];
const NATIVE_DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];

/// Adapter working in local wall-clock time, without time zones.
///
/// A fixed reference instant can stand in for the clock, which keeps
/// `now()`-dependent operations deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChronoAdapter {
    reference: Option<NaiveDateTime>,
    formats:   Formats,
}

impl ChronoAdapter {
    /// Adapter reading the system clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter whose `now()` always returns `reference`
    pub fn with_reference(reference: NaiveDateTime) -> Self {
        Self { reference: Some(reference), ..Self::default() }
    }

    /// Replaces the named-pattern table
    #[must_use]
    pub fn with_formats(mut self, formats: Formats) -> Self {
        self.formats = formats;
        self
    }
}

fn to_parts(date: &NaiveDateTime) -> DateParts {
    DateParts {
        year:    date.year(),
        month:   date.month(),
        day:     date.day(),
        hour:    date.hour(),
        minute:  date.minute(),
        second:  date.second(),
        weekday: date.weekday().num_days_from_sunday(),
    }
}

fn from_parts(parts: &DateParts) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(parts.year, parts.month, parts.day)?.and_hms_opt(parts.hour, parts.minute, parts.second)
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    (28..=31).rev().find(|&day| NaiveDate::from_ymd_opt(year, month, day).is_some()).unwrap_or(28)
}

/// Moves `date` to `year`/`month` (one-based), clamping the day.
fn with_year_month(date: NaiveDateTime, year: i32, month: u32) -> NaiveDateTime {
    let day = date.day().min(last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).map_or(date, |d| d.and_time(date.time()))
}

/// Adds `by`, leaving `date` untouched when the result is unrepresentable.
fn shift(date: NaiveDateTime, by: Option<Duration>) -> NaiveDateTime {
    by.and_then(|by| date.checked_add_signed(by)).unwrap_or(date)
}

impl DateAdapter for ChronoAdapter {
    type Date = NaiveDateTime;

    fn now(&self) -> NaiveDateTime {
        self.reference.unwrap_or_else(|| Local::now().naive_local())
    }

    fn date(&self, value: NaiveDateTime) -> NaiveDateTime {
        value
    }

    fn parse(&self, value: &str, format: &str, locale: Option<&Locale>) -> Option<NaiveDateTime> {
        let fallback;
        let locale = match locale {
            Some(locale) => locale,
            None => {
                fallback = Locale::en_us();
                &fallback
            },
        };
        let expanded = pattern::expand_long_tokens(format, Some(locale));
        let tokens = pattern::tokenize(&expanded).ok()?;
        let parts = pattern::parse_parts(value, &tokens, locale, &to_parts(&self.now()))?;
        from_parts(&parts)
    }

    fn parse_native(&self, value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        if let Ok(date) = value.parse::<NaiveDateTime>() {
            return Some(date);
        }
        if let Ok(date) = DateTime::parse_from_rfc3339(value).or_else(|_| DateTime::parse_from_rfc2822(value)) {
            return Some(date.naive_local());
        }
        NATIVE_DATE_TIME_LAYOUTS
            .iter()
            .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
            .or_else(|| {
                NATIVE_DATE_LAYOUTS
                    .iter()
                    .find_map(|layout| NaiveDate::parse_from_str(value, layout).ok())
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
    }

    fn is_valid(&self, date: &NaiveDateTime) -> bool {
        (0..=MAX_YEAR).contains(&date.year())
    }

    fn format_by_string(
        &self,
        date: NaiveDateTime,
        format: &str,
        locale: Option<&Locale>,
    ) -> Result<String, AdapterError> {
        let fallback;
        let locale = match locale {
            Some(locale) => locale,
            None => {
                fallback = Locale::en_us();
                &fallback
            },
        };
        let expanded = pattern::expand_long_tokens(format, Some(locale));
        let tokens = pattern::tokenize(&expanded)?;
        Ok(pattern::format_parts(&to_parts(&date), &tokens, locale))
    }

    fn formats(&self) -> &Formats {
        &self.formats
    }

    fn add_months(&self, date: NaiveDateTime, amount: i32) -> NaiveDateTime {
        let months = Months::new(amount.unsigned_abs());
        let moved = if amount >= 0 { date.checked_add_months(months) } else { date.checked_sub_months(months) };
        moved.unwrap_or(date)
    }

    fn add_weeks(&self, date: NaiveDateTime, amount: i64) -> NaiveDateTime {
        shift(date, Duration::try_weeks(amount))
    }

    fn add_days(&self, date: NaiveDateTime, amount: i64) -> NaiveDateTime {
        shift(date, Duration::try_days(amount))
    }

    fn add_hours(&self, date: NaiveDateTime, amount: i64) -> NaiveDateTime {
        shift(date, Duration::try_hours(amount))
    }

    fn add_minutes(&self, date: NaiveDateTime, amount: i64) -> NaiveDateTime {
        shift(date, Duration::try_minutes(amount))
    }

    fn add_seconds(&self, date: NaiveDateTime, amount: i64) -> NaiveDateTime {
        shift(date, Duration::try_seconds(amount))
    }

    fn set_hours(&self, date: NaiveDateTime, hours: u32) -> NaiveDateTime {
        date.with_hour(0).map_or(date, |d| shift(d, Duration::try_hours(i64::from(hours))))
    }

    fn set_minutes(&self, date: NaiveDateTime, minutes: u32) -> NaiveDateTime {
        date.with_minute(0).map_or(date, |d| shift(d, Duration::try_minutes(i64::from(minutes))))
    }

    fn set_seconds(&self, date: NaiveDateTime, seconds: u32) -> NaiveDateTime {
        date.with_second(0).map_or(date, |d| shift(d, Duration::try_seconds(i64::from(seconds))))
    }

    fn set_month(&self, date: NaiveDateTime, month: u32) -> NaiveDateTime {
        let Ok(extra_years) = i32::try_from(month / MONTHS_IN_YEAR) else {
            return date;
        };
        with_year_month(date, date.year().saturating_add(extra_years), month % MONTHS_IN_YEAR + 1)
    }

    fn set_year(&self, date: NaiveDateTime, year: i32) -> NaiveDateTime {
        with_year_month(date, year, date.month())
    }

    fn get_hours(&self, date: NaiveDateTime) -> u32 {
        date.hour()
    }

    fn get_minutes(&self, date: NaiveDateTime) -> u32 {
        date.minute()
    }

    fn get_seconds(&self, date: NaiveDateTime) -> u32 {
        date.second()
    }

    fn get_year(&self, date: NaiveDateTime) -> i32 {
        date.year()
    }

    fn get_month(&self, date: NaiveDateTime) -> u32 {
        date.month0()
    }

    fn get_weekday(&self, date: NaiveDateTime) -> u32 {
        date.weekday().num_days_from_sunday()
    }

    fn get_timestamp(&self, date: NaiveDateTime) -> i64 {
        date.and_utc().timestamp_millis()
    }

    fn is_before(&self, date: NaiveDateTime, other: NaiveDateTime) -> bool {
        date < other
    }

    fn is_after(&self, date: NaiveDateTime, other: NaiveDateTime) -> bool {
        date > other
    }

    fn is_equal(&self, date: NaiveDateTime, other: NaiveDateTime) -> bool {
        date == other
    }

    fn is_same_day(&self, date: NaiveDateTime, other: NaiveDateTime) -> bool {
        date.date() == other.date()
    }

    fn start_of_day(&self, date: NaiveDateTime) -> NaiveDateTime {
        date.date().and_hms_opt(0, 0, 0).unwrap_or(date)
    }

    fn start_of_week(&self, date: NaiveDateTime, locale: Option<&Locale>) -> NaiveDateTime {
        let week_starts_on = i64::from(locale.map_or(0, |l| l.week_starts_on));
        let weekday = i64::from(date.weekday().num_days_from_sunday());
        let offset = (weekday - week_starts_on).rem_euclid(DAYS_IN_WEEK);
        shift(self.start_of_day(date), Duration::try_days(-offset))
    }

    fn start_of_month(&self, date: NaiveDateTime) -> NaiveDateTime {
        date.date().with_day(1).and_then(|d| d.and_hms_opt(0, 0, 0)).unwrap_or(date)
    }

    fn end_of_day(&self, date: NaiveDateTime) -> NaiveDateTime {
        date.date().and_hms_milli_opt(23, 59, 59, 999).unwrap_or(date)
    }

    fn is_within_range(
        &self,
        date: NaiveDateTime,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<bool, AdapterError> {
        if start > end {
            return Err(AdapterError::InvalidInterval { start: start.to_string(), end: end.to_string() });
        }
        Ok(start <= date && date <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, datetime};

    #[test]
    fn test_now_uses_reference() {
        let reference = datetime(2024, 3, 5, 10, 30);
        assert_eq!(ChronoAdapter::with_reference(reference).now(), reference);
    }

    #[test]
    fn test_parse_takes_missing_fields_from_reference() {
        let adapter = ChronoAdapter::with_reference(datetime(2024, 3, 5, 10, 30));
        assert_eq!(adapter.parse("14:15", "HH:mm", None), Some(datetime(2024, 3, 5, 14, 15)));
        assert_eq!(adapter.parse("2020", "yyyy", None), Some(date(2020, 1, 1)));
    }

    #[test]
    fn test_parse_rejects_impossible_day() {
        let adapter = ChronoAdapter::new();
        assert_eq!(adapter.parse("02/30/2024", "MM/dd/yyyy", None), None);
        assert_eq!(adapter.parse("02/29/2024", "MM/dd/yyyy", None), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_parse_with_locale() {
        let adapter = ChronoAdapter::new();
        let de = Locale::de();
        assert_eq!(adapter.parse("5. März 2024", "do MMMM yyyy", Some(&de)), Some(date(2024, 3, 5)));
        assert_eq!(adapter.parse("05.03.2024", "P", Some(&de)), Some(date(2024, 3, 5)));
    }

    #[test]
    fn test_parse_native() {
        let adapter = ChronoAdapter::new();
        assert_eq!(adapter.parse_native("2024-03-05T10:30:00"), Some(datetime(2024, 3, 5, 10, 30)));
        assert_eq!(adapter.parse_native("2024-03-05"), Some(date(2024, 3, 5)));
        assert_eq!(adapter.parse_native("03/05/2024"), Some(date(2024, 3, 5)));
        assert_eq!(adapter.parse_native("March 5, 2024"), Some(date(2024, 3, 5)));
        assert_eq!(adapter.parse_native("not a date"), None);
    }

    #[test]
    fn test_format_by_string() {
        let adapter = ChronoAdapter::new();
        let d = datetime(2024, 3, 5, 9, 5);
        assert_eq!(adapter.format_by_string(d, "MM.dd.yyyy", None).expect("format"), "03.05.2024");
        assert_eq!(adapter.format_by_string(d, "PPPP", None).expect("format"), "Tuesday, March 5th, 2024");
        let de = Locale::de();
        assert_eq!(adapter.format_by_string(d, "PPPP", Some(&de)).expect("format"), "Dienstag, 5. März 2024");
        assert!(matches!(adapter.format_by_string(d, "yyyy-ZZ", None), Err(AdapterError::Format(_))));
    }

    #[test]
    fn test_set_month_clamps_day() {
        let adapter = ChronoAdapter::new();
        assert_eq!(adapter.set_month(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(adapter.set_month(date(2023, 1, 31), 1), date(2023, 2, 28));
        assert_eq!(adapter.set_month(date(2023, 5, 15), 13), date(2024, 2, 15));
        assert_eq!(adapter.set_year(date(2024, 2, 29), 2023), date(2023, 2, 28));
    }

    #[test]
    fn test_setters_roll_over() {
        let adapter = ChronoAdapter::new();
        assert_eq!(adapter.set_hours(datetime(2024, 3, 5, 10, 30), 25), datetime(2024, 3, 6, 1, 30));
        assert_eq!(adapter.set_minutes(datetime(2024, 3, 5, 10, 30), 90), datetime(2024, 3, 5, 11, 30));
    }

    #[test]
    fn test_add_months_clamps() {
        let adapter = ChronoAdapter::new();
        assert_eq!(adapter.add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(adapter.add_months(date(2024, 3, 31), -1), date(2024, 2, 29));
        assert_eq!(adapter.add_months(date(2024, 3, 15), -12), date(2023, 3, 15));
    }

    #[test]
    fn test_start_of_week_follows_locale() {
        let adapter = ChronoAdapter::new();
        // 2024-03-06 is a Wednesday
        let wednesday = datetime(2024, 3, 6, 12, 0);
        assert_eq!(adapter.start_of_week(wednesday, None), date(2024, 3, 3));
        assert_eq!(adapter.start_of_week(wednesday, Some(&Locale::de())), date(2024, 3, 4));
    }

    #[test]
    fn test_day_bounds() {
        let adapter = ChronoAdapter::new();
        let d = datetime(2024, 3, 5, 10, 30);
        assert_eq!(adapter.start_of_day(d), date(2024, 3, 5));
        assert_eq!(adapter.start_of_month(d), date(2024, 3, 1));
        assert_eq!(adapter.end_of_day(d).to_string(), "2024-03-05 23:59:59.999");
    }

    #[test]
    fn test_is_within_range() {
        let adapter = ChronoAdapter::new();
        let start = date(2024, 3, 1);
        let end = date(2024, 3, 31);
        assert_eq!(adapter.is_within_range(date(2024, 3, 1), start, end), Ok(true));
        assert_eq!(adapter.is_within_range(date(2024, 4, 1), start, end), Ok(false));
        assert!(matches!(adapter.is_within_range(start, end, start), Err(AdapterError::InvalidInterval { .. })));
    }
}
