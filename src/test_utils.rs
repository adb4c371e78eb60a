//! Shared builders for unit tests.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::{AdapterError, ChronoAdapter, DateAdapter, DateUtils, Formats, Locale, LocaleRegistry};

/// Midnight of the given calendar day (one-based month)
pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    datetime(year, month, day, 0, 0)
}

pub(crate) fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("test date must be valid")
}

/// Time of day on the reference date
pub(crate) fn time(hour: u32, minute: u32) -> NaiveDateTime {
    datetime(2024, 3, 5, hour, minute)
}

/// Adapter plus registry a test can borrow a [`DateUtils`] from.
///
/// `now()` is fixed at Tuesday 2024-03-05 10:30. The registry knows `en-US`
/// and `de` and has no default locale.
pub(crate) struct Fixture {
    pub adapter: ChronoAdapter,
    pub locales: LocaleRegistry,
}

impl Fixture {
    pub fn new() -> Self {
        let mut locales = LocaleRegistry::new();
        locales.register_locale("en-US", Locale::en_us());
        locales.register_locale("de", Locale::de());
        Self { adapter: ChronoAdapter::with_reference(time(10, 30)), locales }
    }

    /// Same fixture with `name` as the default locale
    pub fn with_default_locale(name: &str) -> Self {
        let mut fixture = Self::new();
        fixture.locales.set_default_locale(name);
        fixture
    }

    pub fn utils(&self) -> DateUtils<'_, ChronoAdapter> {
        DateUtils::new(&self.adapter, &self.locales)
    }
}

/// [`ChronoAdapter`] whose `date` drops seconds, so normalization is observable.
pub(crate) struct MinuteAdapter(pub ChronoAdapter);

impl DateAdapter for MinuteAdapter {
    type Date = NaiveDateTime;

    fn now(&self) -> NaiveDateTime {
        self.0.now()
    }

    fn date(&self, value: NaiveDateTime) -> NaiveDateTime {
        value.with_second(0).and_then(|d| d.with_nanosecond(0)).unwrap_or(value)
    }

    fn parse(&self, value: &str, format: &str, locale: Option<&Locale>) -> Option<NaiveDateTime> {
        self.0.parse(value, format, locale)
    }

    fn parse_native(&self, value: &str) -> Option<NaiveDateTime> {
        self.0.parse_native(value)
    }

    fn is_valid(&self, date: &NaiveDateTime) -> bool {
        self.0.is_valid(date)
    }

    fn format_by_string(
        &self,
        date: NaiveDateTime,
        format: &str,
        locale: Option<&Locale>,
    ) -> Result<String, AdapterError> {
        self.0.format_by_string(date, format, locale)
    }

    fn formats(&self) -> &Formats {
        self.0.formats()
    }

    fn add_months(&self, date: NaiveDateTime, amount: i32) -> NaiveDateTime {
        self.0.add_months(date, amount)
    }

    fn add_weeks(&self, date: NaiveDateTime, amount: i64) -> NaiveDateTime {
        self.0.add_weeks(date, amount)
    }

    fn add_days(&self, date: NaiveDateTime, amount: i64) -> NaiveDateTime {
        self.0.add_days(date, amount)
    }

    fn add_hours(&self, date: NaiveDateTime, amount: i64) -> NaiveDateTime {
        self.0.add_hours(date, amount)
    }

    fn add_minutes(&self, date: NaiveDateTime, amount: i64) -> NaiveDateTime {
        self.0.add_minutes(date, amount)
    }

    fn add_seconds(&self, date: NaiveDateTime, amount: i64) -> NaiveDateTime {
        self.0.add_seconds(date, amount)
    }

    fn set_hours(&self, date: NaiveDateTime, hours: u32) -> NaiveDateTime {
        self.0.set_hours(date, hours)
    }

    fn set_minutes(&self, date: NaiveDateTime, minutes: u32) -> NaiveDateTime {
        self.0.set_minutes(date, minutes)
    }

    fn set_seconds(&self, date: NaiveDateTime, seconds: u32) -> NaiveDateTime {
        self.0.set_seconds(date, seconds)
    }

    fn set_month(&self, date: NaiveDateTime, month: u32) -> NaiveDateTime {
        self.0.set_month(date, month)
    }

    fn set_year(&self, date: NaiveDateTime, year: i32) -> NaiveDateTime {
        self.0.set_year(date, year)
    }

    fn get_hours(&self, date: NaiveDateTime) -> u32 {
        self.0.get_hours(date)
    }

    fn get_minutes(&self, date: NaiveDateTime) -> u32 {
        self.0.get_minutes(date)
    }

    fn get_seconds(&self, date: NaiveDateTime) -> u32 {
        self.0.get_seconds(date)
    }

    fn get_year(&self, date: NaiveDateTime) -> i32 {
        self.0.get_year(date)
    }

    fn get_month(&self, date: NaiveDateTime) -> u32 {
        self.0.get_month(date)
    }

    fn get_weekday(&self, date: NaiveDateTime) -> u32 {
        self.0.get_weekday(date)
    }

    fn get_timestamp(&self, date: NaiveDateTime) -> i64 {
        self.0.get_timestamp(date)
    }

    fn is_before(&self, date: NaiveDateTime, other: NaiveDateTime) -> bool {
        self.0.is_before(date, other)
    }

    fn is_after(&self, date: NaiveDateTime, other: NaiveDateTime) -> bool {
        self.0.is_after(date, other)
    }

    fn is_equal(&self, date: NaiveDateTime, other: NaiveDateTime) -> bool {
        self.0.is_equal(date, other)
    }

    fn is_same_day(&self, date: NaiveDateTime, other: NaiveDateTime) -> bool {
        self.0.is_same_day(date, other)
    }

    fn start_of_day(&self, date: NaiveDateTime) -> NaiveDateTime {
        self.0.start_of_day(date)
    }

    fn start_of_week(&self, date: NaiveDateTime, locale: Option<&Locale>) -> NaiveDateTime {
        self.0.start_of_week(date, locale)
    }

    fn start_of_month(&self, date: NaiveDateTime) -> NaiveDateTime {
        self.0.start_of_month(date)
    }

    fn end_of_day(&self, date: NaiveDateTime) -> NaiveDateTime {
        self.0.end_of_day(date)
    }

    fn is_within_range(
        &self,
        date: NaiveDateTime,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<bool, AdapterError> {
        self.0.is_within_range(date, start, end)
    }
}
