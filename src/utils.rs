//! [`DateUtils`]: parsing, formatting, getters, setters and labels.

use serde::{Deserialize, Serialize};

use crate::adapter::{DateAdapter, FormatKey};
use crate::consts::{
    ADAPTER_DEFAULT_LOCALE, DAY_OF_WEEK_CODE_FORMAT, JANUARY, MILLISECONDS_IN_WEEK, MIN_VALID_YEAR, MONTHS_IN_QUARTER,
};
use crate::locale::{Locale, LocaleRegistry, LocaleSpec};
use crate::pattern;
use crate::types::Quarter;
use crate::{DateUtilsError, FormatSpec};

const MONTH_LABEL_FORMAT: &str = "LLLL";
const MONTH_SHORT_LABEL_FORMAT: &str = "LLL";
const QUARTER_SHORT_LABEL_FORMAT: &str = "QQQ";

/// Date-picker calendar semantics over a borrowed adapter and locale registry.
///
/// Every date argument is normalized through [`DateAdapter::date`] before it
/// is compared or formatted. The struct is `Copy`, so it can be handed to
/// each view that needs it.
#[derive(Debug)]
pub struct DateUtils<'a, A> {
    adapter: &'a A,
    locales: &'a LocaleRegistry,
}

impl<A> Clone for DateUtils<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for DateUtils<'_, A> {}

/// Wall-clock time applied by [`DateUtils::set_time`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeOfDay {
    pub hour:   u32,
    pub minute: u32,
    pub second: u32,
}

/// Pads a number below ten with a leading zero.
pub fn add_zero(value: u32) -> String {
    format!("{value:02}")
}

impl<'a, A: DateAdapter> DateUtils<'a, A> {
    pub const fn new(adapter: &'a A, locales: &'a LocaleRegistry) -> Self {
        Self { adapter, locales }
    }

    pub const fn adapter(&self) -> &'a A {
        self.adapter
    }

    pub const fn locales(&self) -> &'a LocaleRegistry {
        self.locales
    }

    /// The named or raw locale, else the registry's default locale object.
    pub fn resolve_locale<'l>(&self, locale: Option<LocaleSpec<'l>>) -> Option<&'l Locale>
    where
        'a: 'l,
    {
        let registry: &'l LocaleRegistry = self.locales;
        registry.locale_object(locale).or_else(|| registry.default_locale_object())
    }

    // --- parsing ---

    /// Parses `value` with one pattern or a list of patterns.
    ///
    /// With a list, the last pattern that yields a valid date wins and no
    /// fallback is attempted. With a single pattern in lenient mode, a failed
    /// parse is retried with long tokens expanded and the pattern cut to the
    /// length of `value`, then with native parsing. Strict mode only accepts
    /// values that format back to exactly `value`.
    pub fn parse_date(
        &self,
        value: &str,
        formats: FormatSpec<'_>,
        locale: Option<LocaleSpec<'_>>,
        strict: bool,
    ) -> Option<A::Date> {
        let locale = self.resolve_locale(locale);
        match formats {
            FormatSpec::List(formats) => {
                formats.iter().rev().find_map(|format| self.try_parse(value, format, locale, strict))
            },
            FormatSpec::Single(format) => {
                let parsed = self.try_parse(value, format, locale, strict);
                if parsed.is_some() || strict {
                    return parsed;
                }
                self.parse_fallback(value, format, locale)
            },
        }
    }

    fn try_parse(&self, value: &str, format: &str, locale: Option<&Locale>, strict: bool) -> Option<A::Date> {
        let parsed = self.adapter.parse(value, format, locale).filter(|date| self.adapter.is_valid(date))?;
        if !strict {
            return Some(parsed);
        }
        let reformatted = self.adapter.format_by_string(parsed, format, locale).ok()?;
        (reformatted == value).then_some(parsed)
    }

    fn parse_fallback(&self, value: &str, format: &str, locale: Option<&Locale>) -> Option<A::Date> {
        let expanded = pattern::expand_long_tokens(format, locale);
        let truncated: String = expanded.chars().take(value.chars().count()).collect();
        tracing::debug!(value, format, retry = %truncated, "parse failed, retrying with truncated pattern");

        let retried = if value.is_empty() { None } else { self.adapter.parse(value, &truncated, None) };
        retried
            .filter(|date| self.adapter.is_valid(date))
            .or_else(|| {
                tracing::debug!(value, "falling back to native date parsing");
                self.adapter.parse_native(value)
            })
            .filter(|date| self.adapter.is_valid(date))
    }

    /// Adapter-valid and after January 1st of year 1000.
    pub fn is_valid(&self, date: A::Date) -> bool {
        let lower_bound = self.first_of_month(MIN_VALID_YEAR, JANUARY);
        self.adapter.is_valid(&date) && self.adapter.is_after(self.adapter.date(date), lower_bound)
    }

    // --- formatting ---

    /// Formats `date` with `format`.
    ///
    /// The locale key `"en"` means the adapter's own default. A name that is
    /// not registered falls back to the registry's default locale, and to no
    /// locale at all when that is missing too.
    ///
    /// # Errors
    /// Returns `DateUtilsError::Adapter` when the pattern cannot be formatted.
    pub fn format_date(
        &self,
        date: A::Date,
        format: &str,
        locale: Option<LocaleSpec<'_>>,
    ) -> Result<String, DateUtilsError> {
        let date = self.adapter.date(date);
        match locale {
            Some(LocaleSpec::Named(ADAPTER_DEFAULT_LOCALE)) => {
                return Ok(self.adapter.format_by_string(date, format, None)?);
            },
            Some(LocaleSpec::Named(name)) if self.locales.locale_object(locale).is_none() => {
                tracing::warn!(locale = name, "no locale object registered under this name");
            },
            _ => {},
        }
        Ok(self.adapter.format_by_string(date, format, self.resolve_locale(locale))?)
    }

    /// Formats an optional date with the first pattern, or returns `""`.
    pub fn safe_date_format(
        &self,
        date: Option<A::Date>,
        formats: FormatSpec<'_>,
        locale: Option<LocaleSpec<'_>>,
    ) -> String {
        let (Some(date), Some(format)) = (date, formats.primary()) else {
            return String::new();
        };
        self.format_date(date, format, locale).unwrap_or_else(|err| {
            tracing::debug!(%err, format, "formatting failed");
            String::new()
        })
    }

    // --- setters ---

    pub fn set_time(&self, date: A::Date, time: TimeOfDay) -> A::Date {
        let adapter = self.adapter;
        adapter.set_hours(adapter.set_minutes(adapter.set_seconds(date, time.second), time.minute), time.hour)
    }

    pub fn set_month(&self, date: A::Date, month: u32) -> A::Date {
        self.adapter.set_month(self.adapter.date(date), month)
    }

    pub fn set_year(&self, date: A::Date, year: i32) -> A::Date {
        self.adapter.set_year(self.adapter.date(date), year)
    }

    /// Moves `date` into `quarter`, keeping its position within the quarter.
    pub fn set_quarter(&self, date: A::Date, quarter: Quarter) -> A::Date {
        let date = self.adapter.date(date);
        let month = self.adapter.get_month(date);
        self.adapter.set_month(date, quarter.first_month() + month % MONTHS_IN_QUARTER)
    }

    // --- getters ---

    /// Week number under the locale's week rules (Sunday start, week one
    /// containing January 1st, when no locale resolves).
    ///
    /// # Errors
    /// Returns `DateUtilsError::InvalidFirstWeekContainsDate` when the locale's
    /// first-week rule is outside `1..=7`.
    pub fn get_week(&self, date: A::Date, locale: Option<LocaleSpec<'_>>) -> Result<u32, DateUtilsError> {
        let date = self.adapter.date(date);
        let locale = self.resolve_locale(locale);
        let week_start = self.adapter.start_of_week(date, locale);
        let year_start = self.week_year_start(date, locale)?;
        let diff = self.adapter.get_timestamp(week_start) - self.adapter.get_timestamp(year_start);
        let week = (diff + MILLISECONDS_IN_WEEK / 2).div_euclid(MILLISECONDS_IN_WEEK) + 1;
        Ok(u32::try_from(week).unwrap_or(1))
    }

    /// First day of the week-numbering year containing `date`.
    ///
    /// # Errors
    /// Same as [`DateUtils::get_week`].
    pub fn start_of_week_year(&self, date: A::Date, locale: Option<LocaleSpec<'_>>) -> Result<A::Date, DateUtilsError> {
        self.week_year_start(self.adapter.date(date), self.resolve_locale(locale))
    }

    fn week_year_start(&self, date: A::Date, locale: Option<&Locale>) -> Result<A::Date, DateUtilsError> {
        let first_week_contains_date = locale.map_or(1, |l| l.first_week_contains_date);
        if !(1..=7).contains(&first_week_contains_date) {
            return Err(DateUtilsError::InvalidFirstWeekContainsDate(first_week_contains_date));
        }
        let first_week_start = |year: i32| {
            let offset = i64::from(first_week_contains_date - 1);
            let anchor = self.adapter.add_days(self.first_of_month(year, JANUARY), offset);
            self.adapter.start_of_week(anchor, locale)
        };

        let year = self.adapter.get_year(date);
        let week_year = if !self.adapter.is_before(date, first_week_start(year + 1)) {
            year + 1
        } else if !self.adapter.is_before(date, first_week_start(year)) {
            year
        } else {
            year - 1
        };
        Ok(first_week_start(week_year))
    }

    /// Day of the month padded to three digits (`ddd`).
    ///
    /// # Errors
    /// Same as [`DateUtils::format_date`].
    pub fn get_day_of_week_code(&self, day: A::Date, locale: Option<LocaleSpec<'_>>) -> Result<String, DateUtilsError> {
        self.format_date(day, DAY_OF_WEEK_CODE_FORMAT, locale)
    }

    pub fn get_quarter(&self, date: A::Date) -> Quarter {
        Quarter::from_month(self.adapter.get_month(self.adapter.date(date)))
    }

    /// Days since Sunday
    pub fn get_day(&self, date: A::Date) -> u32 {
        self.adapter.get_weekday(self.adapter.date(date))
    }

    /// Day of the month rendered with the adapter's `day_of_month` pattern.
    ///
    /// # Errors
    /// Same as [`DateUtils::format_date`].
    pub fn get_date(&self, date: A::Date) -> Result<String, DateUtilsError> {
        Ok(self.adapter.format(self.adapter.date(date), FormatKey::DayOfMonth, self.locales.default_locale_object())?)
    }

    /// Milliseconds since the epoch
    pub fn get_time(&self, date: A::Date) -> i64 {
        self.adapter.get_timestamp(self.adapter.date(date))
    }

    pub fn get_hours(&self, date: A::Date) -> u32 {
        self.adapter.get_hours(self.adapter.date(date))
    }

    pub fn get_minutes(&self, date: A::Date) -> u32 {
        self.adapter.get_minutes(self.adapter.date(date))
    }

    pub fn get_seconds(&self, date: A::Date) -> u32 {
        self.adapter.get_seconds(self.adapter.date(date))
    }

    /// Zero-based month
    pub fn get_month(&self, date: A::Date) -> u32 {
        self.adapter.get_month(self.adapter.date(date))
    }

    pub fn get_year(&self, date: A::Date) -> i32 {
        self.adapter.get_year(self.adapter.date(date))
    }

    // --- start of ---

    pub fn start_of_day(&self, date: A::Date) -> A::Date {
        self.adapter.start_of_day(self.adapter.date(date))
    }

    pub fn start_of_week(&self, date: A::Date, locale: Option<LocaleSpec<'_>>) -> A::Date {
        self.adapter.start_of_week(self.adapter.date(date), self.resolve_locale(locale))
    }

    pub fn start_of_month(&self, date: A::Date) -> A::Date {
        self.adapter.start_of_month(self.adapter.date(date))
    }

    pub fn start_of_quarter(&self, date: A::Date) -> A::Date {
        let first_month = self.get_quarter(date).first_month();
        self.adapter.set_month(self.start_of_month(date), first_month)
    }

    pub fn start_of_year(&self, date: A::Date) -> A::Date {
        self.first_of_month(self.get_year(date), JANUARY)
    }

    pub fn start_of_today(&self) -> A::Date {
        self.start_of_day(self.adapter.now())
    }

    /// Midnight on the first day of `month` (zero-based) of `year`
    pub(crate) fn first_of_month(&self, year: i32, month: u32) -> A::Date {
        let adapter = self.adapter;
        adapter.set_year(adapter.set_month(adapter.start_of_month(adapter.now()), month), year)
    }

    // --- arithmetic ---

    pub fn add_months(&self, date: A::Date, amount: i32) -> A::Date {
        self.adapter.add_months(self.adapter.date(date), amount)
    }

    pub fn add_weeks(&self, date: A::Date, amount: i64) -> A::Date {
        self.adapter.add_weeks(self.adapter.date(date), amount)
    }

    pub fn add_days(&self, date: A::Date, amount: i64) -> A::Date {
        self.adapter.add_days(self.adapter.date(date), amount)
    }

    pub fn add_hours(&self, date: A::Date, amount: i64) -> A::Date {
        self.adapter.add_hours(self.adapter.date(date), amount)
    }

    pub fn add_minutes(&self, date: A::Date, amount: i64) -> A::Date {
        self.adapter.add_minutes(self.adapter.date(date), amount)
    }

    pub fn add_seconds(&self, date: A::Date, amount: i64) -> A::Date {
        self.adapter.add_seconds(self.adapter.date(date), amount)
    }

    // --- labels ---

    /// Full weekday name passed through `format_func`.
    ///
    /// # Errors
    /// Same as [`DateUtils::format_date`].
    pub fn formatted_weekday_in_locale(
        &self,
        date: A::Date,
        format_func: impl FnOnce(String) -> String,
        locale: Option<LocaleSpec<'_>>,
    ) -> Result<String, DateUtilsError> {
        self.format_date(date, self.adapter.formats().get(FormatKey::Weekday), locale).map(format_func)
    }

    /// # Errors
    /// Same as [`DateUtils::format_date`].
    pub fn weekday_min_in_locale(
        &self,
        date: A::Date,
        locale: Option<LocaleSpec<'_>>,
    ) -> Result<String, DateUtilsError> {
        self.format_date(date, self.adapter.formats().get(FormatKey::WeekdayMin), locale)
    }

    /// # Errors
    /// Same as [`DateUtils::format_date`].
    pub fn weekday_short_in_locale(
        &self,
        date: A::Date,
        locale: Option<LocaleSpec<'_>>,
    ) -> Result<String, DateUtilsError> {
        self.format_date(date, self.adapter.formats().get(FormatKey::WeekdayShort), locale)
    }

    /// Standalone name of a zero-based month.
    ///
    /// # Errors
    /// Same as [`DateUtils::format_date`].
    pub fn month_in_locale(&self, month: u32, locale: Option<LocaleSpec<'_>>) -> Result<String, DateUtilsError> {
        let date = self.adapter.set_month(self.adapter.now(), month);
        self.format_date(date, MONTH_LABEL_FORMAT, locale)
    }

    /// # Errors
    /// Same as [`DateUtils::format_date`].
    pub fn month_short_in_locale(&self, month: u32, locale: Option<LocaleSpec<'_>>) -> Result<String, DateUtilsError> {
        let date = self.adapter.set_month(self.adapter.now(), month);
        self.format_date(date, MONTH_SHORT_LABEL_FORMAT, locale)
    }

    /// # Errors
    /// Same as [`DateUtils::format_date`].
    pub fn quarter_short_in_locale(
        &self,
        quarter: Quarter,
        locale: Option<LocaleSpec<'_>>,
    ) -> Result<String, DateUtilsError> {
        let date = self.set_quarter(self.adapter.now(), quarter);
        self.format_date(date, QUARTER_SHORT_LABEL_FORMAT, locale)
    }
}
