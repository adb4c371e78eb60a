//! Locale data and the caller-owned locale registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// How ordinal numbers (`do`, `Mo`, `Qo`) are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ordinal {
    /// `1st`, `2nd`, `3rd`, `4th`, `11th`
    #[default]
    English,
    /// `1.`, `2.`
    Period,
}

impl Ordinal {
    /// Writes `n` as an ordinal
    pub fn apply(self, n: u32) -> String {
        match self {
            Self::English => {
                let suffix = match (n % 10, n % 100) {
                    (_, 11..=13) => "th",
                    (1, _) => "st",
                    (2, _) => "nd",
                    (3, _) => "rd",
                    _ => "th",
                };
                format!("{n}{suffix}")
            },
            Self::Period => format!("{n}."),
        }
    }

    /// Removes an ordinal suffix from the start of `s`, if present.
    pub fn strip_suffix(self, s: &str) -> &str {
        let suffixes: &[&str] = match self {
            Self::English => &["st", "nd", "rd", "th"],
            Self::Period => &["."],
        };
        suffixes.iter().find_map(|suffix| s.strip_prefix(suffix)).unwrap_or(s)
    }
}

/// One long-format pattern per width.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LongWidths {
    pub full:   String,
    pub long:   String,
    pub medium: String,
    pub short:  String,
}

impl LongWidths {
    fn new(full: &str, long: &str, medium: &str, short: &str) -> Self {
        Self { full: full.into(), long: long.into(), medium: medium.into(), short: short.into() }
    }

    /// `P` is short, `PP` medium, `PPP` long, four or more full.
    pub fn for_width(&self, width: usize) -> &str {
        match width {
            0 | 1 => &self.short,
            2 => &self.medium,
            3 => &self.long,
            _ => &self.full,
        }
    }
}

/// Long-format table used to expand `P`/`p` tokens.
///
/// `date_time` patterns contain `{{date}}` and `{{time}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormatLong {
    pub date:      LongWidths,
    pub time:      LongWidths,
    pub date_time: LongWidths,
}

impl FormatLong {
    /// Expands a run of `date_width` `P`s followed by `time_width` `p`s.
    pub fn expand(&self, date_width: usize, time_width: usize) -> String {
        match (date_width, time_width) {
            (0, t) => self.time.for_width(t).to_owned(),
            (d, 0) => self.date.for_width(d).to_owned(),
            (d, t) => self
                .date_time
                .for_width(d)
                .replace("{{date}}", self.date.for_width(d))
                .replace("{{time}}", self.time.for_width(t)),
        }
    }
}

/// Everything the formatter and parser need to know about a language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    pub code:                     String,
    pub months:                   [String; 12],
    pub months_short:             [String; 12],
    /// Sunday first
    pub weekdays:                 [String; 7],
    pub weekdays_short:           [String; 7],
    pub weekdays_min:             [String; 7],
    pub quarters:                 [String; 4],
    pub quarters_abbreviated:     [String; 4],
    pub am:                       String,
    pub pm:                       String,
    #[serde(default)]
    pub ordinal:                  Ordinal,
    pub format_long:              FormatLong,
    /// First day of the week, days since Sunday
    #[serde(default)]
    pub week_starts_on:           u8,
    /// Day of January that always falls in week one
    #[serde(default = "default_first_week_contains_date")]
    pub first_week_contains_date: u8,
}

const fn default_first_week_contains_date() -> u8 {
    1
}

fn strings<const N: usize>(names: [&str; N]) -> [String; N] {
    names.map(String::from)
}

impl Locale {
    /// United States English
    pub fn en_us() -> Self {
        Self {
            code:                     "en-US".into(),
            months:                   strings([
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]),
            months_short:             strings([
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            weekdays:                 strings([
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]),
            weekdays_short:           strings(["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
            weekdays_min:             strings(["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]),
            quarters:                 strings(["1st quarter", "2nd quarter", "3rd quarter", "4th quarter"]),
            quarters_abbreviated:     strings(["Q1", "Q2", "Q3", "Q4"]),
            am:                       "AM".into(),
            pm:                       "PM".into(),
            ordinal:                  Ordinal::English,
            format_long:              FormatLong {
                date:      LongWidths::new("EEEE, MMMM do, y", "MMMM do, y", "MMM d, y", "MM/dd/yyyy"),
                time:      LongWidths::new("h:mm:ss a", "h:mm:ss a", "h:mm:ss a", "h:mm a"),
                date_time: LongWidths::new(
                    "{{date}} 'at' {{time}}",
                    "{{date}} 'at' {{time}}",
                    "{{date}}, {{time}}",
                    "{{date}}, {{time}}",
                ),
            },
            week_starts_on:           0,
            first_week_contains_date: 1,
        }
    }

    /// German
    pub fn de() -> Self {
        Self {
            code:                     "de".into(),
            months:                   strings([
                "Januar",
                "Februar",
                "März",
                "April",
                "Mai",
                "Juni",
                "Juli",
                "August",
                "September",
                "Oktober",
                "November",
                "Dezember",
            ]),
            months_short:             strings([
                "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
            ]),
            weekdays:                 strings([
                "Sonntag",
                "Montag",
                "Dienstag",
                "Mittwoch",
                "Donnerstag",
                "Freitag",
                "Samstag",
            ]),
            weekdays_short:           strings(["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"]),
            weekdays_min:             strings(["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"]),
            quarters:                 strings(["1. Quartal", "2. Quartal", "3. Quartal", "4. Quartal"]),
            quarters_abbreviated:     strings(["Q1", "Q2", "Q3", "Q4"]),
            am:                       "vorm.".into(),
            pm:                       "nachm.".into(),
            ordinal:                  Ordinal::Period,
            format_long:              FormatLong {
                date:      LongWidths::new("EEEE, do MMMM y", "do MMMM y", "do MMM y", "dd.MM.y"),
                time:      LongWidths::new("HH:mm:ss", "HH:mm:ss", "HH:mm:ss", "HH:mm"),
                date_time: LongWidths::new(
                    "{{date}} 'um' {{time}}",
                    "{{date}} 'um' {{time}}",
                    "{{date}} {{time}}",
                    "{{date}} {{time}}",
                ),
            },
            week_starts_on:           1,
            first_week_contains_date: 4,
        }
    }
}

/// A locale given either by registered name or as a raw object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub enum LocaleSpec<'a> {
    Named(&'a str),
    Object(&'a Locale),
}

/// Caller-owned store of named locales plus the default locale key.
///
/// The registry deserializes from configuration, e.g.
/// `{"default_locale": "de", "locales": {"de": {...}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleRegistry {
    locales:        HashMap<String, Locale>,
    default_locale: Option<String>,
}

impl LocaleRegistry {
    /// Creates an empty registry with no default locale
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `name`, replacing any previous entry.
    pub fn register_locale(&mut self, name: impl Into<String>, data: Locale) {
        let name = name.into();
        tracing::debug!(locale = %name, "registering locale");
        self.locales.insert(name, data);
    }

    /// Sets the key used when a caller does not name a locale.
    ///
    /// The key does not have to be registered yet.
    pub fn set_default_locale(&mut self, name: impl Into<String>) {
        self.default_locale = Some(name.into());
    }

    /// Returns the default locale key, if one was set
    pub fn default_locale(&self) -> Option<&str> {
        self.default_locale.as_deref()
    }

    /// Resolves a locale spec: names are looked up, raw objects pass through.
    pub fn locale_object<'a>(&'a self, spec: Option<LocaleSpec<'a>>) -> Option<&'a Locale> {
        match spec? {
            LocaleSpec::Named(name) => self.locales.get(name),
            LocaleSpec::Object(locale) => Some(locale),
        }
    }

    /// The locale object registered under the default key
    pub fn default_locale_object(&self) -> Option<&Locale> {
        self.locale_object(self.default_locale().map(LocaleSpec::Named))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = LocaleRegistry::new();
        assert!(registry.locale_object(Some("de".into())).is_none());

        registry.register_locale("de", Locale::de());
        let de = registry.locale_object(Some("de".into())).expect("registered locale");
        assert_eq!(de.code, "de");
        assert!(registry.locale_object(None).is_none());
    }

    #[test]
    fn test_raw_locale_passes_through() {
        let registry = LocaleRegistry::new();
        let en = Locale::en_us();
        let resolved = registry.locale_object(Some((&en).into()));
        assert_eq!(resolved, Some(&en));
    }

    #[test]
    fn test_default_locale() {
        let mut registry = LocaleRegistry::new();
        assert_eq!(registry.default_locale(), None);
        assert!(registry.default_locale_object().is_none());

        registry.set_default_locale("de");
        assert_eq!(registry.default_locale(), Some("de"));
        // key set before the data is registered
        assert!(registry.default_locale_object().is_none());

        registry.register_locale("de", Locale::de());
        assert_eq!(registry.default_locale_object().map(|l| l.code.as_str()), Some("de"));
    }

    #[test]
    fn test_ordinals() {
        let cases =
            [(1, "1st"), (2, "2nd"), (3, "3rd"), (4, "4th"), (11, "11th"), (12, "12th"), (21, "21st"), (23, "23rd")];
        for (n, expected) in cases {
            assert_eq!(Ordinal::English.apply(n), expected);
        }
        assert_eq!(Ordinal::Period.apply(5), "5.");
        assert_eq!(Ordinal::English.strip_suffix("th, 2024"), ", 2024");
        assert_eq!(Ordinal::Period.strip_suffix(" März"), " März");
    }

    #[test]
    fn test_format_long_expand() {
        let de = Locale::de();
        assert_eq!(de.format_long.expand(1, 0), "dd.MM.y");
        assert_eq!(de.format_long.expand(0, 1), "HH:mm");
        assert_eq!(de.format_long.expand(4, 2), "EEEE, do MMMM y 'um' HH:mm:ss");
    }

    #[test]
    fn test_registry_from_config() {
        let mut registry = LocaleRegistry::new();
        registry.register_locale("de", Locale::de());
        registry.set_default_locale("de");

        let json = serde_json::to_string(&registry).expect("registry serializes");
        let restored: LocaleRegistry = serde_json::from_str(&json).expect("registry deserializes");
        assert_eq!(restored, registry);

        let empty: LocaleRegistry = serde_json::from_str("{}").expect("all fields default");
        assert_eq!(empty, LocaleRegistry::new());
    }

    #[test]
    fn test_locale_config_defaults() {
        let mut value = serde_json::to_value(Locale::en_us()).expect("locale serializes");
        let object = value.as_object_mut().expect("locale is an object");
        object.remove("ordinal");
        object.remove("week_starts_on");
        object.remove("first_week_contains_date");

        let locale: Locale = serde_json::from_value(value).expect("optional fields default");
        assert_eq!(locale.ordinal, Ordinal::English);
        assert_eq!(locale.week_starts_on, 0);
        assert_eq!(locale.first_week_contains_date, 1);
    }
}
