//! Date field patterns.
//!
//! Patterns use the LDML letters a date picker exposes to its users
//! (`yyyy`, `MM`, `dd`, `EEE`, `LLLL`, `QQQ`, `HH`, `h`, `mm`, `ss`, `a`,
//! ordinals such as `do`) plus quoted literals. The locale-aware long tokens
//! `P`/`p` are expanded with [`expand_long_tokens`] before tokenizing.
//!
//! Everything here works on [`DateParts`], so any [`crate::DateAdapter`] can
//! reuse the engine.

use crate::consts::{MONTHS_IN_QUARTER, QUOTE};
use crate::locale::Locale;

/// Calendar fields of a date-time, months and days one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateParts {
    pub year:    i32,
    pub month:   u32,
    pub day:     u32,
    pub hour:    u32,
    pub minute:  u32,
    pub second:  u32,
    /// Days since Sunday
    pub weekday: u32,
}

/// Error raised for patterns the engine cannot format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Unsupported pattern token `{0}`")]
    UnsupportedToken(String),
}

/// Kind of calendar field a pattern letter stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    Quarter,
    Month,
    Day,
    Weekday,
    Hour24,
    Hour12,
    Minute,
    Second,
    DayPeriod,
}

impl Field {
    fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'y' => Self::Year,
            'Q' | 'q' => Self::Quarter,
            'M' | 'L' => Self::Month,
            'd' => Self::Day,
            'E' => Self::Weekday,
            'H' => Self::Hour24,
            'h' => Self::Hour12,
            'm' => Self::Minute,
            's' => Self::Second,
            'a' => Self::DayPeriod,
            _ => return None,
        })
    }
}

/// One lexical unit of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    /// Field letter repeated `width` times
    Field(Field, usize),
    Ordinal(Field),
}

/// Splits `pattern` into tokens.
///
/// # Errors
/// Returns `FormatError::UnsupportedToken` for an unquoted letter the engine
/// does not know.
pub fn tokenize(pattern: &str) -> Result<Vec<Token>, FormatError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == QUOTE {
            if chars.get(i + 1) == Some(&QUOTE) {
                literal.push(QUOTE);
                i += 2;
                continue;
            }
            i += 1;
            while i < chars.len() {
                if chars[i] == QUOTE {
                    if chars.get(i + 1) == Some(&QUOTE) {
                        literal.push(QUOTE);
                        i += 2;
                        continue;
                    }
                    i += 1;
                    break;
                }
                literal.push(chars[i]);
                i += 1;
            }
            continue;
        }

        if !c.is_ascii_alphabetic() {
            literal.push(c);
            i += 1;
            continue;
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut literal)));
        }

        if matches!(c, 'd' | 'M' | 'L' | 'Q') && chars.get(i + 1) == Some(&'o') {
            let field = Field::from_letter(c).ok_or_else(|| FormatError::UnsupportedToken(c.to_string()))?;
            tokens.push(Token::Ordinal(field));
            i += 2;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&next| next == c).count();
        let field = Field::from_letter(c)
            .ok_or_else(|| FormatError::UnsupportedToken(chars[i..i + run].iter().collect()))?;
        tokens.push(Token::Field(field, run));
        i += run;
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    Ok(tokens)
}

/// Replaces `P`, `p` and `Pp` runs with the locale's long formats.
///
/// Quoted sections are copied untouched. Without a locale each run is
/// reduced to its first letter.
pub fn expand_long_tokens(pattern: &str, locale: Option<&Locale>) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == QUOTE {
            let start = i;
            i += 1;
            if chars.get(i) == Some(&QUOTE) {
                i += 1;
            } else {
                while i < chars.len() {
                    if chars[i] == QUOTE {
                        if chars.get(i + 1) == Some(&QUOTE) {
                            i += 2;
                            continue;
                        }
                        i += 1;
                        break;
                    }
                    i += 1;
                }
            }
            out.extend(&chars[start..i]);
            continue;
        }

        if c != 'P' && c != 'p' {
            out.push(c);
            i += 1;
            continue;
        }

        let date_width = if c == 'P' { chars[i..].iter().take_while(|&&n| n == 'P').count() } else { 0 };
        let time_width = chars[i + date_width..].iter().take_while(|&&n| n == 'p').count();
        i += date_width + time_width;

        match locale {
            Some(locale) => out.push_str(&locale.format_long.expand(date_width, time_width)),
            None => out.push(c),
        }
    }
    out
}

/// Renders `parts` according to `tokens`.
pub fn format_parts(parts: &DateParts, tokens: &[Token], locale: &Locale) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Ordinal(field) => out.push_str(&locale.ordinal.apply(numeric_value(parts, *field))),
            Token::Field(field, width) => format_field(&mut out, parts, *field, *width, locale),
        }
    }
    out
}

fn numeric_value(parts: &DateParts, field: Field) -> u32 {
    match field {
        Field::Year => parts.year.unsigned_abs(),
        Field::Quarter => quarter_of(parts.month),
        Field::Month => parts.month,
        Field::Day => parts.day,
        Field::Weekday => parts.weekday,
        Field::Hour24 => parts.hour,
        Field::Hour12 => match parts.hour % 12 {
            0 => 12,
            h => h,
        },
        Field::Minute => parts.minute,
        Field::Second => parts.second,
        Field::DayPeriod => u32::from(parts.hour >= 12),
    }
}

fn quarter_of(month: u32) -> u32 {
    month.saturating_sub(1) / MONTHS_IN_QUARTER + 1
}

/// Entry `index` of a locale name table, empty when out of range
fn name_at(names: &[String], index: Option<u32>) -> &str {
    index.and_then(|index| names.get(index as usize)).map_or("", String::as_str)
}

fn pad(out: &mut String, value: impl std::fmt::Display, width: usize) {
    out.push_str(&format!("{value:0>width$}"));
}

fn narrow(name: &str) -> &str {
    name.char_indices().nth(1).map_or(name, |(idx, _)| &name[..idx])
}

fn format_field(out: &mut String, parts: &DateParts, field: Field, width: usize, locale: &Locale) {
    let month_idx = parts.month.checked_sub(1);
    let quarter_idx = month_idx.map(|month| month / MONTHS_IN_QUARTER);
    let weekday_idx = Some(parts.weekday);
    match (field, width) {
        (Field::Year, 2) => pad(out, parts.year.rem_euclid(100), 2),
        (Field::Year, _) => {
            if parts.year < 0 {
                out.push('-');
            }
            pad(out, parts.year.unsigned_abs(), width);
        },
        (Field::Quarter, 1 | 2) => pad(out, quarter_of(parts.month), width),
        (Field::Quarter, 3) => out.push_str(name_at(&locale.quarters_abbreviated, quarter_idx)),
        (Field::Quarter, _) => out.push_str(name_at(&locale.quarters, quarter_idx)),
        (Field::Month, 1 | 2) => pad(out, parts.month, width),
        (Field::Month, 3) => out.push_str(name_at(&locale.months_short, month_idx)),
        (Field::Month, 4) => out.push_str(name_at(&locale.months, month_idx)),
        (Field::Month, _) => out.push_str(narrow(name_at(&locale.months, month_idx))),
        (Field::Weekday, 1..=3) => out.push_str(name_at(&locale.weekdays_short, weekday_idx)),
        (Field::Weekday, 4) => out.push_str(name_at(&locale.weekdays, weekday_idx)),
        (Field::Weekday, 5) => out.push_str(narrow(name_at(&locale.weekdays, weekday_idx))),
        (Field::Weekday, _) => out.push_str(name_at(&locale.weekdays_min, weekday_idx)),
        (Field::DayPeriod, _) => out.push_str(if parts.hour >= 12 { &locale.pm } else { &locale.am }),
        (Field::Day | Field::Hour24 | Field::Hour12 | Field::Minute | Field::Second, _) => {
            pad(out, numeric_value(parts, field), width);
        },
    }
}

/// Fields collected while reading an input string.
#[derive(Debug, Default)]
struct Collected {
    year:    Option<i32>,
    quarter: Option<u32>,
    month:   Option<u32>,
    day:     Option<u32>,
    hour24:  Option<u32>,
    hour12:  Option<u32>,
    pm:      Option<bool>,
    minute:  Option<u32>,
    second:  Option<u32>,
}

/// Reads `input` according to `tokens`.
///
/// Fields missing from the pattern come from `reference`, except that
/// setting a field resets every finer one: a pattern with a year but no
/// month lands on January 1st at midnight. Trailing whitespace is ignored.
/// Day-of-month validity is left to the caller.
pub fn parse_parts(input: &str, tokens: &[Token], locale: &Locale, reference: &DateParts) -> Option<DateParts> {
    let mut rest = input;
    let mut got = Collected::default();

    for token in tokens {
        match token {
            Token::Literal(text) => rest = rest.strip_prefix(text.as_str())?,
            Token::Ordinal(field) => {
                let (value, tail) = take_digits(rest, 1, 2)?;
                rest = locale.ordinal.strip_suffix(tail);
                store_numeric(&mut got, *field, value, false, reference.year)?;
            },
            Token::Field(field, width) => rest = read_field(rest, &mut got, *field, *width, locale, reference.year)?,
        }
    }

    if !rest.trim().is_empty() {
        return None;
    }
    assemble(&got, reference)
}

fn read_field<'a>(
    rest: &'a str,
    got: &mut Collected,
    field: Field,
    width: usize,
    locale: &Locale,
    reference_year: i32,
) -> Option<&'a str> {
    match (field, width) {
        (Field::Month, 3..) => {
            let (idx, tail) = match_name(rest, locale.months.iter().chain(locale.months_short.iter()))?;
            got.month = Some((idx % 12) as u32 + 1);
            Some(tail)
        },
        (Field::Quarter, 3..) => {
            let (idx, tail) = match_name(rest, locale.quarters.iter().chain(locale.quarters_abbreviated.iter()))?;
            got.quarter = Some((idx % 4) as u32 + 1);
            Some(tail)
        },
        (Field::Weekday, _) => {
            let names = locale
                .weekdays
                .iter()
                .chain(locale.weekdays_short.iter())
                .chain(locale.weekdays_min.iter());
            match_name(rest, names).map(|(_, tail)| tail)
        },
        (Field::DayPeriod, _) => {
            let (idx, tail) = match_name(rest, [&locale.am, &locale.pm].into_iter())?;
            got.pm = Some(idx == 1);
            Some(tail)
        },
        (Field::Year, 1) => {
            let (negative, body) = rest.strip_prefix('-').map_or((false, rest), |b| (true, b));
            let (value, tail) = take_digits(body, 1, 6)?;
            let value = i32::try_from(value).ok()?;
            got.year = Some(if negative { -value } else { value });
            Some(tail)
        },
        _ => {
            let max = match field {
                Field::Year if width == 2 => 2,
                Field::Year => width.max(4),
                _ => width.max(2),
            };
            let (value, tail) = take_digits(rest, 1, max)?;
            store_numeric(got, field, value, field == Field::Year && width == 2, reference_year)?;
            Some(tail)
        },
    }
}

fn store_numeric(
    got: &mut Collected,
    field: Field,
    value: u32,
    two_digit_year: bool,
    reference_year: i32,
) -> Option<()> {
    let in_range = |range: std::ops::RangeInclusive<u32>| range.contains(&value).then_some(value);
    match field {
        Field::Year => {
            let value = i32::try_from(value).ok()?;
            got.year = Some(if two_digit_year { normalize_two_digit_year(value, reference_year) } else { value });
        },
        Field::Quarter => got.quarter = Some(in_range(1..=4)?),
        Field::Month => got.month = Some(in_range(1..=12)?),
        Field::Day => got.day = Some(in_range(1..=31)?),
        Field::Hour24 => got.hour24 = Some(in_range(0..=23)?),
        Field::Hour12 => got.hour12 = Some(in_range(1..=12)?),
        Field::Minute => got.minute = Some(in_range(0..=59)?),
        Field::Second => got.second = Some(in_range(0..=59)?),
        Field::Weekday | Field::DayPeriod => {},
    }
    Some(())
}

/// Two-digit years land within fifty years of the reference year.
fn normalize_two_digit_year(two_digit: i32, reference_year: i32) -> i32 {
    let abs_reference = reference_year.abs();
    if abs_reference <= 50 {
        return if two_digit == 0 { 100 } else { two_digit };
    }
    let range_end = abs_reference + 50;
    let range_end_century = range_end / 100 * 100;
    let previous_century = two_digit >= range_end % 100;
    two_digit + range_end_century - if previous_century { 100 } else { 0 }
}

fn take_digits(s: &str, min: usize, max: usize) -> Option<(u32, &str)> {
    let len = s.bytes().take(max).take_while(u8::is_ascii_digit).count();
    if len < min {
        return None;
    }
    let value = s[..len].parse().ok()?;
    Some((value, &s[len..]))
}

/// Longest case-insensitive match of one of `names` at the start of `s`.
fn match_name<'a, 'n>(s: &'a str, names: impl Iterator<Item = &'n String>) -> Option<(usize, &'a str)> {
    let lower = s.to_lowercase();
    names
        .enumerate()
        .filter(|(_, name)| !name.is_empty() && lower.starts_with(&name.to_lowercase()))
        .max_by_key(|(_, name)| name.len())
        .and_then(|(idx, name)| s.get(name.len()..).map(|tail| (idx, tail)))
}

fn assemble(got: &Collected, reference: &DateParts) -> Option<DateParts> {
    let mut parts = *reference;

    if let Some(year) = got.year {
        parts = DateParts { year, month: 1, day: 1, hour: 0, minute: 0, second: 0, ..parts };
    }
    if let Some(month) = got.month.or_else(|| got.quarter.map(|q| (q - 1) * MONTHS_IN_QUARTER + 1)) {
        parts = DateParts { month, day: 1, hour: 0, minute: 0, second: 0, ..parts };
    }
    if let Some(day) = got.day {
        parts = DateParts { day, hour: 0, minute: 0, second: 0, ..parts };
    }

    let hour = match (got.hour24, got.hour12, got.pm) {
        (Some(h), _, _) => Some(h),
        (None, Some(h), pm) => Some(h % 12 + if pm == Some(true) { 12 } else { 0 }),
        (None, None, _) => None,
    };
    if let Some(hour) = hour {
        parts = DateParts { hour, minute: 0, second: 0, ..parts };
    }
    if let Some(minute) = got.minute {
        parts = DateParts { minute, second: 0, ..parts };
    }
    if let Some(second) = got.second {
        parts.second = second;
    }
    Some(parts)
}
