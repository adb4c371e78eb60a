/// Number of years shown by one page of the year grid
pub const DEFAULT_YEAR_ITEM_NUMBER: u32 = 12;

/// Default spacing between two entries of the time list, in minutes
pub const DEFAULT_TIME_INTERVAL_MINUTES: u32 = 30;

/// Minutes in a calendar day
pub const MINUTES_IN_DAY: u32 = 1440;

/// Number of weeks a fixed-height month grid always shows
pub const FIXED_HEIGHT_STANDARD_WEEK_COUNT: usize = 6;

/// Months per quarter
pub const MONTHS_IN_QUARTER: u32 = 3;

/// Months per year
pub const MONTHS_IN_YEAR: u32 = 12;

/// Days per week
pub const DAYS_IN_WEEK: i64 = 7;

/// Last zero-based month index (December)
pub const DECEMBER: u32 = 11;

/// Zero-based month index of January
pub const JANUARY: u32 = 0;

/// Weekday numbers counted from Sunday
pub const SUNDAY: u32 = 0;
/// Weekday number of Saturday, counted from Sunday
pub const SATURDAY: u32 = 6;

/// Dates on or before January 1st of this year are never valid picker values
pub const MIN_VALID_YEAR: i32 = 1000;

/// Maximum year the bundled adapter formats with four digits
pub const MAX_YEAR: i32 = 9999;

pub(crate) const MILLISECONDS_IN_DAY: i64 = 86_400_000;
pub(crate) const MILLISECONDS_IN_WEEK: i64 = 604_800_000;

/// Pattern used to key highlighted days
pub const HIGHLIGHT_KEY_FORMAT: &str = "MM.dd.yyyy";

/// Class given to highlighted days that were not grouped under a class name
pub const DEFAULT_HIGHLIGHT_CLASS: &str = "react-datepicker__day--highlighted";

/// Locale key meaning "whatever the adapter uses by default"
pub const ADAPTER_DEFAULT_LOCALE: &str = "en";

/// Pattern used by [`crate::DateUtils::get_day_of_week_code`]
pub const DAY_OF_WEEK_CODE_FORMAT: &str = "ddd";

/// Quote character delimiting literal text in patterns
pub const QUOTE: char = '\'';
