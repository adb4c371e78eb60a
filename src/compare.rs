//! Equality, ordering and calendar differences.
//!
//! Equality checks take optional dates: two absent dates are equal, an
//! absent and a present one are not.

use crate::adapter::DateAdapter;
use crate::consts::{MILLISECONDS_IN_DAY, MONTHS_IN_YEAR};
use crate::utils::DateUtils;

impl<A: DateAdapter> DateUtils<'_, A> {
    fn same_by<T: PartialEq>(&self, a: Option<A::Date>, b: Option<A::Date>, key: impl Fn(A::Date) -> T) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => key(a) == key(b),
            (None, None) => true,
            _ => false,
        }
    }

    pub fn is_same_year(&self, a: Option<A::Date>, b: Option<A::Date>) -> bool {
        self.same_by(a, b, |date| self.get_year(date))
    }

    /// Same month of the same year
    pub fn is_same_month(&self, a: Option<A::Date>, b: Option<A::Date>) -> bool {
        self.same_by(a, b, |date| (self.get_year(date), self.get_month(date)))
    }

    pub fn is_same_quarter(&self, a: Option<A::Date>, b: Option<A::Date>) -> bool {
        self.same_by(a, b, |date| self.get_time(self.start_of_quarter(date)))
    }

    pub fn is_same_day(&self, a: Option<A::Date>, b: Option<A::Date>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => self.adapter().is_same_day(self.adapter().date(a), self.adapter().date(b)),
            (None, None) => true,
            _ => false,
        }
    }

    pub fn is_equal(&self, a: Option<A::Date>, b: Option<A::Date>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => self.adapter().is_equal(self.adapter().date(a), self.adapter().date(b)),
            (None, None) => true,
            _ => false,
        }
    }

    pub fn is_before(&self, date: A::Date, other: A::Date) -> bool {
        self.adapter().is_before(self.adapter().date(date), self.adapter().date(other))
    }

    pub fn is_after(&self, date: A::Date, other: A::Date) -> bool {
        self.adapter().is_after(self.adapter().date(date), self.adapter().date(other))
    }

    /// Whole days between the calendar days of `left` and `right`, ignoring
    /// time of day. Positive when `left` is later.
    pub fn difference_in_calendar_days(&self, left: A::Date, right: A::Date) -> i64 {
        let left = self.get_time(self.start_of_day(left));
        let right = self.get_time(self.start_of_day(right));
        (left - right + MILLISECONDS_IN_DAY / 2).div_euclid(MILLISECONDS_IN_DAY)
    }

    pub fn difference_in_calendar_months(&self, left: A::Date, right: A::Date) -> i64 {
        let years = i64::from(self.get_year(left)) - i64::from(self.get_year(right));
        let months = i64::from(self.get_month(left)) - i64::from(self.get_month(right));
        years * i64::from(MONTHS_IN_YEAR) + months
    }

    pub fn difference_in_calendar_years(&self, left: A::Date, right: A::Date) -> i32 {
        self.get_year(left) - self.get_year(right)
    }

    /// Alias of [`DateUtils::difference_in_calendar_days`]
    pub fn days_diff(&self, left: A::Date, right: A::Date) -> i64 {
        self.difference_in_calendar_days(left, right)
    }

    /// Earliest of `dates`, `None` when empty
    pub fn min(&self, dates: &[A::Date]) -> Option<A::Date> {
        dates.iter().map(|&date| self.adapter().date(date)).reduce(|min, date| {
            if self.adapter().is_before(date, min) { date } else { min }
        })
    }

    /// Latest of `dates`, `None` when empty
    pub fn max(&self, dates: &[A::Date]) -> Option<A::Date> {
        dates.iter().map(|&date| self.adapter().date(date)).reduce(|max, date| {
            if self.adapter().is_after(date, max) { date } else { max }
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use crate::DateUtils;
    use crate::test_utils::{Fixture, MinuteAdapter, date, datetime, time};

    #[test]
    fn test_same_day_nullability() {
        let fixture = Fixture::new();
        let utils = fixture.utils();
        let d = datetime(2024, 3, 5, 10, 30);

        assert!(utils.is_same_day(Some(d), Some(d)));
        assert!(utils.is_same_day(Some(d), Some(date(2024, 3, 5))));
        assert!(utils.is_same_day(None, None));
        assert!(!utils.is_same_day(Some(d), None));
        assert!(!utils.is_same_day(None, Some(d)));
        assert!(!utils.is_same_day(Some(d), Some(date(2024, 3, 6))));
    }

    #[test]
    fn test_same_period_cases() {
        struct TestCase {
            a:           chrono::NaiveDateTime,
            b:           chrono::NaiveDateTime,
            year:        bool,
            quarter:     bool,
            month:       bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                a:           date(2024, 3, 1),
                b:           date(2024, 3, 31),
                year:        true,
                quarter:     true,
                month:       true,
                description: "same month",
            },
            TestCase {
                a:           date(2024, 1, 15),
                b:           date(2024, 3, 15),
                year:        true,
                quarter:     true,
                month:       false,
                description: "same quarter, different month",
            },
            TestCase {
                a:           date(2024, 3, 31),
                b:           date(2024, 4, 1),
                year:        true,
                quarter:     false,
                month:       false,
                description: "quarter boundary",
            },
            TestCase {
                a:           date(2023, 3, 5),
                b:           date(2024, 3, 5),
                year:        false,
                quarter:     false,
                month:       false,
                description: "same month of different years",
            },
        ];

        let fixture = Fixture::new();
        let utils = fixture.utils();
        for case in &cases {
            let (a, b) = (Some(case.a), Some(case.b));
            assert_eq!(utils.is_same_year(a, b), case.year, "year for: {}", case.description);
            assert_eq!(utils.is_same_quarter(a, b), case.quarter, "quarter for: {}", case.description);
            assert_eq!(utils.is_same_month(a, b), case.month, "month for: {}", case.description);
        }
    }

    #[test]
    fn test_same_period_nullability() {
        let fixture = Fixture::new();
        let utils = fixture.utils();
        let d = Some(date(2024, 3, 5));
        assert!(utils.is_same_month(None, None));
        assert!(!utils.is_same_month(d, None));
        assert!(utils.is_same_quarter(None, None));
        assert!(!utils.is_same_year(None, d));
        assert!(utils.is_equal(None, None));
        assert!(!utils.is_equal(d, None));
    }

    #[test]
    fn test_is_equal_includes_time() {
        let fixture = Fixture::new();
        let utils = fixture.utils();
        assert!(utils.is_equal(Some(datetime(2024, 3, 5, 10, 30)), Some(datetime(2024, 3, 5, 10, 30))));
        assert!(!utils.is_equal(Some(datetime(2024, 3, 5, 10, 30)), Some(datetime(2024, 3, 5, 10, 31))));
    }

    #[test]
    fn test_differences() {
        let fixture = Fixture::new();
        let utils = fixture.utils();

        assert_eq!(utils.difference_in_calendar_days(datetime(2024, 3, 6, 0, 1), datetime(2024, 3, 5, 23, 59)), 1);
        assert_eq!(utils.difference_in_calendar_days(date(2024, 3, 5), date(2024, 3, 5)), 0);
        assert_eq!(utils.difference_in_calendar_days(date(2024, 1, 1), date(2024, 12, 31)), -365);
        assert_eq!(utils.days_diff(date(2024, 3, 1), date(2024, 2, 1)), 29);
        assert_eq!(utils.difference_in_calendar_months(date(2024, 1, 31), date(2023, 12, 1)), 1);
        assert_eq!(utils.difference_in_calendar_months(date(2023, 3, 1), date(2024, 5, 1)), -14);
        assert_eq!(utils.difference_in_calendar_years(date(2024, 1, 1), date(2023, 12, 31)), 1);
    }

    #[test]
    fn test_before_after() {
        let fixture = Fixture::new();
        let utils = fixture.utils();
        assert!(utils.is_before(date(2024, 3, 4), date(2024, 3, 5)));
        assert!(!utils.is_before(date(2024, 3, 5), date(2024, 3, 5)));
        assert!(utils.is_after(datetime(2024, 3, 5, 0, 1), date(2024, 3, 5)));
    }

    #[test]
    fn test_before_after_normalize_both_sides() {
        let fixture = Fixture::new();
        let adapter = MinuteAdapter(fixture.adapter);
        let utils = DateUtils::new(&adapter, &fixture.locales);
        let at = |second| time(12, 0).with_second(second).expect("valid second");

        assert!(!utils.is_before(at(30), at(45)), "same minute once normalized");
        assert!(!utils.is_after(at(45), at(30)), "same minute once normalized");
        assert!(utils.is_before(at(59), time(12, 1)));
        assert!(utils.is_after(time(12, 1), at(59)));
    }

    #[test]
    fn test_min_max() {
        let fixture = Fixture::new();
        let utils = fixture.utils();
        let dates = [date(2024, 3, 5), date(2023, 1, 1), date(2025, 6, 30), date(2024, 1, 1)];

        assert_eq!(utils.min(&dates), Some(date(2023, 1, 1)));
        assert_eq!(utils.max(&dates), Some(date(2025, 6, 30)));
        assert_eq!(utils.min(&[]), None);
        assert_eq!(utils.max(&[]), None);
    }
}
