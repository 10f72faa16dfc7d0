//! Calendar month keys (`YYYY-MM`)
//!
//! All month arithmetic in the engine goes through [`MonthKey`]: it is
//! calendar based (January + 1 = February regardless of day counts) and
//! orders chronologically, which for four-digit years is also the textual
//! order of the `YYYY-MM` form.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A calendar month, displayed and serialized as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build a month key, returning `None` for an out-of-range month or a
    /// year that does not fit in four digits
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month a date falls in (the day is ignored)
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Shift by a number of calendar months (negative goes back).
    ///
    /// `None` when the result leaves the four-digit year range.
    pub fn checked_add_months(self, months: i32) -> Option<Self> {
        let index = self.year.checked_mul(12)?.checked_add(self.month as i32 - 1)?;
        let index = index.checked_add(months)?;
        Self::new(index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // year/month are range-checked on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month
    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Whether a date falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(Error::InvalidMonthKey(s.to_string()));
        }

        let year: i32 = s[..4]
            .parse()
            .map_err(|_| Error::InvalidMonthKey(s.to_string()))?;
        let month: u32 = s[5..]
            .parse()
            .map_err(|_| Error::InvalidMonthKey(s.to_string()))?;

        Self::new(year, month).ok_or_else(|| Error::InvalidMonthKey(s.to_string()))
    }
}

impl TryFrom<String> for MonthKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(MonthKey::new(2024, 3).unwrap().to_string(), "2024-03");
        assert_eq!(MonthKey::new(987, 11).unwrap().to_string(), "0987-11");
    }

    #[test]
    fn test_parse_rejects_malformed_keys() {
        assert!("2024-1".parse::<MonthKey>().is_err());
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("2024-00".parse::<MonthKey>().is_err());
        assert!("2024/01".parse::<MonthKey>().is_err());
        assert!("2024-01-15".parse::<MonthKey>().is_err());
        assert!("abcd-01".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_add_months_crosses_year_boundaries() {
        assert_eq!(key("2024-11").checked_add_months(3), Some(key("2025-02")));
        assert_eq!(key("2024-01").checked_add_months(-1), Some(key("2023-12")));
        assert_eq!(key("2024-01").checked_add_months(-25), Some(key("2021-12")));
        assert_eq!(key("2024-06").checked_add_months(0), Some(key("2024-06")));
    }

    #[test]
    fn test_add_months_stops_at_four_digit_years() {
        assert_eq!(key("9999-06").checked_add_months(6), Some(key("9999-12")));
        assert_eq!(key("9999-06").checked_add_months(7), None);
        assert_eq!(key("0000-01").checked_add_months(-1), None);
        assert_eq!(key("2024-01").checked_add_months(i32::MAX), None);
        assert_eq!(
            key("9999-12").last_day(),
            NaiveDate::from_ymd_opt(9999, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_from_date_ignores_day() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(MonthKey::from_date(date), key("2024-02"));
    }

    #[test]
    fn test_first_and_last_day() {
        assert_eq!(
            key("2024-02").last_day(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            key("2023-12").last_day(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
        assert_eq!(
            key("2023-12").first_day(),
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()
        );
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut keys = vec![key("2024-10"), key("2023-12"), key("2024-02")];
        keys.sort();
        assert_eq!(keys, vec![key("2023-12"), key("2024-02"), key("2024-10")]);
    }

    #[test]
    fn test_serde_uses_string_form() {
        let json = serde_json::to_string(&key("2024-05")).unwrap();
        assert_eq!(json, "\"2024-05\"");

        let parsed: MonthKey = serde_json::from_str("\"2025-01\"").unwrap();
        assert_eq!(parsed, key("2025-01"));

        assert!(serde_json::from_str::<MonthKey>("\"2025-1\"").is_err());
    }
}
