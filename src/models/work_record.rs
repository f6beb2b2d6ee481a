//! Monthly work records and the year-month key they are filed under.
//!
//! This module contains the [`YearMonth`] key type and the [`WorkRecord`]
//! holding an employee's categorized overtime hours for one month.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month written as a `YYYYMM` integer (e.g. `201504`).
///
/// # Example
///
/// ```
/// use salary_engine::models::YearMonth;
///
/// let ym = YearMonth::from_yyyymm(201504).unwrap();
/// assert_eq!(ym.year(), 2015);
/// assert_eq!(ym.month(), 4);
/// assert_eq!(ym.to_string(), "201504");
/// assert!(YearMonth::from_yyyymm(201513).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct YearMonth {
    year: u32,
    month: u32,
}

impl YearMonth {
    /// Parses a `YYYYMM` integer.
    ///
    /// Fails with [`EngineError::InvalidYearMonth`] if the month is outside
    /// 1..=12 or the year is outside 1..=9999.
    pub fn from_yyyymm(value: u32) -> EngineResult<Self> {
        let year = value / 100;
        let month = value % 100;
        if !(1..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(EngineError::InvalidYearMonth { value });
        }
        Ok(Self { year, month })
    }

    /// Returns the month containing the given date.
    ///
    /// Years outside 1..=9999 are clamped into that range so the result is
    /// always a valid `YYYYMM` value.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(1, 9999) as u32,
            month: date.month(),
        }
    }

    /// Returns the year component.
    pub fn year(&self) -> u32 {
        self.year
    }

    /// Returns the month component (1..=12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the `YYYYMM` integer form.
    pub fn as_yyyymm(&self) -> u32 {
        self.year * 100 + self.month
    }
}

impl TryFrom<u32> for YearMonth {
    type Error = EngineError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_yyyymm(value)
    }
}

impl From<YearMonth> for u32 {
    fn from(ym: YearMonth) -> Self {
        ym.as_yyyymm()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

/// Overtime hours worked by one employee in one month.
///
/// Each bucket is a decimal hour count. There is at most one record per
/// employee per month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRecord {
    /// The employee the hours belong to.
    pub employee_no: u32,
    /// The month the hours were worked in.
    pub year_month: YearMonth,
    /// Regular overtime hours.
    pub overtime_hours: Decimal,
    /// Late-night overtime hours.
    pub late_night_hours: Decimal,
    /// Holiday work hours.
    pub holiday_hours: Decimal,
    /// Holiday late-night overtime hours.
    pub holiday_late_night_hours: Decimal,
}

impl WorkRecord {
    /// Returns the four hour buckets paired with their field names.
    pub fn buckets(&self) -> [(&'static str, Decimal); 4] {
        [
            ("overtime_hours", self.overtime_hours),
            ("late_night_hours", self.late_night_hours),
            ("holiday_hours", self.holiday_hours),
            ("holiday_late_night_hours", self.holiday_late_night_hours),
        ]
    }

    /// Rejects records with negative hour quantities.
    pub fn validate(&self) -> EngineResult<()> {
        for (field, hours) in self.buckets() {
            if hours.is_sign_negative() && !hours.is_zero() {
                return Err(EngineError::InvalidWorkRecord {
                    employee_no: self.employee_no,
                    year_month: self.year_month.as_yyyymm(),
                    message: format!("{} is negative ({})", field, hours),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(overtime: &str) -> WorkRecord {
        WorkRecord {
            employee_no: 1,
            year_month: YearMonth::from_yyyymm(201504).unwrap(),
            overtime_hours: dec(overtime),
            late_night_hours: dec("2"),
            holiday_hours: dec("1"),
            holiday_late_night_hours: Decimal::ZERO,
        }
    }

    #[test]
    fn test_year_month_rejects_month_zero_and_thirteen() {
        assert!(YearMonth::from_yyyymm(201500).is_err());
        assert!(YearMonth::from_yyyymm(201513).is_err());
        assert!(YearMonth::from_yyyymm(201512).is_ok());
    }

    #[test]
    fn test_year_month_rejects_short_values() {
        match YearMonth::from_yyyymm(4) {
            Err(EngineError::InvalidYearMonth { value }) => assert_eq!(value, 4),
            other => panic!("Expected InvalidYearMonth, got {:?}", other),
        }
    }

    #[test]
    fn test_year_month_of_date() {
        let ym = YearMonth::of(NaiveDate::from_ymd_opt(2014, 3, 31).unwrap());
        assert_eq!(ym.as_yyyymm(), 201403);
    }

    #[test]
    fn test_year_month_of_date_outside_four_digit_years_is_clamped() {
        let late = YearMonth::of(NaiveDate::from_ymd_opt(10000, 6, 1).unwrap());
        assert_eq!(late.as_yyyymm(), 999906);
        assert_eq!(YearMonth::from_yyyymm(late.as_yyyymm()).unwrap(), late);

        let early = YearMonth::of(NaiveDate::from_ymd_opt(0, 2, 1).unwrap());
        assert_eq!(early.as_yyyymm(), 102);
        assert_eq!(YearMonth::from_yyyymm(early.as_yyyymm()).unwrap(), early);
    }

    #[test]
    fn test_year_month_ordering_follows_calendar() {
        let dec_2014 = YearMonth::from_yyyymm(201412).unwrap();
        let jan_2015 = YearMonth::from_yyyymm(201501).unwrap();
        assert!(dec_2014 < jan_2015);
    }

    #[test]
    fn test_year_month_serializes_as_integer() {
        let ym = YearMonth::from_yyyymm(201504).unwrap();
        assert_eq!(serde_json::to_string(&ym).unwrap(), "201504");

        let parsed: YearMonth = serde_json::from_str("201504").unwrap();
        assert_eq!(parsed, ym);

        assert!(serde_json::from_str::<YearMonth>("201599").is_err());
    }

    #[test]
    fn test_validate_accepts_zero_and_positive_hours() {
        assert!(record("10.5").validate().is_ok());
        assert!(record("0").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_hours() {
        let result = record("-1").validate();
        match result {
            Err(EngineError::InvalidWorkRecord {
                employee_no,
                year_month,
                message,
            }) => {
                assert_eq!(employee_no, 1);
                assert_eq!(year_month, 201504);
                assert!(message.contains("overtime_hours"));
            }
            other => panic!("Expected InvalidWorkRecord, got {:?}", other),
        }
    }
}
