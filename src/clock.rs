//! Business-date provider.
//!
//! Tenure is measured against "now" as reported by a [`BusinessClock`], so
//! calculations can be pinned to a fixed date in tests or when recalculating
//! a past month.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Supplies the current business date/time.
pub trait BusinessClock: Send + Sync {
    /// Returns the current business date/time.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current business date (day granularity).
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl BusinessClock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
///
/// # Example
///
/// ```
/// use salary_engine::clock::{BusinessClock, FixedClock};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2015, 4, 15).unwrap();
/// let clock = FixedClock::on(day);
/// assert_eq!(clock.today(), day);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    /// Creates a clock fixed at the given instant.
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Creates a clock fixed at midnight of the given date.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            now: date.and_time(chrono::NaiveTime::MIN),
        }
    }
}

impl BusinessClock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_truncates_to_day() {
        let now = NaiveDate::from_ymd_opt(2015, 4, 15)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let clock = FixedClock::new(now);
        assert_eq!(clock.now(), now);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2015, 4, 15).unwrap());
    }

    #[test]
    fn test_system_clock_is_usable_as_trait_object() {
        let clock: Box<dyn BusinessClock> = Box::new(SystemClock);
        assert!(clock.today() > NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
    }
}
