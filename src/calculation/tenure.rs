//! Tenure calculation.
//!
//! Tenure is expressed as *which month of employment* the business date falls
//! in: the join day starts month 1, and stepping the date forward one month
//! at a time starts each following month.
//!
//! ```text
//! join date 2013-04-01
//!   2013-04-01 .. 2013-04-30  -> month 1
//!   2014-03-01 .. 2014-03-31  -> month 12
//!   2014-04-01                -> month 13
//! ```
//!
//! Month-end clamping carries forward from step to step:
//!
//! ```text
//! join date 2020-01-31
//!   2020-01-31 .. 2020-02-28  -> month 1
//!   2020-02-29 .. 2020-03-28  -> month 2
//!   2020-03-29                -> month 3
//! ```

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, Tenure};

/// The result of a tenure calculation, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenureResult {
    /// The calculated tenure.
    pub tenure: Tenure,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns which month of employment `today` falls in.
///
/// Starting from the join date, the date is advanced one calendar month at
/// a time and every step on or before `today` counts. Each step clamps from
/// the previous step rather than from the join date, so a 31 January join
/// steps to 29 February and then to 29 March. Returns 0 when `today` is
/// before the join date.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::duration_months;
/// use chrono::NaiveDate;
///
/// let join = NaiveDate::from_ymd_opt(2013, 4, 1).unwrap();
/// let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
///
/// assert_eq!(duration_months(join, join), 1);
/// assert_eq!(duration_months(join, d(2014, 3, 31)), 12);
/// assert_eq!(duration_months(join, d(2014, 4, 1)), 13);
/// assert_eq!(duration_months(join, d(2013, 3, 31)), 0);
/// ```
pub fn duration_months(join_date: NaiveDate, today: NaiveDate) -> u32 {
    let mut months = 0;
    let mut step = join_date;

    while step <= today {
        months += 1;
        match step.checked_add_months(Months::new(1)) {
            Some(next) => step = next,
            None => break,
        }
    }

    months
}

/// Returns completed years of tenure for a month count.
pub fn duration_years(months: u32) -> u32 {
    months / 12
}

/// Calculates tenure as of `today` and records an audit step.
pub fn calculate_tenure(join_date: NaiveDate, today: NaiveDate, step_number: u32) -> TenureResult {
    let months = duration_months(join_date, today);
    let years = duration_years(months);

    let reasoning = if today < join_date {
        format!(
            "Business date {} is before join date {}; tenure clamped to 0",
            today, join_date
        )
    } else {
        format!(
            "Joined {}; {} falls in month {} of employment ({} completed years)",
            join_date, today, months, years
        )
    };

    TenureResult {
        tenure: Tenure { months, years },
        audit_step: AuditStep {
            step_number,
            rule_id: "tenure".to_string(),
            rule_name: "Tenure".to_string(),
            input: serde_json::json!({
                "join_date": join_date.to_string(),
                "business_date": today.to_string()
            }),
            output: serde_json::json!({
                "months": months,
                "years": years
            }),
            reasoning,
        },
    }
}
