//! Employee model.
//!
//! This module defines the persisted employee record that every salary
//! calculation starts from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents an employee as loaded from storage.
///
/// The record is an immutable snapshot for one calculation session. All money
/// fields are whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee number (identity).
    pub no: u32,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// The date the employee joined the company.
    pub join_date: NaiveDate,
    /// Role grade rank code (e.g. "R3").
    pub role_rank: String,
    /// Capability grade rank code (e.g. "AS", "PL", "PM").
    pub capability_rank: String,
    /// Monthly health insurance deduction.
    pub health_insurance_amount: i64,
    /// Monthly employee pension deduction.
    pub employee_pension_amount: i64,
    /// Monthly income tax deduction.
    pub income_tax_amount: i64,
    /// Monthly inhabitant tax deduction.
    pub inhabitant_tax_amount: i64,
    /// Monthly commute allowance.
    pub commute_amount: i64,
    /// Monthly rent allowance.
    pub rent_amount: i64,
    /// Base pay for one hour of regular overtime.
    pub overtime_hourly_amount: i64,
}

impl Employee {
    /// Returns the sum of the four fixed monthly deductions.
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_engine::models::Employee;
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     no: 1,
    ///     name: "Sato".to_string(),
    ///     join_date: NaiveDate::from_ymd_opt(2013, 4, 1).unwrap(),
    ///     role_rank: "R3".to_string(),
    ///     capability_rank: "AS".to_string(),
    ///     health_insurance_amount: 10_000,
    ///     employee_pension_amount: 20_000,
    ///     income_tax_amount: 5_000,
    ///     inhabitant_tax_amount: 8_000,
    ///     commute_amount: 10_000,
    ///     rent_amount: 5_000,
    ///     overtime_hourly_amount: 2_000,
    /// };
    /// assert_eq!(employee.deduction_total(), Some(43_000));
    /// ```
    ///
    /// Returns `None` if the sum does not fit in `i64`.
    pub fn deduction_total(&self) -> Option<i64> {
        self.health_insurance_amount
            .checked_add(self.employee_pension_amount)?
            .checked_add(self.income_tax_amount)?
            .checked_add(self.inhabitant_tax_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_employee() {
        let json = r#"{
            "no": 1,
            "name": "Sato",
            "join_date": "2013-04-01",
            "role_rank": "R3",
            "capability_rank": "AS",
            "health_insurance_amount": 10000,
            "employee_pension_amount": 20000,
            "income_tax_amount": 5000,
            "inhabitant_tax_amount": 8000,
            "commute_amount": 10000,
            "rent_amount": 5000,
            "overtime_hourly_amount": 2000
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.no, 1);
        assert_eq!(
            employee.join_date,
            NaiveDate::from_ymd_opt(2013, 4, 1).unwrap()
        );
        assert_eq!(employee.capability_rank, "AS");
        assert_eq!(employee.overtime_hourly_amount, 2000);
    }

    #[test]
    fn test_name_defaults_to_empty() {
        let json = r#"{
            "no": 2,
            "join_date": "2020-01-01",
            "role_rank": "R1",
            "capability_rank": "PG",
            "health_insurance_amount": 0,
            "employee_pension_amount": 0,
            "income_tax_amount": 0,
            "inhabitant_tax_amount": 0,
            "commute_amount": 0,
            "rent_amount": 0,
            "overtime_hourly_amount": 1500
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(employee.name.is_empty());
        assert_eq!(employee.deduction_total(), Some(0));
    }

    #[test]
    fn test_deduction_total_sums_all_four() {
        let employee = Employee {
            no: 3,
            name: String::new(),
            join_date: NaiveDate::from_ymd_opt(2015, 10, 1).unwrap(),
            role_rank: "R2".to_string(),
            capability_rank: "PL".to_string(),
            health_insurance_amount: 1,
            employee_pension_amount: 20,
            income_tax_amount: 300,
            inhabitant_tax_amount: 4000,
            commute_amount: 99,
            rent_amount: 99,
            overtime_hourly_amount: 99,
        };
        assert_eq!(employee.deduction_total(), Some(4321));
    }

    #[test]
    fn test_deduction_total_overflow_is_none() {
        let employee = Employee {
            no: 4,
            name: String::new(),
            join_date: NaiveDate::from_ymd_opt(2015, 10, 1).unwrap(),
            role_rank: "R2".to_string(),
            capability_rank: "AS".to_string(),
            health_insurance_amount: i64::MAX,
            employee_pension_amount: 1,
            income_tax_amount: 0,
            inhabitant_tax_amount: 0,
            commute_amount: 0,
            rent_amount: 0,
            overtime_hourly_amount: 0,
        };
        assert_eq!(employee.deduction_total(), None);
    }
}
