//! Overtime pay calculation.
//!
//! Each of the four hour buckets on a work record is paid at the employee's
//! base overtime hourly amount scaled by the bucket multiplier:
//!
//! | Bucket              | Multiplier |
//! |---------------------|------------|
//! | Regular             | 1.0        |
//! | Late night          | 1.1        |
//! | Holiday             | 1.2        |
//! | Holiday late night  | 1.3        |
//!
//! Every bucket is truncated to a whole currency unit on its own before the
//! buckets are summed. Overtime-exempt categories are paid nothing.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Employee, OvertimeBreakdown, OvertimeCategory, OvertimeLine, WorkRecord};

/// The result of an overtime calculation.
///
/// Contains the breakdown and one audit step per bucket plus a summary step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeResult {
    /// The overtime lines and total.
    pub breakdown: OvertimeBreakdown,
    /// Audit steps recording each bucket and the total.
    pub audit_steps: Vec<AuditStep>,
}

fn hours_for(work: &WorkRecord, category: OvertimeCategory) -> Decimal {
    match category {
        OvertimeCategory::Regular => work.overtime_hours,
        OvertimeCategory::LateNight => work.late_night_hours,
        OvertimeCategory::Holiday => work.holiday_hours,
        OvertimeCategory::HolidayLateNight => work.holiday_late_night_hours,
    }
}

fn overflow(work: &WorkRecord, category: OvertimeCategory) -> EngineError {
    EngineError::CalculationError {
        message: format!(
            "{} overtime for employee {} in {} overflows",
            category.as_str(),
            work.employee_no,
            work.year_month
        ),
    }
}

/// Calculates overtime pay for one month of work.
///
/// # Arguments
///
/// * `employee` - The employee (hourly overtime amount, capability rank)
/// * `work` - The month's work record
/// * `rules` - Multipliers and category policies
/// * `step_number_start` - The starting step number for audit trail sequencing
///
/// # Errors
///
/// - `InvalidWorkRecord` if any bucket holds negative hours
/// - `CalculationError` if an amount does not fit in `i64`
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_overtime;
/// use salary_engine::config::PayrollRules;
/// use salary_engine::models::{Employee, WorkRecord, YearMonth};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     no: 1,
///     name: "Sato".to_string(),
///     join_date: NaiveDate::from_ymd_opt(2013, 4, 1).unwrap(),
///     role_rank: "R3".to_string(),
///     capability_rank: "AS".to_string(),
///     health_insurance_amount: 0,
///     employee_pension_amount: 0,
///     income_tax_amount: 0,
///     inhabitant_tax_amount: 0,
///     commute_amount: 0,
///     rent_amount: 0,
///     overtime_hourly_amount: 2_000,
/// };
/// let work = WorkRecord {
///     employee_no: 1,
///     year_month: YearMonth::from_yyyymm(201504).unwrap(),
///     overtime_hours: Decimal::from(10),
///     late_night_hours: Decimal::from(2),
///     holiday_hours: Decimal::from(1),
///     holiday_late_night_hours: Decimal::ZERO,
/// };
///
/// let result = calculate_overtime(&employee, &work, &PayrollRules::default(), 1).unwrap();
/// // 20,000 + 4,400 + 2,400 + 0
/// assert_eq!(result.breakdown.total, 26_800);
/// ```
pub fn calculate_overtime(
    employee: &Employee,
    work: &WorkRecord,
    rules: &PayrollRules,
    step_number_start: u32,
) -> EngineResult<OvertimeResult> {
    work.validate()?;

    let category = rules.category_for(&employee.capability_rank);
    let exempt = rules.policy(category).overtime_exempt;
    let hourly = Decimal::from(employee.overtime_hourly_amount);

    let mut lines = Vec::with_capacity(OvertimeCategory::ALL.len());
    let mut audit_steps = Vec::with_capacity(OvertimeCategory::ALL.len() + 1);
    let mut step_number = step_number_start;
    let mut computed: i64 = 0;

    for bucket in OvertimeCategory::ALL {
        let hours = hours_for(work, bucket);
        let multiplier = rules.overtime.for_category(bucket);
        let rate = hourly
            .checked_mul(multiplier)
            .ok_or_else(|| overflow(work, bucket))?;
        let amount = hours
            .checked_mul(rate)
            .ok_or_else(|| overflow(work, bucket))?
            .trunc()
            .to_i64()
            .ok_or_else(|| overflow(work, bucket))?;
        computed = computed
            .checked_add(amount)
            .ok_or_else(|| overflow(work, bucket))?;

        audit_steps.push(AuditStep {
            step_number,
            rule_id: format!("overtime_{}", bucket.as_str()),
            rule_name: format!("Overtime ({})", bucket.as_str().replace('_', " ")),
            input: serde_json::json!({
                "hours": hours.normalize().to_string(),
                "hourly_amount": employee.overtime_hourly_amount,
                "multiplier": multiplier.normalize().to_string()
            }),
            output: serde_json::json!({
                "rate": rate.normalize().to_string(),
                "amount": amount
            }),
            reasoning: format!(
                "{} hours × {} ({} × {}) = {} (truncated)",
                hours.normalize(),
                rate.normalize(),
                employee.overtime_hourly_amount,
                multiplier.normalize(),
                amount
            ),
        });
        step_number += 1;

        lines.push(OvertimeLine {
            category: bucket,
            hours,
            rate,
            amount,
        });
    }

    let total = if exempt { 0 } else { computed };

    let reasoning = if exempt {
        format!(
            "Capability rank '{}' is {} and overtime-exempt; {} computed from hours is not paid",
            employee.capability_rank,
            category.as_str(),
            computed
        )
    } else {
        format!("Sum of truncated bucket amounts = {}", total)
    };

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "overtime_total".to_string(),
        rule_name: "Overtime Total".to_string(),
        input: serde_json::json!({
            "employee_no": work.employee_no,
            "year_month": work.year_month.as_yyyymm(),
            "category": category.as_str(),
            "overtime_exempt": exempt
        }),
        output: serde_json::json!({
            "computed": computed,
            "total": total
        }),
        reasoning,
    });

    debug!(
        employee_no = work.employee_no,
        year_month = %work.year_month,
        exempt,
        total,
        "Calculated overtime"
    );

    Ok(OvertimeResult {
        breakdown: OvertimeBreakdown {
            lines,
            exempt,
            total,
        },
        audit_steps,
    })
}
