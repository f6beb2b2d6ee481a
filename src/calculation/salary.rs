//! Total salary and take-home pay.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{AuditStep, DeductionBreakdown, Employee};

use super::{amount_overflow, checked_total};

/// The result of a total salary calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalSalaryResult {
    /// Role + capability + allowance + overtime.
    pub total_salary: i64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The result of a take-home calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakeHomeResult {
    /// The deductions that were subtracted.
    pub deductions: DeductionBreakdown,
    /// Total salary minus deductions. May be negative.
    pub take_home: i64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the gross monthly salary.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_total_salary;
///
/// let result = calculate_total_salary(200_000, 50_000, 15_000, 26_800, 1).unwrap();
/// assert_eq!(result.total_salary, 291_800);
/// ```
///
/// Fails with `CalculationError` if the sum does not fit in `i64`.
pub fn calculate_total_salary(
    role_amount: i64,
    capability_amount: i64,
    allowance: i64,
    overtime: i64,
    step_number: u32,
) -> EngineResult<TotalSalaryResult> {
    let total_salary = checked_total(
        "total salary",
        &[role_amount, capability_amount, allowance, overtime],
    )?;

    Ok(TotalSalaryResult {
        total_salary,
        audit_step: AuditStep {
            step_number,
            rule_id: "total_salary".to_string(),
            rule_name: "Total Salary".to_string(),
            input: serde_json::json!({
                "role_amount": role_amount,
                "capability_amount": capability_amount,
                "allowance": allowance,
                "overtime": overtime
            }),
            output: serde_json::json!({ "total_salary": total_salary }),
            reasoning: format!(
                "Role {} + capability {} + allowance {} + overtime {} = {}",
                role_amount, capability_amount, allowance, overtime, total_salary
            ),
        },
    })
}

/// Subtracts the employee's fixed deductions from the total salary.
pub fn calculate_take_home(
    total_salary: i64,
    employee: &Employee,
    step_number: u32,
) -> EngineResult<TakeHomeResult> {
    let deductions = DeductionBreakdown {
        health_insurance: employee.health_insurance_amount,
        employee_pension: employee.employee_pension_amount,
        income_tax: employee.income_tax_amount,
        inhabitant_tax: employee.inhabitant_tax_amount,
        total: employee
            .deduction_total()
            .ok_or_else(|| amount_overflow("deductions"))?,
    };
    let take_home = total_salary
        .checked_sub(deductions.total)
        .ok_or_else(|| amount_overflow("take-home pay"))?;

    Ok(TakeHomeResult {
        audit_step: AuditStep {
            step_number,
            rule_id: "take_home".to_string(),
            rule_name: "Take-Home Pay".to_string(),
            input: serde_json::json!({
                "total_salary": total_salary,
                "health_insurance": deductions.health_insurance,
                "employee_pension": deductions.employee_pension,
                "income_tax": deductions.income_tax,
                "inhabitant_tax": deductions.inhabitant_tax
            }),
            output: serde_json::json!({
                "deductions": deductions.total,
                "take_home": take_home
            }),
            reasoning: format!(
                "Total salary {} - deductions {} = {}",
                total_salary, deductions.total, take_home
            ),
        },
        deductions,
        take_home,
    })
}
