//! Monthly allowance calculation.
//!
//! The allowance is made up of:
//! - the commute and rent amounts on the employee record,
//! - a flat bonus for the project leader / project manager categories,
//! - a one-time milestone bonus in the month tenure reaches a configured
//!   number of whole years.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PayrollRules;
use crate::error::EngineResult;
use crate::models::{AllowanceBreakdown, AuditStep, Employee, Tenure};

use super::checked_total;

/// The result of an allowance calculation, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceResult {
    /// The allowance components and total.
    pub breakdown: AllowanceBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the milestone bonus for a tenure.
///
/// The bonus is paid only when the tenure month count is an exact multiple
/// of 12 and the resulting year count has a configured milestone. Because
/// the join month counts as month 1, the year-3 bonus is paid in month 36,
/// the last month before the third anniversary.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::milestone_bonus;
/// use salary_engine::config::PayrollRules;
/// use salary_engine::models::Tenure;
///
/// let rules = PayrollRules::default();
/// assert_eq!(milestone_bonus(Tenure { months: 36, years: 3 }, &rules), 3_000);
/// assert_eq!(milestone_bonus(Tenure { months: 37, years: 3 }, &rules), 0);
/// assert_eq!(milestone_bonus(Tenure { months: 48, years: 4 }, &rules), 0);
/// ```
pub fn milestone_bonus(tenure: Tenure, rules: &PayrollRules) -> i64 {
    if tenure.months % 12 != 0 {
        return 0;
    }
    rules.milestone_bonus(tenure.years)
}

/// Calculates the allowance for the current month.
///
/// # Arguments
///
/// * `employee` - The employee record (commute, rent, capability rank)
/// * `tenure` - Tenure as of the business date
/// * `rules` - Category policies and milestone bonuses
/// * `step_number` - The step number for the audit trail
///
/// Fails with `CalculationError` if the total does not fit in `i64`.
pub fn calculate_allowance(
    employee: &Employee,
    tenure: Tenure,
    rules: &PayrollRules,
    step_number: u32,
) -> EngineResult<AllowanceResult> {
    let category = rules.category_for(&employee.capability_rank);
    let category_bonus = rules.policy(category).allowance_bonus;
    let milestone_bonus = milestone_bonus(tenure, rules);

    let total = checked_total(
        "allowance",
        &[
            employee.commute_amount,
            employee.rent_amount,
            category_bonus,
            milestone_bonus,
        ],
    )?;

    debug!(
        employee_no = employee.no,
        category = category.as_str(),
        category_bonus,
        milestone_bonus,
        total,
        "Calculated allowance"
    );

    let mut reasoning = format!(
        "Commute {} + rent {}",
        employee.commute_amount, employee.rent_amount
    );
    if category_bonus != 0 {
        reasoning.push_str(&format!(
            " + {} bonus {} (capability rank '{}')",
            category.as_str(),
            category_bonus,
            employee.capability_rank
        ));
    }
    if milestone_bonus != 0 {
        reasoning.push_str(&format!(
            " + {}-year milestone bonus {}",
            tenure.years, milestone_bonus
        ));
    }
    reasoning.push_str(&format!(" = {}", total));

    Ok(AllowanceResult {
        breakdown: AllowanceBreakdown {
            commute: employee.commute_amount,
            rent: employee.rent_amount,
            category_bonus,
            milestone_bonus,
            total,
        },
        audit_step: AuditStep {
            step_number,
            rule_id: "allowance".to_string(),
            rule_name: "Monthly Allowance".to_string(),
            input: serde_json::json!({
                "commute_amount": employee.commute_amount,
                "rent_amount": employee.rent_amount,
                "capability_rank": employee.capability_rank,
                "category": category.as_str(),
                "tenure_months": tenure.months,
                "tenure_years": tenure.years
            }),
            output: serde_json::json!({
                "category_bonus": category_bonus,
                "milestone_bonus": milestone_bonus,
                "total": total
            }),
            reasoning,
        },
    })
}
