//! Projected annual salary.
//!
//! The projection covers guaranteed base compensation only:
//! `(role + capability + category bonus) × 12`. Commute, rent, tenure
//! milestone allowances and overtime are excluded.

use serde::{Deserialize, Serialize};

use crate::config::PayrollRules;
use crate::error::EngineResult;
use crate::models::{AuditStep, CapabilityGrade, RoleGrade};

use super::{amount_overflow, checked_total};

/// Months in a projected year.
pub const MONTHS_PER_YEAR: i64 = 12;

/// The result of an annual projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualPlanResult {
    /// Projected annual base compensation.
    pub annual_total_salary_plan: i64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the projected annual salary from the current grades.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_annual_plan;
/// use salary_engine::config::PayrollRules;
/// use salary_engine::models::{CapabilityGrade, RoleGrade};
///
/// let role = RoleGrade { rank: "R3".to_string(), amount: 200_000 };
/// let capability = CapabilityGrade { rank: "AS".to_string(), amount: 50_000 };
///
/// let result = calculate_annual_plan(&role, &capability, &PayrollRules::default(), 1).unwrap();
/// assert_eq!(result.annual_total_salary_plan, 3_000_000);
/// ```
pub fn calculate_annual_plan(
    role: &RoleGrade,
    capability: &CapabilityGrade,
    rules: &PayrollRules,
    step_number: u32,
) -> EngineResult<AnnualPlanResult> {
    let category = rules.category_for(&capability.rank);
    let category_bonus = rules.policy(category).allowance_bonus;
    let monthly = checked_total(
        "monthly base salary",
        &[role.amount, capability.amount, category_bonus],
    )?;
    let annual = monthly
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| amount_overflow("annual salary plan"))?;

    Ok(AnnualPlanResult {
        annual_total_salary_plan: annual,
        audit_step: AuditStep {
            step_number,
            rule_id: "annual_plan".to_string(),
            rule_name: "Annual Salary Plan".to_string(),
            input: serde_json::json!({
                "role_rank": role.rank,
                "role_amount": role.amount,
                "capability_rank": capability.rank,
                "capability_amount": capability.amount,
                "category_bonus": category_bonus
            }),
            output: serde_json::json!({ "annual_total_salary_plan": annual }),
            reasoning: format!(
                "(role {} + capability {} + category bonus {}) × {} = {}",
                role.amount, capability.amount, category_bonus, MONTHS_PER_YEAR, annual
            ),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn role(amount: i64) -> RoleGrade {
        RoleGrade {
            rank: "R3".to_string(),
            amount,
        }
    }

    fn capability(rank: &str, amount: i64) -> CapabilityGrade {
        CapabilityGrade {
            rank: rank.to_string(),
            amount,
        }
    }

    #[test]
    fn test_standard_rank_projection() {
        let result = calculate_annual_plan(
            &role(200_000),
            &capability("AS", 50_000),
            &PayrollRules::default(),
            1,
        )
        .unwrap();
        assert_eq!(result.annual_total_salary_plan, 3_000_000);
    }

    #[test]
    fn test_project_leader_projection_includes_bonus() {
        let result = calculate_annual_plan(
            &role(200_000),
            &capability("PL", 80_000),
            &PayrollRules::default(),
            1,
        )
        .unwrap();
        // (200,000 + 80,000 + 10,000) × 12
        assert_eq!(result.annual_total_salary_plan, 3_480_000);
    }

    #[test]
    fn test_project_manager_projection_includes_bonus() {
        let result = calculate_annual_plan(
            &role(250_000),
            &capability("PM", 120_000),
            &PayrollRules::default(),
            9,
        )
        .unwrap();
        // (250,000 + 120,000 + 30,000) × 12
        assert_eq!(result.annual_total_salary_plan, 4_800_000);
        assert_eq!(result.audit_step.step_number, 9);
        assert_eq!(result.audit_step.input["category_bonus"], 30_000);
    }

    #[test]
    fn test_annual_projection_overflow_is_calculation_error() {
        // The monthly sum fits; twelve of them do not.
        let result = calculate_annual_plan(
            &role(i64::MAX / 12),
            &capability("AS", 1_000),
            &PayrollRules::default(),
            1,
        );
        match result {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("annual salary plan"), "got: {}", message);
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
    }
}
