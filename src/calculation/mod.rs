//! Salary calculation logic.
//!
//! Each calculation is a free function that returns its value together with
//! the audit step(s) explaining it. [`CalculationContext`] binds those
//! functions to one employee, and [`calculate_pay_statement`] runs them all
//! for a month.

mod allowance;
mod annual_plan;
mod context;
mod overtime;
mod pay_statement;
mod salary;
mod tenure;

pub use allowance::{AllowanceResult, calculate_allowance, milestone_bonus};
pub use annual_plan::{AnnualPlanResult, MONTHS_PER_YEAR, calculate_annual_plan};
pub use context::CalculationContext;
pub use overtime::{OvertimeResult, calculate_overtime};
pub use pay_statement::calculate_pay_statement;
pub use salary::{TakeHomeResult, TotalSalaryResult, calculate_take_home, calculate_total_salary};
pub use tenure::{TenureResult, calculate_tenure, duration_months, duration_years};

use crate::error::{EngineError, EngineResult};

fn amount_overflow(what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} overflows", what),
    }
}

/// Sums money amounts, failing with `CalculationError` if the sum leaves `i64`.
fn checked_total(what: &str, amounts: &[i64]) -> EngineResult<i64> {
    amounts
        .iter()
        .try_fold(0i64, |sum, &amount| sum.checked_add(amount))
        .ok_or_else(|| amount_overflow(what))
}
