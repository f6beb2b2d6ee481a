//! Monthly pay statement.
//!
//! Runs every calculation for one employee and month in a fixed order and
//! collects the audit trail:
//!
//! 1. tenure
//! 2. allowance
//! 3. overtime (one step per bucket, then the total)
//! 4. total salary
//! 5. take-home pay
//! 6. annual salary plan

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{AuditTrace, AuditWarning, PayStatement, YearMonth};
use crate::store::WorkRecordLookup;

use super::{
    CalculationContext, calculate_allowance, calculate_annual_plan, calculate_overtime,
    calculate_take_home, calculate_tenure, calculate_total_salary,
};

/// Calculates the full pay statement for the context's employee and a month.
///
/// Fails if the work record for `year_month` is missing or invalid, even for
/// overtime-exempt categories.
pub fn calculate_pay_statement<W: WorkRecordLookup + ?Sized>(
    ctx: &CalculationContext<'_, W>,
    year_month: YearMonth,
) -> EngineResult<PayStatement> {
    let start_time = Instant::now();
    let employee = ctx.employee();
    let rules = ctx.rules();
    let mut steps = Vec::new();
    let mut warnings = Vec::new();

    let work = ctx.work_record(year_month)?;

    let tenure_result = calculate_tenure(employee.join_date, ctx.business_date(), 1);
    let tenure = tenure_result.tenure;
    steps.push(tenure_result.audit_step);

    let allowance_result = calculate_allowance(employee, tenure, rules, steps.len() as u32 + 1)?;
    steps.push(allowance_result.audit_step);

    let overtime_result = calculate_overtime(employee, &work, rules, steps.len() as u32 + 1)?;
    steps.extend(overtime_result.audit_steps);
    let overtime = overtime_result.breakdown;

    if overtime.exempt && overtime.lines.iter().any(|line| line.hours > Decimal::ZERO) {
        warnings.push(AuditWarning {
            code: "EXEMPT_HOURS_RECORDED".to_string(),
            message: format!(
                "Employee {} is overtime exempt but has overtime hours recorded for {}",
                employee.no, year_month
            ),
            severity: "low".to_string(),
        });
    }

    let total_result = calculate_total_salary(
        ctx.role().amount,
        ctx.capability().amount,
        allowance_result.breakdown.total,
        overtime.total,
        steps.len() as u32 + 1,
    )?;
    steps.push(total_result.audit_step);

    let take_home_result =
        calculate_take_home(total_result.total_salary, employee, steps.len() as u32 + 1)?;
    steps.push(take_home_result.audit_step);

    if take_home_result.take_home < 0 {
        warnings.push(AuditWarning {
            code: "NEGATIVE_TAKE_HOME".to_string(),
            message: format!(
                "Deductions {} exceed total salary {}",
                take_home_result.deductions.total, total_result.total_salary
            ),
            severity: "high".to_string(),
        });
    }

    let annual_result = calculate_annual_plan(
        ctx.role(),
        ctx.capability(),
        rules,
        steps.len() as u32 + 1,
    )?;
    steps.push(annual_result.audit_step);

    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        employee_no = employee.no,
        year_month = %year_month,
        total_salary = total_result.total_salary,
        take_home = take_home_result.take_home,
        warnings = warnings.len(),
        duration_us,
        "Pay statement calculated"
    );

    Ok(PayStatement {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_no: employee.no,
        year_month,
        category: ctx.category(),
        tenure,
        role_amount: ctx.role().amount,
        capability_amount: ctx.capability().amount,
        allowance: allowance_result.breakdown,
        overtime,
        total_salary: total_result.total_salary,
        deductions: take_home_result.deductions,
        take_home: take_home_result.take_home,
        annual_total_salary_plan: annual_result.annual_total_salary_plan,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::PayrollRules;
    use crate::error::EngineError;
    use crate::models::{CapabilityCategory, CapabilityGrade, Employee, RoleGrade, WorkRecord};
    use crate::store::InMemoryStore;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn ym(value: u32) -> YearMonth {
        YearMonth::from_yyyymm(value).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_store(capability_rank: &str, income_tax: i64, hours: &str) -> InMemoryStore {
        InMemoryStore::new()
            .with_employee(Employee {
                no: 1,
                name: "Sato Hanako".to_string(),
                join_date: date(2013, 4, 1),
                role_rank: "R3".to_string(),
                capability_rank: capability_rank.to_string(),
                health_insurance_amount: 10_000,
                employee_pension_amount: 20_000,
                income_tax_amount: income_tax,
                inhabitant_tax_amount: 8_000,
                commute_amount: 10_000,
                rent_amount: 5_000,
                overtime_hourly_amount: 2_000,
            })
            .with_role_grade(RoleGrade {
                rank: "R3".to_string(),
                amount: 200_000,
            })
            .with_capability_grade(CapabilityGrade {
                rank: capability_rank.to_string(),
                amount: 50_000,
            })
            .with_work_record(WorkRecord {
                employee_no: 1,
                year_month: ym(201504),
                overtime_hours: dec(hours),
                late_night_hours: dec("2"),
                holiday_hours: dec("1"),
                holiday_late_night_hours: dec("0"),
            })
    }

    fn statement(store: &InMemoryStore, month: u32) -> EngineResult<PayStatement> {
        let rules = PayrollRules::default();
        let clock = FixedClock::on(date(2015, 4, 15));
        let ctx = CalculationContext::load(store, 1, &clock, &rules)?;
        calculate_pay_statement(&ctx, ym(month))
    }

    #[test]
    fn test_reference_statement_figures() {
        let store = create_test_store("AS", 5_000, "10");
        let result = statement(&store, 201504).unwrap();

        assert_eq!(result.employee_no, 1);
        assert_eq!(result.year_month.as_yyyymm(), 201504);
        assert_eq!(result.category, CapabilityCategory::Standard);
        assert_eq!(result.tenure.months, 25);
        assert_eq!(result.tenure.years, 2);
        assert_eq!(result.allowance.total, 15_000);
        assert_eq!(result.overtime.total, 26_800);
        assert_eq!(result.overtime.lines.len(), 4);
        assert_eq!(result.total_salary, 291_800);
        assert_eq!(result.deductions.total, 43_000);
        assert_eq!(result.take_home, 248_800);
        assert_eq!(result.annual_total_salary_plan, 3_000_000);
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_audit_steps_are_numbered_in_order() {
        let store = create_test_store("AS", 5_000, "10");
        let result = statement(&store, 201504).unwrap();
        let steps = &result.audit_trace.steps;

        let rule_ids: Vec<&str> = steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rule_ids,
            vec![
                "tenure",
                "allowance",
                "overtime_regular",
                "overtime_late_night",
                "overtime_holiday",
                "overtime_holiday_late_night",
                "overtime_total",
                "total_salary",
                "take_home",
                "annual_plan",
            ]
        );
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
    }

    #[test]
    fn test_exempt_employee_with_hours_gets_warning() {
        let store = create_test_store("PM", 5_000, "10");
        let result = statement(&store, 201504).unwrap();

        assert!(result.overtime.exempt);
        assert_eq!(result.overtime.total, 0);
        assert_eq!(result.allowance.category_bonus, 30_000);
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, "EXEMPT_HOURS_RECORDED");
    }

    #[test]
    fn test_negative_take_home_is_reported_not_clamped() {
        let store = create_test_store("AS", 300_000, "0");
        let result = statement(&store, 201504).unwrap();

        assert!(result.take_home < 0);
        assert_eq!(result.take_home, result.total_salary - result.deductions.total);
        assert!(
            result
                .audit_trace
                .warnings
                .iter()
                .any(|w| w.code == "NEGATIVE_TAKE_HOME")
        );
    }

    #[test]
    fn test_missing_work_record_fails() {
        let store = create_test_store("PL", 5_000, "10");
        let error = statement(&store, 201505).unwrap_err();

        match error {
            EngineError::RecordNotFound { record, key } => {
                assert_eq!(record, "work");
                assert_eq!(key, "1/201505");
            }
            other => panic!("Expected RecordNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_deductions_fail_the_statement() {
        let store = create_test_store("AS", i64::MAX, "10");
        let error = statement(&store, 201504).unwrap_err();
        assert!(matches!(error, EngineError::CalculationError { .. }));
    }

    #[test]
    fn test_statement_serializes_year_month_as_integer() {
        let store = create_test_store("AS", 5_000, "10");
        let result = statement(&store, 201504).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["year_month"], 201504);
        assert_eq!(json["category"], "standard");
        assert_eq!(json["take_home"], 248_800);
    }
}
