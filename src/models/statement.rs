//! Pay statement models for the salary engine.
//!
//! This module contains the [`PayStatement`] type and its associated structures
//! that capture all outputs of a monthly salary calculation, including the
//! allowance and overtime breakdowns, totals, and an audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CapabilityCategory, YearMonth};

/// The overtime bucket a pay line was computed from.
///
/// # Example
///
/// ```
/// use salary_engine::models::OvertimeCategory;
///
/// assert_eq!(OvertimeCategory::ALL.len(), 4);
/// assert_eq!(OvertimeCategory::LateNight.as_str(), "late_night");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeCategory {
    /// Regular overtime.
    Regular,
    /// Late-night overtime.
    LateNight,
    /// Holiday work.
    Holiday,
    /// Holiday late-night overtime.
    HolidayLateNight,
}

impl OvertimeCategory {
    /// Every category, in the order lines appear on a statement.
    pub const ALL: [OvertimeCategory; 4] = [
        OvertimeCategory::Regular,
        OvertimeCategory::LateNight,
        OvertimeCategory::Holiday,
        OvertimeCategory::HolidayLateNight,
    ];

    /// Returns the snake_case name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            OvertimeCategory::Regular => "regular",
            OvertimeCategory::LateNight => "late_night",
            OvertimeCategory::Holiday => "holiday",
            OvertimeCategory::HolidayLateNight => "holiday_late_night",
        }
    }
}

/// Tenure as of the business date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenure {
    /// Which month of employment the business date falls in (join month is 1).
    pub months: u32,
    /// Completed years (`months / 12`).
    pub years: u32,
}

/// One overtime bucket on a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeLine {
    /// The bucket this line pays.
    pub category: OvertimeCategory,
    /// Hours recorded in the bucket.
    pub hours: Decimal,
    /// Hourly rate after the category multiplier.
    pub rate: Decimal,
    /// `hours * rate`, truncated to a whole currency unit.
    pub amount: i64,
}

/// Overtime pay for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeBreakdown {
    /// One line per bucket.
    pub lines: Vec<OvertimeLine>,
    /// True when the capability category suppresses overtime pay.
    pub exempt: bool,
    /// The overtime amount actually paid.
    pub total: i64,
}

/// Allowance components for the current month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceBreakdown {
    /// Commute allowance from the employee record.
    pub commute: i64,
    /// Rent allowance from the employee record.
    pub rent: i64,
    /// Flat bonus for the capability category.
    pub category_bonus: i64,
    /// One-time tenure milestone bonus.
    pub milestone_bonus: i64,
    /// Sum of all components.
    pub total: i64,
}

/// The fixed monthly deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Health insurance.
    pub health_insurance: i64,
    /// Employee pension.
    pub employee_pension: i64,
    /// Income tax.
    pub income_tax: i64,
    /// Inhabitant tax.
    pub inhabitant_tax: i64,
    /// Sum of all deductions.
    pub total: i64,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate results that are valid but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use salary_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.step("overtime").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Returns the first step recorded for the given rule id.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }
}

/// The complete result of a monthly salary calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayStatement {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employee the statement is for.
    pub employee_no: u32,
    /// The month the overtime was worked in.
    pub year_month: YearMonth,
    /// The capability category the employee was paid under.
    pub category: CapabilityCategory,
    /// Tenure as of the business date.
    pub tenure: Tenure,
    /// Role grade amount.
    pub role_amount: i64,
    /// Capability grade amount.
    pub capability_amount: i64,
    /// Allowance components.
    pub allowance: AllowanceBreakdown,
    /// Overtime components.
    pub overtime: OvertimeBreakdown,
    /// Role + capability + allowance + overtime.
    pub total_salary: i64,
    /// Fixed deductions.
    pub deductions: DeductionBreakdown,
    /// Total salary minus deductions.
    pub take_home: i64,
    /// Projected annual base compensation.
    pub annual_total_salary_plan: i64,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overtime_category_serialization() {
        let json = serde_json::to_string(&OvertimeCategory::HolidayLateNight).unwrap();
        assert_eq!(json, "\"holiday_late_night\"");

        let category: OvertimeCategory = serde_json::from_str("\"regular\"").unwrap();
        assert_eq!(category, OvertimeCategory::Regular);
    }

    #[test]
    fn test_overtime_line_serializes_hours_as_string() {
        let line = OvertimeLine {
            category: OvertimeCategory::LateNight,
            hours: Decimal::new(25, 1),
            rate: Decimal::new(22000, 1),
            amount: 5500,
        };

        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"category\":\"late_night\""));
        assert!(json.contains("\"hours\":\"2.5\""));
        assert!(json.contains("\"amount\":5500"));
    }

    #[test]
    fn test_audit_trace_step_lookup() {
        let trace = AuditTrace {
            steps: vec![AuditStep {
                step_number: 1,
                rule_id: "tenure".to_string(),
                rule_name: "Tenure".to_string(),
                input: serde_json::json!({}),
                output: serde_json::json!({ "months": 1 }),
                reasoning: String::new(),
            }],
            warnings: vec![],
            duration_us: 0,
        };

        assert_eq!(trace.step("tenure").unwrap().step_number, 1);
        assert!(trace.step("allowance").is_none());
    }
}
