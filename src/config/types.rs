//! Configuration types for salary calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    CapabilityCategory, CapabilityGrade, CategoryPolicy, Employee, OvertimeCategory, RoleGrade,
    WorkRecord,
};

/// Multipliers applied to the employee's base overtime hourly amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeMultipliers {
    /// Regular overtime multiplier.
    pub regular: Decimal,
    /// Late-night overtime multiplier.
    pub late_night: Decimal,
    /// Holiday work multiplier.
    pub holiday: Decimal,
    /// Holiday late-night overtime multiplier.
    pub holiday_late_night: Decimal,
}

impl OvertimeMultipliers {
    /// Returns the multiplier for one overtime bucket.
    pub fn for_category(&self, category: OvertimeCategory) -> Decimal {
        match category {
            OvertimeCategory::Regular => self.regular,
            OvertimeCategory::LateNight => self.late_night,
            OvertimeCategory::Holiday => self.holiday,
            OvertimeCategory::HolidayLateNight => self.holiday_late_night,
        }
    }
}

impl Default for OvertimeMultipliers {
    fn default() -> Self {
        Self {
            regular: Decimal::ONE,
            late_night: Decimal::new(11, 1),
            holiday: Decimal::new(12, 1),
            holiday_late_night: Decimal::new(13, 1),
        }
    }
}

/// A special capability category bound to its rank code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// The capability rank code that selects this category.
    pub rank: String,
    /// The policy applied to the category.
    #[serde(flatten)]
    pub policy: CategoryPolicy,
}

/// Policies for the non-standard capability categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRules {
    /// Project leader policy.
    pub project_leader: CategoryRule,
    /// Project manager policy.
    pub project_manager: CategoryRule,
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            project_leader: CategoryRule {
                rank: "PL".to_string(),
                policy: CategoryPolicy {
                    overtime_exempt: true,
                    allowance_bonus: 10_000,
                },
            },
            project_manager: CategoryRule {
                rank: "PM".to_string(),
                policy: CategoryPolicy {
                    overtime_exempt: true,
                    allowance_bonus: 30_000,
                },
            },
        }
    }
}

/// A one-time bonus paid in the month tenure reaches a whole number of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneBonus {
    /// Tenure in years that triggers the bonus.
    pub years: u32,
    /// The bonus amount.
    pub bonus: i64,
}

/// The rule set driving every calculation, loaded from `rules.yaml`.
///
/// # Example
///
/// ```
/// use salary_engine::config::PayrollRules;
/// use salary_engine::models::CapabilityCategory;
///
/// let rules = PayrollRules::default();
/// assert_eq!(rules.category_for("PM"), CapabilityCategory::ProjectManager);
/// assert_eq!(rules.milestone_bonus(10), 10_000);
/// assert_eq!(rules.milestone_bonus(4), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRules {
    /// Overtime multipliers by bucket.
    #[serde(default)]
    pub overtime: OvertimeMultipliers,
    /// Special capability categories.
    #[serde(default)]
    pub categories: CategoryRules,
    /// Tenure milestone bonuses.
    #[serde(default = "default_milestones")]
    pub milestones: Vec<MilestoneBonus>,
}

fn default_milestones() -> Vec<MilestoneBonus> {
    [(3, 3_000), (5, 5_000), (10, 10_000), (20, 20_000)]
        .into_iter()
        .map(|(years, bonus)| MilestoneBonus { years, bonus })
        .collect()
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            overtime: OvertimeMultipliers::default(),
            categories: CategoryRules::default(),
            milestones: default_milestones(),
        }
    }
}

impl PayrollRules {
    /// Maps a capability rank code to its category.
    pub fn category_for(&self, capability_rank: &str) -> CapabilityCategory {
        if capability_rank == self.categories.project_leader.rank {
            CapabilityCategory::ProjectLeader
        } else if capability_rank == self.categories.project_manager.rank {
            CapabilityCategory::ProjectManager
        } else {
            CapabilityCategory::Standard
        }
    }

    /// Returns the policy for a category.
    pub fn policy(&self, category: CapabilityCategory) -> CategoryPolicy {
        match category {
            CapabilityCategory::Standard => CategoryPolicy::default(),
            CapabilityCategory::ProjectLeader => self.categories.project_leader.policy,
            CapabilityCategory::ProjectManager => self.categories.project_manager.policy,
        }
    }

    /// Returns the milestone bonus for a tenure in years, or zero.
    pub fn milestone_bonus(&self, years: u32) -> i64 {
        self.milestones
            .iter()
            .find(|m| m.years == years)
            .map(|m| m.bonus)
            .unwrap_or(0)
    }

    /// Checks the rule set for values the calculators cannot use.
    pub fn validate(&self) -> EngineResult<()> {
        for category in OvertimeCategory::ALL {
            if self.overtime.for_category(category).is_sign_negative() {
                return Err(EngineError::InvalidConfig {
                    message: format!("overtime multiplier '{}' is negative", category.as_str()),
                });
            }
        }

        if self.categories.project_leader.rank == self.categories.project_manager.rank {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "project_leader and project_manager share rank '{}'",
                    self.categories.project_leader.rank
                ),
            });
        }

        for (i, milestone) in self.milestones.iter().enumerate() {
            if milestone.years == 0 {
                return Err(EngineError::InvalidConfig {
                    message: "milestone years must be at least 1".to_string(),
                });
            }
            if self.milestones[..i].iter().any(|m| m.years == milestone.years) {
                return Err(EngineError::InvalidConfig {
                    message: format!("duplicate milestone for {} years", milestone.years),
                });
            }
        }

        Ok(())
    }
}

/// Reference and sample data used to populate a store, loaded from `seed.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    /// Role grade table.
    #[serde(default)]
    pub role_grades: Vec<RoleGrade>,
    /// Capability grade table.
    #[serde(default)]
    pub capability_grades: Vec<CapabilityGrade>,
    /// Employee records.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Monthly work records.
    #[serde(default)]
    pub work_records: Vec<WorkRecord>,
}
