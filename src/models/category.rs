//! Capability categories and the pay policy attached to each.

use serde::{Deserialize, Serialize};

/// The pay category an employee falls into by capability rank.
///
/// Project leaders and project managers are salaried: they receive a flat
/// allowance bonus and no overtime pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityCategory {
    /// Any rank without a special policy.
    Standard,
    /// Project leader ("PL").
    ProjectLeader,
    /// Project manager ("PM").
    ProjectManager,
}

impl CapabilityCategory {
    /// Returns the snake_case name used in configuration and audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityCategory::Standard => "standard",
            CapabilityCategory::ProjectLeader => "project_leader",
            CapabilityCategory::ProjectManager => "project_manager",
        }
    }
}

/// Policy applied to every employee in a [`CapabilityCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryPolicy {
    /// Whether overtime pay is forced to zero.
    #[serde(default)]
    pub overtime_exempt: bool,
    /// Flat monthly amount added to the allowance and the annual plan.
    #[serde(default)]
    pub allowance_bonus: i64,
}
