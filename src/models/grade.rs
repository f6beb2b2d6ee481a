//! Pay grade reference data.

use serde::{Deserialize, Serialize};

/// A role grade: fixed monthly pay for a job function/level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrade {
    /// The rank code.
    pub rank: String,
    /// Fixed monthly amount.
    pub amount: i64,
}

/// A capability grade: fixed monthly pay for a skill/competency level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityGrade {
    /// The rank code.
    pub rank: String,
    /// Fixed monthly amount.
    pub amount: i64,
}
