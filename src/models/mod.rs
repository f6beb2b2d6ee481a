//! Core data models for the salary engine.
//!
//! This module contains all the domain models used throughout the engine.

mod category;
mod employee;
mod grade;
mod statement;
mod work_record;

pub use category::{CapabilityCategory, CategoryPolicy};
pub use employee::Employee;
pub use grade::{CapabilityGrade, RoleGrade};
pub use statement::{
    AllowanceBreakdown, AuditStep, AuditTrace, AuditWarning, DeductionBreakdown,
    OvertimeBreakdown, OvertimeCategory, OvertimeLine, PayStatement, Tenure,
};
pub use work_record::{WorkRecord, YearMonth};
