//! Exact-key lookups against the payroll data store.
//!
//! Every lookup fetches one row by key. A missing row is
//! [`EngineError::RecordNotFound`](crate::error::EngineError::RecordNotFound);
//! an unreachable store is
//! [`EngineError::StoreUnavailable`](crate::error::EngineError::StoreUnavailable).
//! Neither is ever replaced by a default value.

mod memory;
mod sqlite;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

use crate::error::EngineResult;
use crate::models::{CapabilityGrade, Employee, RoleGrade, WorkRecord, YearMonth};

/// Looks up employee records by employee number.
pub trait EmployeeLookup {
    /// Fetches the employee with the given number.
    fn employee(&self, no: u32) -> EngineResult<Employee>;
}

/// Looks up pay grades by rank code.
pub trait GradeLookup {
    /// Fetches the role grade for a rank code.
    fn role_grade(&self, rank: &str) -> EngineResult<RoleGrade>;

    /// Fetches the capability grade for a rank code.
    fn capability_grade(&self, rank: &str) -> EngineResult<CapabilityGrade>;
}

/// Looks up monthly work records.
pub trait WorkRecordLookup {
    /// Fetches the work record for one employee and month.
    fn work_record(&self, employee_no: u32, year_month: YearMonth) -> EngineResult<WorkRecord>;
}

/// A store that can serve every lookup a calculation needs.
pub trait PayrollStore: EmployeeLookup + GradeLookup + WorkRecordLookup {}

impl<T: EmployeeLookup + GradeLookup + WorkRecordLookup> PayrollStore for T {}

/// Formats the composite key of a work record for error messages.
pub(crate) fn work_record_key(employee_no: u32, year_month: YearMonth) -> String {
    format!("{}/{}", employee_no, year_month)
}
