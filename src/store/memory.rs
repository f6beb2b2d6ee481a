//! HashMap-backed store.

use std::collections::HashMap;

use crate::config::SeedData;
use crate::error::{EngineError, EngineResult};
use crate::models::{CapabilityGrade, Employee, RoleGrade, WorkRecord, YearMonth};

use super::{EmployeeLookup, GradeLookup, WorkRecordLookup, work_record_key};

/// An in-memory store for tests and for serving seed data without a database.
///
/// # Example
///
/// ```
/// use salary_engine::models::RoleGrade;
/// use salary_engine::store::{GradeLookup, InMemoryStore};
///
/// let store = InMemoryStore::new().with_role_grade(RoleGrade {
///     rank: "R3".to_string(),
///     amount: 200_000,
/// });
/// assert_eq!(store.role_grade("R3").unwrap().amount, 200_000);
/// assert!(store.role_grade("R9").unwrap_err().is_not_found());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    employees: HashMap<u32, Employee>,
    role_grades: HashMap<String, RoleGrade>,
    capability_grades: HashMap<String, CapabilityGrade>,
    work_records: HashMap<(u32, YearMonth), WorkRecord>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding all rows of the seed data.
    pub fn from_seed(seed: &SeedData) -> Self {
        let mut store = Self::new();
        for grade in &seed.role_grades {
            store.insert_role_grade(grade.clone());
        }
        for grade in &seed.capability_grades {
            store.insert_capability_grade(grade.clone());
        }
        for employee in &seed.employees {
            store.insert_employee(employee.clone());
        }
        for record in &seed.work_records {
            store.insert_work_record(record.clone());
        }
        store
    }

    /// Inserts or replaces an employee.
    pub fn insert_employee(&mut self, employee: Employee) {
        self.employees.insert(employee.no, employee);
    }

    /// Inserts or replaces a role grade.
    pub fn insert_role_grade(&mut self, grade: RoleGrade) {
        self.role_grades.insert(grade.rank.clone(), grade);
    }

    /// Inserts or replaces a capability grade.
    pub fn insert_capability_grade(&mut self, grade: CapabilityGrade) {
        self.capability_grades.insert(grade.rank.clone(), grade);
    }

    /// Inserts or replaces a work record.
    pub fn insert_work_record(&mut self, record: WorkRecord) {
        self.work_records
            .insert((record.employee_no, record.year_month), record);
    }

    /// Builder form of [`InMemoryStore::insert_employee`].
    pub fn with_employee(mut self, employee: Employee) -> Self {
        self.insert_employee(employee);
        self
    }

    /// Builder form of [`InMemoryStore::insert_role_grade`].
    pub fn with_role_grade(mut self, grade: RoleGrade) -> Self {
        self.insert_role_grade(grade);
        self
    }

    /// Builder form of [`InMemoryStore::insert_capability_grade`].
    pub fn with_capability_grade(mut self, grade: CapabilityGrade) -> Self {
        self.insert_capability_grade(grade);
        self
    }

    /// Builder form of [`InMemoryStore::insert_work_record`].
    pub fn with_work_record(mut self, record: WorkRecord) -> Self {
        self.insert_work_record(record);
        self
    }
}

impl EmployeeLookup for InMemoryStore {
    fn employee(&self, no: u32) -> EngineResult<Employee> {
        self.employees
            .get(&no)
            .cloned()
            .ok_or_else(|| EngineError::not_found("employee", no))
    }
}

impl GradeLookup for InMemoryStore {
    fn role_grade(&self, rank: &str) -> EngineResult<RoleGrade> {
        self.role_grades
            .get(rank)
            .cloned()
            .ok_or_else(|| EngineError::not_found("role", rank))
    }

    fn capability_grade(&self, rank: &str) -> EngineResult<CapabilityGrade> {
        self.capability_grades
            .get(rank)
            .cloned()
            .ok_or_else(|| EngineError::not_found("capability", rank))
    }
}

impl WorkRecordLookup for InMemoryStore {
    fn work_record(&self, employee_no: u32, year_month: YearMonth) -> EngineResult<WorkRecord> {
        self.work_records
            .get(&(employee_no, year_month))
            .cloned()
            .ok_or_else(|| EngineError::not_found("work", work_record_key(employee_no, year_month)))
    }
}
