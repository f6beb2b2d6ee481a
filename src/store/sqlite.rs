//! SQLite-backed relational store.
//!
//! Tables: `role`, `capability`, `employee`, `work`. The schema is created
//! idempotently on open. All lookups are parameterized single-row queries.

use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::SeedData;
use crate::error::{EngineError, EngineResult};
use crate::models::{CapabilityGrade, Employee, RoleGrade, WorkRecord, YearMonth};

use super::{EmployeeLookup, GradeLookup, WorkRecordLookup, work_record_key};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS role (
        rank    TEXT PRIMARY KEY,
        amount  INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS capability (
        rank    TEXT PRIMARY KEY,
        amount  INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS employee (
        no                       INTEGER PRIMARY KEY,
        name                     TEXT NOT NULL DEFAULT '',
        join_date                TEXT NOT NULL,
        role_rank                TEXT NOT NULL,
        capability_rank          TEXT NOT NULL,
        health_insurance_amount  INTEGER NOT NULL DEFAULT 0,
        employee_pension_amount  INTEGER NOT NULL DEFAULT 0,
        income_tax_amount        INTEGER NOT NULL DEFAULT 0,
        inhabitant_tax_amount    INTEGER NOT NULL DEFAULT 0,
        commute_amount           INTEGER NOT NULL DEFAULT 0,
        rent_amount              INTEGER NOT NULL DEFAULT 0,
        overtime_hourly_amount   INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS work (
        employee_no               INTEGER NOT NULL,
        year_month                INTEGER NOT NULL,
        overtime_hours            TEXT NOT NULL DEFAULT '0',
        late_night_hours          TEXT NOT NULL DEFAULT '0',
        holiday_hours             TEXT NOT NULL DEFAULT '0',
        holiday_late_night_hours  TEXT NOT NULL DEFAULT '0',
        PRIMARY KEY (employee_no, year_month)
    );
";

/// A payroll store over a single SQLite connection.
///
/// # Example
///
/// ```
/// use salary_engine::models::CapabilityGrade;
/// use salary_engine::store::{GradeLookup, SqliteStore};
///
/// let store = SqliteStore::open_in_memory().unwrap();
/// store
///     .insert_capability_grade(&CapabilityGrade { rank: "PL".to_string(), amount: 80_000 })
///     .unwrap();
/// assert_eq!(store.capability_grade("PL").unwrap().amount, 80_000);
/// ```
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) a database file and ensures the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        let store = Self::init(conn)?;
        info!(database = %path.display(), "Opened payroll database");
        Ok(store)
    }

    /// Opens a private in-memory database (for testing).
    pub fn open_in_memory() -> EngineResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> EngineResult<Self> {
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> EngineResult<T>
    where
        F: FnOnce(&mut Connection) -> EngineResult<T>,
    {
        let mut guard = self
            .conn
            .lock()
            .map_err(|_| EngineError::StoreUnavailable {
                message: "connection lock poisoned".to_string(),
            })?;
        f(&mut guard)
    }

    /// Inserts every row of the seed data in one transaction, replacing
    /// rows with the same key.
    pub fn seed(&self, seed: &SeedData) -> EngineResult<()> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            for grade in &seed.role_grades {
                insert_role_grade(&tx, grade)?;
            }
            for grade in &seed.capability_grades {
                insert_capability_grade(&tx, grade)?;
            }
            for employee in &seed.employees {
                insert_employee(&tx, employee)?;
            }
            for record in &seed.work_records {
                insert_work_record(&tx, record)?;
            }
            tx.commit()?;
            Ok(())
        })?;

        info!(
            role_grades = seed.role_grades.len(),
            capability_grades = seed.capability_grades.len(),
            employees = seed.employees.len(),
            work_records = seed.work_records.len(),
            "Seeded payroll database"
        );
        Ok(())
    }

    /// Inserts or replaces a role grade.
    pub fn insert_role_grade(&self, grade: &RoleGrade) -> EngineResult<()> {
        self.with_conn(|conn| insert_role_grade(conn, grade))
    }

    /// Inserts or replaces a capability grade.
    pub fn insert_capability_grade(&self, grade: &CapabilityGrade) -> EngineResult<()> {
        self.with_conn(|conn| insert_capability_grade(conn, grade))
    }

    /// Inserts or replaces an employee.
    pub fn insert_employee(&self, employee: &Employee) -> EngineResult<()> {
        self.with_conn(|conn| insert_employee(conn, employee))
    }

    /// Inserts or replaces a work record.
    pub fn insert_work_record(&self, record: &WorkRecord) -> EngineResult<()> {
        self.with_conn(|conn| insert_work_record(conn, record))
    }
}

fn insert_role_grade(conn: &Connection, grade: &RoleGrade) -> EngineResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO role (rank, amount) VALUES (?1, ?2)",
        params![grade.rank, grade.amount],
    )?;
    Ok(())
}

fn insert_capability_grade(conn: &Connection, grade: &CapabilityGrade) -> EngineResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO capability (rank, amount) VALUES (?1, ?2)",
        params![grade.rank, grade.amount],
    )?;
    Ok(())
}

fn insert_employee(conn: &Connection, employee: &Employee) -> EngineResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO employee (
            no, name, join_date, role_rank, capability_rank,
            health_insurance_amount, employee_pension_amount, income_tax_amount,
            inhabitant_tax_amount, commute_amount, rent_amount, overtime_hourly_amount
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            employee.no,
            employee.name,
            employee.join_date,
            employee.role_rank,
            employee.capability_rank,
            employee.health_insurance_amount,
            employee.employee_pension_amount,
            employee.income_tax_amount,
            employee.inhabitant_tax_amount,
            employee.commute_amount,
            employee.rent_amount,
            employee.overtime_hourly_amount,
        ],
    )?;
    Ok(())
}

fn insert_work_record(conn: &Connection, record: &WorkRecord) -> EngineResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO work (
            employee_no, year_month, overtime_hours, late_night_hours,
            holiday_hours, holiday_late_night_hours
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.employee_no,
            record.year_month.as_yyyymm(),
            record.overtime_hours.to_string(),
            record.late_night_hours.to_string(),
            record.holiday_hours.to_string(),
            record.holiday_late_night_hours.to_string(),
        ],
    )?;
    Ok(())
}

/// Parses an hour quantity stored as TEXT.
fn parse_hours(value: &str, field: &str, key: &str) -> EngineResult<Decimal> {
    Decimal::from_str(value.trim()).map_err(|e| EngineError::InvalidRecord {
        record: "work".to_string(),
        key: key.to_string(),
        message: format!("{} '{}' is not a decimal: {}", field, value, e),
    })
}

impl EmployeeLookup for SqliteStore {
    fn employee(&self, no: u32) -> EngineResult<Employee> {
        debug!(employee_no = no, "Looking up employee");
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT no, name, join_date, role_rank, capability_rank,
                        health_insurance_amount, employee_pension_amount, income_tax_amount,
                        inhabitant_tax_amount, commute_amount, rent_amount, overtime_hourly_amount
                 FROM employee WHERE no = ?1",
                params![no],
                |row| {
                    Ok(Employee {
                        no: row.get(0)?,
                        name: row.get(1)?,
                        join_date: row.get(2)?,
                        role_rank: row.get(3)?,
                        capability_rank: row.get(4)?,
                        health_insurance_amount: row.get(5)?,
                        employee_pension_amount: row.get(6)?,
                        income_tax_amount: row.get(7)?,
                        inhabitant_tax_amount: row.get(8)?,
                        commute_amount: row.get(9)?,
                        rent_amount: row.get(10)?,
                        overtime_hourly_amount: row.get(11)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| EngineError::not_found("employee", no))
        })
    }
}

impl GradeLookup for SqliteStore {
    fn role_grade(&self, rank: &str) -> EngineResult<RoleGrade> {
        debug!(rank = %rank, "Looking up role grade");
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT rank, amount FROM role WHERE rank = ?1",
                params![rank],
                |row| {
                    Ok(RoleGrade {
                        rank: row.get(0)?,
                        amount: row.get(1)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| EngineError::not_found("role", rank))
        })
    }

    fn capability_grade(&self, rank: &str) -> EngineResult<CapabilityGrade> {
        debug!(rank = %rank, "Looking up capability grade");
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT rank, amount FROM capability WHERE rank = ?1",
                params![rank],
                |row| {
                    Ok(CapabilityGrade {
                        rank: row.get(0)?,
                        amount: row.get(1)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| EngineError::not_found("capability", rank))
        })
    }
}

impl WorkRecordLookup for SqliteStore {
    fn work_record(&self, employee_no: u32, year_month: YearMonth) -> EngineResult<WorkRecord> {
        let key = work_record_key(employee_no, year_month);
        debug!(work_record = %key, "Looking up work record");

        let row = self.with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT overtime_hours, late_night_hours, holiday_hours, holiday_late_night_hours
                     FROM work WHERE employee_no = ?1 AND year_month = ?2",
                    params![employee_no, year_month.as_yyyymm()],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, String>(3)?,
                        ))
                    },
                )
                .optional()?)
        })?;

        let (overtime, late_night, holiday, holiday_late_night) =
            row.ok_or_else(|| EngineError::not_found("work", &key))?;

        Ok(WorkRecord {
            employee_no,
            year_month,
            overtime_hours: parse_hours(&overtime, "overtime_hours", &key)?,
            late_night_hours: parse_hours(&late_night, "late_night_hours", &key)?,
            holiday_hours: parse_hours(&holiday, "holiday_hours", &key)?,
            holiday_late_night_hours: parse_hours(
                &holiday_late_night,
                "holiday_late_night_hours",
                &key,
            )?,
        })
    }
}
