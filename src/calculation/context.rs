//! The immutable calculation context for one employee.
//!
//! A [`CalculationContext`] bundles everything a calculation needs (the
//! employee record, both pay grades, the business date, the rule set and a
//! work-record lookup) so that no calculation can run against a partially
//! initialized employee.

use chrono::NaiveDate;
use tracing::debug;

use crate::clock::BusinessClock;
use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllowanceBreakdown, CapabilityCategory, CapabilityGrade, CategoryPolicy, Employee,
    OvertimeBreakdown, RoleGrade, Tenure, WorkRecord, YearMonth,
};
use crate::store::{EmployeeLookup, GradeLookup, WorkRecordLookup};

use super::{
    calculate_allowance, calculate_annual_plan, calculate_overtime, calculate_take_home,
    calculate_total_salary, duration_months, duration_years,
};

/// Everything needed to calculate one employee's salary.
///
/// Work records are fetched on demand for the requested month.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::CalculationContext;
/// use salary_engine::clock::FixedClock;
/// use salary_engine::config::ConfigLoader;
/// use salary_engine::models::YearMonth;
/// use salary_engine::store::InMemoryStore;
/// use chrono::NaiveDate;
///
/// let config = ConfigLoader::load("./config/payroll").unwrap();
/// let store = InMemoryStore::from_seed(config.seed().unwrap());
/// let clock = FixedClock::on(NaiveDate::from_ymd_opt(2015, 4, 15).unwrap());
///
/// let ctx = CalculationContext::load(&store, 1, &clock, config.rules()).unwrap();
/// let april = YearMonth::from_yyyymm(201504).unwrap();
/// assert_eq!(ctx.total_salary(april).unwrap(), 291_800);
/// ```
#[derive(Debug)]
pub struct CalculationContext<'a, W: WorkRecordLookup + ?Sized> {
    employee: Employee,
    role: RoleGrade,
    capability: CapabilityGrade,
    business_date: NaiveDate,
    rules: &'a PayrollRules,
    work_records: &'a W,
}

impl<'a, W: WorkRecordLookup + ?Sized> CalculationContext<'a, W> {
    /// Builds a context from already-fetched collaborators.
    ///
    /// Fails with `CalculationError` if either grade does not belong to the
    /// employee's rank codes.
    pub fn new(
        employee: Employee,
        role: RoleGrade,
        capability: CapabilityGrade,
        business_date: NaiveDate,
        rules: &'a PayrollRules,
        work_records: &'a W,
    ) -> EngineResult<Self> {
        if role.rank != employee.role_rank {
            return Err(EngineError::CalculationError {
                message: format!(
                    "role grade '{}' does not match employee {} role rank '{}'",
                    role.rank, employee.no, employee.role_rank
                ),
            });
        }
        if capability.rank != employee.capability_rank {
            return Err(EngineError::CalculationError {
                message: format!(
                    "capability grade '{}' does not match employee {} capability rank '{}'",
                    capability.rank, employee.no, employee.capability_rank
                ),
            });
        }

        Ok(Self {
            employee,
            role,
            capability,
            business_date,
            rules,
            work_records,
        })
    }

    /// The employee record.
    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    /// The employee number.
    pub fn employee_no(&self) -> u32 {
        self.employee.no
    }

    /// The role grade.
    pub fn role(&self) -> &RoleGrade {
        &self.role
    }

    /// The capability grade.
    pub fn capability(&self) -> &CapabilityGrade {
        &self.capability
    }

    /// The date tenure is measured against.
    pub fn business_date(&self) -> NaiveDate {
        self.business_date
    }

    /// The rule set.
    pub fn rules(&self) -> &PayrollRules {
        self.rules
    }

    /// The employee's capability category.
    pub fn category(&self) -> CapabilityCategory {
        self.rules.category_for(&self.employee.capability_rank)
    }

    /// The policy for the employee's capability category.
    pub fn policy(&self) -> CategoryPolicy {
        self.rules.policy(self.category())
    }

    /// Which month of employment the business date falls in.
    pub fn duration_month(&self) -> u32 {
        duration_months(self.employee.join_date, self.business_date)
    }

    /// Completed years of employment.
    pub fn duration_year(&self) -> u32 {
        duration_years(self.duration_month())
    }

    /// Tenure as of the business date.
    pub fn tenure(&self) -> Tenure {
        let months = self.duration_month();
        Tenure {
            months,
            years: duration_years(months),
        }
    }

    /// The allowance components for the current month.
    pub fn allowance_breakdown(&self) -> EngineResult<AllowanceBreakdown> {
        Ok(calculate_allowance(&self.employee, self.tenure(), self.rules, 1)?.breakdown)
    }

    /// The total allowance for the current month.
    pub fn allowance(&self) -> EngineResult<i64> {
        Ok(self.allowance_breakdown()?.total)
    }

    /// Fetches the work record for a month.
    pub fn work_record(&self, year_month: YearMonth) -> EngineResult<WorkRecord> {
        self.work_records.work_record(self.employee.no, year_month)
    }

    /// The overtime breakdown for a month.
    ///
    /// The work record is required even for overtime-exempt categories.
    pub fn overtime_breakdown(&self, year_month: YearMonth) -> EngineResult<OvertimeBreakdown> {
        let work = self.work_record(year_month)?;
        Ok(calculate_overtime(&self.employee, &work, self.rules, 1)?.breakdown)
    }

    /// The overtime amount paid for a month.
    pub fn overtime_amount(&self, year_month: YearMonth) -> EngineResult<i64> {
        Ok(self.overtime_breakdown(year_month)?.total)
    }

    /// Role + capability + current allowance + the month's overtime.
    pub fn total_salary(&self, year_month: YearMonth) -> EngineResult<i64> {
        let overtime = self.overtime_amount(year_month)?;
        Ok(calculate_total_salary(
            self.role.amount,
            self.capability.amount,
            self.allowance()?,
            overtime,
            1,
        )?
        .total_salary)
    }

    /// Total salary for the month minus the fixed deductions.
    pub fn take_home_amount(&self, year_month: YearMonth) -> EngineResult<i64> {
        let total = self.total_salary(year_month)?;
        Ok(calculate_take_home(total, &self.employee, 1)?.take_home)
    }

    /// Projected annual base compensation.
    pub fn annual_total_salary_plan(&self) -> EngineResult<i64> {
        Ok(calculate_annual_plan(&self.role, &self.capability, self.rules, 1)?
            .annual_total_salary_plan)
    }
}

impl<'a, S> CalculationContext<'a, S>
where
    S: EmployeeLookup + GradeLookup + WorkRecordLookup + ?Sized,
{
    /// Loads the employee and both grades from a store.
    ///
    /// Any failed lookup (unknown employee, role rank or capability rank)
    /// aborts construction with that error.
    pub fn load(
        store: &'a S,
        employee_no: u32,
        clock: &dyn BusinessClock,
        rules: &'a PayrollRules,
    ) -> EngineResult<Self> {
        let employee = store.employee(employee_no)?;
        let role = store.role_grade(&employee.role_rank)?;
        let capability = store.capability_grade(&employee.capability_rank)?;
        let business_date = clock.today();

        debug!(
            employee_no,
            role_rank = %role.rank,
            capability_rank = %capability.rank,
            business_date = %business_date,
            "Loaded calculation context"
        );

        Self::new(employee, role, capability, business_date, rules, store)
    }
}
