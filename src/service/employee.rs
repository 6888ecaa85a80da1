use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::model::attendance::{AttendanceFilter, AttendanceRecord, AttendanceSummary};
use crate::model::employee::{Employee, NewEmployee};
use crate::store::{Constraint, Store, StoreError, StoreTx};

/// Inclusive, independently optional bounds for an employee's attendance.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}

pub struct EmployeeService {
    store: Arc<dyn Store>,
}

pub(crate) fn employee_not_found(employee_id: &str) -> AppError {
    AppError::NotFound(format!("Employee with ID {} not found", employee_id))
}

/// Translates write-path store failures. Constraint violations mean the
/// pre-checks lost a race and get the same answer the pre-check would give.
fn creation_failure(err: StoreError) -> AppError {
    match err {
        StoreError::UniqueViolation(constraint) => {
            warn!(%constraint, "Uniqueness enforced by store after pre-check");
            match constraint {
                Constraint::EmployeeEmail => AppError::Conflict("Email already exists".to_string()),
                Constraint::EmployeeId => {
                    AppError::Conflict("Employee ID already exists".to_string())
                }
                _ => AppError::Conflict("Employee already exists".to_string()),
            }
        }
        other => {
            error!(error = %other, "Failed to create employee");
            AppError::Validation(format!("Error creating employee: {}", other))
        }
    }
}

impl EmployeeService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Loads the employee inside `tx` or fails with NotFound.
    async fn require(tx: &mut dyn StoreTx, employee_id: &str) -> Result<Employee> {
        tx.find_employee(employee_id)
            .await?
            .ok_or_else(|| employee_not_found(employee_id))
    }

    #[instrument(name = "employee_create", skip(self, payload), fields(employee_id = %payload.employee_id))]
    pub async fn create(&self, payload: NewEmployee) -> Result<Employee> {
        payload.validate()?;

        let mut tx = self.store.begin().await.map_err(creation_failure)?;

        if tx
            .find_employee(&payload.employee_id)
            .await
            .map_err(creation_failure)?
            .is_some()
        {
            return Err(AppError::Conflict("Employee ID already exists".to_string()));
        }
        if tx
            .find_employee_by_email(&payload.email)
            .await
            .map_err(creation_failure)?
            .is_some()
        {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let employee = tx.insert_employee(&payload).await.map_err(creation_failure)?;
        tx.commit().await.map_err(creation_failure)?;

        info!(id = employee.id, "Employee created");
        Ok(employee)
    }

    pub async fn list(&self) -> Result<Vec<Employee>> {
        let mut tx = self.store.begin().await?;
        let employees = tx.list_employees().await?;
        tx.commit().await?;
        Ok(employees)
    }

    pub async fn get(&self, employee_id: &str) -> Result<Employee> {
        let mut tx = self.store.begin().await?;
        let employee = Self::require(&mut *tx, employee_id).await?;
        tx.commit().await?;
        Ok(employee)
    }

    /// Removes the employee together with all of its attendance records.
    #[instrument(name = "employee_delete", skip(self))]
    pub async fn delete(&self, employee_id: &str) -> Result<()> {
        let mut tx = self.store.begin().await?;
        if tx.delete_employee(employee_id).await? == 0 {
            return Err(employee_not_found(employee_id));
        }
        tx.commit().await?;

        info!("Employee deleted");
        Ok(())
    }

    pub async fn list_attendance(
        &self,
        employee_id: &str,
        range: DateRange,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut tx = self.store.begin().await?;
        Self::require(&mut *tx, employee_id).await?;

        let filter = AttendanceFilter {
            start_date: range.start_date,
            end_date: range.end_date,
            ..AttendanceFilter::for_employee(employee_id)
        };
        let records = tx.list_attendance(&filter).await?;
        tx.commit().await?;
        Ok(records)
    }

    pub async fn summary(&self, employee_id: &str) -> Result<AttendanceSummary> {
        let mut tx = self.store.begin().await?;
        let employee = Self::require(&mut *tx, employee_id).await?;
        let counts = tx.attendance_counts(employee_id).await?;
        tx.commit().await?;

        Ok(AttendanceSummary {
            employee_id: employee.employee_id,
            full_name: employee.full_name,
            total_present_days: counts.present,
            total_absent_days: counts.absent,
        })
    }
}
