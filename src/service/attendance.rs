use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use validator::Validate;

use super::employee::employee_not_found;
use crate::error::{AppError, Result};
use crate::model::attendance::{AttendanceFilter, AttendanceRecord, NewAttendance};
use crate::store::{Store, StoreError};

pub struct AttendanceService {
    store: Arc<dyn Store>,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    #[instrument(
        name = "attendance_mark",
        skip(self, payload),
        fields(employee_id = %payload.employee_id, date = %payload.date)
    )]
    pub async fn mark_attendance(&self, payload: NewAttendance) -> Result<AttendanceRecord> {
        payload.validate()?;

        let employee_id = payload.employee_id.as_str();
        let failure = |err: StoreError| match err {
            StoreError::UniqueViolation(constraint) => {
                warn!(%constraint, "Uniqueness enforced by store after pre-check");
                AppError::Conflict(
                    "Attendance record already exists for this employee and date".to_string(),
                )
            }
            // the employee vanished between the pre-check and the insert
            StoreError::ForeignKeyViolation(_) => employee_not_found(employee_id),
            other => {
                error!(error = %other, "Failed to mark attendance");
                AppError::Validation(format!("Error creating attendance record: {}", other))
            }
        };

        let mut tx = self.store.begin().await.map_err(failure)?;

        if tx.find_employee(employee_id).await.map_err(failure)?.is_none() {
            return Err(employee_not_found(employee_id));
        }
        if tx
            .find_attendance(employee_id, payload.date)
            .await
            .map_err(failure)?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Attendance for employee {} on date {} already exists",
                employee_id, payload.date
            )));
        }

        let record = tx.insert_attendance(&payload).await.map_err(failure)?;
        tx.commit().await.map_err(failure)?;

        info!(id = record.id, is_present = record.is_present, "Attendance marked");
        Ok(record)
    }

    /// Records matching every given predicate, newest date first.
    pub async fn list(&self, filter: AttendanceFilter) -> Result<Vec<AttendanceRecord>> {
        let mut tx = self.store.begin().await?;
        let records = tx.list_attendance(&filter).await?;
        tx.commit().await?;
        Ok(records)
    }
}
