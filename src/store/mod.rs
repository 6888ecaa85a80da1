//! Persistent store seam.
//!
//! Every service operation opens one [`StoreTx`], does its reads and writes
//! through it and commits. Dropping a transaction without committing rolls it
//! back. Backends report constraint failures by name so the services can turn
//! a store-level uniqueness violation into the same outcome as their pre-check.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

use crate::model::attendance::{AttendanceCounts, AttendanceFilter, AttendanceRecord, NewAttendance};
use crate::model::employee::{Employee, NewEmployee};

pub mod memory;
pub mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

/// Named schema constraints, shared by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    EmployeeId,
    EmployeeEmail,
    EmployeeDate,
    AttendanceEmployee,
    /// The backend did not say which constraint fired
    Unnamed,
}

impl Constraint {
    const NAMED: [Constraint; 4] = [
        Constraint::EmployeeId,
        Constraint::EmployeeEmail,
        Constraint::EmployeeDate,
        Constraint::AttendanceEmployee,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Constraint::EmployeeId => "uq_employees_employee_id",
            Constraint::EmployeeEmail => "uq_employees_email",
            Constraint::EmployeeDate => "uc_employee_date",
            Constraint::AttendanceEmployee => "fk_attendance_employee",
            Constraint::Unnamed => "unnamed",
        }
    }

    /// Finds the constraint a backend error message refers to.
    pub fn from_message(message: &str) -> Self {
        Self::NAMED
            .into_iter()
            .find(|c| message.contains(c.name()))
            .unwrap_or(Constraint::Unnamed)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint `{0}` violated")]
    UniqueViolation(Constraint),

    #[error("foreign key constraint `{0}` violated")]
    ForeignKeyViolation(Constraint),

    #[error("store failure: {0}")]
    Backend(String),
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError>;
}

#[async_trait]
pub trait StoreTx: Send {
    async fn find_employee(&mut self, employee_id: &str) -> Result<Option<Employee>, StoreError>;

    async fn find_employee_by_email(&mut self, email: &str)
    -> Result<Option<Employee>, StoreError>;

    /// All employees in storage order.
    async fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError>;

    async fn insert_employee(&mut self, employee: &NewEmployee) -> Result<Employee, StoreError>;

    /// Deletes the employee and, through the cascade, its attendance.
    /// Returns the number of employee rows removed.
    async fn delete_employee(&mut self, employee_id: &str) -> Result<u64, StoreError>;

    async fn find_attendance(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    async fn insert_attendance(
        &mut self,
        attendance: &NewAttendance,
    ) -> Result<AttendanceRecord, StoreError>;

    /// Matching records, newest date first.
    async fn list_attendance(
        &mut self,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    async fn attendance_counts(&mut self, employee_id: &str)
    -> Result<AttendanceCounts, StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_constraint_in_mysql_messages() {
        assert_eq!(
            Constraint::from_message("Duplicate entry 'E001' for key 'employees.uq_employees_employee_id'"),
            Constraint::EmployeeId
        );
        assert_eq!(
            Constraint::from_message("Duplicate entry 'a@x.com' for key 'uq_employees_email'"),
            Constraint::EmployeeEmail
        );
        assert_eq!(
            Constraint::from_message(
                "Duplicate entry 'E001-2024-01-01' for key 'attendance.uc_employee_date'"
            ),
            Constraint::EmployeeDate
        );
        assert_eq!(
            Constraint::from_message(
                "Cannot add or update a child row: a foreign key constraint fails \
                 (`hrms`.`attendance`, CONSTRAINT `fk_attendance_employee` FOREIGN KEY ...)"
            ),
            Constraint::AttendanceEmployee
        );
        assert_eq!(Constraint::from_message("Duplicate entry 'x' for key 'PRIMARY'"), Constraint::Unnamed);
    }

    #[test]
    fn store_error_names_the_constraint() {
        let err = StoreError::UniqueViolation(Constraint::EmployeeDate);
        assert_eq!(err.to_string(), "unique constraint `uc_employee_date` violated");
    }
}
