use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{Constraint, Store, StoreError, StoreTx};
use crate::model::attendance::{
    AttendanceCounts, AttendanceFilter, AttendanceRecord, NewAttendance, sort_newest_first,
};
use crate::model::employee::{Employee, NewEmployee};

#[derive(Debug, Clone, Default)]
struct Tables {
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
    next_employee_id: u64,
    next_attendance_id: u64,
}

/// In-process backend with the same constraints as the MySQL schema.
///
/// A transaction holds the lock for its whole lifetime and works on a copy of
/// the tables, which replaces the shared state only on commit. Transactions are
/// therefore fully serialized.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError> {
        let guard = self.tables.clone().lock_owned().await;
        let working = Tables::clone(&guard);
        Ok(Box::new(MemoryTx { guard, working }))
    }
}

struct MemoryTx {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn find_employee(&mut self, employee_id: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self
            .working
            .employees
            .iter()
            .find(|e| e.employee_id == employee_id)
            .cloned())
    }

    async fn find_employee_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<Employee>, StoreError> {
        Ok(self
            .working
            .employees
            .iter()
            .find(|e| same_email(&e.email, email))
            .cloned())
    }

    async fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.working.employees.clone())
    }

    async fn insert_employee(&mut self, employee: &NewEmployee) -> Result<Employee, StoreError> {
        let tables = &mut self.working;

        if tables.employees.iter().any(|e| e.employee_id == employee.employee_id) {
            return Err(StoreError::UniqueViolation(Constraint::EmployeeId));
        }
        if tables.employees.iter().any(|e| same_email(&e.email, &employee.email)) {
            return Err(StoreError::UniqueViolation(Constraint::EmployeeEmail));
        }

        tables.next_employee_id += 1;
        let created = employee.clone().into_employee(tables.next_employee_id);
        tables.employees.push(created.clone());
        Ok(created)
    }

    async fn delete_employee(&mut self, employee_id: &str) -> Result<u64, StoreError> {
        let tables = &mut self.working;
        let before = tables.employees.len();
        tables.employees.retain(|e| e.employee_id != employee_id);
        let removed = (before - tables.employees.len()) as u64;

        if removed > 0 {
            tables.attendance.retain(|r| r.employee_id != employee_id);
        }
        Ok(removed)
    }

    async fn find_attendance(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        Ok(self
            .working
            .attendance
            .iter()
            .find(|r| r.employee_id == employee_id && r.date == date)
            .cloned())
    }

    async fn insert_attendance(
        &mut self,
        attendance: &NewAttendance,
    ) -> Result<AttendanceRecord, StoreError> {
        let tables = &mut self.working;

        if !tables.employees.iter().any(|e| e.employee_id == attendance.employee_id) {
            return Err(StoreError::ForeignKeyViolation(Constraint::AttendanceEmployee));
        }
        if tables
            .attendance
            .iter()
            .any(|r| r.employee_id == attendance.employee_id && r.date == attendance.date)
        {
            return Err(StoreError::UniqueViolation(Constraint::EmployeeDate));
        }

        tables.next_attendance_id += 1;
        let created = attendance.clone().into_record(tables.next_attendance_id);
        tables.attendance.push(created.clone());
        Ok(created)
    }

    async fn list_attendance(
        &mut self,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let mut records: Vec<AttendanceRecord> = self
            .working
            .attendance
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn attendance_counts(
        &mut self,
        employee_id: &str,
    ) -> Result<AttendanceCounts, StoreError> {
        Ok(self
            .working
            .attendance
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .fold(AttendanceCounts::default(), |mut counts, r| {
                if r.is_present {
                    counts.present += 1;
                } else {
                    counts.absent += 1;
                }
                counts
            }))
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemoryTx { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
