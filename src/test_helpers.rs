use async_trait::async_trait;
use chrono::NaiveDate;

use crate::model::attendance::{AttendanceCounts, AttendanceFilter, AttendanceRecord, NewAttendance};
use crate::model::employee::{Employee, NewEmployee};
use crate::store::{MemoryStore, Store, StoreError, StoreTx};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn new_employee(employee_id: &str, email: &str) -> NewEmployee {
    NewEmployee {
        employee_id: employee_id.to_string(),
        full_name: format!("Employee {employee_id}"),
        email: email.to_string(),
        department: "Eng".to_string(),
    }
}

/// Memory store whose uniqueness probes always miss, as if a concurrent
/// request committed the same row between the pre-check and the insert.
/// Inserts still hit the real constraints.
#[derive(Clone)]
pub struct RacyStore {
    inner: MemoryStore,
    hide_employees: bool,
    vanished_employees: bool,
}

impl RacyStore {
    /// Hides attendance and email lookups.
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            hide_employees: false,
            vanished_employees: false,
        }
    }

    /// Additionally hides lookups by employee_id.
    pub fn hiding_employees() -> Self {
        Self {
            hide_employees: true,
            ..Self::new()
        }
    }

    /// Lookups by employee_id succeed for any id, as if the row was deleted
    /// right after the pre-check.
    pub fn with_vanished_employees() -> Self {
        Self {
            vanished_employees: true,
            ..Self::new()
        }
    }

    pub async fn seed_employee(&self, employee: NewEmployee) {
        let mut tx = self.inner.begin().await.unwrap();
        tx.insert_employee(&employee).await.unwrap();
        tx.commit().await.unwrap();
    }

    pub async fn seed_attendance(&self, attendance: NewAttendance) {
        let mut tx = self.inner.begin().await.unwrap();
        tx.insert_attendance(&attendance).await.unwrap();
        tx.commit().await.unwrap();
    }
}

#[async_trait]
impl Store for RacyStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError> {
        Ok(Box::new(RacyTx {
            inner: self.inner.begin().await?,
            hide_employees: self.hide_employees,
            vanished_employees: self.vanished_employees,
        }))
    }
}

struct RacyTx {
    inner: Box<dyn StoreTx>,
    hide_employees: bool,
    vanished_employees: bool,
}

#[async_trait]
impl StoreTx for RacyTx {
    async fn find_employee(&mut self, employee_id: &str) -> Result<Option<Employee>, StoreError> {
        if self.hide_employees {
            return Ok(None);
        }
        let found = self.inner.find_employee(employee_id).await?;
        if found.is_none() && self.vanished_employees {
            return Ok(Some(Employee {
                id: 0,
                employee_id: employee_id.to_string(),
                full_name: String::new(),
                email: String::new(),
                department: String::new(),
            }));
        }
        Ok(found)
    }

    async fn find_employee_by_email(
        &mut self,
        _email: &str,
    ) -> Result<Option<Employee>, StoreError> {
        Ok(None)
    }

    async fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError> {
        self.inner.list_employees().await
    }

    async fn insert_employee(&mut self, employee: &NewEmployee) -> Result<Employee, StoreError> {
        self.inner.insert_employee(employee).await
    }

    async fn delete_employee(&mut self, employee_id: &str) -> Result<u64, StoreError> {
        self.inner.delete_employee(employee_id).await
    }

    async fn find_attendance(
        &mut self,
        _employee_id: &str,
        _date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        Ok(None)
    }

    async fn insert_attendance(
        &mut self,
        attendance: &NewAttendance,
    ) -> Result<AttendanceRecord, StoreError> {
        self.inner.insert_attendance(attendance).await
    }

    async fn list_attendance(
        &mut self,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        self.inner.list_attendance(filter).await
    }

    async fn attendance_counts(
        &mut self,
        employee_id: &str,
    ) -> Result<AttendanceCounts, StoreError> {
        self.inner.attendance_counts(employee_id).await
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.inner.commit().await
    }
}
