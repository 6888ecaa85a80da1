use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::error::ErrorKind;
use sqlx::{MySql, MySqlPool, Transaction};
use tracing::debug;

use super::{Constraint, Store, StoreError, StoreTx};
use crate::model::attendance::{AttendanceCounts, AttendanceFilter, AttendanceRecord, NewAttendance};
use crate::model::employee::{Employee, NewEmployee};

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err
                .constraint()
                .map(Constraint::from_message)
                .unwrap_or_else(|| Constraint::from_message(db_err.message()));

            match db_err.kind() {
                ErrorKind::UniqueViolation => return StoreError::UniqueViolation(constraint),
                ErrorKind::ForeignKeyViolation => {
                    return StoreError::ForeignKeyViolation(constraint);
                }
                _ => {}
            }
        }
        StoreError::Backend(err.to_string())
    }
}

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for MySqlStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(MySqlTx { tx }))
    }
}

struct MySqlTx {
    tx: Transaction<'static, MySql>,
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    Str(&'a str),
    Date(NaiveDate),
}

/// WHERE clause and its bindings, in placeholder order.
fn filter_clause(filter: &AttendanceFilter) -> (String, Vec<FilterValue<'_>>) {
    let mut conditions = Vec::new();
    let mut bindings = Vec::new();

    if let Some(employee_id) = filter.employee_id.as_deref() {
        conditions.push("employee_id = ?");
        bindings.push(FilterValue::Str(employee_id));
    }
    if let Some(date) = filter.date {
        conditions.push("date = ?");
        bindings.push(FilterValue::Date(date));
    }
    if let Some(start) = filter.start_date {
        conditions.push("date >= ?");
        bindings.push(FilterValue::Date(start));
    }
    if let Some(end) = filter.end_date {
        conditions.push("date <= ?");
        bindings.push(FilterValue::Date(end));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (where_clause, bindings)
}

#[async_trait]
impl StoreTx for MySqlTx {
    async fn find_employee(&mut self, employee_id: &str) -> Result<Option<Employee>, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, employee_id, full_name, email, department
            FROM employees
            WHERE employee_id = ?
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(employee)
    }

    async fn find_employee_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<Employee>, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, employee_id, full_name, email, department
            FROM employees
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(employee)
    }

    async fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, employee_id, full_name, email, department
            FROM employees
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(employees)
    }

    async fn insert_employee(&mut self, employee: &NewEmployee) -> Result<Employee, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (employee_id, full_name, email, department)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&employee.employee_id)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .execute(&mut *self.tx)
        .await?;

        Ok(employee.clone().into_employee(result.last_insert_id()))
    }

    async fn delete_employee(&mut self, employee_id: &str) -> Result<u64, StoreError> {
        // attendance rows go with it through fk_attendance_employee
        let result = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn find_attendance(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT id, employee_id, date, is_present
            FROM attendance
            WHERE employee_id = ? AND date = ?
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(record)
    }

    async fn insert_attendance(
        &mut self,
        attendance: &NewAttendance,
    ) -> Result<AttendanceRecord, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, date, is_present)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&attendance.employee_id)
        .bind(attendance.date)
        .bind(attendance.is_present)
        .execute(&mut *self.tx)
        .await?;

        Ok(attendance.clone().into_record(result.last_insert_id()))
    }

    async fn list_attendance(
        &mut self,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let (where_clause, bindings) = filter_clause(filter);
        let sql = format!(
            "SELECT id, employee_id, date, is_present FROM attendance {} ORDER BY date DESC, id DESC",
            where_clause
        );
        debug!(sql = %sql, filter = ?filter, "Fetching attendance");

        let mut query = sqlx::query_as::<_, AttendanceRecord>(&sql);
        for value in bindings {
            query = match value {
                FilterValue::Str(v) => query.bind(v),
                FilterValue::Date(v) => query.bind(v),
            };
        }

        Ok(query.fetch_all(&mut *self.tx).await?)
    }

    async fn attendance_counts(
        &mut self,
        employee_id: &str,
    ) -> Result<AttendanceCounts, StoreError> {
        let counts = sqlx::query_as::<_, AttendanceCounts>(
            r#"
            SELECT
                COUNT(CASE WHEN is_present THEN 1 END) AS present,
                COUNT(CASE WHEN NOT is_present THEN 1 END) AS absent
            FROM attendance
            WHERE employee_id = ?
            "#,
        )
        .bind(employee_id)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(counts)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }
}
