use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,

    /// References `Employee.employee_id`, not the surrogate id
    #[schema(example = "E001")]
    pub employee_id: String,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = true)]
    pub is_present: bool,
}

/// Mark-attendance payload. `is_present` has to be sent explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewAttendance {
    #[validate(length(min = 1, max = 50, message = "employee_id must be 1-50 characters"))]
    #[schema(example = "E001")]
    pub employee_id: String,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = true)]
    pub is_present: bool,
}

impl NewAttendance {
    pub fn into_record(self, id: u64) -> AttendanceRecord {
        AttendanceRecord {
            id,
            employee_id: self.employee_id,
            date: self.date,
            is_present: self.is_present,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceSummary {
    #[schema(example = "E001")]
    pub employee_id: String,
    #[schema(example = "Alice Smith")]
    pub full_name: String,
    #[schema(example = 20)]
    pub total_present_days: i64,
    #[schema(example = 2)]
    pub total_absent_days: i64,
}

/// Present/absent tallies over all of one employee's records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct AttendanceCounts {
    pub present: i64,
    pub absent: i64,
}

/// Independently optional predicates, ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceFilter {
    pub employee_id: Option<String>,
    pub date: Option<NaiveDate>,
    /// Inclusive lower bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end_date: Option<NaiveDate>,
}

impl AttendanceFilter {
    pub fn for_employee(employee_id: &str) -> Self {
        Self {
            employee_id: Some(employee_id.to_string()),
            ..Self::default()
        }
    }

    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        self.employee_id
            .as_deref()
            .is_none_or(|id| record.employee_id == id)
            && self.date.is_none_or(|d| record.date == d)
            && self.start_date.is_none_or(|start| record.date >= start)
            && self.end_date.is_none_or(|end| record.date <= end)
    }
}

/// Newest date first; ties fall back to the newest surrogate id.
pub fn sort_newest_first(records: &mut [AttendanceRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
}
