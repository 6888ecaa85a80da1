use crate::model::attendance::{AttendanceRecord, AttendanceSummary, NewAttendance};
use crate::model::employee::{Employee, NewEmployee};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A lightweight Human Resource Management API for keeping an employee roster
and their daily attendance.

### Key Features
- **Employees**
  - Create, list, view and delete employees (deleting removes their attendance)
- **Attendance**
  - Mark one present/absent entry per employee per day
  - Filter by date or employee, or by date range for one employee
  - Present/absent totals per employee

### Response Format
- JSON bodies, dates as `YYYY-MM-DD`
- Errors as `{"message": "..."}` with 400, 404 or 409

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::employee_attendance,
        crate::api::employee::attendance_summary,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::list_attendance
    ),
    components(
        schemas(
            Employee,
            NewEmployee,
            AttendanceRecord,
            NewAttendance,
            AttendanceSummary
        )
    ),
    tags(
        (name = "Employees", description = "Employee roster APIs"),
        (name = "Attendance", description = "Attendance APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/employees",
            "/api/employees/{employee_id}",
            "/api/employees/{employee_id}/attendance",
            "/api/employees/{employee_id}/attendance/summary",
            "/api/attendance",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn responses_reference_model_schemas() {
        let doc: serde_json::Value =
            serde_json::from_str(&ApiDoc::openapi().to_json().unwrap()).unwrap();
        let schema_of = |path: &str, method: &str, status: &str| {
            doc["paths"][path][method]["responses"][status]["content"]["application/json"]
                ["schema"]
                .clone()
        };

        assert_eq!(
            schema_of("/api/employees", "post", "201")["$ref"],
            "#/components/schemas/Employee"
        );
        assert_eq!(
            schema_of("/api/attendance", "post", "201")["$ref"],
            "#/components/schemas/AttendanceRecord"
        );
        assert_eq!(
            schema_of("/api/employees/{employee_id}/attendance/summary", "get", "200")["$ref"],
            "#/components/schemas/AttendanceSummary"
        );
        assert_eq!(
            schema_of("/api/attendance", "get", "200")["items"]["$ref"],
            "#/components/schemas/AttendanceRecord"
        );
    }
}
