use crate::{
    error::AppError,
    model::attendance::{AttendanceRecord, AttendanceSummary},
    model::employee::{Employee, NewEmployee},
    service::{DateRange, EmployeeService},
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceRangeQuery {
    /// Start date, inclusive (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// End date, inclusive (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Missing or malformed field", body = Object, example = json!({
            "message": "email: email must be a valid email address"
        })),
        (status = 409, description = "Duplicate employee_id or email", body = Object, example = json!({
            "message": "Employee ID already exists"
        }))
    ),
    tag = "Employees"
)]
pub async fn create_employee(
    service: web::Data<EmployeeService>,
    payload: web::Json<NewEmployee>,
) -> Result<HttpResponse, AppError> {
    let employee = service.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(employee))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = [Employee])
    ),
    tag = "Employees"
)]
pub async fn list_employees(
    service: web::Data<EmployeeService>,
) -> Result<HttpResponse, AppError> {
    let employees = service.list().await?;
    debug!(count = employees.len(), "Listing employees");
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by employee_id
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "External employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee with ID E001 not found"
        }))
    ),
    tag = "Employees"
)]
pub async fn get_employee(
    service: web::Data<EmployeeService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee = service.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee
///
/// Cascades to every attendance record of the employee.
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "External employee ID")
    ),
    responses(
        (status = 204, description = "Employee and attendance deleted"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee with ID E001 not found"
        }))
    ),
    tag = "Employees"
)]
pub async fn delete_employee(
    service: web::Data<EmployeeService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Attendance of one employee
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}/attendance",
    params(
        ("employee_id", Path, description = "External employee ID"),
        AttendanceRangeQuery
    ),
    responses(
        (status = 200, description = "Records, newest date first", body = [AttendanceRecord]),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employees"
)]
pub async fn employee_attendance(
    service: web::Data<EmployeeService>,
    path: web::Path<String>,
    query: web::Query<AttendanceRangeQuery>,
) -> Result<HttpResponse, AppError> {
    let range = DateRange {
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let records = service.list_attendance(&path.into_inner(), range).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Present/absent totals of one employee
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}/attendance/summary",
    params(
        ("employee_id", Path, description = "External employee ID")
    ),
    responses(
        (status = 200, description = "Attendance summary", body = AttendanceSummary),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employees"
)]
pub async fn attendance_summary(
    service: web::Data<EmployeeService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let summary = service.summary(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(summary))
}
