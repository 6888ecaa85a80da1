use crate::{
    error::AppError,
    model::attendance::{AttendanceFilter, AttendanceRecord, NewAttendance},
    service::AttendanceService,
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceQuery {
    /// Exact date (YYYY-MM-DD)
    pub date: Option<NaiveDate>,
    /// External employee ID
    pub employee_id: Option<String>,
}

impl From<AttendanceQuery> for AttendanceFilter {
    fn from(query: AttendanceQuery) -> Self {
        AttendanceFilter {
            // `?employee_id=` means no filter
            employee_id: query.employee_id.filter(|id| !id.is_empty()),
            date: query.date,
            ..AttendanceFilter::default()
        }
    }
}

/// Mark attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body(
        content = NewAttendance,
        description = "One employee, one day",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceRecord),
        (status = 400, description = "Malformed payload"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee with ID E001 not found"
        })),
        (status = 409, description = "Already marked for that date", body = Object, example = json!({
            "message": "Attendance for employee E001 on date 2024-01-01 already exists"
        }))
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    service: web::Data<AttendanceService>,
    payload: web::Json<NewAttendance>,
) -> Result<HttpResponse, AppError> {
    let record = service.mark_attendance(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(record))
}

/// List attendance
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Records, newest date first", body = [AttendanceRecord])
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    service: web::Data<AttendanceService>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, AppError> {
    let records = service.list(query.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(records))
}
