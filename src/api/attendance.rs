use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    api::employee::find_employee,
    auth::extractor::AdminUser,
    error::ApiError,
    model::{
        attendance::{AttendanceRecord, AttendanceStatus},
        employee::EmployeeView,
    },
    utils::dates::{day_bounds, parse_record_date},
};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendance {
    #[schema(example = 1)]
    pub employee_id: i64,
    pub status: AttendanceStatus,
    /// RFC 3339 instant or `YYYY-MM-DD`; defaults to now.
    #[schema(example = "2024-03-05T09:00:00Z")]
    pub date: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceLog {
    pub employee: EmployeeView,
    pub attendance: Vec<AttendanceRecord>,
}

/// Mark attendance for a day. The upsert keeps at most one record per
/// employee per UTC calendar day: a second call for the same day overwrites
/// the status in place and answers 200 instead of 201.
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceRecord),
        (status = 200, description = "Existing record for that day updated", body = AttendanceRecord),
        (status = 400, description = "Invalid status or date"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    _auth: AdminUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<MarkAttendance>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();

    let employee = find_employee(pool.get_ref(), payload.employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".into()))?;

    let recorded_at = match payload.date.as_deref() {
        Some(raw) => {
            parse_record_date(raw).ok_or_else(|| ApiError::InvalidInput("Invalid date".into()))?
        }
        None => Utc::now(),
    };

    let (day_start, day_end) = day_bounds(recorded_at);

    let existing = sqlx::query_as::<_, AttendanceRecord>(
        "SELECT id, employee_id, date, status FROM attendance \
         WHERE employee_id = ? AND date >= ? AND date < ? LIMIT 1",
    )
    .bind(employee.id)
    .bind(day_start)
    .bind(day_end)
    .fetch_optional(pool.get_ref())
    .await?;

    match existing {
        Some(record) => {
            sqlx::query("UPDATE attendance SET status = ? WHERE id = ?")
                .bind(payload.status)
                .bind(record.id)
                .execute(pool.get_ref())
                .await?;

            info!(employee_id = employee.id, record_id = record.id, "Attendance updated");

            Ok(HttpResponse::Ok().json(AttendanceRecord {
                status: payload.status,
                ..record
            }))
        }
        None => {
            // the stored instant is the caller's, not the truncated boundary
            let result =
                sqlx::query("INSERT INTO attendance (employee_id, date, status) VALUES (?, ?, ?)")
                    .bind(employee.id)
                    .bind(recorded_at)
                    .bind(payload.status)
                    .execute(pool.get_ref())
                    .await?;

            let record = AttendanceRecord {
                id: result.last_insert_rowid(),
                employee_id: employee.id,
                date: recorded_at,
                status: payload.status,
            };

            info!(employee_id = employee.id, record_id = record.id, "Attendance recorded");

            Ok(HttpResponse::Created().json(record))
        }
    }
}

/// Attendance history for one employee, newest day first
#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}",
    params(("employee_id", description = "Employee ID")),
    responses(
        (status = 200, description = "Employee and attendance history", body = AttendanceLog),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn attendance_by_employee(
    _auth: AdminUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let employee = find_employee(pool.get_ref(), path.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".into()))?;

    let records = sqlx::query_as::<_, AttendanceRecord>(
        "SELECT id, employee_id, date, status FROM attendance \
         WHERE employee_id = ? ORDER BY date DESC",
    )
    .bind(employee.id)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(AttendanceLog {
        employee: EmployeeView::from(employee),
        attendance: records,
    }))
}
