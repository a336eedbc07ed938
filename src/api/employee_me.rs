use actix_web::{HttpResponse, web};
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::{
    api::{
        employee::find_employee,
        salary::{MonthQuery, SalarySummary, present_days_in, summarize},
    },
    auth::extractor::EmployeeUser,
    error::ApiError,
    model::{attendance::AttendanceRecord, employee::EmployeeRef},
    utils::dates::resolve_month,
};

#[derive(Serialize, ToSchema)]
pub struct MyAttendanceLog {
    pub employee: EmployeeRef,
    pub attendance: Vec<AttendanceRecord>,
}

/// Own attendance history, newest day first
#[utoipa::path(
    get,
    path = "/api/employee/me/attendance",
    responses(
        (status = 200, description = "Own attendance history", body = MyAttendanceLog),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee record no longer exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee self-service"
)]
pub async fn my_attendance(
    auth: EmployeeUser,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, ApiError> {
    let employee = find_employee(pool.get_ref(), auth.employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".into()))?;

    let records = sqlx::query_as::<_, AttendanceRecord>(
        "SELECT id, employee_id, date, status FROM attendance \
         WHERE employee_id = ? ORDER BY date DESC",
    )
    .bind(employee.id)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(MyAttendanceLog {
        employee: EmployeeRef::from(employee),
        attendance: records,
    }))
}

/// Own salary summary for a month window
#[utoipa::path(
    get,
    path = "/api/employee/me/salary",
    params(MonthQuery),
    responses(
        (status = 200, description = "Own salary summary", body = SalarySummary),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee record no longer exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee self-service"
)]
pub async fn my_salary(
    auth: EmployeeUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse, ApiError> {
    let employee = find_employee(pool.get_ref(), auth.employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".into()))?;

    let window = resolve_month(query.month.as_deref());
    let present_days = present_days_in(pool.get_ref(), employee.id, &window).await?;
    let label = window.label.clone();

    Ok(HttpResponse::Ok().json(summarize(employee, present_days, Some(label))))
}
