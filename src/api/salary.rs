use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

use crate::{
    api::employee::find_employee,
    auth::extractor::AdminUser,
    error::ApiError,
    model::employee::{Employee, SalaryType},
    salary::compute_salary,
    utils::dates::{MonthWindow, resolve_month},
};

#[derive(Deserialize, IntoParams)]
pub struct MonthQuery {
    /// Reporting month as `YYYY-MM`; defaults to the current UTC month.
    pub month: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "employeeId": 1,
        "idNo": "E100",
        "name": "Jane Doe",
        "role": "Technician",
        "salaryType": "DAILY",
        "salaryAmount": 150.0,
        "presentDays": 20,
        "totalSalary": 3000.0,
        "month": "2024-03"
    })
)]
pub struct SalarySummary {
    pub employee_id: i64,
    pub id_no: String,
    pub name: String,
    pub role: String,
    pub salary_type: SalaryType,
    pub salary_amount: f64,
    pub present_days: i64,
    pub total_salary: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SalaryReport {
    #[schema(example = "2024-03")]
    pub month: String,
    pub summaries: Vec<SalarySummary>,
}

pub(crate) async fn present_days_in(
    pool: &SqlitePool,
    employee_id: i64,
    window: &MonthWindow,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM attendance \
         WHERE employee_id = ? AND status = 'PRESENT' AND date >= ? AND date <= ?",
    )
    .bind(employee_id)
    .bind(window.start)
    .bind(window.end)
    .fetch_one(pool)
    .await
}

pub(crate) fn summarize(employee: Employee, present_days: i64, month: Option<String>) -> SalarySummary {
    let total_salary = compute_salary(employee.salary_type, employee.salary_amount, present_days);
    SalarySummary {
        employee_id: employee.id,
        id_no: employee.id_no,
        name: employee.name,
        role: employee.role,
        salary_type: employee.salary_type,
        salary_amount: employee.salary_amount,
        present_days,
        total_salary,
        month,
    }
}

/// Salary owed to one employee for a month window
#[utoipa::path(
    get,
    path = "/api/salary/{employee_id}",
    params(("employee_id", description = "Employee ID"), MonthQuery),
    responses(
        (status = 200, description = "Salary summary", body = SalarySummary),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn salary_for_employee(
    _auth: AdminUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse, ApiError> {
    let employee = find_employee(pool.get_ref(), path.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".into()))?;

    let window = resolve_month(query.month.as_deref());
    let present_days = present_days_in(pool.get_ref(), employee.id, &window).await?;
    let label = window.label.clone();

    Ok(HttpResponse::Ok().json(summarize(employee, present_days, Some(label))))
}

/// Salary report across all employees for a month window. Employees with no
/// PRESENT days still appear: 0 for DAILY, the full amount for MONTHLY.
#[utoipa::path(
    get,
    path = "/api/salary",
    params(MonthQuery),
    responses(
        (status = 200, description = "Per-employee summaries", body = SalaryReport),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn salary_report(
    _auth: AdminUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse, ApiError> {
    let window = resolve_month(query.month.as_deref());

    let employees = sqlx::query_as::<_, Employee>(
        "SELECT id, id_no, name, role, salary_type, salary_amount, password, created_at \
         FROM employees ORDER BY name ASC",
    )
    .fetch_all(pool.get_ref())
    .await?;

    // one count query per employee; this report is not a hot path
    let mut summaries = Vec::with_capacity(employees.len());
    for employee in employees {
        let present_days = present_days_in(pool.get_ref(), employee.id, &window).await?;
        summaries.push(summarize(employee, present_days, None));
    }

    Ok(HttpResponse::Ok().json(SalaryReport {
        month: window.label,
        summaries,
    }))
}
