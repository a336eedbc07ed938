use actix_web::{HttpResponse, web};
use serde::{Deserialize, Deserializer};
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    auth::{extractor::AdminUser, password::hash_password},
    error::ApiError,
    model::employee::{Employee, EmployeeView, SalaryType},
};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    #[schema(example = "E100")]
    pub id_no: String,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "Technician")]
    pub role: String,
    pub salary_type: SalaryType,
    #[schema(example = 150.0)]
    pub salary_amount: f64,
    /// Enables self-service login when at least 4 characters long.
    pub password: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployee {
    pub id_no: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub salary_type: Option<SalaryType>,
    pub salary_amount: Option<f64>,
    /// Absent: keep the credential. Present: replace it, or clear it when
    /// null or shorter than 4 characters.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable = true)]
    pub password: Option<Option<String>>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

const EMPLOYEE_COLUMNS: &str =
    "id, id_no, name, role, salary_type, salary_amount, password, created_at";

pub async fn find_employee(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// idNo comparison is exact on the trimmed value, case-sensitive.
/// `exclude_id` carves the employee itself out on updates.
async fn id_no_taken(
    pool: &SqlitePool,
    id_no: &str,
    exclude_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    match exclude_id {
        Some(id) => {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE id_no = ? AND id != ?)")
                .bind(id_no)
                .bind(id)
                .fetch_one(pool)
                .await
        }
        None => {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE id_no = ?)")
                .bind(id_no)
                .fetch_one(pool)
                .await
        }
    }
}

fn validate_amount(amount: f64) -> Result<(), ApiError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ApiError::InvalidInput(
            "salaryAmount must be a positive number".into(),
        ));
    }
    Ok(())
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = EmployeeView),
        (status = 400, description = "Missing or invalid fields, or duplicate idNo"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn create_employee(
    _auth: AdminUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    let id_no = payload.id_no.trim().to_string();

    if id_no.is_empty() || payload.name.trim().is_empty() || payload.role.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "idNo, name, role, salaryType and salaryAmount are required".into(),
        ));
    }
    validate_amount(payload.salary_amount)?;

    if id_no_taken(pool.get_ref(), &id_no, None).await? {
        return Err(ApiError::InvalidInput("Employee ID already in use".into()));
    }

    let password_hash = match payload.password.as_deref() {
        Some(p) if p.len() >= 4 => Some(hash_password(p)?),
        _ => None,
    };

    let result = sqlx::query(
        "INSERT INTO employees (id_no, name, role, salary_type, salary_amount, password) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id_no)
    .bind(&payload.name)
    .bind(&payload.role)
    .bind(payload.salary_type)
    .bind(payload.salary_amount)
    .bind(&password_hash)
    .execute(pool.get_ref())
    .await
    .map_err(|e| ApiError::on_unique_violation(e, "Employee ID already in use"))?;

    let employee = find_employee(pool.get_ref(), result.last_insert_rowid())
        .await?
        .ok_or_else(|| ApiError::Internal("Employee vanished after insert".into()))?;

    info!(employee_id = employee.id, id_no = %employee.id_no, "Employee created");

    Ok(HttpResponse::Created().json(EmployeeView::from(employee)))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees, newest first", body = [EmployeeView]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn list_employees(
    _auth: AdminUser,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, ApiError> {
    let employees = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool.get_ref())
    .await?;

    let views: Vec<EmployeeView> = employees.into_iter().map(EmployeeView::from).collect();
    Ok(HttpResponse::Ok().json(views))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id", description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = EmployeeView),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn get_employee(
    _auth: AdminUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let employee = find_employee(pool.get_ref(), path.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".into()))?;

    Ok(HttpResponse::Ok().json(EmployeeView::from(employee)))
}

/// Update Employee (partial)
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id", description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeView),
        (status = 400, description = "Invalid field or duplicate idNo"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn update_employee(
    _auth: AdminUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<UpdateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    let payload = payload.into_inner();

    let current = find_employee(pool.get_ref(), employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".into()))?;

    let id_no = match payload.id_no {
        Some(raw) => {
            let trimmed = raw.trim().to_string();
            if trimmed.is_empty() {
                return Err(ApiError::InvalidInput("idNo must not be empty".into()));
            }
            if id_no_taken(pool.get_ref(), &trimmed, Some(employee_id)).await? {
                return Err(ApiError::InvalidInput("Employee ID already in use".into()));
            }
            trimmed
        }
        None => current.id_no,
    };

    let salary_amount = match payload.salary_amount {
        Some(amount) => {
            validate_amount(amount)?;
            amount
        }
        None => current.salary_amount,
    };

    let password_hash = match payload.password {
        Some(Some(p)) if p.len() >= 4 => Some(hash_password(&p)?),
        Some(_) => None, // explicit null or too short clears the credential
        None => current.password,
    };

    let name = payload.name.unwrap_or(current.name);
    let role = payload.role.unwrap_or(current.role);
    let salary_type = payload.salary_type.unwrap_or(current.salary_type);

    sqlx::query(
        "UPDATE employees \
         SET id_no = ?, name = ?, role = ?, salary_type = ?, salary_amount = ?, password = ? \
         WHERE id = ?",
    )
    .bind(&id_no)
    .bind(&name)
    .bind(&role)
    .bind(salary_type)
    .bind(salary_amount)
    .bind(&password_hash)
    .bind(employee_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| ApiError::on_unique_violation(e, "Employee ID already in use"))?;

    let updated = find_employee(pool.get_ref(), employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".into()))?;

    Ok(HttpResponse::Ok().json(EmployeeView::from(updated)))
}

/// Delete Employee. Cascades to the employee's attendance records.
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id", description = "Employee ID")),
    responses(
        (status = 204, description = "Successfully deleted"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn delete_employee(
    _auth: AdminUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(employee_id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Employee not found".into()));
    }

    info!(employee_id, "Employee deleted");

    Ok(HttpResponse::NoContent().finish())
}
