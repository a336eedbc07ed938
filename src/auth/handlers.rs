use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::{
    auth::{
        jwt::{generate_admin_token, generate_employee_token},
        password::{hash_password, verify_password},
    },
    config::Config,
    error::ApiError,
    model::{
        employee::{Employee, EmployeeRef},
        user::{User, UserView},
    },
};

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLoginRequest {
    pub id_no: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserView,
    pub token: String,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeAuthResponse {
    pub employee: EmployeeRef,
    pub token: String,
}

/// Admin registration
pub async fn register(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();

    if payload.name.trim().is_empty() || payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::InvalidInput(
            "Name, email and password are required".into(),
        ));
    }

    let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
        .bind(&payload.email)
        .fetch_one(pool.get_ref())
        .await?;
    if taken {
        return Err(ApiError::InvalidInput("Email already in use".into()));
    }

    let hashed = hash_password(&payload.password)?;

    let result = sqlx::query("INSERT INTO users (name, email, password) VALUES (?, ?, ?)")
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&hashed)
        .execute(pool.get_ref())
        .await
        .map_err(|e| ApiError::on_unique_violation(e, "Email already in use"))?;

    let user_id = result.last_insert_rowid();
    let token = generate_admin_token(
        user_id,
        payload.email.clone(),
        &config.jwt_secret,
        config.admin_token_ttl,
    );

    info!(user_id, "Admin account registered");

    Ok(HttpResponse::Created().json(AuthResponse {
        user: UserView {
            id: user_id,
            name: payload.name,
            email: payload.email,
        },
        token,
    }))
}

/// Admin login
#[instrument(
    name = "auth_login",
    skip(pool, config, payload),
    fields(email = %payload.email)
)]
pub async fn login(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::InvalidInput("Email and password are required".into()));
    }

    debug!("Fetching user from database");

    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password, created_at FROM users WHERE email = ?",
    )
    .bind(&payload.email)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| ApiError::Unauthenticated("Invalid credentials".into()))?;

    if !verify_password(&payload.password, &user.password) {
        info!("Invalid credentials: password mismatch");
        return Err(ApiError::Unauthenticated("Invalid credentials".into()));
    }

    let token = generate_admin_token(
        user.id,
        user.email.clone(),
        &config.jwt_secret,
        config.admin_token_ttl,
    );

    info!(user_id = user.id, "Login successful");

    Ok(HttpResponse::Ok().json(AuthResponse {
        user: UserView::from(user),
        token,
    }))
}

/// Employee self-service login, keyed by idNo. Employees without a stored
/// credential cannot log in.
#[instrument(
    name = "auth_employee_login",
    skip(pool, config, payload),
    fields(id_no = %payload.id_no)
)]
pub async fn employee_login(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    payload: web::Json<EmployeeLoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let id_no = payload.id_no.trim();

    if id_no.is_empty() || payload.password.is_empty() {
        return Err(ApiError::InvalidInput(
            "Employee ID and password are required".into(),
        ));
    }

    let employee = sqlx::query_as::<_, Employee>(
        "SELECT id, id_no, name, role, salary_type, salary_amount, password, created_at \
         FROM employees WHERE id_no = ?",
    )
    .bind(id_no)
    .fetch_optional(pool.get_ref())
    .await?;

    let employee = match employee {
        Some(emp) if emp.password.is_some() => emp,
        _ => return Err(ApiError::Unauthenticated("Invalid credentials".into())),
    };

    let hashed = employee.password.as_deref().unwrap_or_default();
    if !verify_password(&payload.password, hashed) {
        info!("Invalid credentials: password mismatch");
        return Err(ApiError::Unauthenticated("Invalid credentials".into()));
    }

    let token = generate_employee_token(
        employee.id,
        employee.id_no.clone(),
        &config.jwt_secret,
        config.employee_token_ttl,
    );

    info!(employee_id = employee.id, "Employee login successful");

    Ok(HttpResponse::Ok().json(EmployeeAuthResponse {
        employee: EmployeeRef::from(employee),
        token,
    }))
}
