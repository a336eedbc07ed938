use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};

use crate::auth::jwt::{Claims, TokenRole, verify_token};
use crate::config::Config;
use crate::error::ApiError;

/// Authenticated admin principal. Rejects a missing or bad token with 401
/// and a valid employee-role token with 403.
pub struct AdminUser {
    pub user_id: i64,
    pub email: String,
}

/// Authenticated employee principal, the mirror image of [`AdminUser`].
pub struct EmployeeUser {
    pub employee_id: i64,
    pub id_no: String,
}

fn claims_from_request(req: &HttpRequest) -> Result<Claims, ApiError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthenticated("Authorization token missing".into()))?;

    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| ApiError::Internal("App config missing".into()))?;

    verify_token(token, &config.jwt_secret)
        .map_err(|_| ApiError::Unauthenticated("Invalid or expired token".into()))
}

impl FromRequest for AdminUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(claims_from_request(req).and_then(|claims| {
            if claims.role != TokenRole::Admin {
                return Err(ApiError::Forbidden("Admin access required".into()));
            }
            match (claims.user_id, claims.email) {
                (Some(user_id), Some(email)) => Ok(AdminUser { user_id, email }),
                _ => Err(ApiError::Unauthenticated("Invalid token claims".into())),
            }
        }))
    }
}

impl FromRequest for EmployeeUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(claims_from_request(req).and_then(|claims| {
            if claims.role != TokenRole::Employee {
                return Err(ApiError::Forbidden("Employee access required".into()));
            }
            match (claims.employee_id, claims.id_no) {
                (Some(employee_id), Some(id_no)) => Ok(EmployeeUser { employee_id, id_no }),
                _ => Err(ApiError::Unauthenticated("Invalid token claims".into())),
            }
        }))
    }
}
