use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Request-level error taxonomy. Every failure a handler can produce maps to
/// exactly one variant, and every variant maps to exactly one status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "request failed");

            let mut body = json!({ "message": "Internal server error" });
            if cfg!(debug_assertions) {
                body["detail"] = json!(self.to_string());
            }
            return HttpResponse::build(status).json(body);
        }

        HttpResponse::build(status).json(json!({ "message": self.to_string() }))
    }
}

impl ApiError {
    /// Duplicate-key races surface as store-level unique violations; they are
    /// client errors, not server faults.
    pub fn on_unique_violation(err: sqlx::Error, message: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ApiError::InvalidInput(message.to_string())
            }
            _ => ApiError::from(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_are_fixed_per_variant() {
        assert_eq!(
            ApiError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthenticated("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn client_errors_expose_their_message() {
        let err = ApiError::NotFound("Employee not found".into());
        assert_eq!(err.to_string(), "Employee not found");
    }
}
