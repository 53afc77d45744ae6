use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the salary aggregator and the handlers built on it.
#[derive(Debug, Error)]
pub enum SalaryError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    Internal(&'static str),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl SalaryError {
    pub fn employee_not_found(id: u64) -> Self {
        SalaryError::NotFound {
            entity: "Employee",
            id,
        }
    }

    pub fn adjustment_not_found(id: u64) -> Self {
        SalaryError::NotFound {
            entity: "Salary adjustment",
            id,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        SalaryError::Validation(message.into())
    }

    /// Short machine-readable label, used in bulk reports.
    pub fn kind(&self) -> &'static str {
        match self {
            SalaryError::NotFound { .. } => "not_found",
            SalaryError::Validation(_) => "validation",
            SalaryError::Unauthorized(_) => "unauthorized",
            SalaryError::Forbidden(_) => "forbidden",
            SalaryError::Storage(_) => "storage",
            SalaryError::Internal(_) => "internal",
        }
    }

    /// Message safe to show to an API caller.
    pub fn public_message(&self) -> String {
        match self {
            SalaryError::Storage(_) | SalaryError::Internal(_) => {
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl ResponseError for SalaryError {
    fn status_code(&self) -> StatusCode {
        match self {
            SalaryError::NotFound { .. } => StatusCode::NOT_FOUND,
            SalaryError::Validation(_) => StatusCode::BAD_REQUEST,
            SalaryError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            SalaryError::Forbidden(_) => StatusCode::FORBIDDEN,
            SalaryError::Storage(_) | SalaryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            SalaryError::Storage(e) => tracing::error!(error = %e, "Salary storage failure"),
            SalaryError::Internal(e) => tracing::error!(error = %e, "Internal failure"),
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(json!({
            "message": self.public_message()
        }))
    }
}
