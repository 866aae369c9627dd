use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("no token, authorization denied")]
    MissingToken,
    #[error("token is not valid")]
    InvalidToken,
    #[error("product not found: {0}")]
    ProductNotFound(Uuid),
    #[error("product id already in use: {0}")]
    DuplicateProductId(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_)
            | DomainError::UserAlreadyExists
            | DomainError::InvalidCredentials
            | DomainError::DuplicateProductId(_) => StatusCode::BAD_REQUEST,
            DomainError::MissingToken | DomainError::InvalidToken => StatusCode::UNAUTHORIZED,
            DomainError::ProductNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Internal detail goes to the log at the failure site, never to the client.
        let body = match self {
            DomainError::Validation(errors) => json!({ "errors": errors }),
            DomainError::UserAlreadyExists => json!({ "msg": "User already exists" }),
            DomainError::InvalidCredentials => json!({ "msg": "Invalid credentials" }),
            DomainError::MissingToken => json!({ "msg": "No token, authorization denied" }),
            DomainError::InvalidToken => json!({ "msg": "Token is not valid" }),
            DomainError::ProductNotFound(_) => json!({ "msg": "Product not found" }),
            DomainError::DuplicateProductId(_) => json!({ "msg": "Product ID already in use" }),
            DomainError::Internal(_) => json!({ "error": "Server error" }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<mongodb::error::Error> for DomainError {
    fn from(err: mongodb::error::Error) -> Self {
        DomainError::Internal(format!("database error: {}", err))
    }
}
