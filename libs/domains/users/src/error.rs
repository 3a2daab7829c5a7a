use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User {0} not found")]
    NotFound(i64),

    #[error("User with login name '{0}' not found")]
    NameNotFound(String),

    #[error("User with login name '{0}' already exists")]
    DuplicateName(String),

    #[error("User with email address '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses.
///
/// This is the single mapping from domain failures to HTTP statuses:
/// not-found → 404, duplication → 409, validation → 400, everything
/// else → 500.
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            UserError::NameNotFound(name) => {
                AppError::NotFound(format!("User with login name '{}' not found", name))
            }
            UserError::DuplicateName(name) => {
                AppError::Conflict(format!("User with login name '{}' already exists", name))
            }
            UserError::DuplicateEmail(email) => {
                AppError::Conflict(format!("User with email address '{}' already exists", email))
            }
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
