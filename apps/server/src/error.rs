use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use moneyboard_core::errors::{AuthError, DatabaseError, Error as CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Internal(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Core(err.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Core(err.into())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Validation(_) | CoreError::InsufficientFunds(_) => StatusCode::BAD_REQUEST,
        CoreError::Auth(_) => StatusCode::UNAUTHORIZED,
        CoreError::NotFound(_) | CoreError::Database(DatabaseError::NotFound(_)) => {
            StatusCode::NOT_FOUND
        }
        CoreError::Conflict(_) | CoreError::Database(DatabaseError::UniqueViolation(_)) => {
            StatusCode::CONFLICT
        }
        CoreError::Database(_) | CoreError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(e) => core_status(e),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_status_mapping() {
        let cases = [
            (
                CoreError::Validation(ValidationError::MissingField("name".into())),
                StatusCode::BAD_REQUEST,
            ),
            (CoreError::InsufficientFunds("pot".into()), StatusCode::BAD_REQUEST),
            (CoreError::Auth(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED),
            (CoreError::NotFound("Pot 1".into()), StatusCode::NOT_FOUND),
            (CoreError::Conflict("dup".into()), StatusCode::CONFLICT),
            (
                CoreError::Database(DatabaseError::UniqueViolation("email".into())),
                StatusCode::CONFLICT,
            ),
            (
                CoreError::Database(DatabaseError::QueryFailed("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}
