//! Errors returned by the account and message services.
//!
//! Every variant maps to a bare status code: validation failures are 400,
//! a failed login is 401, storage trouble is 500. No response carries a body.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chirp_types::{MAX_MESSAGE_LEN, MIN_PASSWORD_LEN};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("username must not be empty")]
    InvalidUsername,

    #[error("password must be at least {min} characters", min = MIN_PASSWORD_LEN)]
    InvalidPassword,

    #[error("username is already taken")]
    UserAlreadyExists,

    #[error("username or password is incorrect")]
    InvalidLogin,

    #[error("message text must be 1 to {max} characters", max = MAX_MESSAGE_LEN)]
    InvalidMessageText,

    #[error("no account with id {0}")]
    InvalidUserId(i64),

    #[error("no message with id {0}")]
    InvalidMessageId(i64),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::InvalidLogin => StatusCode::UNAUTHORIZED,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match &self {
            ServiceError::Storage(e) => error!("Storage failure: {:#}", e),
            other => debug!("Rejected request: {}", other),
        }

        self.status().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_failure_is_unauthorized() {
        assert_eq!(ServiceError::InvalidLogin.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn validation_failures_are_bad_request() {
        let errors = [
            ServiceError::InvalidUsername,
            ServiceError::InvalidPassword,
            ServiceError::UserAlreadyExists,
            ServiceError::InvalidMessageText,
            ServiceError::InvalidUserId(3),
            ServiceError::InvalidMessageId(9),
            ServiceError::MalformedBody("expected value".into()),
        ];

        for err in errors {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{err}");
        }
    }

    #[test]
    fn storage_failure_is_internal() {
        let err = ServiceError::from(anyhow::anyhow!("disk full"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "storage error: disk full");
    }
}
