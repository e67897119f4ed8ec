//! API error-handling module

use std::fmt;

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::domain::{
    applications::{ApplicationError, ValidationError},
    uploads::StorageError,
};

/// Returned when a required field or the resume is missing
pub const MISSING_FIELDS_MESSAGE: &str = "All fields are required, including a resume.";

/// Returned when an address field is malformed
pub const INVALID_EMAIL_MESSAGE: &str = "Please provide a valid email address";

/// Returned when the mail provider fails
pub const SEND_FAILED_MESSAGE: &str = "Failed to send email. Please try again later.";

/// Returned when the resume cannot be written to disk
pub const STORAGE_FAILED_MESSAGE: &str = "Failed to store resume. Please try again later.";

/// An error raised in the API
#[derive(Debug, PartialEq, Eq)]
pub struct ApiError {
    /// The status code
    pub status: StatusCode,

    /// The error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    /// Create a new bad request error
    pub fn new_400(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create a new unprocessable entity error
    pub fn new_422(message: &str) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    /// Create new internal server error
    pub fn new_500(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Validation(ValidationError::MissingFields(_)) => {
                ApiError::new_400(MISSING_FIELDS_MESSAGE)
            }
            ApplicationError::Validation(ValidationError::InvalidEmailAddress { .. }) => {
                ApiError::new_422(INVALID_EMAIL_MESSAGE)
            }
            // logged by the application service
            ApplicationError::Transport(_) => ApiError::new_500(SEND_FAILED_MESSAGE),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        error!("failed to store upload: {err:#}");

        ApiError::new_500(STORAGE_FAILED_MESSAGE)
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::new(rejection.status(), &rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::new(err.status(), &err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use testresult::TestResult;

    use crate::domain::communication::{email_addresses::EmailAddressError, mailer::MailerError};

    use super::*;

    #[tokio::test]
    async fn test_error_response_is_plain_text() -> TestResult {
        let response = ApiError::new_500("Internal server error").into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await?;

        assert_eq!(body, "Internal server error");

        Ok(())
    }

    #[test]
    fn test_missing_fields_is_bad_request() {
        let err = ApplicationError::Validation(ValidationError::MissingFields(vec!["resume"]));

        assert_eq!(ApiError::from(err), ApiError::new_400(MISSING_FIELDS_MESSAGE));
    }

    #[test]
    fn test_invalid_address_is_unprocessable() {
        let err = ApplicationError::Validation(ValidationError::InvalidEmailAddress {
            field: "emailTo",
            source: EmailAddressError::EmptyEmailAddress,
        });

        assert_eq!(ApiError::from(err), ApiError::new_422(INVALID_EMAIL_MESSAGE));
    }

    #[test]
    fn test_transport_failure_hides_details() {
        let err = ApplicationError::Transport(MailerError::Authorization(
            "invalid_grant: secret detail".to_string(),
        ));

        let api_error = ApiError::from(err);

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.message, SEND_FAILED_MESSAGE);
    }

    #[test]
    fn test_storage_failure() {
        let err = StorageError::Write {
            path: PathBuf::from("uploads/x"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };

        assert_eq!(ApiError::from(err), ApiError::new_500(STORAGE_FAILED_MESSAGE));
    }
}
