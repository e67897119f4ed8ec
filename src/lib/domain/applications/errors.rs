//! Application dispatch errors

use thiserror::Error;
use tracing::debug;

use crate::domain::communication::{email_addresses::EmailAddressError, mailer::MailerError};

/// The submitted form cannot be turned into an application
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields (or the resume) are absent
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// An address field does not hold a valid email address
    #[error("{field} is not a valid email address")]
    InvalidEmailAddress {
        /// The offending form field
        field: &'static str,

        /// Why the address was rejected
        #[source]
        source: EmailAddressError,
    },
}

/// Errors that can occur when sending an application
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The form was incomplete or malformed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The mail provider could not deliver the message
    #[error("could not send application email")]
    Transport(#[source] MailerError),
}

impl From<MailerError> for ApplicationError {
    fn from(err: MailerError) -> Self {
        debug!("MailerError -> ApplicationError");

        ApplicationError::Transport(err)
    }
}
