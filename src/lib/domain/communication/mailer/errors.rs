//! Mailer errors

use std::path::PathBuf;

use lettre::{address::AddressError, message::header::ContentTypeErr};
use thiserror::Error;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// Credentials required by the transport are not configured
    #[error("mail credentials are not configured: missing {0}")]
    MissingCredentials(&'static str),

    /// The provider refused to authorize the sender
    #[error("authorization failed: {0}")]
    Authorization(String),

    /// Invalid email address
    #[error("Invalid email address")]
    InvalidEmail,

    /// An attachment could not be read from disk
    #[error("could not read attachment {}", path.display())]
    Attachment {
        /// Path of the attachment
        path: PathBuf,

        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The SMTP exchange failed
    #[error(transparent)]
    Transport(#[from] lettre::transport::smtp::Error),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        MailerError::UnknownError(err)
    }
}

impl From<AddressError> for MailerError {
    fn from(_err: AddressError) -> Self {
        MailerError::InvalidEmail
    }
}

impl From<lettre::error::Error> for MailerError {
    fn from(err: lettre::error::Error) -> Self {
        MailerError::UnknownError(err.into())
    }
}

impl From<ContentTypeErr> for MailerError {
    fn from(err: ContentTypeErr) -> Self {
        MailerError::UnknownError(err.into())
    }
}
