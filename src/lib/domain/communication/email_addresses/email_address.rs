//! Email Address

use std::fmt;

use lettre::message::Mailbox;
use thiserror::Error;

use EmailAddressError::*;

/// An error that can occur when creating an email address
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailAddressError {
    /// The email address is empty
    #[error("email is empty")]
    EmptyEmailAddress,

    /// The email address is invalid
    #[error("email \"{0}\" is invalid")]
    InvalidEmailAddress(String),
}

/// An email address, optionally carrying a display name (`Dana Scully <dana@example.com>`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailAddress(Mailbox);

impl EmailAddress {
    /// Create a new email address from a bare address or a mailbox
    pub fn new(raw: &str) -> Result<Self, EmailAddressError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(EmptyEmailAddress);
        }

        trimmed
            .parse::<Mailbox>()
            .map(Self)
            .map_err(|_| InvalidEmailAddress(trimmed.to_string()))
    }

    /// Parse a comma-separated list of addresses, skipping empty entries.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, EmailAddressError> {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(Self::new)
            .collect()
    }

    /// The bare address, without any display name
    pub fn address(&self) -> &str {
        self.0.email.as_ref()
    }

    /// The address as a lettre mailbox
    pub fn mailbox(&self) -> &Mailbox {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
