//! Communication module

pub mod email_addresses;
pub mod mailer;
