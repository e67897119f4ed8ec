//! Job applications: validating the form and dispatching the email

mod errors;
mod form;
mod letter;
mod service;

pub use errors::{ApplicationError, ValidationError};
pub use form::{ApplicationForm, ApplicationRequest};
pub use letter::{compose_message, ApplicationLetterTemplate};
pub use service::{ApplicationService, ApplicationServiceImpl};

#[cfg(test)]
pub(crate) mod tests {
    pub use super::service::MockApplicationService;
}
