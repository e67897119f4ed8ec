//! Mail transport capability

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

mod errors;
mod message;

pub use errors::MailerError;
pub use message::{Attachment, Delivery, Message};

/// Something that can deliver a composed [`Message`]
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Send an email
    ///
    /// Implementations make exactly one delivery attempt.
    ///
    /// # Arguments
    /// * `message` - The [`Message`] to deliver, attachments included.
    ///
    /// # Returns
    /// - [`Ok`] with the provider's [`Delivery`] receipt.
    /// - [`Err`] with a [`MailerError`] if the provider could not be reached, refused the
    ///   credentials or rejected the message.
    async fn send(&self, message: &Message) -> Result<Delivery, MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn send(&self, message: &Message) -> Result<Delivery, MailerError>;
    }
}
