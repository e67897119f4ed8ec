//! Email transports

use clap::{Parser, ValueEnum};
use lettre::message::{header::ContentType, Attachment, MultiPart, SinglePart};

use crate::domain::communication::mailer::{Message, MailerError};

pub mod oauth;
pub mod smtp;

/// How the mailer authenticates against the provider
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MailAuth {
    /// Static username and password
    #[default]
    Password,

    /// OAuth2 refresh token exchanged for an access token before each send
    Oauth,
}

/// Mail configuration
#[derive(Clone, Debug, Parser)]
pub struct MailerConfig {
    /// Which authorization flow to use
    #[arg(long, env = "MAIL_AUTH", value_enum, default_value_t = MailAuth::Password)]
    pub auth: MailAuth,

    /// SMTP connection settings
    #[clap(flatten)]
    pub smtp: smtp::SMTPConfig,

    /// OAuth2 client settings
    #[clap(flatten)]
    pub oauth: oauth::OAuthConfig,
}

/// Builds the wire message for `message`, reading attachments from disk.
pub(crate) async fn build_message(
    sender: &str,
    message: &Message,
) -> Result<lettre::Message, MailerError> {
    let from = match &message.from {
        Some(from) => from.mailbox().clone(),
        None => sender.parse()?,
    };

    let mut builder = lettre::Message::builder()
        .from(from)
        .subject(message.subject.clone());

    for to in &message.to {
        builder = builder.to(to.mailbox().clone());
    }

    for cc in &message.cc {
        builder = builder.cc(cc.mailbox().clone());
    }

    for bcc in &message.bcc {
        builder = builder.bcc(bcc.mailbox().clone());
    }

    let mut body = MultiPart::mixed().singlepart(SinglePart::plain(message.body.clone()));

    for attachment in &message.attachments {
        let bytes = tokio::fs::read(&attachment.path)
            .await
            .map_err(|source| MailerError::Attachment {
                path: attachment.path.clone(),
                source,
            })?;

        body = body.singlepart(
            Attachment::new(attachment.filename.clone())
                .body(bytes, ContentType::parse(attachment.content_type())?),
        );
    }

    Ok(builder.multipart(body)?)
}
