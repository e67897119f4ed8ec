//! SMTP email service implementation

use async_trait::async_trait;
use clap::Parser;
use lettre::{
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
        response::Response,
        AsyncSmtpTransportBuilder,
    },
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};
use tracing::debug;

use crate::domain::communication::mailer::{Delivery, Mailer, MailerError, Message};

use super::build_message;

/// SMTP configuration
#[derive(Clone, Default, Debug, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[clap(
        id = "smtp_host",
        long = "smtp-host",
        env = "SMTP_HOST",
        default_value = "smtp.gmail.com"
    )]
    pub host: String,

    /// The SMTP port
    #[clap(
        id = "smtp_port",
        long = "smtp-port",
        env = "SMTP_PORT",
        default_value = "587"
    )]
    pub port: u16,

    /// The SMTP username, also used as the OAuth2 account
    #[clap(long, env = "SMTP_USER")]
    pub username: Option<String>,

    /// The SMTP password
    #[clap(long, env = "SMTP_PASSWORD")]
    pub password: Option<String>,

    /// The sender email address, defaults to the username
    #[clap(long, env = "SMTP_SENDER")]
    pub sender: Option<String>,

    /// Verify the TLS certificate
    #[clap(long, env = "SMTP_VERIFY_TLS", default_value = "true")]
    pub verify_tls: bool,

    /// Enable STARTTLS (TLS upgrade on connection)
    #[clap(long, env = "SMTP_STARTTLS", default_value = "true")]
    pub starttls: bool,
}

impl SMTPConfig {
    /// The configured account name
    pub fn username(&self) -> Result<&str, MailerError> {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(MailerError::MissingCredentials("SMTP_USER"))
    }

    /// The address mail is sent from
    pub fn sender(&self) -> Result<&str, MailerError> {
        match self.sender.as_deref().filter(|s| !s.is_empty()) {
            Some(sender) => Ok(sender),
            None => self.username(),
        }
    }

    /// A transport builder for the configured relay, without credentials
    pub(crate) fn relay(&self) -> Result<AsyncSmtpTransportBuilder, MailerError> {
        let relay = if self.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)?
        };

        let parameters = TlsParameters::builder(self.host.to_string())
            .dangerous_accept_invalid_certs(!self.verify_tls)
            .build()?;

        let tls = if self.starttls {
            Tls::Required(parameters)
        } else {
            Tls::Wrapper(parameters)
        };

        Ok(relay.port(self.port).tls(tls))
    }
}

/// Flattens an SMTP response into a single line, e.g. `250 2.0.0 OK`
pub(crate) fn describe(response: &Response) -> String {
    let text = response.message().collect::<Vec<_>>().join(" ");

    format!("{} {}", response.code(), text)
}

/// SMTP mailer authenticating with a static username and password
#[derive(Clone)]
pub struct SMTPMailer {
    config: SMTPConfig,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl std::fmt::Debug for SMTPMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SMTPMailer")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("username", &self.config.username)
            .field("configured", &self.transport.is_some())
            .finish()
    }
}

impl SMTPMailer {
    /// Create a new SMTP mailer.
    ///
    /// The transport is built once and reused. If the username or password is missing the
    /// mailer is still created, but every send fails with
    /// [`MailerError::MissingCredentials`].
    pub fn new(config: SMTPConfig) -> Result<Self, MailerError> {
        let transport = match (config.username(), config.password.as_deref()) {
            (Ok(username), Some(password)) if !password.is_empty() => Some(
                config
                    .relay()?
                    .credentials(Credentials::new(username.to_string(), password.to_string()))
                    .build(),
            ),
            _ => None,
        };

        Ok(Self { config, transport })
    }
}

#[async_trait]
impl Mailer for SMTPMailer {
    async fn send(&self, message: &Message) -> Result<Delivery, MailerError> {
        let transport = match &self.transport {
            Some(transport) => transport,
            None => {
                self.config.username()?;
                return Err(MailerError::MissingCredentials("SMTP_PASSWORD"));
            }
        };

        let email = build_message(self.config.sender()?, message).await?;

        debug!(host = %self.config.host, "sending email over SMTP");

        let response = transport.send(email).await?;

        Ok(Delivery {
            provider_response: describe(&response),
        })
    }
}
