//! OAuth2 (XOAUTH2) email service implementation
//!
//! The refresh token is exchanged for a fresh access token before every send; access tokens
//! are never cached.

use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;
use lettre::{
    transport::smtp::authentication::{Credentials, Mechanism},
    AsyncTransport,
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::mailer::{Delivery, Mailer, MailerError, Message};

use super::{build_message, smtp::describe, smtp::SMTPConfig};

/// OAuth2 client configuration
#[derive(Clone, Default, Debug, Parser)]
pub struct OAuthConfig {
    /// The OAuth2 client id
    #[clap(long, env = "OAUTH_CLIENT_ID")]
    pub client_id: Option<String>,

    /// The OAuth2 client secret
    #[clap(long, env = "OAUTH_CLIENT_SECRET")]
    pub client_secret: Option<String>,

    /// The redirect URI registered with the client
    #[clap(long, env = "OAUTH_REDIRECT_URI")]
    pub redirect_uri: Option<String>,

    /// The long-lived refresh token
    #[clap(long, env = "OAUTH_REFRESH_TOKEN")]
    pub refresh_token: Option<String>,

    /// The provider's token endpoint
    #[clap(
        long,
        env = "OAUTH_TOKEN_URL",
        default_value = "https://oauth2.googleapis.com/token"
    )]
    pub token_url: String,
}

/// Issues short-lived access tokens
#[async_trait]
pub trait AccessTokenProvider: Clone + Send + Sync + 'static {
    /// Obtain a fresh access token
    async fn access_token(&self) -> Result<String, MailerError>;
}

#[cfg(test)]
mock! {
    pub AccessTokenProvider {}

    impl Clone for AccessTokenProvider {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl AccessTokenProvider for AccessTokenProvider {
        async fn access_token(&self) -> Result<String, MailerError>;
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    error_description: Option<String>,
}

/// Exchanges a refresh token at the provider's token endpoint
#[derive(Debug, Clone)]
pub struct RefreshTokenExchange {
    client: Client,
    config: OAuthConfig,
}

impl RefreshTokenExchange {
    /// Creates a new exchange for `config`
    pub fn new(config: OAuthConfig) -> Result<Self, MailerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| MailerError::UnknownError(err.into()))?;

        Ok(Self { client, config })
    }
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, MailerError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(MailerError::MissingCredentials(name))
}

/// Interprets the token endpoint's reply
fn parse_token_response(status: StatusCode, body: &str) -> Result<String, MailerError> {
    if status.is_success() {
        let token: TokenResponse = serde_json::from_str(body).map_err(|err| {
            MailerError::Authorization(format!("unreadable token response: {err}"))
        })?;

        return Ok(token.access_token);
    }

    let reason = match serde_json::from_str::<TokenErrorResponse>(body) {
        Ok(TokenErrorResponse {
            error,
            error_description: Some(description),
        }) => format!("{error}: {description}"),
        Ok(TokenErrorResponse { error, .. }) => error,
        Err(_) => format!("token endpoint returned {status}"),
    };

    Err(MailerError::Authorization(reason))
}

#[async_trait]
impl AccessTokenProvider for RefreshTokenExchange {
    async fn access_token(&self) -> Result<String, MailerError> {
        let client_id = required(&self.config.client_id, "OAUTH_CLIENT_ID")?;
        let client_secret = required(&self.config.client_secret, "OAUTH_CLIENT_SECRET")?;
        let refresh_token = required(&self.config.refresh_token, "OAUTH_REFRESH_TOKEN")?;

        let mut params = vec![
            ("grant_type", "refresh_token"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token),
        ];

        if let Some(redirect_uri) = self.config.redirect_uri.as_deref() {
            params.push(("redirect_uri", redirect_uri));
        }

        debug!(token_url = %self.config.token_url, "requesting access token");

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|err| MailerError::Authorization(format!("token request failed: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| MailerError::Authorization(format!("token request failed: {err}")))?;

        parse_token_response(status, &body)
    }
}

/// SMTP mailer authenticating with XOAUTH2
#[derive(Debug, Clone)]
pub struct OAuthMailer<T>
where
    T: AccessTokenProvider,
{
    smtp: SMTPConfig,
    tokens: T,
}

impl<T> OAuthMailer<T>
where
    T: AccessTokenProvider,
{
    /// Create a new OAuth2 mailer
    pub fn new(smtp: SMTPConfig, tokens: T) -> Self {
        Self { smtp, tokens }
    }
}

#[async_trait]
impl<T> Mailer for OAuthMailer<T>
where
    T: AccessTokenProvider,
{
    async fn send(&self, message: &Message) -> Result<Delivery, MailerError> {
        let username = self.smtp.username()?;
        let access_token = self.tokens.access_token().await?;

        let transport = self
            .smtp
            .relay()?
            .credentials(Credentials::new(username.to_string(), access_token))
            .authentication(vec![Mechanism::Xoauth2])
            .build();

        let email = build_message(self.smtp.sender()?, message).await?;

        debug!(host = %self.smtp.host, "sending email over SMTP with XOAUTH2");

        let response = transport.send(email).await?;

        Ok(Delivery {
            provider_response: describe(&response),
        })
    }
}
