#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Job application mailer server

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use resume_mailer::{
    domain::{applications::ApplicationServiceImpl, communication::mailer::Mailer},
    infrastructure::{
        email::{
            oauth::{OAuthMailer, RefreshTokenExchange},
            smtp::SMTPMailer,
            MailAuth, MailerConfig,
        },
        http::{state::AppState, HttpServer, HttpServerConfig},
        storage::local::{LocalFileStore, StorageConfig},
    },
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// Where uploads are stored
    #[clap(flatten)]
    pub storage: StorageConfig,

    /// The mail transport configuration
    #[clap(flatten)]
    pub mail: MailerConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    tokio::fs::create_dir_all(&args.storage.upload_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create upload directory {}",
                args.storage.upload_dir.display()
            )
        })?;

    match args.mail.auth {
        MailAuth::Password => {
            info!("sending mail with SMTP password authentication");

            let mailer = SMTPMailer::new(args.mail.smtp.clone())?;
            serve(mailer, &args).await
        }
        MailAuth::Oauth => {
            info!("sending mail with OAuth2 authentication");

            let tokens = RefreshTokenExchange::new(args.mail.oauth.clone())?;
            serve(OAuthMailer::new(args.mail.smtp.clone(), tokens), &args).await
        }
    }
}

#[mutants::skip]
async fn serve<M: Mailer>(mailer: M, args: &Args) -> Result<()> {
    let state = AppState::new(
        ApplicationServiceImpl::new(Arc::new(mailer)),
        LocalFileStore::new(&args.storage.upload_dir),
    );

    HttpServer::new(state, &args.storage.upload_dir, &args.server)?
        .run()
        .await
}
