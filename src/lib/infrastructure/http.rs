//! HTTP Server

use std::{
    net::{Ipv4Addr, SocketAddr, TcpListener},
    path::Path,
    time::Duration,
};

use anyhow::Context;
use axum::{
    extract::{DefaultBodyLimit, Request},
    routing::{get, post},
    Json, Router,
};
use axum_server::Handle;
use clap::Parser;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};
use tracing::{debug, info, info_span};
use utoipa::OpenApi;

use crate::domain::{applications::ApplicationService, uploads::FileStore};

use self::{handlers::panic_handler, open_api::ApiDocs, state::AppState};

pub mod errors;
pub mod handlers;
pub mod open_api;
pub mod state;

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct HttpServerConfig {
    /// The port to listen on
    #[arg(short, long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value = "10485760")]
    pub max_upload_bytes: usize,
}

/// The application's HTTP server
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    /// Returns a new HTTP server bound to the port specified in `config`.
    pub fn new<A, S>(
        state: AppState<A, S>,
        uploads_dir: &Path,
        config: &HttpServerConfig,
    ) -> anyhow::Result<Self>
    where
        A: ApplicationService,
        S: FileStore,
    {
        let router = router(state, uploads_dir, config.max_upload_bytes);

        let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
        let listener = TcpListener::bind(address)
            .with_context(|| format!("failed to listen on {}", config.port))?;
        listener
            .set_nonblocking(true)
            .context("failed to configure listener")?;

        Ok(Self { router, listener })
    }

    /// Runs the HTTP server until a shutdown signal arrives.
    #[mutants::skip]
    pub async fn run(self) -> anyhow::Result<()> {
        info!(
            "Server running on http://localhost:{}",
            self.listener
                .local_addr()
                .context("failed to get local address")?
                .port()
        );

        let handle = Handle::new();

        let server = axum_server::from_tcp(self.listener)
            .handle(handle.clone())
            .serve(self.router.into_make_service());

        tokio::select! {
            result = server => result.context("server error")?,
            _ = shutdown_signal(Some(handle)) => {
                info!("Shutting down HTTP server");
            }
        }

        Ok(())
    }
}

/// Create the application's router
pub fn router<A, S>(state: AppState<A, S>, uploads_dir: &Path, max_upload_bytes: usize) -> Router
where
    A: ApplicationService,
    S: FileStore,
{
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        let uri = request.uri().to_string();
        info_span!("http_request", method = ?request.method(), uri)
    });

    Router::new()
        .route("/", get(handlers::greeting::handler))
        .route("/send-email", post(handlers::send_email::handler::<A, S>))
        .route("/openapi.json", get(Json(ApiDocs::openapi())))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(panic_handler))
        .layer(trace_layer)
        .with_state(state)
}

#[mutants::skip]
async fn shutdown_signal(handle: Option<Handle>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install signal handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    if let Some(handle) = handle {
        debug!("shutting down gracefully");
        handle.graceful_shutdown(Some(Duration::from_secs(10)));
    }
}
