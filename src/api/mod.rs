//! HTTP API for the song catalog.
//!
//! The router is generic over the storage backend and the metadata client.
//! The binary picks the concrete implementations and hands them to [`run`].

mod handlers;
mod routes;
mod state;


use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use miette::Diagnostic;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;
use crate::enrichment::MetadataApi;

pub use routes::{ApiDoc, create_router};
pub use state::AppState;

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
        }
    }
}

impl Config {
    /// Socket address the server listens on.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Errors that stop the API server.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}")]
    #[diagnostic(
        code(song_catalog::api::bind),
        help("Is another process already listening on this port?")
    )]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(song_catalog::api::serve))]
    Serve(#[source] std::io::Error),
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "song_catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server with the given configuration
pub async fn run<D, M>(config: Config, db: D, metadata: M) -> Result<(), ApiError>
where
    D: Database,
    M: MetadataApi + 'static,
{
    let state = AppState::new(db, metadata);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ApiError::Bind { addr, source })?;
    info!("API server listening on http://{}", addr);
    info!("API documentation at http://{}/docs", addr);

    axum::serve(listener, app).await.map_err(ApiError::Serve)?;
    Ok(())
}
