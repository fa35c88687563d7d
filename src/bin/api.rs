//! Song catalog API server binary.
//!
//! This binary creates the concrete database and metadata client and passes
//! them to the API server. The API layer remains agnostic of both.

use std::net::IpAddr;
use std::time::Duration;

use clap::Parser;
use miette::Diagnostic;
use song_catalog::api::{self, ApiError, Config};
use song_catalog::db::{Database, DbError, PoolSettings, SqliteDatabase};
use song_catalog::enrichment::{self, EnrichmentError, HttpMetadataClient};
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(song_catalog::binary::database))]
    Database(#[from] DbError),

    #[error("Metadata client error: {0}")]
    #[diagnostic(code(song_catalog::binary::enrichment))]
    Enrichment(#[from] EnrichmentError),

    #[error("API server error: {0}")]
    #[diagnostic(code(song_catalog::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser, Debug)]
#[command(name = "song-catalog")]
#[command(author, version, about = "Song catalog API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, env = "SERVER_IP", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// SQLite connection URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://songs.db")]
    database_url: String,

    /// Maximum number of pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value = "5")]
    max_connections: u32,

    /// Base URL of the song metadata API
    #[arg(long, env = "API_URL")]
    api_url: String,

    /// Metadata API request timeout in seconds
    #[arg(long, env = "API_TIMEOUT_SECS", default_value = "10")]
    api_timeout_secs: u64,
}

impl Cli {
    fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            ..PoolSettings::default()
        }
    }

    fn server_config(&self) -> Config {
        Config {
            host: self.host,
            port: self.port,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();

    enrichment::install_crypto_provider();
    api::init_tracing();

    info!(url = %cli.database_url, "Opening database");
    let db = SqliteDatabase::open(&cli.database_url, &cli.pool_settings()).await?;

    // Create tables before starting the server
    db.ensure_schema().await?;

    let metadata =
        HttpMetadataClient::new(&cli.api_url, Duration::from_secs(cli.api_timeout_secs))?;
    info!(api_url = %cli.api_url, "Metadata API configured");

    api::run(cli.server_config(), db, metadata).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_VARS: [&str; 6] = [
        "SERVER_IP",
        "PORT",
        "DATABASE_URL",
        "DB_MAX_CONNECTIONS",
        "API_URL",
        "API_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn cli_defaults() {
        clear_env();
        let cli = Cli::try_parse_from(["song-catalog", "--api-url", "http://localhost:8080"])
            .expect("Only the API URL is required");

        assert_eq!(cli.server_config(), Config::default());
        assert_eq!(cli.database_url, "sqlite://songs.db");
        assert_eq!(cli.api_timeout_secs, 10);
        assert_eq!(cli.pool_settings().max_connections, 5);
    }

    #[test]
    #[serial]
    fn cli_reads_environment() {
        clear_env();
        unsafe {
            std::env::set_var("API_URL", "http://env-metadata:7000");
            std::env::set_var("PORT", "4000");
        }

        let cli =
            Cli::try_parse_from(["song-catalog"]).expect("API_URL comes from the environment");
        assert_eq!(cli.api_url, "http://env-metadata:7000");
        assert_eq!(cli.port, 4000);

        clear_env();
    }

    #[test]
    #[serial]
    fn cli_requires_api_url() {
        clear_env();
        assert!(Cli::try_parse_from(["song-catalog"]).is_err());
    }

    #[test]
    fn cli_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "song-catalog",
            "--api-url",
            "http://metadata:9000",
            "--host",
            "127.0.0.1",
            "--port",
            "8081",
            "--database-url",
            "sqlite:///tmp/catalog.db",
            "--max-connections",
            "12",
            "--api-timeout-secs",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.host.to_string(), "127.0.0.1");
        assert_eq!(cli.port, 8081);
        assert_eq!(cli.database_url, "sqlite:///tmp/catalog.db");
        assert_eq!(cli.pool_settings().max_connections, 12);
        assert_eq!(cli.api_timeout_secs, 3);
    }

    #[test]
    fn cli_rejects_invalid_port() {
        let result = Cli::try_parse_from([
            "song-catalog",
            "--api-url",
            "http://localhost:8080",
            "--port",
            "not-a-port",
        ]);
        assert!(result.is_err());
    }
}
