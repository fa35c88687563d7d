//! Errors raised while talking to the metadata API.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum EnrichmentError {
    #[error("Invalid metadata request: {message}")]
    #[diagnostic(
        code(song_catalog::enrichment::invalid_request),
        help("Check that API_URL is an absolute http(s) URL")
    )]
    InvalidRequest { message: String },

    #[error("Failed to build HTTP client: {message}")]
    #[diagnostic(code(song_catalog::enrichment::client))]
    Client { message: String },

    #[error("Failed to reach metadata API")]
    #[diagnostic(
        code(song_catalog::enrichment::transport),
        help("Is the metadata API running and reachable from this host?")
    )]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("Metadata API returned {status}: {body}")]
    #[diagnostic(code(song_catalog::enrichment::unexpected_status))]
    UnexpectedStatus { status: u16, body: String },

    #[error("Invalid response from metadata API: {message}")]
    #[diagnostic(code(song_catalog::enrichment::decode))]
    Decode { message: String },
}

impl From<reqwest::Error> for EnrichmentError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            EnrichmentError::InvalidRequest {
                message: e.to_string(),
            }
        } else if e.is_decode() {
            EnrichmentError::Decode {
                message: e.to_string(),
            }
        } else {
            EnrichmentError::Transport { source: e }
        }
    }
}

impl From<serde_json::Error> for EnrichmentError {
    fn from(e: serde_json::Error) -> Self {
        EnrichmentError::Decode {
            message: e.to_string(),
        }
    }
}
