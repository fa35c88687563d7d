//! HTTP handlers and the mapping from domain errors to responses.

mod songs;
mod system;


use axum::{Json, http::StatusCode};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::db::DbError;
use crate::enrichment::EnrichmentError;

pub use songs::*;
pub use system::*;

/// Error response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Entity not found: Group with id 'Muse'")]
    pub error: String,
}

/// Error half of every handler result.
pub type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a storage error to its HTTP status.
pub(crate) fn db_error(e: DbError) -> HandlerError {
    let status = match &e {
        DbError::NotFound { .. } => StatusCode::NOT_FOUND,
        DbError::MalformedInput { .. } => StatusCode::BAD_REQUEST,
        DbError::Constraint { .. }
        | DbError::OutOfRange { .. }
        | DbError::Database { .. }
        | DbError::Connection { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error!(status = status.as_u16(), error = %e, "Storage operation failed");
    error_response(status, e.to_string())
}

/// Map a metadata API error to its HTTP status.
pub(crate) fn enrichment_error(e: EnrichmentError) -> HandlerError {
    let status = match &e {
        EnrichmentError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
        EnrichmentError::Client { .. }
        | EnrichmentError::Transport { .. }
        | EnrichmentError::UnexpectedStatus { .. }
        | EnrichmentError::Decode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error!(status = status.as_u16(), error = %e, "Failed to get additional song data");
    error_response(status, e.to_string())
}

/// Map a body or query extraction failure to 400.
pub(crate) fn bad_request(e: impl std::fmt::Display) -> HandlerError {
    error!(error = %e, "Rejected malformed request");
    error_response(StatusCode::BAD_REQUEST, e.to_string())
}
