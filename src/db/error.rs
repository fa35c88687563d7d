//! Database error types.
//!
//! This module provides abstracted error types for database operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic.

use miette::Diagnostic;
use thiserror::Error;

use crate::lyrics::CoupletOutOfRange;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(song_catalog::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Constraint violation: {message}")]
    #[diagnostic(code(song_catalog::db::constraint))]
    Constraint { message: String },

    #[error("There is no couplet {index} (song has {available})")]
    #[diagnostic(
        code(song_catalog::db::out_of_range),
        help("Couplets are numbered from 1")
    )]
    OutOfRange { index: i64, available: usize },

    #[error("Malformed input: {message}")]
    #[diagnostic(code(song_catalog::db::malformed_input))]
    MalformedInput { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(song_catalog::db::database_error))]
    Database { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(song_catalog::db::connection_error))]
    Connection { message: String },
}

impl DbError {
    pub(crate) fn not_found(entity_type: &str, id: &str) -> Self {
        DbError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => DbError::Constraint {
                message: db.message().to_string(),
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DbError::Connection {
                    message: e.to_string(),
                }
            }
            _ => DbError::Database {
                message: e.to_string(),
            },
        }
    }
}

impl From<CoupletOutOfRange> for DbError {
    fn from(e: CoupletOutOfRange) -> Self {
        DbError::OutOfRange {
            index: e.index,
            available: e.available,
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
