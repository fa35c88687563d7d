//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access,
//! allowing different storage backends to be swapped without changing
//! the request handlers.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Song entity, filters and paging types
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLx/SQLite implementation

mod error;
mod models;
mod repository;
pub mod sqlite;
pub mod utils;


pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::{PoolSettings, SqliteDatabase};
