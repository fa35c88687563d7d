//! SQLite implementation of the database traits.
//!
//! This module provides a SQLx/SQLite-backed implementation of the repository
//! traits defined in the parent module.

mod connection;
mod group;
pub mod query;
mod song;


pub use connection::{PoolSettings, SqliteDatabase};
pub use group::SqliteGroupRepository;
pub use song::SqliteSongRepository;
