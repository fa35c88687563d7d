//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//! Returned futures are `Send` so that generic axum handlers can hold them.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{NewSong, PageRequest, Song, SongFilter, SongPatch},
};

/// Repository for Group operations.
pub trait GroupRepository: Send + Sync {
    /// Look up a group id by name.
    fn find_id(&self, name: &str) -> impl Future<Output = DbResult<Option<i64>>> + Send;

    /// Look up a group id by name, failing with `NotFound` when absent.
    fn resolve_id(&self, name: &str) -> impl Future<Output = DbResult<i64>> + Send;

    /// Look up a group id by name, creating the group when absent.
    fn get_or_create(&self, name: &str) -> impl Future<Output = DbResult<i64>> + Send;
}

/// Repository for Song operations.
pub trait SongRepository: Send + Sync {
    /// Insert a song, creating its group on first use.
    fn insert(&self, song: &NewSong) -> impl Future<Output = DbResult<()>> + Send;

    /// Delete a song. Deleting a missing song of an existing group succeeds.
    fn delete(&self, group: &str, song: &str) -> impl Future<Output = DbResult<()>> + Send;

    /// Overwrite the supplied fields of a song. An empty patch is a no-op.
    fn edit(
        &self,
        group: &str,
        song: &str,
        patch: &SongPatch,
    ) -> impl Future<Output = DbResult<()>> + Send;

    /// List one page of songs matching the filter.
    fn list(
        &self,
        filter: &SongFilter,
        page: PageRequest,
    ) -> impl Future<Output = DbResult<Vec<Song>>> + Send;

    /// Get the 1-based couplet of a song's lyrics.
    fn couplet(
        &self,
        group: &str,
        song: &str,
        index: i64,
    ) -> impl Future<Output = DbResult<String>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync + 'static {
    type Groups<'a>: GroupRepository
    where
        Self: 'a;
    type Songs<'a>: SongRepository
    where
        Self: 'a;

    /// Create the schema if it does not exist yet.
    fn ensure_schema(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the group repository.
    fn groups(&self) -> Self::Groups<'_>;

    /// Get the song repository.
    fn songs(&self) -> Self::Songs<'_>;
}
