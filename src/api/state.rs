//! Application state for the API server.

use std::sync::Arc;

use crate::db::Database;
use crate::enrichment::MetadataApi;

/// Shared application state.
///
/// Generic over `D: Database` and `M: MetadataApi` so tests can run the
/// router against an in-memory database and a mocked metadata client.
pub struct AppState<D: Database, M: MetadataApi> {
    db: Arc<D>,
    metadata: Arc<M>,
}

// Manual Clone impl - only the Arcs are cloned, D and M need not be Clone
impl<D: Database, M: MetadataApi> Clone for AppState<D, M> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            metadata: Arc::clone(&self.metadata),
        }
    }
}

impl<D: Database, M: MetadataApi> AppState<D, M> {
    pub fn new(db: D, metadata: M) -> Self {
        Self {
            db: Arc::new(db),
            metadata: Arc::new(metadata),
        }
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Get a reference to the metadata client.
    pub fn metadata(&self) -> &M {
        &self.metadata
    }
}
