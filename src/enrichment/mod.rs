//! Song metadata enrichment.
//!
//! New songs only carry a group and a title. Release date, lyrics and link
//! are fetched from an external metadata API before the song is stored.
//! The [`MetadataApi`] trait is the seam between the HTTP layer and that
//! API so handlers can be tested against a mock.

mod client;
mod error;

#[cfg(test)]
mod client_test;

use async_trait::async_trait;
use serde::Deserialize;

#[cfg(test)]
use mockall::automock;

pub use client::{HttpMetadataClient, install_crypto_provider};
pub use error::EnrichmentError;

/// Details returned by the metadata API for one song.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SongMetadata {
    /// Release date in `DD.MM.YYYY` format.
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    pub text: String,
    pub link: String,
}

/// Lookup of song details by group and title.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MetadataApi: Send + Sync {
    async fn fetch(&self, group: &str, song: &str) -> Result<SongMetadata, EnrichmentError>;
}
