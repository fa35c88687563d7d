//! reqwest-backed metadata API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, info};

use super::{EnrichmentError, MetadataApi, SongMetadata};

/// Install the ring crypto provider for rustls.
///
/// reqwest is built without a default provider, so this must run before the
/// first client is created. Repeated calls are harmless.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Client for the external `/info` endpoint.
pub struct HttpMetadataClient {
    base_url: String,
    client: Client,
}

impl HttpMetadataClient {
    /// Create a client for the API at `base_url`.
    ///
    /// `timeout` bounds each request including reading the body.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, EnrichmentError> {
        install_crypto_provider();

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EnrichmentError::Client {
                message: e.to_string(),
            })?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn info_url(&self) -> Result<Url, EnrichmentError> {
        let raw = format!("{}/info", self.base_url.trim_end_matches('/'));
        Url::parse(&raw).map_err(|e| EnrichmentError::InvalidRequest {
            message: format!("{}: {}", raw, e),
        })
    }
}

#[async_trait]
impl MetadataApi for HttpMetadataClient {
    async fn fetch(&self, group: &str, song: &str) -> Result<SongMetadata, EnrichmentError> {
        let url = self.info_url()?;
        info!(%url, group, song, "Requesting song metadata");

        let response = self
            .client
            .get(url)
            .query(&[("group", group), ("song", song)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), %body, "Metadata API responded");

        if !status.is_success() {
            return Err(EnrichmentError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
