use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use crate::config::SourceSettings;

/// Errors that can occur when fetching a catalog resource
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    StatusError { url: String, status: u16 },
}

/// HTTP client for the three delimited-text resources the dashboard loads:
/// the unified property catalog, the precomputed matches and the client
/// contacts. Each fetch returns the raw text; parsing happens elsewhere.
pub struct CatalogClient {
    client: Client,
    sources: SourceSettings,
}

impl CatalogClient {
    /// Create a new catalog client
    pub fn new(sources: SourceSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, sources }
    }

    async fn fetch_text(&self, url: &str) -> Result<String, CatalogError> {
        tracing::debug!("Fetching catalog resource: {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::StatusError {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetch the property catalog CSV text
    pub async fn fetch_properties(&self) -> Result<String, CatalogError> {
        self.fetch_text(&self.sources.properties_url).await
    }

    /// Fetch the precomputed matches CSV text
    pub async fn fetch_matches(&self) -> Result<String, CatalogError> {
        self.fetch_text(&self.sources.matches_url).await
    }

    /// Fetch the client contacts CSV text
    pub async fn fetch_clients(&self) -> Result<String, CatalogError> {
        self.fetch_text(&self.sources.clients_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_client_creation() {
        let sources = SourceSettings {
            properties_url: "https://data.test/inmuebles_unificado.csv".to_string(),
            matches_url: "https://data.test/matches.csv".to_string(),
            clients_url: "https://data.test/contacts_today_parsed.csv".to_string(),
            properties_delimiter: ";".to_string(),
        };

        let client = CatalogClient::new(sources);
        assert_eq!(
            client.sources.properties_url,
            "https://data.test/inmuebles_unificado.csv"
        );
    }
}
