//! Forward geocoding: turn a typed city name into candidate locations.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use crate::types::{GeocodingResponse, Suggestion, WeatherError};
use reqwest::Client;
use std::time::Duration;
use tracing::instrument;

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "Skylook/0.1.0";

/// Queries shorter than this never reach the network
pub const MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
    count: u32,
    language: String,
}

impl GeocodingClient {
    /// Client against the public Open-Meteo endpoint with default settings
    pub fn open_meteo() -> Result<Self, WeatherError> {
        Self::new(
            GEOCODING_URL,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
            USER_AGENT,
        )
    }

    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| WeatherError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            count: 5,
            language: "en".to_string(),
        })
    }

    /// Maximum number of results requested from the provider
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Search for cities matching `query`, in the provider's ranking order.
    ///
    /// Never fails: short queries, transport errors, bad statuses and
    /// unparseable bodies all come back as an empty list.
    #[instrument(skip(self), level = "debug")]
    pub async fn search(&self, query: &str) -> Vec<Suggestion> {
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        match self.try_search(query).await {
            Ok(results) => {
                tracing::debug!("City search returned {} results", results.len());
                results
            }
            Err(e) => {
                tracing::warn!("City search error: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<Suggestion>, WeatherError> {
        let url = format!("{}/v1/search", self.base_url);
        let count = self.count.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("name", query),
                ("count", count.as_str()),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status().as_u16()));
        }

        let body: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        Ok(body.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_short_query_never_calls_out() {
        // Unroutable base URL: any request would fail, but none should be made.
        let client = GeocodingClient::new(
            "http://127.0.0.1:9",
            Duration::from_millis(50),
            USER_AGENT,
        )
        .unwrap();
        assert!(client.search("").await.is_empty());
        assert!(client.search("L").await.is_empty());
        assert!(client.search("é").await.is_empty());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client =
            GeocodingClient::new("http://localhost:8080/", Duration::from_secs(1), USER_AGENT)
                .unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test -p skylook-weather -- --ignored
    async fn test_search_london_live() {
        let client = GeocodingClient::open_meteo().unwrap();
        let results = client.search("London").await;
        assert!(!results.is_empty());
        assert!(results.len() <= 5);
        assert_eq!(results[0].name, "London");
    }
}
