//! HTTP catalog source.
//!
//! The endpoint returns
//! `{"entries": [{"meta": {"uuid", "name"}, "fields": {"image": {"url"}}}]}`.
//! Each entry maps to `CatalogEntry { id: uuid, name, image_ref: url }`.

use async_trait::async_trait;
use serde::Deserialize;

use super::CatalogSource;
use crate::core::{CatalogEntry, GameConfig};
use crate::error::{CatalogError, CatalogResult};

#[derive(Deserialize)]
struct EntriesResponse {
    entries: Vec<WireEntry>,
}

#[derive(Deserialize)]
struct WireEntry {
    meta: WireMeta,
    fields: WireFields,
}

#[derive(Deserialize)]
struct WireMeta {
    uuid: String,
    name: String,
}

#[derive(Deserialize)]
struct WireFields {
    image: WireImage,
}

#[derive(Deserialize)]
struct WireImage {
    url: String,
}

impl From<WireEntry> for CatalogEntry {
    fn from(entry: WireEntry) -> Self {
        CatalogEntry::new(entry.meta.uuid, entry.meta.name, entry.fields.image.url)
    }
}

/// Decode a catalog response body.
pub fn parse_catalog(body: &str) -> CatalogResult<Vec<CatalogEntry>> {
    let response: EntriesResponse =
        serde_json::from_str(body).map_err(|e| CatalogError::Parse(e.to_string()))?;
    Ok(response.entries.into_iter().map(CatalogEntry::from).collect())
}

/// Catalog source backed by an HTTP GET.
#[derive(Clone, Debug)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.catalog_url.clone())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> CatalogResult<Vec<CatalogEntry>> {
        tracing::debug!("Fetching catalog from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        parse_catalog(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog() {
        let body = r#"{
            "entries": [
                {"meta": {"uuid": "u1", "name": "Bear"}, "fields": {"image": {"url": "https://img/bear.jpg"}}},
                {"meta": {"uuid": "u2", "name": "Fox", "slug": "fox"}, "fields": {"image": {"url": "https://img/fox.jpg", "alt": "fox"}}}
            ],
            "meta": {"total_entries": 2}
        }"#;

        let entries = parse_catalog(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], CatalogEntry::new("u1", "Bear", "https://img/bear.jpg"));
        assert_eq!(entries[1].id, "u2");
    }

    #[test]
    fn test_parse_missing_entries_fails() {
        assert!(matches!(parse_catalog("{}"), Err(CatalogError::Parse(_))));
        assert!(matches!(
            parse_catalog(r#"{"error": "maintenance"}"#),
            Err(CatalogError::Parse(_))
        ));
        assert!(parse_catalog(r#"{"entries": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_catalog("not json"), Err(CatalogError::Parse(_))));
        assert!(matches!(
            parse_catalog(r#"{"entries": [{"meta": {"uuid": "u1"}}]}"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let source = HttpCatalogSource::from_config(&GameConfig::default());
        assert_eq!(source.url(), crate::core::DEFAULT_CATALOG_URL);
    }
}
