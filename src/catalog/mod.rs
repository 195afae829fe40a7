//! Card catalog sources and the caching provider.
//!
//! A [`CatalogSource`] performs one fetch of catalog entries. The
//! [`CatalogProvider`] wraps a source with a process-lifetime cache and
//! coalesces concurrent requests into a single fetch.

mod http;
mod provider;

pub use http::{parse_catalog, HttpCatalogSource};
pub use provider::CatalogProvider;

use async_trait::async_trait;

use crate::core::CatalogEntry;
use crate::error::CatalogResult;

/// Fetches catalog entries from somewhere.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Perform one fetch.
    async fn fetch(&self) -> CatalogResult<Vec<CatalogEntry>>;
}

/// A source that always returns the same entries.
///
/// Useful for offline hosts, benches and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalogSource {
    entries: Vec<CatalogEntry>,
}

impl StaticCatalogSource {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch(&self) -> CatalogResult<Vec<CatalogEntry>> {
        Ok(self.entries.clone())
    }
}
