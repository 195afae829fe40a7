//! Cached, coalescing catalog provider.
//!
//! ## Lifecycle
//!
//! The provider is constructed once and shared by cloning (clones share the
//! cache). The first `fetch_catalog` call spawns a fetch task; calls made
//! while it runs wait on the same attempt. A success is cached until
//! `invalidate_cache`. A failure is delivered to every waiter of that
//! attempt and clears the in-flight marker, so the next call retries.
//!
//! The fetch runs on its own task, so a caller that stops waiting does not
//! cancel the attempt for the others.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tokio::sync::{watch, Mutex};

use super::{CatalogSource, HttpCatalogSource};
use crate::core::{CatalogEntry, GameConfig};
use crate::error::{CatalogError, CatalogResult};

type Attempt = Option<CatalogResult<Vec<CatalogEntry>>>;

#[derive(Default)]
struct ProviderState {
    cached: Option<Vec<CatalogEntry>>,
    in_flight: Option<watch::Receiver<Attempt>>,
    /// Bumped by `invalidate_cache`; a fetch started under an older epoch
    /// does not write the cache.
    epoch: u64,
}

/// Process-lifetime catalog cache over a [`CatalogSource`].
#[derive(Clone)]
pub struct CatalogProvider {
    source: Arc<dyn CatalogSource>,
    state: Arc<Mutex<ProviderState>>,
}

impl CatalogProvider {
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self::from_arc(Arc::new(source))
    }

    pub fn from_arc(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(ProviderState::default())),
        }
    }

    /// Provider over the HTTP endpoint in `config`.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(HttpCatalogSource::from_config(config))
    }

    /// Return the catalog, fetching at most once across concurrent callers.
    pub async fn fetch_catalog(&self) -> CatalogResult<Vec<CatalogEntry>> {
        let mut attempt = {
            let mut state = self.state.lock().await;
            if let Some(cached) = &state.cached {
                return Ok(cached.clone());
            }
            match state.in_flight.clone() {
                Some(rx) => {
                    tracing::debug!("Joining in-flight catalog fetch");
                    rx
                }
                None => {
                    let (tx, rx) = watch::channel(None);
                    state.in_flight = Some(rx.clone());
                    self.spawn_fetch(tx, state.epoch);
                    rx
                }
            }
        };

        attempt
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|result| result.clone())
            .unwrap_or(Err(CatalogError::Abandoned))
    }

    /// Drop the cached catalog and forget any in-flight attempt.
    pub async fn invalidate_cache(&self) {
        let mut state = self.state.lock().await;
        state.cached = None;
        state.in_flight = None;
        state.epoch += 1;
        tracing::debug!("Catalog cache invalidated");
    }

    /// The cached catalog, if a fetch has succeeded.
    pub async fn cached(&self) -> Option<Vec<CatalogEntry>> {
        self.state.lock().await.cached.clone()
    }

    fn spawn_fetch(&self, tx: watch::Sender<Attempt>, epoch: u64) {
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            let result = source.fetch().await.map(dedupe);

            {
                let mut state = state.lock().await;
                if state.epoch == epoch {
                    state.in_flight = None;
                    match &result {
                        Ok(entries) => {
                            tracing::info!("Catalog loaded with {} entries", entries.len());
                            state.cached = Some(entries.clone());
                        }
                        Err(err) => tracing::error!("Catalog fetch failed: {}", err),
                    }
                }
            }

            tx.send_replace(Some(result));
        });
    }
}

impl std::fmt::Debug for CatalogProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogProvider").finish_non_exhaustive()
    }
}

/// Remove repeated ids, keeping the first occurrence.
fn dedupe(entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    let mut seen = FxHashSet::default();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.id.clone()))
        .collect()
}
