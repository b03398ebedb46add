// 🌐 External Catalog Fetcher - Live public games with a curated fallback
// One GET per call (no retries), cached for the revalidation window

use crate::catalog::{CatalogItem, ExternalCatalogItem};
use crate::config::FetcherConfig;
use crate::error::{PortalError, Result};
use crate::safety::SafetyFilter;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};

// ============================================================================
// CACHE
// ============================================================================

#[derive(Debug, Clone)]
struct CachedCatalog {
    fetched_at: DateTime<Utc>,
    items: Arc<Vec<ExternalCatalogItem>>,
}

// ============================================================================
// FETCHER
// ============================================================================

/// Client for the third-party game listing.
///
/// Successful responses are cached for `revalidate` and shared by every
/// caller. Failures are never cached. There is no request coalescing: two
/// callers that miss the cache at the same time both go to the network.
pub struct CatalogFetcher {
    client: reqwest::Client,
    endpoint: String,
    platform: String,
    revalidate: Duration,
    cache: Mutex<Option<CachedCatalog>>,
}

impl CatalogFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        if !(config.endpoint.starts_with("http://") || config.endpoint.starts_with("https://")) {
            return Err(PortalError::Config(format!(
                "catalog endpoint must be an http(s) URL, got {:?}",
                config.endpoint
            )));
        }

        let revalidate = i64::try_from(config.revalidate_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                PortalError::Config(format!(
                    "revalidate window out of range: {}s",
                    config.revalidate_secs
                ))
            })?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("portal-games/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(CatalogFetcher {
            client,
            endpoint: config.endpoint.clone(),
            platform: config.platform.clone(),
            revalidate,
            cache: Mutex::new(None),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Drop the cached snapshot so the next call goes to the network
    pub fn invalidate(&self) {
        *self.lock_cache() = None;
    }

    /// Fetch and validate the raw listing, serving a fresh cached copy if present.
    pub async fn fetch_raw(&self) -> Result<Arc<Vec<ExternalCatalogItem>>> {
        if let Some(items) = self.cached(Utc::now()) {
            tracing::debug!(count = items.len(), "External catalog served from cache");
            return Ok(items);
        }

        tracing::debug!(endpoint = %self.endpoint, platform = %self.platform, "Fetching external catalog");

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("platform", self.platform.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PortalError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        let items: Vec<ExternalCatalogItem> =
            serde_json::from_slice(&body).map_err(|e| PortalError::Schema(e.to_string()))?;

        for item in &items {
            item.validate().map_err(PortalError::Schema)?;
        }

        let items = Arc::new(items);
        self.store(Utc::now(), items.clone());

        tracing::info!(count = items.len(), "External catalog fetched");
        Ok(items)
    }

    /// Listing variant (landing page, public listing).
    ///
    /// Safety filter, truncate to `limit`, transform. Any failure, or nothing
    /// left after filtering, yields `fallback` unchanged.
    pub async fn fetch_external_catalog(
        &self,
        filter: &SafetyFilter,
        limit: usize,
        fallback: &[CatalogItem],
    ) -> Vec<CatalogItem> {
        let raw = match self.fetch_raw().await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "External catalog unavailable, using curated list");
                return fallback.to_vec();
            }
        };

        let games: Vec<CatalogItem> = filter
            .apply(&raw)
            .into_iter()
            .take(limit)
            .map(ExternalCatalogItem::into_catalog_item)
            .collect();

        if games.is_empty() {
            tracing::warn!(
                fetched = raw.len(),
                "No external games passed the safety filter, using curated list"
            );
            return fallback.to_vec();
        }

        games
    }

    /// Search variant: safety filter, then the public-game substring predicate,
    /// then truncate to `limit`.
    ///
    /// `needle` must already be trimmed and lowercased. Failures yield an
    /// empty sequence; the search engine adds curated matches on its own.
    pub async fn fetch_live_matches(
        &self,
        filter: &SafetyFilter,
        needle: &str,
        limit: usize,
    ) -> Vec<CatalogItem> {
        let raw = match self.fetch_raw().await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "External catalog unavailable for search");
                return Vec::new();
            }
        };

        filter
            .apply(&raw)
            .into_iter()
            .map(ExternalCatalogItem::into_catalog_item)
            .filter(|game| game.matches_public(needle))
            .take(limit)
            .collect()
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, Option<CachedCatalog>> {
        // Cache contents are replaced wholesale, so a poisoned lock is still consistent
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn cached(&self, now: DateTime<Utc>) -> Option<Arc<Vec<ExternalCatalogItem>>> {
        let cache = self.lock_cache();
        cache
            .as_ref()
            .filter(|c| now - c.fetched_at < self.revalidate)
            .map(|c| c.items.clone())
    }

    fn store(&self, now: DateTime<Utc>, items: Arc<Vec<ExternalCatalogItem>>) {
        if self.revalidate <= Duration::zero() {
            return;
        }

        *self.lock_cache() = Some(CachedCatalog {
            fetched_at: now,
            items,
        });
    }
}

// ============================================================================
// TESTS
// ============================================================================
