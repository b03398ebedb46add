// 🏠 Portal Pages - View models for every page the portal serves
// Static sections read SiteData; public games go through the fetcher

use crate::catalog::{CatalogItem, EventItem, HighlightItem, InsightItem, ResourceItem};
use crate::config::Config;
use crate::error::Result;
use crate::fetcher::CatalogFetcher;
use crate::safety::SafetyFilter;
use crate::search::{FilterSelection, SearchEngine, SearchResults};
use crate::site_data::SiteData;
use serde::Serialize;
use std::sync::Arc;

// ============================================================================
// PAGE MODELS
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LandingPage {
    pub personal_games: Vec<CatalogItem>,
    pub public_games: Vec<CatalogItem>,

    /// personal + public shown on the page
    pub total_games: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonalListing {
    pub games: Vec<CatalogItem>,
    pub total_games: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicListing {
    pub games: Vec<CatalogItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventsPage {
    pub events: Vec<EventItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourcesPage {
    pub resources: Vec<ResourceItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightPage {
    pub insights: Vec<InsightItem>,
    pub highlights: Vec<HighlightItem>,
}

// ============================================================================
// PORTAL SERVICE
// ============================================================================

/// Shared per-process service behind every page handler
pub struct PortalService {
    data: Arc<SiteData>,
    fetcher: Arc<CatalogFetcher>,
    listing_filter: SafetyFilter,
    search: SearchEngine,
    landing_limit: usize,
    listing_limit: usize,
}

impl PortalService {
    pub fn new(config: &Config, data: Arc<SiteData>) -> Result<Self> {
        let fetcher = Arc::new(CatalogFetcher::new(&config.fetcher)?);

        let listing_filter =
            SafetyFilter::new(data.friendly_genres.clone(), config.listing_deny_keywords.clone())?;
        let search_filter =
            SafetyFilter::new(data.friendly_genres.clone(), config.search_deny_keywords.clone())?;

        let search = SearchEngine::new(
            data.clone(),
            fetcher.clone(),
            search_filter,
            config.search_live_limit,
        );

        Ok(PortalService {
            data,
            fetcher,
            listing_filter,
            search,
            landing_limit: config.landing_limit,
            listing_limit: config.listing_limit,
        })
    }

    pub fn data(&self) -> &SiteData {
        &self.data
    }

    pub async fn landing(&self) -> LandingPage {
        let public_games = self
            .fetcher
            .fetch_external_catalog(
                &self.listing_filter,
                self.landing_limit,
                &self.data.curated_public_games,
            )
            .await;
        let personal_games = self.data.personal_games.clone();
        let total_games = personal_games.len() + public_games.len();

        LandingPage {
            personal_games,
            public_games,
            total_games,
        }
    }

    pub fn personal_games(&self) -> PersonalListing {
        PersonalListing {
            games: self.data.personal_games.clone(),
            total_games: self.data.personal_games.len(),
        }
    }

    pub async fn public_games(&self) -> PublicListing {
        let games = self
            .fetcher
            .fetch_external_catalog(
                &self.listing_filter,
                self.listing_limit,
                &self.data.curated_public_games,
            )
            .await;

        PublicListing { games }
    }

    pub fn events(&self) -> EventsPage {
        EventsPage {
            events: self.data.events.clone(),
        }
    }

    pub fn resources(&self) -> ResourcesPage {
        ResourcesPage {
            resources: self.data.resources.clone(),
        }
    }

    pub fn insight(&self) -> InsightPage {
        InsightPage {
            insights: self.data.insights.clone(),
            highlights: self.data.highlights.clone(),
        }
    }

    pub async fn search(&self, query: &str, selection: &FilterSelection) -> SearchResults {
        self.search.search(query, selection).await
    }
}

// ============================================================================
// TESTS
// ============================================================================
