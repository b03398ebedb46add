// Portal Games - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod catalog;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod mailto;
pub mod portal;
pub mod safety;
pub mod search;
pub mod site_data;

#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use catalog::{
    CatalogItem, EventItem, ExternalCatalogItem, HighlightItem, InsightItem, ResourceItem,
};
pub use config::{Config, FetcherConfig};
pub use error::PortalError;
pub use fetcher::CatalogFetcher;
pub use mailto::{submit_game_mailto, PlaytestRequest};
pub use portal::{
    EventsPage, InsightPage, LandingPage, PersonalListing, PortalService, PublicListing,
    ResourcesPage,
};
pub use safety::{SafetyFilter, LISTING_DENY_KEYWORDS, SEARCH_DENY_KEYWORDS};
pub use search::{
    merge_public, search_with_live, CategoryKey, FilterSelection, Provenance, PublicResult,
    SearchEngine, SearchResults, SearchStatus, Searchable,
};
pub use site_data::{SiteData, FRIENDLY_GENRES};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load the dataset named by the config, or the built-in tables
pub fn load_site_data(config: &Config) -> anyhow::Result<SiteData> {
    match &config.data_path {
        Some(path) => SiteData::from_file(path),
        None => Ok(SiteData::builtin().clone()),
    }
}
