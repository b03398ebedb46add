use crate::safety::{LISTING_DENY_KEYWORDS, SEARCH_DENY_KEYWORDS};
use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_CATALOG_ENDPOINT: &str = "https://www.freetogame.com/api/games";

/// 12 hours
pub const DEFAULT_REVALIDATE_SECS: u64 = 43_200;

/// Settings for the external catalog client
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub endpoint: String,
    pub platform: String,
    pub revalidate_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CATALOG_ENDPOINT.to_string(),
            platform: "browser".to_string(),
            revalidate_secs: DEFAULT_REVALIDATE_SECS,
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub fetcher: FetcherConfig,
    pub landing_limit: usize,
    pub listing_limit: usize,
    pub search_live_limit: usize,
    pub listing_deny_keywords: Vec<String>,
    pub search_deny_keywords: Vec<String>,
    pub data_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            fetcher: FetcherConfig::default(),
            landing_limit: 8,
            listing_limit: 12,
            search_live_limit: 12,
            listing_deny_keywords: LISTING_DENY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            search_deny_keywords: SEARCH_DENY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            data_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = Config::default();

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            fetcher: FetcherConfig {
                endpoint: env::var("CATALOG_ENDPOINT").unwrap_or(defaults.fetcher.endpoint),
                platform: env::var("CATALOG_PLATFORM").unwrap_or(defaults.fetcher.platform),
                revalidate_secs: parse_var(
                    "CATALOG_REVALIDATE_SECS",
                    defaults.fetcher.revalidate_secs,
                )?,
            },
            landing_limit: parse_var("LANDING_LIMIT", defaults.landing_limit)?,
            listing_limit: parse_var("LISTING_LIMIT", defaults.listing_limit)?,
            search_live_limit: parse_var("SEARCH_LIVE_LIMIT", defaults.search_live_limit)?,
            listing_deny_keywords: env::var("LISTING_DENY_KEYWORDS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.listing_deny_keywords),
            search_deny_keywords: env::var("SEARCH_DENY_KEYWORDS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.search_deny_keywords),
            data_path: env::var("PORTAL_DATA_PATH").ok().map(PathBuf::from),
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number, got {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

/// Comma separated list, blanks dropped
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.port, 3000);
        assert_eq!(config.fetcher.revalidate_secs, 43_200);
        assert_eq!(config.fetcher.platform, "browser");
        assert_eq!(config.landing_limit, 8);
        assert_eq!(config.listing_limit, 12);
        assert_eq!(config.search_live_limit, 12);
        assert_eq!(config.listing_deny_keywords.len(), 4);
        assert_eq!(config.search_deny_keywords.len(), 6);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("Shooter, War,,  Zombie "), vec!["Shooter", "War", "Zombie"]);
        assert!(split_list(" , ").is_empty());
    }
}
