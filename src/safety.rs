// 🛡️ Safety Filter - Keep the external catalog kid-safe
// Two rules, applied in order: genre allow-list, then title deny-pattern

use crate::catalog::ExternalCatalogItem;
use crate::error::Result;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

/// Deny keywords for the landing page and the public listing.
pub const LISTING_DENY_KEYWORDS: [&str; 4] = ["Shooter", "War", "Battle", "Zombie"];

/// Deny keywords for search-triggered fetches.
///
/// Stricter than the listing list; both are kept as separate configuration.
pub const SEARCH_DENY_KEYWORDS: [&str; 6] =
    ["Shooter", "War", "Battle", "Zombie", "Killer", "Sniper"];

// ============================================================================
// SAFETY FILTER
// ============================================================================

#[derive(Debug, Clone)]
pub struct SafetyFilter {
    /// Genres accepted verbatim from the external catalog
    allowed_genres: HashSet<String>,

    /// Keywords matched case-insensitively anywhere in the title
    deny_keywords: Vec<String>,

    /// Compiled alternation of `deny_keywords` (None when the list is empty)
    deny_pattern: Option<Regex>,
}

impl SafetyFilter {
    pub fn new<G, K>(allowed_genres: G, deny_keywords: K) -> Result<Self>
    where
        G: IntoIterator,
        G::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        let allowed_genres: HashSet<String> =
            allowed_genres.into_iter().map(Into::into).collect();

        let deny_keywords: Vec<String> = deny_keywords
            .into_iter()
            .map(|k| {
                let k: String = k.into();
                k.trim().to_string()
            })
            .filter(|k| !k.is_empty())
            .collect();

        let deny_pattern = if deny_keywords.is_empty() {
            None
        } else {
            let alternation = deny_keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            Some(
                RegexBuilder::new(&alternation)
                    .case_insensitive(true)
                    .build()?,
            )
        };

        Ok(SafetyFilter {
            allowed_genres,
            deny_keywords,
            deny_pattern,
        })
    }

    pub fn allowed_genres(&self) -> &HashSet<String> {
        &self.allowed_genres
    }

    pub fn deny_keywords(&self) -> &[String] {
        &self.deny_keywords
    }

    /// Genre is exact-match, as the external catalog labels are canonical
    pub fn is_allowed_genre(&self, genre: &str) -> bool {
        self.allowed_genres.contains(genre)
    }

    pub fn is_denied_title(&self, title: &str) -> bool {
        self.deny_pattern
            .as_ref()
            .map(|p| p.is_match(title))
            .unwrap_or(false)
    }

    pub fn is_safe(&self, item: &ExternalCatalogItem) -> bool {
        self.is_allowed_genre(&item.genre) && !self.is_denied_title(&item.title)
    }

    /// Keep safe items in their original order
    pub fn apply(&self, items: &[ExternalCatalogItem]) -> Vec<ExternalCatalogItem> {
        items
            .iter()
            .filter(|item| self.is_allowed_genre(&item.genre))
            .filter(|item| !self.is_denied_title(&item.title))
            .cloned()
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
