// 🔎 Multi-Collection Search - Substring search across every portal collection
// Per-collection predicates, public-game merge (live first), category gating

use crate::catalog::{CatalogItem, EventItem, HighlightItem, InsightItem, ResourceItem};
use crate::fetcher::CatalogFetcher;
use crate::safety::SafetyFilter;
use crate::site_data::SiteData;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

// ============================================================================
// CATEGORY KEY
// ============================================================================

/// One of the six fixed search domains. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Personal,
    Public,
    Events,
    Resources,
    Insight,
    Community,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 6] = [
        CategoryKey::Personal,
        CategoryKey::Public,
        CategoryKey::Events,
        CategoryKey::Resources,
        CategoryKey::Insight,
        CategoryKey::Community,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::Personal => "personal",
            CategoryKey::Public => "public",
            CategoryKey::Events => "events",
            CategoryKey::Resources => "resources",
            CategoryKey::Insight => "insight",
            CategoryKey::Community => "community",
        }
    }

    /// Filter label shown next to the checkbox
    pub fn label(&self) -> &'static str {
        match self {
            CategoryKey::Personal => "Games Pesat",
            CategoryKey::Public => "Games Publik",
            CategoryKey::Events => "Event Komunitas",
            CategoryKey::Resources => "Resource",
            CategoryKey::Insight => "Insight & Highlight",
            CategoryKey::Community => "Program Komunitas",
        }
    }

    /// Listing page for "see all" links
    pub fn href(&self) -> &'static str {
        match self {
            CategoryKey::Personal => "/games-pesat",
            CategoryKey::Public => "/games-publik",
            CategoryKey::Events => "/komunitas/events",
            CategoryKey::Resources => "/komunitas/resources",
            CategoryKey::Insight => "/insight",
            CategoryKey::Community => "/komunitas/playtest",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| format!("unknown category key: {:?}", s))
    }
}

// ============================================================================
// FILTER SELECTION
// ============================================================================

/// Enabled categories. Never empty: an empty input means "everything".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelection(BTreeSet<CategoryKey>);

impl FilterSelection {
    pub fn all() -> Self {
        FilterSelection(CategoryKey::ALL.iter().copied().collect())
    }

    /// Build from raw `sections` parameter values.
    ///
    /// Unknown keys are ignored. When nothing usable remains the selection
    /// opens up to all six categories.
    pub fn from_params<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: BTreeSet<CategoryKey> = values
            .into_iter()
            .filter_map(|v| {
                let raw = v.as_ref();
                match raw.parse() {
                    Ok(key) => Some(key),
                    Err(e) => {
                        tracing::debug!(value = raw, "Ignoring section filter: {}", e);
                        None
                    }
                }
            })
            .collect();

        Self::from_keys(keys)
    }

    pub fn from_keys<I: IntoIterator<Item = CategoryKey>>(keys: I) -> Self {
        let keys: BTreeSet<CategoryKey> = keys.into_iter().collect();
        if keys.is_empty() {
            Self::all()
        } else {
            FilterSelection(keys)
        }
    }

    pub fn contains(&self, key: CategoryKey) -> bool {
        self.0.contains(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = CategoryKey> + '_ {
        self.0.iter().copied()
    }

    pub fn is_all(&self) -> bool {
        self.0.len() == CategoryKey::ALL.len()
    }

    /// Flip one category; turning off the last one reopens the selection
    pub fn toggled(&self, key: CategoryKey) -> Self {
        let mut keys = self.0.clone();
        if !keys.remove(&key) {
            keys.insert(key);
        }
        Self::from_keys(keys)
    }
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::all()
    }
}

// ============================================================================
// MATCHING
// ============================================================================

/// Trimmed, lowercased query used as the match needle
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Case-insensitive substring predicate over a collection's searchable fields.
///
/// `needle` is expected to come from [`normalize_query`].
pub trait Searchable {
    fn matches(&self, needle: &str) -> bool;
}

/// Personal games: title, description, genre, any tag
impl Searchable for CatalogItem {
    fn matches(&self, needle: &str) -> bool {
        self.matches_public(needle) || self.tags.iter().any(|tag| contains(tag, needle))
    }
}

impl CatalogItem {
    /// Public games (curated and live): title, description, genre
    pub fn matches_public(&self, needle: &str) -> bool {
        contains(&self.title, needle)
            || contains(&self.description, needle)
            || contains(&self.genre, needle)
    }
}

impl Searchable for EventItem {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.title, needle)
            || contains(&self.focus, needle)
            || contains(&self.format, needle)
    }
}

impl Searchable for ResourceItem {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.title, needle)
            || contains(&self.description, needle)
            || contains(&self.tag, needle)
    }
}

impl Searchable for InsightItem {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.title, needle) || contains(&self.detail, needle)
    }
}

impl Searchable for HighlightItem {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.title, needle) || contains(&self.detail, needle)
    }
}

fn matching<T: Searchable + Clone>(items: &[T], needle: &str) -> Vec<T> {
    items.iter().filter(|item| item.matches(needle)).cloned().collect()
}

// ============================================================================
// PUBLIC RESULT MERGE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Live,
    Curated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicResult {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub provenance: Provenance,
}

/// Live matches in fetch order, then curated matches in declared order.
/// A title already present is skipped, so live entries win over curated ones.
pub fn merge_public(live: &[CatalogItem], curated: &[CatalogItem]) -> Vec<PublicResult> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut merged = Vec::with_capacity(live.len() + curated.len());

    let tagged = live
        .iter()
        .map(|item| (item, Provenance::Live))
        .chain(curated.iter().map(|item| (item, Provenance::Curated)));

    for (item, provenance) in tagged {
        if seen.insert(item.title.as_str()) {
            merged.push(PublicResult {
                item: item.clone(),
                provenance,
            });
        }
    }

    merged
}

// ============================================================================
// SEARCH RESULTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// Blank query; nothing searched yet
    AwaitingInput,

    /// Query given, but no enabled category matched
    NoResults,

    Found,
}

/// Grouped search output.
///
/// A group is `None` when its category is not enabled, `Some` (possibly empty)
/// otherwise. `total_count` sums the sizes of the present groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub selection: FilterSelection,
    pub status: SearchStatus,
    pub total_count: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal: Option<Vec<CatalogItem>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<Vec<PublicResult>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventItem>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<ResourceItem>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<Vec<InsightItem>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<Vec<HighlightItem>>,
}

impl SearchResults {
    /// Number of results in one category (0 when gated out)
    pub fn count(&self, key: CategoryKey) -> usize {
        match key {
            CategoryKey::Personal => self.personal.as_ref().map_or(0, Vec::len),
            CategoryKey::Public => self.public.as_ref().map_or(0, Vec::len),
            CategoryKey::Events => self.events.as_ref().map_or(0, Vec::len),
            CategoryKey::Resources => self.resources.as_ref().map_or(0, Vec::len),
            CategoryKey::Insight => self.insight.as_ref().map_or(0, Vec::len),
            CategoryKey::Community => self.community.as_ref().map_or(0, Vec::len),
        }
    }

    /// Whether the category's group is part of the output
    pub fn is_present(&self, key: CategoryKey) -> bool {
        match key {
            CategoryKey::Personal => self.personal.is_some(),
            CategoryKey::Public => self.public.is_some(),
            CategoryKey::Events => self.events.is_some(),
            CategoryKey::Resources => self.resources.is_some(),
            CategoryKey::Insight => self.insight.is_some(),
            CategoryKey::Community => self.community.is_some(),
        }
    }
}

/// Search over `data` with a fixed live snapshot.
///
/// `live` holds the safety-filtered live public candidates in fetch order;
/// entries not matching the query are dropped here. Pure and deterministic.
pub fn search_with_live(
    data: &SiteData,
    query: &str,
    selection: &FilterSelection,
    live: &[CatalogItem],
) -> SearchResults {
    let query = query.trim().to_string();
    let needle = normalize_query(&query);
    let has_query = !needle.is_empty();

    let gate = |key: CategoryKey| selection.contains(key);

    let personal = gate(CategoryKey::Personal).then(|| {
        if has_query {
            matching(&data.personal_games, &needle)
        } else {
            Vec::new()
        }
    });

    let public = gate(CategoryKey::Public).then(|| {
        if has_query {
            let live: Vec<CatalogItem> = live
                .iter()
                .filter(|game| game.matches_public(&needle))
                .cloned()
                .collect();
            let curated: Vec<CatalogItem> = data
                .curated_public_games
                .iter()
                .filter(|game| game.matches_public(&needle))
                .cloned()
                .collect();
            merge_public(&live, &curated)
        } else {
            Vec::new()
        }
    });

    let events = gate(CategoryKey::Events).then(|| {
        if has_query {
            matching(&data.events, &needle)
        } else {
            Vec::new()
        }
    });

    let resources = gate(CategoryKey::Resources).then(|| {
        if has_query {
            matching(&data.resources, &needle)
        } else {
            Vec::new()
        }
    });

    let insight = gate(CategoryKey::Insight).then(|| {
        if has_query {
            matching(&data.insights, &needle)
        } else {
            Vec::new()
        }
    });

    let community = gate(CategoryKey::Community).then(|| {
        if has_query {
            matching(&data.highlights, &needle)
        } else {
            Vec::new()
        }
    });

    let mut results = SearchResults {
        query,
        selection: selection.clone(),
        status: SearchStatus::AwaitingInput,
        total_count: 0,
        personal,
        public,
        events,
        resources,
        insight,
        community,
    };

    results.total_count = CategoryKey::ALL.iter().map(|key| results.count(*key)).sum();
    results.status = if !has_query {
        SearchStatus::AwaitingInput
    } else if results.total_count == 0 {
        SearchStatus::NoResults
    } else {
        SearchStatus::Found
    };

    results
}

// ============================================================================
// SEARCH ENGINE
// ============================================================================

/// Search entry point used by request handlers.
///
/// Stateless between calls apart from the fetcher's cache.
pub struct SearchEngine {
    data: Arc<SiteData>,
    fetcher: Arc<CatalogFetcher>,
    filter: SafetyFilter,
    live_limit: usize,
}

impl SearchEngine {
    pub fn new(
        data: Arc<SiteData>,
        fetcher: Arc<CatalogFetcher>,
        filter: SafetyFilter,
        live_limit: usize,
    ) -> Self {
        SearchEngine {
            data,
            fetcher,
            filter,
            live_limit,
        }
    }

    /// Run a search. The external catalog is only contacted for a non-blank
    /// query with the public category enabled.
    pub async fn search(&self, query: &str, selection: &FilterSelection) -> SearchResults {
        let needle = normalize_query(query);

        let live = if !needle.is_empty() && selection.contains(CategoryKey::Public) {
            self.fetcher
                .fetch_live_matches(&self.filter, &needle, self.live_limit)
                .await
        } else {
            Vec::new()
        };

        let results = search_with_live(&self.data, query, selection, &live);

        tracing::debug!(
            query = %results.query,
            live = live.len(),
            total = results.total_count,
            "Search completed"
        );

        results
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn game(title: &str, description: &str, genre: &str) -> CatalogItem {
        CatalogItem::new(
            title,
            description,
            genre,
            &format!("https://play.example.com/{}", title.to_lowercase().replace(' ', "-")),
        )
    }

    fn titles(results: &[PublicResult]) -> Vec<(&str, Provenance)> {
        results
            .iter()
            .map(|r| (r.item.title.as_str(), r.provenance))
            .collect()
    }

    #[test]
    fn test_category_key_roundtrip_strings() {
        for key in CategoryKey::ALL {
            assert_eq!(key.as_str().parse::<CategoryKey>(), Ok(key));
        }
        assert!("games".parse::<CategoryKey>().is_err());
        assert_eq!(
            serde_json::to_string(&CategoryKey::Insight).unwrap(),
            "\"insight\""
        );
    }

    #[test]
    fn test_filter_selection_empty_is_all() {
        assert!(FilterSelection::from_params(Vec::<String>::new()).is_all());
        assert!(FilterSelection::from_params(["bogus", ""]).is_all());
    }

    #[test]
    fn test_filter_selection_ignores_unknown_keys() {
        let selection = FilterSelection::from_params(["events", "bogus", "public", "events"]);

        let keys: Vec<_> = selection.keys().collect();
        assert_eq!(keys, vec![CategoryKey::Public, CategoryKey::Events]);
    }

    #[test]
    fn test_filter_selection_toggle_never_empty() {
        let only_events = FilterSelection::from_keys([CategoryKey::Events]);
        assert!(only_events.toggled(CategoryKey::Events).is_all());

        let two = only_events.toggled(CategoryKey::Public);
        assert!(two.contains(CategoryKey::Public));
        assert!(two.contains(CategoryKey::Events));
    }

    #[test]
    fn test_personal_predicate_includes_tags() {
        let item = game("Robo", "Robot logic", "Puzzle").with_tags(&["Unity", "C#"]);

        assert!(item.matches("unity"));
        assert!(item.matches("robot"));
        assert!(!item.matches_public("unity"));
    }

    #[test]
    fn test_event_predicate_fields() {
        let event = EventItem {
            title: "Showcase".to_string(),
            date: "4 Mei 2024".to_string(),
            time: "15.00 WIB".to_string(),
            format: "Streaming YouTube".to_string(),
            focus: "Demo level".to_string(),
            link: "https://example.com/event".to_string(),
        };

        assert!(event.matches("youtube"));
        assert!(event.matches("demo"));
        // date and time are display-only
        assert!(!event.matches("mei"));
        assert!(!event.matches("wib"));
    }

    #[test]
    fn test_merge_live_first_and_dedup() {
        let live = vec![game("Lightbot", "Live copy", "Puzzle"), game("Tile Story", "", "Puzzle")];
        let curated = vec![
            game("Prodigy", "Math", "RPG"),
            game("Lightbot", "Curated copy", "Puzzle"),
        ];

        let merged = merge_public(&live, &curated);
        assert_eq!(
            titles(&merged),
            vec![
                ("Lightbot", Provenance::Live),
                ("Tile Story", Provenance::Live),
                ("Prodigy", Provenance::Curated),
            ]
        );
        assert_eq!(merged[0].item.description, "Live copy");
    }

    #[test]
    fn test_merge_dedups_within_live() {
        let live = vec![game("Twin", "a", "Puzzle"), game("Twin", "b", "Puzzle")];
        let merged = merge_public(&live, &[]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].item.description, "a");
    }

    #[test]
    fn test_blank_query_is_awaiting_input() {
        let results = search_with_live(
            SiteData::builtin(),
            "   ",
            &FilterSelection::all(),
            &[game("Lightbot", "", "Puzzle")],
        );

        assert_eq!(results.status, SearchStatus::AwaitingInput);
        assert_eq!(results.total_count, 0);
        for key in CategoryKey::ALL {
            assert!(results.is_present(key));
            assert_eq!(results.count(key), 0);
        }
    }

    #[test]
    fn test_gated_categories_are_absent() {
        let selection = FilterSelection::from_keys([CategoryKey::Personal]);
        let results = search_with_live(SiteData::builtin(), "a", &selection, &[]);

        assert!(results.is_present(CategoryKey::Personal));
        for key in CategoryKey::ALL.into_iter().filter(|k| *k != CategoryKey::Personal) {
            assert!(!results.is_present(key));
        }
        assert_eq!(results.total_count, results.count(CategoryKey::Personal));

        let json = serde_json::to_value(&results).unwrap();
        assert!(json.get("personal").is_some());
        assert!(json.get("events").is_none());
    }

    #[test]
    fn test_total_counts_every_group_entry() {
        // "komunitas" hits an event focus, an insight and the curated list
        let results = search_with_live(
            SiteData::builtin(),
            "Komunitas",
            &FilterSelection::all(),
            &[],
        );

        let sum: usize = CategoryKey::ALL.iter().map(|k| results.count(*k)).sum();
        assert_eq!(results.total_count, sum);
        assert_eq!(results.count(CategoryKey::Events), 1);
        assert_eq!(results.count(CategoryKey::Insight), 1);
        assert_eq!(results.count(CategoryKey::Public), 1);
        assert_eq!(results.status, SearchStatus::Found);
    }

    #[test]
    fn test_no_results_status() {
        let results = search_with_live(
            SiteData::builtin(),
            "xyzzy-no-such-thing",
            &FilterSelection::all(),
            &[],
        );

        assert_eq!(results.total_count, 0);
        assert_eq!(results.status, SearchStatus::NoResults);
    }

    #[test]
    fn test_query_is_trimmed() {
        let results = search_with_live(
            SiteData::builtin(),
            "  Lightbot  ",
            &FilterSelection::all(),
            &[],
        );

        assert_eq!(results.query, "Lightbot");
        assert_eq!(results.count(CategoryKey::Public), 1);
    }

    #[test]
    fn test_live_snapshot_is_matched() {
        let live = vec![
            game("Tile Story", "Match tiles", "Puzzle"),
            game("Kart Rush", "Arcade racing", "Racing"),
        ];

        let results = search_with_live(
            SiteData::builtin(),
            "puzzle",
            &FilterSelection::from_keys([CategoryKey::Public]),
            &live,
        );

        let public = results.public.as_ref().unwrap();
        assert_eq!(
            titles(public),
            vec![
                ("Tile Story", Provenance::Live),
                ("Lightbot", Provenance::Curated),
            ]
        );
    }
}
