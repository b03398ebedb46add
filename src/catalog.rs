// 🎮 Catalog Model - Value records shown by the portal
// Games (personal + public), events, resources, insights and highlights

use serde::{Deserialize, Serialize};

// ============================================================================
// CATALOG ITEM
// ============================================================================

/// A displayable game entry.
///
/// Used for the hand-maintained personal and curated public tables as well as
/// for live entries transformed from the external catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Display title, unique within a collection (dedup key for public results)
    pub title: String,

    pub description: String,

    /// Category/genre label (e.g., "Puzzle", "Edukasi RPG")
    pub genre: String,

    /// Outbound link rendered as "play" / "open" hyperlink
    pub link: String,

    /// Tech stack or free-form tags (personal games only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Release status label (e.g., "Live", "In Development")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl CatalogItem {
    pub fn new(title: &str, description: &str, genre: &str, link: &str) -> Self {
        CatalogItem {
            title: title.to_string(),
            description: description.to_string(),
            genre: genre.to_string(),
            link: link.to_string(),
            tags: Vec::new(),
            status: None,
            thumbnail: None,
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: &str) -> Self {
        self.thumbnail = Some(thumbnail.to_string());
        self
    }
}

// ============================================================================
// EXTERNAL CATALOG ITEM (wire shape)
// ============================================================================

/// One element of the third-party game listing (`GET /api/games?platform=browser`).
///
/// Unknown fields are ignored; missing required fields fail deserialization,
/// which the fetcher treats as a schema mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalCatalogItem {
    pub id: u64,
    pub title: String,
    pub genre: String,
    pub short_description: String,
    pub thumbnail: String,
    pub game_url: String,
}

impl ExternalCatalogItem {
    /// Check the fields the portal relies on.
    ///
    /// Returns a human-readable reason on mismatch.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err(format!("item {} has an empty title", self.id));
        }

        if self.genre.trim().is_empty() {
            return Err(format!("item {} has an empty genre", self.id));
        }

        if !(self.game_url.starts_with("https://") || self.game_url.starts_with("http://")) {
            return Err(format!(
                "item {} has a non-http game_url: {:?}",
                self.id, self.game_url
            ));
        }

        Ok(())
    }

    /// Transform into a portal catalog item. The numeric id is discarded.
    pub fn into_catalog_item(self) -> CatalogItem {
        CatalogItem {
            title: self.title,
            description: self.short_description,
            genre: self.genre,
            link: self.game_url,
            tags: Vec::new(),
            status: None,
            thumbnail: Some(self.thumbnail),
        }
    }
}

// ============================================================================
// COMMUNITY CONTENT
// ============================================================================

/// Community event. Display order is source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventItem {
    pub title: String,

    /// Display date (e.g., "19 April 2024")
    pub date: String,

    /// Display time of day (e.g., "19.00 - 21.30 WIB")
    pub time: String,

    /// Delivery format (e.g., "Virtual", "Hybrid (Jakarta & Zoom)")
    pub format: String,

    /// Focus / description of the session
    pub focus: String,

    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceItem {
    pub title: String,
    pub description: String,
    pub link: String,

    /// Category tag (e.g., "Docs", "Asset", "Playtest")
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightItem {
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightItem {
    pub title: String,
    pub detail: String,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn external(title: &str, url: &str) -> ExternalCatalogItem {
        ExternalCatalogItem {
            id: 7,
            title: title.to_string(),
            genre: "Puzzle".to_string(),
            short_description: "Match tiles".to_string(),
            thumbnail: "https://cdn.example.com/7.jpg".to_string(),
            game_url: url.to_string(),
        }
    }

    #[test]
    fn test_external_item_transform_drops_id() {
        let item = external("Tile Story", "https://play.example.com/7").into_catalog_item();

        assert_eq!(item.title, "Tile Story");
        assert_eq!(item.description, "Match tiles");
        assert_eq!(item.genre, "Puzzle");
        assert_eq!(item.link, "https://play.example.com/7");
        assert_eq!(item.thumbnail.as_deref(), Some("https://cdn.example.com/7.jpg"));
        assert!(item.tags.is_empty());
        assert!(item.status.is_none());
    }

    #[test]
    fn test_external_item_validation() {
        assert!(external("Tile Story", "https://play.example.com/7").validate().is_ok());
        assert!(external("   ", "https://play.example.com/7").validate().is_err());
        assert!(external("Tile Story", "javascript:alert(1)").validate().is_err());
    }

    #[test]
    fn test_external_item_ignores_unknown_fields() {
        let json = r#"{
            "id": 540,
            "title": "Tile Story",
            "thumbnail": "https://cdn.example.com/540.jpg",
            "short_description": "Match tiles",
            "game_url": "https://play.example.com/540",
            "genre": "Puzzle",
            "platform": "Web Browser",
            "publisher": "Example"
        }"#;

        let item: ExternalCatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 540);
        assert_eq!(item.title, "Tile Story");
    }

    #[test]
    fn test_external_item_missing_field_is_error() {
        let json = r#"{ "id": 1, "title": "No Url", "genre": "Puzzle" }"#;
        assert!(serde_json::from_str::<ExternalCatalogItem>(json).is_err());
    }

    #[test]
    fn test_catalog_item_optional_fields_skipped() {
        let item = CatalogItem::new("Lightbot", "Puzzle coding", "Puzzle", "https://lightbot.com/");
        let json = serde_json::to_value(&item).unwrap();

        assert!(json.get("tags").is_none());
        assert!(json.get("status").is_none());
        assert!(json.get("thumbnail").is_none());
    }
}
