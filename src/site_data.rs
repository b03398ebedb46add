// 📚 Site Data - The portal's hand-maintained tables
// Loaded once per process and shared read-only across requests

use crate::catalog::{CatalogItem, EventItem, HighlightItem, InsightItem, ResourceItem};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Genres the external catalog may contribute (kid-safe allow-list).
pub const FRIENDLY_GENRES: [&str; 10] = [
    "Card Game",
    "Strategy",
    "Racing",
    "Sports",
    "Puzzle",
    "Educational",
    "Casual",
    "Adventure",
    "Simulation",
    "Platformer",
];

static BUILTIN: Lazy<SiteData> = Lazy::new(SiteData::defaults);

// ============================================================================
// SITE DATA
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteData {
    /// Games built by the school team
    #[serde(default)]
    pub personal_games: Vec<CatalogItem>,

    /// Curated public games, also the fallback when the live source fails
    #[serde(default)]
    pub curated_public_games: Vec<CatalogItem>,

    #[serde(default)]
    pub insights: Vec<InsightItem>,

    #[serde(default)]
    pub highlights: Vec<HighlightItem>,

    #[serde(default)]
    pub events: Vec<EventItem>,

    #[serde(default)]
    pub resources: Vec<ResourceItem>,

    #[serde(default = "default_friendly_genres")]
    pub friendly_genres: Vec<String>,
}

fn default_friendly_genres() -> Vec<String> {
    FRIENDLY_GENRES.iter().map(|g| g.to_string()).collect()
}

impl SiteData {
    /// Process-wide built-in dataset
    pub fn builtin() -> &'static SiteData {
        &BUILTIN
    }

    /// Load a dataset override from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read site data file: {:?}", path.as_ref()))?;

        let data: SiteData =
            serde_json::from_str(&content).context("Failed to parse site data JSON")?;

        tracing::info!(
            path = ?path.as_ref(),
            personal = data.personal_games.len(),
            curated = data.curated_public_games.len(),
            events = data.events.len(),
            resources = data.resources.len(),
            "Loaded site data override"
        );

        Ok(data)
    }

    fn defaults() -> Self {
        SiteData {
            personal_games: vec![
                CatalogItem::new(
                    "Tic-Tac-Toe Games",
                    "Game klasik untuk dua pemain yang mengasah strategi dan logika dasar.",
                    "Platformer",
                    "https://tic-tac-toe-games-smkpesat.vercel.app",
                )
                .with_tags(&["ReactJS", "Javascript"])
                .with_status("Live"),
                CatalogItem::new(
                    "Memory Match",
                    "Game mencocokkan kartu yang melatih daya ingat dan konsentrasi anak-anak.",
                    "Simulasi Edukasi",
                    "https://memory-games-mu.vercel.app/",
                )
                .with_tags(&["React", "TypeScript"])
                .with_status("Live"),
                CatalogItem::new(
                    "Take the Cherry",
                    "Platformer sederhana di mana pemain mengendalikan karakter untuk mengumpulkan ceri sambil menghindari rintangan.",
                    "Platformer",
                    "https://drive.google.com/file/d/1XK_l4Gudspr3kji8xSkP--7muvi2Y7eH/view?usp=sharing",
                )
                .with_tags(&["Godot", "C#"])
                .with_status("Live"),
                CatalogItem::new(
                    "Robo Puzzle Lab",
                    "Puzzle coding yang mengajarkan logika pemrograman lewat robot lucu dan level menantang.",
                    "Puzzle Edukasi",
                    "https://robo-puzzle-lab.vercel.app/",
                )
                .with_tags(&["Unity", "C#"])
                .with_status("In Development"),
                CatalogItem::new(
                    "Galaxy Rhythm",
                    "Game ritme musik dengan elemen sci-fi, cocok dimainkan bersama teman SMP/SMA.",
                    "Rhythm",
                    "https://example.com/galaxy-rhythm",
                )
                .with_tags(&["Godot", "GDScript"])
                .with_status("Under Maintenance"),
            ],
            curated_public_games: vec![
                CatalogItem::new(
                    "Prodigy Math Game",
                    "Petualangan matematika berbasis cerita yang cocok untuk siswa SD & SMP.",
                    "Edukasi RPG",
                    "https://www.prodigygame.com/main-en/",
                )
                .with_thumbnail("https://images.ctfassets.net/si9mqy6u7qtl/2LQWz_J3iWikoSokHbX0ds/e0a30d1d5b020b7b4b182965d4536c59/prodigy-thumbnail.jpg"),
                CatalogItem::new(
                    "Lightbot",
                    "Game puzzle pemrograman yang mengasah kemampuan logika dengan cara yang menyenangkan.",
                    "Puzzle",
                    "https://lightbot.com/",
                )
                .with_thumbnail("https://lightbot.com/images/shared/lightbot-logo-square.png"),
                CatalogItem::new(
                    "PBS Kids Games",
                    "Koleksi game ramah anak dengan karakter program PBS yang edukatif dan aman.",
                    "Mini Games",
                    "https://pbskids.org/games/",
                )
                .with_thumbnail("https://pbskids.org/apps/assets/images/pbskids-share.jpg"),
                CatalogItem::new(
                    "Scratch Game Gallery",
                    "Game buatan komunitas Scratch untuk menginspirasi anak mempelajari coding.",
                    "Kreatif",
                    "https://scratch.mit.edu/explore/projects/games/",
                )
                .with_thumbnail("https://scratch.mit.edu/images/scratch-og.png"),
                CatalogItem::new(
                    "GeoGuessr - Seterra Geography",
                    "Permainan geografi interaktif untuk mengenal negara, bendera, dan kota dunia.",
                    "Edukasi",
                    "https://www.geoguessr.com/seterra",
                )
                .with_thumbnail("https://www.geoguessr.com/_next/static/media/share-img.b12bcdf2.png"),
                CatalogItem::new(
                    "Turtle Diary STEM Games",
                    "Bank game sains, matematika, dan bahasa dengan visual cerah ramah anak.",
                    "STEM",
                    "https://www.turtlediary.com/games.html",
                )
                .with_thumbnail("https://www.turtlediary.com/images-new/turtlediary-logo.png"),
            ],
            insights: vec![
                insight(
                    "Industri Game Tumbuh Cepat",
                    "Pendapatan global industri game 2023 tembus USD 184 miliar, melampaui gabungan film dan musik.",
                ),
                insight(
                    "Player Suka Belajar",
                    "76% gamer usia sekolah menjadikan game edukasi untuk eksplorasi minat baru seperti STEM dan seni.",
                ),
                insight(
                    "Komunitas Membuat Betah",
                    "Komunitas dengan event rutin meningkatkan retensi pemain hingga 2,5x dibanding game tanpa komunitas.",
                ),
            ],
            highlights: vec![
                highlight(
                    "Workshop Build Rutin",
                    "Kolaborasi bikin mini game 3 jam setiap Jumat malam.",
                ),
                highlight(
                    "Mentor Industri",
                    "Sesi AMA dengan developer profesional dan alumni jam game lokal.",
                ),
                highlight(
                    "Challenge Bulanan",
                    "Tema baru tiap bulan dengan hadiah akses asset premium.",
                ),
            ],
            events: vec![
                EventItem {
                    title: "Portal Games Jam Mini".to_string(),
                    date: "19 April 2024".to_string(),
                    time: "19.00 - 21.30 WIB".to_string(),
                    format: "Virtual".to_string(),
                    focus: "Prototype game edukasi tema lingkungan".to_string(),
                    link: "https://example.com/event/game-jam".to_string(),
                },
                EventItem {
                    title: "Mentoring Art & UI".to_string(),
                    date: "27 April 2024".to_string(),
                    time: "10.00 - 12.00 WIB".to_string(),
                    format: "Hybrid (Jakarta & Zoom)".to_string(),
                    focus: "Menyusun visual guide untuk game anak SD".to_string(),
                    link: "https://example.com/event/mentor-ui".to_string(),
                },
                EventItem {
                    title: "Showcase Bulanan".to_string(),
                    date: "4 Mei 2024".to_string(),
                    time: "15.00 - 17.00 WIB".to_string(),
                    format: "Streaming YouTube".to_string(),
                    focus: "Demo level terbaru & pengumpulan feedback komunitas".to_string(),
                    link: "https://example.com/event/showcase".to_string(),
                },
            ],
            resources: vec![
                ResourceItem {
                    title: "Template Game Design Doc".to_string(),
                    description: "Format ringkas untuk merencanakan gameplay, karakter, dan level."
                        .to_string(),
                    link: "https://example.com/resources/gdd-template".to_string(),
                    tag: "Docs".to_string(),
                },
                ResourceItem {
                    title: "Starter Asset Pack Edukasi".to_string(),
                    description: "Kumpulan sprite dan audio free-to-use untuk game belajar sains."
                        .to_string(),
                    link: "https://example.com/resources/asset-pack".to_string(),
                    tag: "Asset".to_string(),
                },
                ResourceItem {
                    title: "Checklist Playtest Anak".to_string(),
                    description: "Checklist observasi agar sesi playtest dengan siswa berjalan aman."
                        .to_string(),
                    link: "https://example.com/resources/playtest-checklist".to_string(),
                    tag: "Playtest".to_string(),
                },
            ],
            friendly_genres: default_friendly_genres(),
        }
    }
}

fn insight(title: &str, detail: &str) -> InsightItem {
    InsightItem {
        title: title.to_string(),
        detail: detail.to_string(),
    }
}

fn highlight(title: &str, detail: &str) -> HighlightItem {
    HighlightItem {
        title: title.to_string(),
        detail: detail.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
