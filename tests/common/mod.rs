//! Shared helpers: an in-process stand-in for the external game catalog.

#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::get, Router};
use portal_games::{Config, FetcherConfig, PortalService, SiteData};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone)]
struct Catalog {
    hits: Arc<AtomicUsize>,
    status: StatusCode,
    body: String,
}

async fn games(State(catalog): State<Catalog>) -> (StatusCode, String) {
    catalog.hits.fetch_add(1, Ordering::SeqCst);
    (catalog.status, catalog.body.clone())
}

pub struct FakeCatalog {
    pub endpoint: String,
    hits: Arc<AtomicUsize>,
}

impl FakeCatalog {
    /// Start serving `body` with `status` on an ephemeral local port
    pub async fn start(status: StatusCode, body: String) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new().route("/api/games", get(games)).with_state(Catalog {
            hits: hits.clone(),
            status,
            body,
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake catalog");
        let addr = listener.local_addr().expect("Fake catalog has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake catalog crashed");
        });

        FakeCatalog {
            endpoint: format!("http://{}/api/games", addr),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Endpoint nothing listens on
pub const UNREACHABLE_ENDPOINT: &str = "http://127.0.0.1:1/api/games";

pub fn game(id: u64, title: &str, genre: &str, description: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "genre": genre,
        "short_description": description,
        "thumbnail": format!("https://cdn.example.com/{}.jpg", id),
        "game_url": format!("https://play.example.com/{}", id),
    })
}

pub fn portal(endpoint: &str, revalidate_secs: u64) -> PortalService {
    let config = Config {
        fetcher: FetcherConfig {
            endpoint: endpoint.to_string(),
            revalidate_secs,
            ..FetcherConfig::default()
        },
        ..Config::default()
    };

    PortalService::new(&config, Arc::new(SiteData::builtin().clone()))
        .expect("Failed to build portal service")
}
