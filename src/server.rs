// Portal Games - HTTP API
// JSON endpoints for every portal page plus search

use crate::mailto::{self, PlaytestRequest};
use crate::portal::PortalService;
use crate::search::{CategoryKey, FilterSelection};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub portal: Arc<PortalService>,
}

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

#[derive(Serialize)]
struct CategoryResponse {
    key: CategoryKey,
    label: &'static str,
    href: &'static str,
}

#[derive(Serialize)]
struct MailtoResponse {
    mailto: String,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/home - Landing page (personal + up to 8 public games)
async fn get_home(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.portal.landing().await))
}

/// GET /api/games/personal
async fn get_personal_games(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.portal.personal_games()))
}

/// GET /api/games/public - Live public games, curated on failure
async fn get_public_games(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.portal.public_games().await))
}

/// GET /api/events
async fn get_events(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.portal.events()))
}

/// GET /api/resources
async fn get_resources(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.portal.resources()))
}

/// GET /api/insight - Insights and community highlights
async fn get_insight(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.portal.insight()))
}

/// GET /api/categories - Search filter options
async fn get_categories() -> impl IntoResponse {
    let categories: Vec<CategoryResponse> = CategoryKey::ALL
        .iter()
        .map(|key| CategoryResponse {
            key: *key,
            label: key.label(),
            href: key.href(),
        })
        .collect();

    Json(ApiResponse::ok(categories))
}

/// GET /api/search?q=...&sections=...&sections=...
///
/// `q` may repeat; the first value wins. `sections` is multi-valued.
async fn search(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let query = params
        .iter()
        .find(|(name, _)| name == "q")
        .map(|(_, value)| value.as_str())
        .unwrap_or("");

    let selection = FilterSelection::from_params(
        params
            .iter()
            .filter(|(name, _)| name == "sections")
            .map(|(_, value)| value.as_str()),
    );

    Json(ApiResponse::ok(state.portal.search(query, &selection).await))
}

/// POST /api/playtest - Compose the playtest request email link
async fn request_playtest(Json(request): Json<PlaytestRequest>) -> impl IntoResponse {
    tracing::info!(game = %request.game, "Playtest request composed");
    Json(ApiResponse::ok(MailtoResponse {
        mailto: request.mailto_url(),
    }))
}

/// GET /api/submit-game - "Submit Game" email link
async fn submit_game() -> impl IntoResponse {
    Json(ApiResponse::ok(MailtoResponse {
        mailto: mailto::submit_game_mailto(),
    }))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(portal: Arc<PortalService>) -> Router {
    let state = AppState { portal };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/home", get(get_home))
        .route("/games/personal", get(get_personal_games))
        .route("/games/public", get(get_public_games))
        .route("/events", get(get_events))
        .route("/resources", get(get_resources))
        .route("/insight", get(get_insight))
        .route("/categories", get(get_categories))
        .route("/search", get(search))
        .route("/playtest", post(request_playtest))
        .route("/submit-game", get(submit_game))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, FetcherConfig};
    use crate::site_data::SiteData;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        let config = Config {
            fetcher: FetcherConfig {
                endpoint: "http://127.0.0.1:1/api/games".to_string(),
                ..FetcherConfig::default()
            },
            ..Config::default()
        };
        let portal = PortalService::new(&config, Arc::new(SiteData::builtin().clone())).unwrap();
        router(Arc::new(portal))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, json) = get_json("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "OK");
    }

    #[tokio::test]
    async fn test_search_with_sections() {
        let (status, json) =
            get_json("/api/search?q=coding&sections=personal&sections=events").await;

        assert_eq!(status, StatusCode::OK);
        let data = &json["data"];
        assert_eq!(data["query"], "coding");
        assert_eq!(data["personal"].as_array().unwrap().len(), 1);
        assert_eq!(data["events"].as_array().unwrap().len(), 0);
        assert!(data.get("public").is_none());
        assert_eq!(data["total_count"], 1);
        assert_eq!(data["status"], "found");
    }

    #[tokio::test]
    async fn test_search_without_query() {
        let (_, json) = get_json("/api/search").await;

        assert_eq!(json["data"]["status"], "awaiting_input");
        assert_eq!(json["data"]["total_count"], 0);
        assert_eq!(json["data"]["selection"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_public_games_offline() {
        let (_, json) = get_json("/api/games/public").await;
        assert_eq!(json["data"]["games"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_categories() {
        let (_, json) = get_json("/api/categories").await;
        let categories = json["data"].as_array().unwrap();

        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0]["key"], "personal");
        assert_eq!(categories[0]["href"], "/games-pesat");
    }

    #[tokio::test]
    async fn test_playtest_mailto() {
        let body = serde_json::json!({ "name": "Sari", "game": "Memory Match" }).to_string();
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/playtest")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let mailto = json["data"]["mailto"].as_str().unwrap();
        assert!(mailto.ends_with("Portal%20Games."));
        assert!(mailto.contains("Request%20Playtest%20-%20Memory%20Match"));
    }
}
