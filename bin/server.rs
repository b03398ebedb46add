// Portal Games - Web Server
// JSON API with Axum

use anyhow::{Context, Result};
use portal_games::{load_site_data, server, Config, PortalService};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,portal_games=debug,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Portal Games server v{}", portal_games::VERSION);

    let config = Config::from_env()?;
    tracing::info!(
        endpoint = %config.fetcher.endpoint,
        revalidate_secs = config.fetcher.revalidate_secs,
        listing_deny = ?config.listing_deny_keywords,
        search_deny = ?config.search_deny_keywords,
        "Configuration loaded"
    );

    let data = load_site_data(&config)?;
    tracing::info!(
        personal = data.personal_games.len(),
        curated = data.curated_public_games.len(),
        events = data.events.len(),
        resources = data.resources.len(),
        "Site data ready"
    );

    let portal = PortalService::new(&config, Arc::new(data))
        .context("Failed to build portal service")?;
    let app = server::router(Arc::new(portal));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server running on http://localhost:{}", config.port);
    tracing::info!("  Search: http://localhost:{}/api/search?q=coding", config.port);

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
