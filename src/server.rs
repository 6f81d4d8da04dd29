//! Web server mode.
//!
//! A small axum app: `/` composes the map from live feed data and serves the
//! rendered page, `/health` answers OK. Feed failures degrade to an emptier
//! map rather than an error page; only a render failure is a 500.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};

use crate::client::{FeedClient, FeedSpec};
use crate::map::{self, MapConfig};
use crate::render;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub feed: FeedSpec,
    pub map: MapConfig,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    client: Arc<FeedClient>,
    config: ServerConfig,
}

/// Create the axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(map_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(config: ServerConfig, client: FeedClient) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);

    let state = AppState {
        client: Arc::new(client),
        config,
    };
    let app = create_router(state);

    tracing::info!("serving earthquake map at http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Compose and serve the map page.
async fn map_handler(State(state): State<AppState>) -> Response {
    let doc = map::compose(&state.client, state.config.feed, state.config.map.clone()).await;

    match render::render_page(&doc) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("failed to render map page: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "map rendering failed").into_response()
        }
    }
}

/// Health check endpoint.
async fn health_handler() -> &'static str {
    "OK"
}
