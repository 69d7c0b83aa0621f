//! HTTP surface for the scraper.
//!
//! Authentication happens upstream; the authenticated caller reaches this
//! service with its id in the `x-user-id` header.

use crate::config::ScraperConfig;
use crate::fetchers::Renderer;
use crate::pipelines::{RecipeScraper, ScrapeResponse};
use crate::token::TokenIssuer;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

pub const USER_ID_HEADER: &str = "x-user-id";

pub struct AppState<R> {
    pub scraper: RecipeScraper<R>,
    pub issuer: Box<dyn TokenIssuer>,
}

#[derive(Debug, Deserialize)]
pub struct ScrapeParams {
    #[serde(default)]
    pub url: String,
}

impl IntoResponse for ScrapeResponse {
    fn into_response(self) -> Response {
        let status = match &self {
            ScrapeResponse::Success { .. } => StatusCode::OK,
            ScrapeResponse::Failure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub fn router<R: Renderer + 'static>(state: Arc<AppState<R>>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/recipes/scrape", get(scrape_recipe::<R>))
        .with_state(state)
}

/// Bind to the configured address and serve until the process stops.
pub async fn serve<R: Renderer + 'static>(
    config: &ScraperConfig,
    state: Arc<AppState<R>>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

pub async fn scrape_recipe<R: Renderer>(
    State(state): State<Arc<AppState<R>>>,
    headers: HeaderMap,
    Query(params): Query<ScrapeParams>,
) -> Response {
    let Some(user_id) = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
    else {
        warn!("Scrape request without {} header", USER_ID_HEADER);
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "auth error" })),
        )
            .into_response();
    };

    state
        .scraper
        .respond(&params.url, user_id, state.issuer.as_ref())
        .await
        .into_response()
}
