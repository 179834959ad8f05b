//! Request handlers for the API.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{ApiError, ApiResult};
use super::state::AppState;

/// Body of `POST /fetch`, and query of `GET /fetch`.
#[derive(Debug, Default, Deserialize)]
pub struct FetchRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Successful rewrite.
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchResponse {
    pub success: bool,
    pub content: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `POST /fetch` with a JSON body.
///
/// The body is read as JSON whatever its `Content-Type`. A body that is not
/// JSON counts as a request without a url.
pub async fn fetch_json(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<FetchResponse>> {
    let request = serde_json::from_slice(&body).unwrap_or_else(|e| {
        debug!(error = %e, "unreadable fetch request body");
        FetchRequest::default()
    });
    fetch_and_rewrite(&state, request).await
}

/// `GET /fetch?url=...`.
pub async fn fetch_query(
    State(state): State<Arc<AppState>>,
    Query(request): Query<FetchRequest>,
) -> ApiResult<Json<FetchResponse>> {
    fetch_and_rewrite(&state, request).await
}

/// `GET /health`.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn fetch_and_rewrite(
    state: &AppState,
    request: FetchRequest,
) -> ApiResult<Json<FetchResponse>> {
    let url = request
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or(ApiError::MissingUrl)?;

    let page = state.fetcher.fetch(url.trim()).await?;

    // Parsing is CPU-bound; keep it off the async workers
    let rewriter = Arc::clone(&state.rewriter);
    let content = tokio::task::spawn_blocking(move || {
        rewriter.transform_bytes(&page.body, page.charset.as_deref())
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    info!(%url, bytes = content.len(), "rewrote page");
    Ok(Json(FetchResponse {
        success: true,
        content,
    }))
}
