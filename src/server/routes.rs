//! Axum router for the Transformix API.
//!
//! ## Route structure
//!
//! ```text
//! GET  /                  - capability listing (ordered, with form schemas)
//! POST <endpoint>         - one conversion route per registered capability,
//!                           e.g. /pdf/merge, /convert/word-to-pdf
//! ```

use super::error::ApiError;
use super::multipart;
use crate::capabilities::CapabilityRegistry;
use crate::models::Capability;
use crate::tools::Workspace;
use axum::extract::{DefaultBodyLimit, MatchedPath, Multipart, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::middleware::{from_fn, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

/// Default cap on one upload body. Conversions routinely take large inputs,
/// so axum's 2 MiB default is far too small.
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024 * 1024;

/// Server shared state.
#[derive(Clone)]
pub struct ServerState {
    pub registry: Arc<CapabilityRegistry>,
}

impl ServerState {
    pub fn new(registry: Arc<CapabilityRegistry>) -> Self {
        Self { registry }
    }
}

/// Build the router: the listing route plus one POST route per capability.
pub fn build_router(state: ServerState, body_limit: usize) -> Router {
    let mut router = Router::new().route("/", get(list_capabilities));

    for handler in state.registry.iter() {
        router = router.route(handler.endpoint(), post(convert));
    }

    router
        .layer(from_fn(request_log_middleware))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn request_log_middleware(
    headers: HeaderMap,
    request: axum::extract::Request,
    next: Next,
) -> Response {
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    log::info!(
        "request_id={} method={} path={}",
        request_id,
        request.method(),
        request.uri().path()
    );
    next.run(request).await
}

/// GET / - the ordered capability listing.
async fn list_capabilities(State(state): State<ServerState>) -> Json<Vec<Capability>> {
    Json(state.registry.descriptors())
}

/// POST <endpoint> - run one conversion and stream the produced file back.
async fn convert(
    State(state): State<ServerState>,
    matched: MatchedPath,
    body: Multipart,
) -> Result<Response, ApiError> {
    let endpoint = matched.as_str();
    let handler = state
        .registry
        .get(endpoint)
        .ok_or_else(|| ApiError::not_found(format!("unknown capability endpoint {}", endpoint)))?;

    let workspace =
        Workspace::new().map_err(|e| ApiError::internal(format!("workspace setup failed: {}", e)))?;
    let request = multipart::extract(body, &workspace).await?;

    let output = handler.execute(&request, &workspace).await.map_err(|e| {
        log::warn!("{} failed: {}", endpoint, e);
        ApiError::from(e)
    })?;

    // Read the file into memory before the workspace (and everything the
    // tools wrote) is cleaned up.
    let data = tokio::fs::read(&output.path)
        .await
        .map_err(|e| ApiError::internal(format!("reading produced file failed: {}", e)))?;
    log::info!("{} produced {} bytes", endpoint, data.len());

    let disposition = HeaderValue::from_str(&format!("attachment; filename={}", output.filename))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(output.media_type));
    headers.insert(header::CONTENT_DISPOSITION, disposition);

    Ok((StatusCode::OK, headers, data).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_shares_registry() {
        let state = ServerState::new(Arc::new(CapabilityRegistry::new()));
        let other = state.clone();
        assert_eq!(state.registry.len(), other.registry.len());
        assert!(Arc::ptr_eq(&state.registry, &other.registry));
    }
}
