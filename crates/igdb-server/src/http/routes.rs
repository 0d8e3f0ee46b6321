use super::{AppResult, AppState, JsonResponse};
use axum::{
    extract::{OriginalUri, Path, State},
    http::Method,
    response::Json,
    routing::get,
    Router,
};
use igdb_core::manifest::SEARCH_EXTRA;
use igdb_core::{CatalogError, CatalogRequest, CatalogResponse, GameSource, Manifest, MetaResponse};
use serde::Serialize;
use std::collections::HashMap;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    // The host platform fetches addon resources cross-origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/manifest.json", get(manifest))
        .route("/catalog/:type/:id", get(catalog))
        .route("/catalog/:type/:id/:extra", get(catalog_with_extra))
        .route("/meta/:type/:id", get(meta))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    healthy: bool,
    version: String,
    uptime_seconds: u64,
    upstream: String,
}

async fn health(State(state): State<AppState>) -> Json<JsonResponse<HealthResponse>> {
    Json(JsonResponse::ok(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        upstream: state.addon.source().name().to_string(),
    }))
}

async fn manifest(State(state): State<AppState>) -> Json<Manifest> {
    Json(state.addon.manifest().clone())
}

async fn catalog(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> AppResult<Json<CatalogResponse>> {
    let id = json_resource(&id)?;
    let metas = state.addon.catalog(&kind, id, CatalogRequest::Recent).await?;
    Ok(Json(CatalogResponse { metas }))
}

async fn catalog_with_extra(
    State(state): State<AppState>,
    Path((kind, id, _)): Path<(String, String, String)>,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Json<CatalogResponse>> {
    // `Path` has already percent-decoded the segment, which would turn an
    // encoded `&` or `=` inside a value into a separator.
    let raw = uri.path().rsplit('/').next().unwrap_or_default();
    let extra = parse_extra(json_resource(raw)?);
    let request = CatalogRequest::from_search(extra.get(SEARCH_EXTRA).map(String::as_str));
    let metas = state.addon.catalog(&kind, &id, request).await?;
    Ok(Json(CatalogResponse { metas }))
}

async fn meta(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> AppResult<Json<MetaResponse>> {
    let id = json_resource(&id)?;
    let meta = state.addon.meta(&kind, id).await?;
    Ok(Json(MetaResponse { meta }))
}

/// Resources are addressed as `<name>.json`; the router can only capture
/// whole segments, so the suffix is stripped here.
fn json_resource(segment: &str) -> Result<&str, CatalogError> {
    segment
        .strip_suffix(".json")
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CatalogError::NotFound(segment.to_string()))
}

/// `key=value&key=value` extra arguments, still percent-encoded. Split first,
/// then decode each key and value. Keys without `=` get an empty value.
fn parse_extra(extra: &str) -> HashMap<String, String> {
    extra
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (decode_component(k), decode_component(v)),
            None => (decode_component(pair), String::new()),
        })
        .collect()
}

/// Query-string decoding: `+` is a space. Invalid UTF-8 keeps the raw text.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
