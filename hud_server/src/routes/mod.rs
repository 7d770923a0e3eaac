//! HUD HTTP routes — snapshot ingest, JSON API, rendered views.

pub mod api;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{Html, IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use tokio::sync::RwLock;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::HudConfig;
use crate::dashboard::error_pane;
use crate::dashboard::memo::Memo;
use crate::dashboard::path_builder::PathBuilder;
use crate::error::{HudError, Result};
use crate::services::snapshot_service::{ReplaceOutcome, SnapshotStore};

/// Shared state for HUD route handlers.
#[derive(Clone)]
pub struct HudRouterState {
    pub store: Arc<RwLock<SnapshotStore>>,
    pub config: HudConfig,
    pub path_builder: PathBuilder,
    /// Rendered error pane keyed by snapshot revision.
    pub error_pane_cache: Arc<Mutex<Memo<u64, Bytes>>>,
}

impl HudRouterState {
    pub fn new(config: HudConfig, host: &str) -> Result<Self> {
        config.validate()?;
        let path_builder = PathBuilder::new(host, &config.pathname());
        Ok(Self {
            store: Arc::new(RwLock::new(SnapshotStore::new()?)),
            config,
            path_builder,
            error_pane_cache: Arc::new(Mutex::new(Memo::new())),
        })
    }
}

fn status_for(err: &HudError) -> StatusCode {
    match err {
        HudError::InvalidSnapshot(_) => StatusCode::BAD_REQUEST,
        HudError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn cors_layer(config: &HudConfig) -> CorsLayer {
    let origin = config
        .cors_origin
        .as_deref()
        .and_then(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid HUD_CORS_ORIGIN '{}': {}", o, e);
                None
            }
        });
    match origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST]),
        None => CorsLayer::permissive(),
    }
}

/// Build the HUD's Axum router.
pub fn hud_router(state: HudRouterState) -> Router {
    let body_limit = state.config.max_snapshot_bytes;
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/healthz", get(healthz))
        // Snapshot ingest
        .route("/api/snapshot", post(push_snapshot))
        // JSON API
        .route("/api/errors", get(list_errors))
        .route("/api/sidebar", get(list_sidebar))
        // Rendered views
        .route("/view/errors", get(view_errors))
        .route("/view/sidebar", get(view_sidebar))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

// ── Snapshot ingest ──

async fn push_snapshot(
    State(state): State<HudRouterState>,
    body: Bytes,
) -> std::result::Result<(StatusCode, Json<ReplaceOutcome>), StatusCode> {
    let snapshot = api::parse_snapshot(&body).map_err(|e| {
        tracing::warn!("Rejected snapshot: {e}");
        status_for(&e)
    })?;

    let mut store = state.store.write().await;
    store
        .replace(snapshot)
        .map(|outcome| (StatusCode::ACCEPTED, Json(outcome)))
        .map_err(|e| {
            tracing::error!("Snapshot store error: {e}");
            status_for(&e)
        })
}

// ── JSON API ──

async fn list_errors(State(state): State<HudRouterState>) -> Json<api::ErrorsJson> {
    let current = state.store.read().await.current();
    Json(api::errors_json(&current))
}

async fn list_sidebar(
    State(state): State<HudRouterState>,
    Query(query): Query<api::SidebarQuery>,
) -> Json<Vec<api::SidebarItemJson>> {
    let current = state.store.read().await.current();
    Json(api::sidebar_json(&current, &state.path_builder, &query))
}

// ── Rendered views ──

/// Strong validator for bodies that depend only on the snapshot.
fn etag(fingerprint: &str) -> String {
    format!("\"{fingerprint}\"")
}

async fn view_errors(
    State(state): State<HudRouterState>,
) -> std::result::Result<impl IntoResponse, StatusCode> {
    let current = state.store.read().await.current();
    let html = {
        let mut cache = state
            .error_pane_cache
            .lock()
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        cache
            .get_or_compute(current.revision, || {
                crate::metrics::view_rendered("errors");
                Bytes::from(error_pane::render(&current.errors))
            })
            .clone()
    };

    Ok(([(header::ETAG, etag(&current.fingerprint))], Html(html)))
}

async fn view_sidebar(
    State(state): State<HudRouterState>,
    Query(query): Query<api::SidebarQuery>,
) -> impl IntoResponse {
    let current = state.store.read().await.current();
    crate::metrics::view_rendered("sidebar");
    let html = api::sidebar_html(&current, &state.path_builder, &query, chrono::Utc::now());
    ([(header::ETAG, api::content_etag(&html))], Html(html))
}
