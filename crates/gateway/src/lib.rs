//! HTTP control surface for docroute.
//!
//! Exposes the operator actions of [`ControlPlane`] as JSON endpoints:
//! log listing, retry, restore, and force-route, plus a health check.
//!
//! Built on Axum; every route is wrapped in a `TraceLayer`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::{
    Router,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use docroute_config::GatewayConfig;
use docroute_core::audit::{LogEntry, RouteStatus};
use docroute_router::{ControlError, ControlPlane, RestoreRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub control: Arc<ControlPlane>,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl GatewayState {
    pub fn new(control: Arc<ControlPlane>) -> Self {
        Self {
            control,
            started_at: chrono::Utc::now(),
        }
    }
}

type SharedState = Arc<GatewayState>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: message.into() }))
}

fn control_error(e: ControlError) -> ApiError {
    if e.is_client_error() {
        let status = match &e {
            ControlError::Storage(s) if s.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        api_error(status, e.to_string())
    } else {
        error!(error = %e, "Control operation failed");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/logs", get(logs_handler))
        .route("/retry", post(retry_handler))
        .route("/restore", post(restore_handler))
        .route("/force-route", post(force_route_handler))
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start(config: &GatewayConfig, control: Arc<ControlPlane>) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.host, config.port);
    let app = build_router(Arc::new(GatewayState::new(control)));

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_secs: i64,
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: (chrono::Utc::now() - state.started_at).num_seconds(),
    })
}

#[derive(Debug, Deserialize)]
struct LogsQuery {
    client: Option<String>,
    status: Option<String>,
}

async fn logs_handler(
    State(state): State<SharedState>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> Result<Json<Vec<LogEntry>>, ApiError> {
    let Query(query) = query.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;
    let status = query
        .status
        .as_deref()
        .map(str::parse::<RouteStatus>)
        .transpose()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;

    let entries = state
        .control
        .list_logs(query.client.as_deref(), status)
        .await
        .map_err(control_error)?;
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
struct RetryRequest {
    bucket: String,
    key: String,
}

#[derive(Serialize)]
struct EnqueuedResponse {
    status: &'static str,
}

async fn retry_handler(
    State(state): State<SharedState>,
    payload: Result<Json<RetryRequest>, JsonRejection>,
) -> Result<Json<EnqueuedResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;
    state
        .control
        .retry(&request.bucket, &request.key)
        .await
        .map_err(control_error)?;
    Ok(Json(EnqueuedResponse { status: "enqueued" }))
}

#[derive(Serialize)]
struct RestoreResponse {
    restored_key: String,
}

async fn restore_handler(
    State(state): State<SharedState>,
    payload: Result<Json<RestoreRequest>, JsonRejection>,
) -> Result<Json<RestoreResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;
    let restored_key = state.control.restore(&request).await.map_err(control_error)?;
    Ok(Json(RestoreResponse { restored_key }))
}

#[derive(Debug, Deserialize)]
struct ForceRouteRequest {
    key: String,
}

async fn force_route_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ForceRouteRequest>, JsonRejection>,
) -> Result<Json<EnqueuedResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;
    state.control.force_route(&request.key).await.map_err(control_error)?;
    Ok(Json(EnqueuedResponse { status: "enqueued" }))
}

async fn not_found_handler() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "not found")
}
