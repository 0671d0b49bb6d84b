//! Axum route handlers for the boinc-api HTTP server.
//!
//! # Routes
//!
//! - `GET  /healthcheck`  — Returns `{"ok": true}`
//! - `POST /boinc2docker` — Accepts `{"cmd": "..."}`, runs it, echoes `cmd` back

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, Method, Request},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::executor::CommandExecutor;

/// Body of `POST /boinc2docker`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandRequest {
    /// Shell-style command line. Absent decodes as empty.
    #[serde(default)]
    pub cmd: String,
}

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Configuration the server was started with.
    pub config: Arc<ServerConfig>,
    /// Executor for submitted commands.
    pub executor: Arc<CommandExecutor>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let executor = CommandExecutor::from_config(&config);
        Self {
            config: Arc::new(config),
            executor: Arc::new(executor),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origin);
    Router::new()
        .route("/healthcheck", get(healthcheck_handler))
        .route("/boinc2docker", post(boinc2docker_handler))
        .layer(cors)
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// CORS policy: one origin, echoed back only to requests from it, and only
/// the Origin, Content-Type and Accept request headers.
fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let origin = match HeaderValue::from_str(allowed_origin) {
        Ok(value) => AllowOrigin::list([value]),
        Err(e) => {
            tracing::warn!(
                "Allowed origin '{}' is not a valid header value ({}); no origin will be allowed",
                allowed_origin,
                e
            );
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
}

/// One log line per request: method, path, status, latency.
async fn log_requests(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_secs_f64() * 1000.0,
        "request"
    );
    response
}

/// GET /healthcheck — liveness probe.
async fn healthcheck_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

/// POST /boinc2docker — run a submitted command and capture its stdout.
///
/// Responds with the submitted `cmd` as plain text once the command has
/// exited successfully. The captured output stays in the log directory.
async fn boinc2docker_handler(
    State(state): State<AppState>,
    payload: Result<Json<CommandRequest>, JsonRejection>,
) -> Result<String, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;

    let report = state.executor.execute(&request.cmd).await?;
    tracing::debug!(
        log = %report.log_path.display(),
        args = report.args.len(),
        "Submission captured"
    );

    Ok(request.cmd)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
