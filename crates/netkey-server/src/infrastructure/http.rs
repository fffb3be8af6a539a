//! HTTP front end: axum router and serve loop.
//!
//! # Routes
//!
//! - `POST <type>` - type text through a host keyboard layout
//! - `POST <type_keycodes>` - press named key combinations
//! - `GET <disable_boot_keyboard>` - remove the boot-keyboard marker
//! - `GET <hard_reset>` - stop the server so the supervisor restarts it
//! - `GET /health` - liveness check
//!
//! The four API paths come from [`EndpointConfig`](crate::domain::config::EndpointConfig).
//!
//! Handlers here only move bytes: the body goes to
//! [`RequestHandler`] and the [`ApiReply`] comes back as a status code plus
//! JSON. Bodies are taken as raw [`Bytes`] rather than `Json<T>` so that
//! malformed JSON gets this API's own error payload instead of axum's.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::application::{handle_admin, AdminAction, RequestHandler};
use crate::domain::config::HEALTH_PATH;
use crate::domain::{ApiReply, AppConfig, ReplyStatus};

/// How often the shutdown watcher checks the `running` flag.
const SHUTDOWN_POLL: Duration = Duration::from_millis(200);

// ── Application state ─────────────────────────────────────────────────────────

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    handler: RequestHandler,
    disable_boot_keyboard: AdminAction,
    hard_reset: AdminAction,
}

impl AppState {
    pub fn new(
        handler: RequestHandler,
        disable_boot_keyboard: AdminAction,
        hard_reset: AdminAction,
    ) -> Self {
        Self {
            handler,
            disable_boot_keyboard,
            hard_reset,
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

impl IntoResponse for ApiReply {
    fn into_response(self) -> Response {
        let status = match self.status {
            ReplyStatus::Ok => StatusCode::OK,
            ReplyStatus::BadRequest => StatusCode::BAD_REQUEST,
            ReplyStatus::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self.body)).into_response()
    }
}

// ── Route handlers ────────────────────────────────────────────────────────────

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn type_text(State(state): State<AppState>, body: Bytes) -> ApiReply {
    state.handler.handle_type(&body).await
}

async fn type_keycodes(State(state): State<AppState>, body: Bytes) -> ApiReply {
    state.handler.handle_type_keycodes(&body).await
}

async fn disable_boot_keyboard(State(state): State<AppState>) -> ApiReply {
    handle_admin("disable_boot_keyboard", &state.disable_boot_keyboard)
}

async fn hard_reset(State(state): State<AppState>) -> ApiReply {
    handle_admin("hard_reset", &state.hard_reset)
}

// ── Router setup ──────────────────────────────────────────────────────────────

/// Builds the router with the endpoint paths from `config`.
///
/// `config` is expected to have passed [`AppConfig::validate`]; axum panics
/// on duplicate or malformed paths.
pub fn create_router(config: &AppConfig, state: AppState) -> Router {
    let endpoints = &config.api_endpoints;
    Router::new()
        .route(HEALTH_PATH, get(health_check))
        .route(&endpoints.type_text, post(type_text))
        .route(&endpoints.type_keycodes, post(type_keycodes))
        .route(&endpoints.disable_boot_keyboard, get(disable_boot_keyboard))
        .route(&endpoints.hard_reset, get(hard_reset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves `app` on `addr` until `running` is cleared.
///
/// In-flight requests are allowed to finish before this returns, so a
/// command that is halfway through typing still releases its keys.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound (port in use, or port 80
/// without the needed privilege) or if serving fails.
pub async fn run_server(
    addr: SocketAddr,
    app: Router,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {addr}"))?;

    info!("netkey listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_stop(running))
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn wait_for_stop(running: Arc<AtomicBool>) {
    while running.load(Ordering::Relaxed) {
        tokio::time::sleep(SHUTDOWN_POLL).await;
    }
    info!("shutdown flag set; draining HTTP connections");
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::HidCommandExecutor;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use netkey_core::device::recording::RecordingDevice;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router(config: &AppConfig) -> Router {
        let executor = Arc::new(HidCommandExecutor::new(Arc::new(RecordingDevice::new())));
        let noop: AdminAction = Arc::new(|| Ok(()));
        let state = AppState::new(RequestHandler::new(executor), noop.clone(), noop);
        create_router(config, state)
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_version() {
        let app = router(&AppConfig::default());

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_configured_paths_are_used() {
        // Arrange
        let mut config = AppConfig::default();
        config.api_endpoints.type_text = "/kbd/write".to_string();
        let app = router(&config);

        // Act
        let moved = app
            .clone()
            .oneshot(
                Request::post("/kbd/write")
                    .body(Body::from(r#"{"data":"a"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        let old = app
            .oneshot(
                Request::post("/type")
                    .body(Body::from(r#"{"data":"a"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        // Assert
        assert_eq!(moved.status(), StatusCode::OK);
        assert_eq!(old.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wrong_method_is_rejected() {
        let app = router(&AppConfig::default());

        let response = app
            .oneshot(Request::get("/type").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_reply_status_maps_to_http_status() {
        let reply = ApiReply::internal_error("boom");

        let response = reply.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await, json!({"error": "boom"}));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_stop_returns_once_flag_clears() {
        let running = Arc::new(AtomicBool::new(true));
        let waiter = tokio::spawn(wait_for_stop(Arc::clone(&running)));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!waiter.is_finished());

        running.store(false, Ordering::Relaxed);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }
}
