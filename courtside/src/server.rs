//! HTTP endpoint wrapping the momentum analysis.
//!
//! Routes:
//! - `GET  /health`  → `{"ok": true}`
//! - `POST /analyze` → `{"result": "..."}` or `{"error": "..."}`
//!
//! `/analyze` takes a JSON body with `court_b64` (base64 image or data URI),
//! `transcript` (play-by-play text) and an optional `quarter` selector that
//! defaults to `Full Game`. Input problems answer 400; model failures 500.

use std::future::Future;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::analysis::Analyst;
use crate::error::{Error, Result};
use crate::image::normalize_image_payload;
use crate::transcript::{Selector, select_period};

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    /// Interface to bind.
    pub bind: String,
    /// TCP port.
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_owned(),
            port: 5000,
        }
    }
}

struct AppState {
    analyst: Analyst,
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Court diagram as base64 or a data URI.
    #[serde(default)]
    pub court_b64: Option<String>,
    /// Play-by-play transcript.
    #[serde(default)]
    pub transcript: Option<String>,
    /// Quarter selector label; absent means the full game.
    #[serde(default)]
    pub quarter: Option<String>,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    result: String,
}

// ── Error Handling ──

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Failed(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Failed(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Failed(err) if err.is_input_error() => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Failed(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };
        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

// ── Entrypoint ──

/// Build the router (for testing without binding to a port).
pub fn router(analyst: Analyst) -> Router {
    let state = Arc::new(AppState { analyst });
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until `shutdown` resolves.
///
/// # Errors
///
/// Returns an I/O error if the address cannot be bound or the server fails.
pub async fn serve<F>(config: &ServeConfig, analyst: Analyst, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "courtside HTTP server listening");

    axum::serve(listener, router(analyst))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

// ── Handlers ──

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> std::result::Result<Json<AnalyzeResponse>, ApiError> {
    let request = parse_request(&body)?;

    let image = request
        .court_b64
        .as_deref()
        .and_then(normalize_image_payload)
        .ok_or_else(|| {
            ApiError::BadRequest("Missing 'court_b64' (Base64\u{2010}encoded image).".to_owned())
        })?;

    let transcript = request.transcript.as_deref().unwrap_or_default().trim();
    if transcript.is_empty() {
        return Err(ApiError::BadRequest(
            "Missing transcript (video upload disabled).".to_owned(),
        ));
    }

    let selector = match request.quarter.as_deref() {
        None => Selector::FullGame,
        Some(raw) => raw.parse::<Selector>().map_err(Error::from)?,
    };

    let filtered = select_period(transcript, selector).map_err(Error::from)?;

    match state
        .analyst
        .analyze_quarter(selector, &image, &filtered)
        .await
    {
        Ok(result) => Ok(Json(AnalyzeResponse { result })),
        Err(err) => {
            warn!(error = %err, quarter = %selector, "analysis failed");
            Err(err.into())
        }
    }
}

/// Bodies that are not JSON at all (or `null`) read as an empty request.
/// JSON of the wrong shape is a JSON error.
fn parse_request(body: &[u8]) -> Result<AnalyzeRequest> {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(serde_json::Value::Null) | Err(_) => Ok(AnalyzeRequest::default()),
        Ok(value) => Ok(serde_json::from_value(value)?),
    }
}
