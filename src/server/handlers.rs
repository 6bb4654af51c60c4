//! HTTP request handlers for the county data API.
//!
//! # Endpoints
//!
//! - `POST /county_data` - County health ranking lookup
//! - `GET /health` - Health check endpoint
//! - `GET /` - Usage error

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::function::{CountyDataFunction, FunctionEvent, FunctionResponse};
use crate::store::RankingSource;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the lookup function.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<S: RankingSource> {
    /// The function that serves lookups
    pub function: Arc<CountyDataFunction<S>>,
}

impl<S: RankingSource> AppState<S> {
    /// Create a new application state over the given ranking source.
    pub fn new(source: S) -> Self {
        Self {
            function: Arc::new(CountyDataFunction::new(source)),
        }
    }
}

impl<S: RankingSource> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            function: Arc::clone(&self.function),
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error body: `{"result": null, "error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always null for errors
    pub result: Option<()>,

    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            result: None,
            error: error.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Conversions
// =============================================================================

/// Build a function event from an HTTP request.
///
/// Header names are lowercased; values that are not visible ASCII are
/// dropped. An empty body becomes `None`.
pub fn event_from_http(headers: &HeaderMap, body: &[u8]) -> FunctionEvent {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    let body = if body.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(body).into_owned())
    };

    FunctionEvent {
        headers,
        body,
        is_base64_encoded: false,
    }
}

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();

        for (name, value) in &self.headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => warn!(header = %name, "Dropping invalid response header"),
            }
        }

        response
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle county data lookups.
///
/// # Endpoint
///
/// `POST /county_data`
///
/// # Request
///
/// ```json
/// { "zip": "10001", "measure_name": "Unemployment" }
/// ```
///
/// # Response
///
/// - `200 OK`: JSON array of matching `county_health_rankings` rows
/// - `400 Bad Request`: `Invalid JSON`, `Invalid zip code` or `Invalid measure name`
/// - `418 I'm a teapot`: diagnostic probe
/// - `500 Internal Server Error`: database missing or query failure
pub async fn county_data_handler<S: RankingSource + 'static>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let event = event_from_http(&headers, &body);
    state.function.handle(&event).await.into_response()
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle requests to the root path, which takes no parameters.
///
/// Always `400 Bad Request` with `Missing required fields`.
pub async fn index_handler() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("Missing required fields")),
    )
}

// =============================================================================
// Tests
// =============================================================================
