//! Router configuration for the county data API.
//!
//! # Route Structure
//!
//! ```text
//! /                                  - Usage error (GET)
//! /health                            - Health check (GET)
//! /county_data                       - Lookup (POST)
//! /.netlify/functions/county_data    - Lookup, platform path (POST)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use county_data::server::routes::{create_router, RouterConfig};
//! use county_data::store::SqliteRankingSource;
//!
//! let router = create_router(SqliteRankingSource::default(), RouterConfig::new());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use http::header::CONTENT_TYPE;
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{county_data_handler, health_handler, index_handler, AppState};
use crate::store::RankingSource;

/// Lookup route.
pub const COUNTY_DATA_PATH: &str = "/county_data";

/// Lookup route as exposed by the serverless platform.
pub const PLATFORM_COUNTY_DATA_PATH: &str = "/.netlify/functions/county_data";

/// How long browsers may cache a preflight response.
const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86400);

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a router configuration with tracing enabled.
    pub fn new() -> Self {
        Self {
            enable_tracing: true,
        }
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// The lookup endpoint answers any origin, so CORS preflight is open as well.
pub fn create_router<S>(source: S, config: RouterConfig) -> Router
where
    S: RankingSource + 'static,
{
    let app_state = AppState::new(source);

    let router = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route(COUNTY_DATA_PATH, post(county_data_handler::<S>))
        .route(PLATFORM_COUNTY_DATA_PATH, post(county_data_handler::<S>))
        .with_state(app_state)
        .layer(build_cors_layer());

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer.
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(PREFLIGHT_MAX_AGE)
}

// =============================================================================
// Tests
// =============================================================================
