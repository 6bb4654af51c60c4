//! HTTP server layer for the county data API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │                     POST /county_data                           │
//! │                                                                 │
//! │  ┌──────────────────────────┐  ┌─────────────────────────────┐  │
//! │  │        handlers          │  │           routes            │  │
//! │  │ (HTTP ⇄ function event)  │  │  (router, CORS, tracing)    │  │
//! │  └──────────────────────────┘  └─────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    county_data_handler, event_from_http, health_handler, index_handler, AppState, ErrorResponse,
    HealthResponse,
};
pub use routes::{create_router, RouterConfig, COUNTY_DATA_PATH, PLATFORM_COUNTY_DATA_PATH};
