//! # County Data
//!
//! A serverless lookup endpoint for county health rankings.
//!
//! A request names a ZIP code and a health measure. The ZIP code is mapped to
//! its counties through the `zip_county` table, and the matching rows of
//! `county_health_rankings` for that measure are returned as JSON.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`validation`] - Field coercion, ZIP code and measure allow-list checks
//! - [`store`] - Database location and read-only SQLite lookups
//! - [`function`] - The request pipeline over platform events
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use county_data::{create_router, RouterConfig, SqliteRankingSource};
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = create_router(SqliteRankingSource::default(), RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod function;
pub mod server;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use config::{CheckConfig, Cli, Command, DatabaseArgs, InvokeConfig, ServeConfig};
pub use error::LookupError;
pub use function::{CountyDataFunction, FunctionEvent, FunctionResponse};
pub use server::{create_router, AppState, RouterConfig};
pub use store::{
    DatabaseLocator, DbCandidate, RankingRow, RankingSource, SqliteRankingSource,
    DATABASE_FILE_NAME, TASK_ROOT_ENV,
};
pub use validation::{Measure, ZipCode};
