//! County health ranking storage.
//!
//! This module provides read-only access to the rankings database.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            CountyDataFunction           │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │          RankingSource Trait            │
//! │   (ZIP + measure → ranking rows)        │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │          SqliteRankingSource            │
//! │  ┌──────────────────┐ ┌──────────────┐  │
//! │  │ DatabaseLocator  │ │  row_to_json │  │
//! │  │ (find data.db)   │ │  (columns →  │  │
//! │  │                  │ │   JSON)      │  │
//! │  └──────────────────┘ └──────────────┘  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The database is never written. Each lookup resolves the database path,
//! opens a fresh read-only connection, runs one query and closes it.

mod locate;
mod row;
mod sqlite;

pub use locate::{DatabaseLocator, DbCandidate, DATABASE_FILE_NAME, TASK_ROOT_ENV};
pub use row::row_to_json;
pub use sqlite::{DatabaseSummary, SqliteRankingSource, LOOKUP_SQL};

use async_trait::async_trait;

use crate::error::LookupError;
use crate::validation::{Measure, ZipCode};

/// One `county_health_rankings` row, column name to value, in column order.
pub type RankingRow = serde_json::Map<String, serde_json::Value>;

/// Trait for looking up county health rankings.
///
/// This abstraction lets the request handler run against the SQLite bundle
/// in production and an in-memory mock in tests.
#[async_trait]
pub trait RankingSource: Send + Sync {
    /// Find the rankings for `measure` in every county that `zip` maps to.
    ///
    /// Row order is unspecified. No match is `Ok(vec![])`, not an error.
    async fn lookup(&self, zip: &ZipCode, measure: Measure)
        -> Result<Vec<RankingRow>, LookupError>;
}
