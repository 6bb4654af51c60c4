//! SQLite-backed ranking source.

use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, instrument};

use crate::error::LookupError;
use crate::validation::{Measure, ZipCode};

use super::{row_to_json, DatabaseLocator, RankingRow, RankingSource};

/// Lookup query: distinct counties for a ZIP, joined with their rankings for
/// one measure.
///
/// County and state match exactly; the measure name matches
/// case-insensitively. There is no ORDER BY.
pub const LOOKUP_SQL: &str = "
    WITH zip_cty AS (
      SELECT DISTINCT county, default_state
      FROM zip_county
      WHERE zip = ?
    )
    SELECT chr.*
    FROM county_health_rankings AS chr
    JOIN zip_cty z
      ON chr.County = z.county AND chr.State = z.default_state
    WHERE LOWER(chr.Measure_name) = LOWER(?)
";

/// Row counts reported by [`SqliteRankingSource::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSummary {
    /// Resolved database file
    pub path: PathBuf,

    /// Rows in `zip_county`
    pub zip_county_rows: i64,

    /// Rows in `county_health_rankings`
    pub ranking_rows: i64,
}

/// Ranking source reading from a bundled SQLite file.
///
/// The path is resolved on every lookup and the file is opened read-only, so
/// a database that appears after startup is picked up without a restart.
#[derive(Debug, Clone, Default)]
pub struct SqliteRankingSource {
    locator: DatabaseLocator,
}

impl SqliteRankingSource {
    pub fn new(locator: DatabaseLocator) -> Self {
        Self { locator }
    }

    pub fn locator(&self) -> &DatabaseLocator {
        &self.locator
    }

    async fn connect(&self) -> Result<(PathBuf, SqliteConnection), LookupError> {
        let path = self.locator.resolve()?;
        let conn = SqliteConnectOptions::new()
            .filename(&path)
            .read_only(true)
            .connect()
            .await?;
        Ok((path, conn))
    }

    /// Open the database and count rows in both tables.
    ///
    /// Fails if the file cannot be found or either table is missing.
    pub async fn check(&self) -> Result<DatabaseSummary, LookupError> {
        let (path, mut conn) = self.connect().await?;

        let zip_county_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM zip_county")
            .fetch_one(&mut conn)
            .await?;
        let ranking_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM county_health_rankings")
            .fetch_one(&mut conn)
            .await?;

        conn.close().await?;

        Ok(DatabaseSummary {
            path,
            zip_county_rows,
            ranking_rows,
        })
    }
}

#[async_trait]
impl RankingSource for SqliteRankingSource {
    #[instrument(skip_all, fields(zip = %zip, measure = %measure))]
    async fn lookup(
        &self,
        zip: &ZipCode,
        measure: Measure,
    ) -> Result<Vec<RankingRow>, LookupError> {
        let (path, mut conn) = self.connect().await?;
        debug!(path = %path.display(), "Opened database read-only");

        let rows = sqlx::query(LOOKUP_SQL)
            .bind(zip.as_str())
            .bind(measure.as_str())
            .fetch_all(&mut conn)
            .await?;

        let objects = rows
            .iter()
            .map(row_to_json)
            .collect::<Result<Vec<_>, _>>()?;

        conn.close().await?;

        debug!(rows = objects.len(), "Lookup complete");
        Ok(objects)
    }
}
