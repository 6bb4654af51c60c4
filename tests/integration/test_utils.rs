//! Test utilities for integration tests.
//!
//! This module provides a fixture database, a mock ranking source, and
//! helpers for driving the router.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};
use tempfile::TempDir;
use tower::ServiceExt;

use county_data::{
    create_router, DatabaseLocator, DbCandidate, LookupError, Measure, RankingRow, RankingSource,
    RouterConfig, SqliteRankingSource, ZipCode,
};

// =============================================================================
// Fixture Database
// =============================================================================

const FIXTURE_SQL: &[&str] = &[
    "CREATE TABLE zip_county (zip TEXT, county TEXT, default_state TEXT, city TEXT)",
    "CREATE TABLE county_health_rankings (
        State TEXT, County TEXT, Measure_name TEXT, Raw_value TEXT, Year TEXT
    )",
    // Same county listed twice for one ZIP (different cities)
    "INSERT INTO zip_county VALUES ('10001', 'New York County', 'NY', 'New York')",
    "INSERT INTO zip_county VALUES ('10001', 'New York County', 'NY', 'Manhattan')",
    // One ZIP spanning two counties in two states
    "INSERT INTO zip_county VALUES ('42223', 'Christian County', 'KY', 'Fort Campbell')",
    "INSERT INTO zip_county VALUES ('42223', 'Montgomery County', 'TN', 'Fort Campbell')",
    // A ZIP with no rankings
    "INSERT INTO zip_county VALUES ('99950', 'Ketchikan Gateway Borough', 'AK', 'Ketchikan')",
    "INSERT INTO county_health_rankings VALUES ('NY', 'New York County', 'unemployment', '0.05', '2023')",
    "INSERT INTO county_health_rankings VALUES ('NY', 'New York County', 'Adult obesity', '0.17', '2023')",
    "INSERT INTO county_health_rankings VALUES ('KY', 'Christian County', 'Unemployment', '0.04', '2023')",
    "INSERT INTO county_health_rankings VALUES ('TN', 'Montgomery County', 'UNEMPLOYMENT', '0.035', '2023')",
    // Same county name in another state must not match
    "INSERT INTO county_health_rankings VALUES ('PA', 'New York County', 'Unemployment', '0.99', '2023')",
    // County matching is case-sensitive
    "INSERT INTO county_health_rankings VALUES ('NY', 'new york county', 'Unemployment', '0.98', '2023')",
];

/// A temporary directory holding a populated `data.db`.
pub struct FixtureDb {
    dir: TempDir,
    path: PathBuf,
}

impl FixtureDb {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("data.db");

        let mut conn = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .connect()
            .await
            .expect("create fixture database");
        for sql in FIXTURE_SQL {
            sqlx::query(sql)
                .execute(&mut conn)
                .await
                .expect("populate fixture database");
        }
        conn.close().await.expect("close fixture database");

        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// A source that only looks at this fixture.
    pub fn source(&self) -> SqliteRankingSource {
        SqliteRankingSource::new(DatabaseLocator::new(vec![DbCandidate::File(
            self.path.clone(),
        )]))
    }

    pub fn router(&self) -> Router {
        create_router(self.source(), RouterConfig::new().with_tracing(false))
    }
}

/// A source whose database can never be found.
pub fn missing_source(dir: &Path) -> SqliteRankingSource {
    SqliteRankingSource::new(DatabaseLocator::new(vec![DbCandidate::Dir(
        dir.join("nowhere"),
    )]))
}

// =============================================================================
// Mock Ranking Source
// =============================================================================

/// A ranking source that returns canned rows and counts its calls.
#[derive(Clone, Default)]
pub struct MockRankingSource {
    rows: Vec<RankingRow>,
    fail_with: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl MockRankingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row(mut self, row: Value) -> Self {
        match row {
            Value::Object(map) => self.rows.push(map),
            other => panic!("mock rows must be objects, got {}", other),
        }
        self
    }

    /// Fail every lookup with a missing-database error naming `file_name`.
    pub fn failing(file_name: impl Into<String>) -> Self {
        Self {
            fail_with: Some(file_name.into()),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RankingSource for MockRankingSource {
    async fn lookup(
        &self,
        _zip: &ZipCode,
        _measure: Measure,
    ) -> Result<Vec<RankingRow>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(file_name) => Err(LookupError::DatabaseNotFound {
                file_name: file_name.clone(),
                searched: vec![],
            }),
            None => Ok(self.rows.clone()),
        }
    }
}

// =============================================================================
// Request Helpers
// =============================================================================

/// A collected response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("utf-8 body")
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("JSON body")
    }

    /// The `error` field of a `{"result": null, "error": ...}` body.
    pub fn error_message(&self) -> String {
        let body = self.json();
        assert_eq!(body["result"], Value::Null, "error bodies carry a null result");
        body["error"]
            .as_str()
            .expect("error must be a string")
            .to_string()
    }

    /// The rows of a success body, as a set of canonical JSON strings.
    pub fn row_set(&self) -> HashSet<String> {
        self.json()
            .as_array()
            .expect("success body must be an array")
            .iter()
            .map(Value::to_string)
            .collect()
    }
}

/// Send a request through the router and collect the response.
pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body: body.to_vec(),
    }
}

/// Build a JSON POST to `uri`.
pub fn post_json(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

/// Build a lookup body for the given ZIP and measure.
pub fn lookup_body(zip: &str, measure: &str) -> String {
    serde_json::json!({ "zip": zip, "measure_name": measure }).to_string()
}
