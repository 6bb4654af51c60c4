//! Function-level tests driving platform events directly.
//!
//! Tests verify:
//! - Platform event JSON in, platform response JSON out
//! - Base64-encoded bodies
//! - Database resolution order across candidate locations

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};

use county_data::{
    CountyDataFunction, DatabaseLocator, DbCandidate, FunctionEvent, FunctionResponse,
    SqliteRankingSource,
};

use super::test_utils::{lookup_body, FixtureDb, MockRankingSource};

fn body_json(response: &FunctionResponse) -> Value {
    serde_json::from_str(&response.body).unwrap()
}

// =============================================================================
// Platform Events
// =============================================================================

#[tokio::test]
async fn test_platform_event_round_trip() {
    let db = FixtureDb::new().await;
    let function = CountyDataFunction::new(db.source());

    let event: FunctionEvent = serde_json::from_value(json!({
        "httpMethod": "POST",
        "path": "/.netlify/functions/county_data",
        "headers": { "content-type": "application/json" },
        "body": lookup_body("10001", "Unemployment"),
        "isBase64Encoded": false
    }))
    .unwrap();

    let response = function.handle(&event).await;
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["statusCode"], 200);
    assert_eq!(value["headers"]["Content-Type"], "application/json");
    assert_eq!(value["headers"]["Access-Control-Allow-Origin"], "*");
    assert_eq!(body_json(&response)[0]["Raw_value"], "0.05");
}

#[tokio::test]
async fn test_base64_event() {
    let db = FixtureDb::new().await;
    let function = CountyDataFunction::new(db.source());

    let mut event = FunctionEvent::json(STANDARD.encode(lookup_body("42223", "Unemployment")));
    event.is_base64_encoded = true;

    let response = function.handle(&event).await;
    assert_eq!(response.status_code, 200);
    assert_eq!(body_json(&response).as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_base64_teapot() {
    let function = CountyDataFunction::new(MockRankingSource::new());

    let mut event = FunctionEvent::json(STANDARD.encode("coffee=teapot"));
    event.is_base64_encoded = true;

    let response = function.handle(&event).await;
    assert_eq!(response, FunctionResponse::teapot());
}

#[tokio::test]
async fn test_bad_base64_is_invalid_json() {
    let function = CountyDataFunction::new(MockRankingSource::new());

    let mut event = FunctionEvent::json("%%%");
    event.is_base64_encoded = true;

    let response = function.handle(&event).await;
    assert_eq!(response.status_code, 400);
    assert_eq!(body_json(&response)["error"], "Invalid JSON");
}

#[tokio::test]
async fn test_header_name_case_ignored() {
    let function = CountyDataFunction::new(MockRankingSource::new());

    let event = FunctionEvent::new("coffee=teapot").with_header("Content-Type", "application/json");
    let response = function.handle(&event).await;
    assert_eq!(response.status_code, 418);
}

#[tokio::test]
async fn test_non_object_body() {
    let function = CountyDataFunction::new(MockRankingSource::new());

    for body in ["null", "42", "\"10001\"", "[\"10001\"]"] {
        let response = function.handle(&FunctionEvent::json(body)).await;
        assert_eq!(response.status_code, 400, "body {body}");
        assert_eq!(body_json(&response)["error"], "Invalid zip code", "body {body}");
    }
}

#[tokio::test]
async fn test_mock_rows_returned_verbatim() {
    let source = MockRankingSource::new()
        .with_row(json!({ "County": "A", "Value": 1 }))
        .with_row(json!({ "County": "B", "Value": null }));
    let function = CountyDataFunction::new(source.clone());

    let response = function
        .handle(&FunctionEvent::json(lookup_body("10001", "Uninsured")))
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        response.body,
        r#"[{"County":"A","Value":1},{"County":"B","Value":null}]"#
    );
    assert_eq!(source.call_count(), 1);
}

#[tokio::test]
async fn test_source_error_is_500_without_cors() {
    let function = CountyDataFunction::new(MockRankingSource::failing("rankings.db"));

    let response = function
        .handle(&FunctionEvent::json(lookup_body("10001", "Uninsured")))
        .await;

    assert_eq!(response.status_code, 500);
    let body = body_json(&response);
    assert_eq!(body["result"], Value::Null);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("rankings.db not found"));
    assert!(!response.headers.contains_key("Access-Control-Allow-Origin"));
}

// =============================================================================
// Database Resolution
// =============================================================================

#[tokio::test]
async fn test_later_candidate_used_when_earlier_missing() {
    let db = FixtureDb::new().await;
    let empty = tempfile::tempdir().unwrap();

    let source = SqliteRankingSource::new(DatabaseLocator::new(vec![
        DbCandidate::Dir(empty.path().to_path_buf()),
        DbCandidate::Dir(db.dir().to_path_buf()),
    ]));
    assert_eq!(source.locator().resolve().unwrap(), db.path());

    let function = CountyDataFunction::new(source);
    let response = function
        .handle(&FunctionEvent::json(lookup_body("10001", "Unemployment")))
        .await;
    assert_eq!(response.status_code, 200);
}

#[tokio::test]
async fn test_override_takes_priority() {
    let db = FixtureDb::new().await;
    let other = FixtureDb::new().await;

    let locator = DatabaseLocator::new(vec![DbCandidate::Dir(other.dir().to_path_buf())])
        .with_override(db.path());
    assert_eq!(locator.resolve().unwrap(), db.path());
}

#[tokio::test]
async fn test_env_dir_candidate() {
    const VAR: &str = "COUNTY_DATA_TEST_TASK_ROOT";
    let db = FixtureDb::new().await;

    std::env::set_var(VAR, db.dir());
    let source = SqliteRankingSource::new(DatabaseLocator::new(vec![DbCandidate::EnvDir(
        VAR.to_string(),
    )]));
    let summary = source.check().await;
    std::env::remove_var(VAR);

    let summary = summary.unwrap();
    assert_eq!(summary.path, db.path());
    assert_eq!(summary.zip_county_rows, 5);
    assert_eq!(summary.ranking_rows, 6);
}
