//! The county data request pipeline.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                  CountyDataFunction::handle()                 │
//! │                                                               │
//! │  1. Probe check      ──► 418 I'm a teapot                      │
//! │  2. Parse JSON body  ──► 400 Invalid JSON                      │
//! │  3. Validate zip     ──► 400 Invalid zip code                  │
//! │  4. Validate measure ──► 400 Invalid measure name              │
//! │  5. Lookup rows      ──► 500 {error} (missing db, SQL errors)  │
//! │  6. Serialize        ──► 200 [rows...]                         │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every branch ends in a response; nothing is retried.

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::LookupError;
use crate::store::RankingSource;
use crate::validation::{field_as_string, Measure, ZipCode};

use super::event::{FunctionEvent, FunctionResponse};

/// Content type that arms the probe check.
const PROBE_CONTENT_TYPE: &str = "application/json";

/// Body marker that triggers the probe response.
const PROBE_MARKER: &str = "coffee=teapot";

/// Whether a request is the diagnostic probe.
///
/// Both conditions are plain substring checks on the raw header and body.
pub fn is_teapot_probe(content_type: Option<&str>, body: &str) -> bool {
    content_type.is_some_and(|ct| ct.contains(PROBE_CONTENT_TYPE)) && body.contains(PROBE_MARKER)
}

/// Parse a request body, treating an empty body as `{}`.
pub fn parse_body(body: &str) -> Result<Value, LookupError> {
    if body.is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(body).map_err(|_| LookupError::InvalidJson)
}

/// Handles county data lookups for one ranking source.
pub struct CountyDataFunction<S> {
    source: S,
}

impl<S: RankingSource> CountyDataFunction<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run the full pipeline for one event.
    pub async fn handle(&self, event: &FunctionEvent) -> FunctionResponse {
        match self.process(event).await {
            Ok(response) => response,
            Err(err) => {
                if err.is_client_error() {
                    debug!(error = %err, "Rejected request");
                } else {
                    error!(error = %err, "Lookup failed");
                }
                FunctionResponse::from_error(&err)
            }
        }
    }

    async fn process(&self, event: &FunctionEvent) -> Result<FunctionResponse, LookupError> {
        let body = event.body_text()?;

        if is_teapot_probe(event.header("content-type"), &body) {
            info!("Teapot probe");
            return Ok(FunctionResponse::teapot());
        }

        debug!("Parsing body");
        let data = parse_body(&body)?;

        debug!("Validating zip");
        let raw_zip = field_as_string(&data, "zip");
        let zip = ZipCode::normalize(&raw_zip).inspect_err(|_| {
            warn!(zip = %raw_zip, "Invalid zip");
        })?;

        debug!("Validating measure");
        let raw_measure = field_as_string(&data, "measure_name");
        let measure = Measure::normalize(&raw_measure).inspect_err(|_| {
            warn!(measure = %raw_measure, "Invalid measure");
        })?;

        let rows = self.source.lookup(&zip, measure).await?;
        info!(
            zip = %zip,
            measure = %measure,
            rows = rows.len(),
            "County data lookup"
        );

        Ok(FunctionResponse::json(serde_json::to_string(&rows)?))
    }
}
