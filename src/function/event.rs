//! Serverless event and response shapes.
//!
//! These mirror the JSON the hosting platform passes to a function and
//! expects back:
//!
//! ```json
//! { "headers": { "content-type": "application/json" },
//!   "body": "{\"zip\":\"10001\"}",
//!   "isBase64Encoded": false }
//! ```
//!
//! ```json
//! { "statusCode": 200,
//!   "headers": { "Content-Type": "application/json" },
//!   "body": "[]" }
//! ```

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Body returned with the probe status.
pub const TEAPOT_BODY: &str = "I'm a teapot";

/// An incoming function invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    /// Request headers; names are matched case-insensitively
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Raw request body
    #[serde(default)]
    pub body: Option<String>,

    /// Whether `body` is base64 encoded
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl FunctionEvent {
    /// Create an event carrying a body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::default()
        }
    }

    /// Create an event with `content-type: application/json`.
    pub fn json(body: impl Into<String>) -> Self {
        Self::new(body).with_header("content-type", "application/json")
    }

    /// Add a header, replacing any existing value.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Get a header value, ignoring the case of its name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The request body as text, decoding base64 if needed.
    ///
    /// A missing body is returned as an empty string. Decoded bytes that are
    /// not valid UTF-8 are converted lossily.
    ///
    /// # Errors
    ///
    /// [`LookupError::InvalidJson`] if the body claims to be base64 but is not.
    pub fn body_text(&self) -> Result<String, LookupError> {
        let Some(body) = self.body.as_deref() else {
            return Ok(String::new());
        };

        if !self.is_base64_encoded {
            return Ok(body.to_string());
        }

        let bytes = STANDARD
            .decode(body.trim())
            .map_err(|_| LookupError::InvalidJson)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// The response handed back to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    /// HTTP status code
    pub status_code: u16,

    /// Response headers
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// Response body
    pub body: String,
}

impl FunctionResponse {
    /// Response to the diagnostic probe.
    pub fn teapot() -> Self {
        Self {
            status_code: 418,
            headers: BTreeMap::new(),
            body: TEAPOT_BODY.to_string(),
        }
    }

    /// Successful lookup: a JSON body with CORS open to any origin.
    pub fn json(body: String) -> Self {
        let headers = BTreeMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ]);
        Self {
            status_code: 200,
            headers,
            body,
        }
    }

    /// Error response: `{"result": null, "error": message}`.
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        let body = serde_json::json!({
            "result": null,
            "error": message.into(),
        })
        .to_string();
        Self {
            status_code,
            headers: BTreeMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]),
            body,
        }
    }

    /// Convert a failed lookup into a response.
    ///
    /// Client input errors become 400, everything else 500.
    pub fn from_error(err: &LookupError) -> Self {
        let status = if err.is_client_error() { 400 } else { 500 };
        Self::error(status, err.to_string())
    }
}
