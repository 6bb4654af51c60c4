//! Serverless function entry point.
//!
//! This module holds the platform-facing contract: an event goes in, a
//! response comes out, and every failure is already folded into the
//! response. The HTTP server and the `invoke` command both drive
//! [`CountyDataFunction`] through these types.
//!
//! # Example
//!
//! ```ignore
//! use county_data::function::{CountyDataFunction, FunctionEvent};
//! use county_data::store::SqliteRankingSource;
//!
//! let function = CountyDataFunction::new(SqliteRankingSource::default());
//! let event = FunctionEvent::json(r#"{"zip":"10001","measure_name":"Unemployment"}"#);
//!
//! let response = function.handle(&event).await;
//! assert_eq!(response.status_code, 200);
//! ```

mod event;
mod handler;

pub use event::{FunctionEvent, FunctionResponse, TEAPOT_BODY};
pub use handler::{is_teapot_probe, parse_body, CountyDataFunction};
