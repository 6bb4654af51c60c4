//! Configuration management for the county data service.
//!
//! This module provides the command-line interface:
//! - `serve` runs the lookup endpoint as a local HTTP server
//! - `invoke` runs a single platform event and prints the response
//! - `check` verifies that the database can be found and read
//!
//! # Environment Variables
//!
//! Options can also be set via environment variables with the `COUNTY_` prefix:
//!
//! - `COUNTY_HOST` - Server bind address (default: 0.0.0.0)
//! - `COUNTY_PORT` - Server port (default: 3000)
//! - `COUNTY_DATABASE` - Database file to try before the standard locations
//!
//! The standard locations are `data.db` in the working directory, next to the
//! executable, and under `$LAMBDA_TASK_ROOT`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::store::DatabaseLocator;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

// =============================================================================
// CLI Arguments
// =============================================================================

/// County Data - health ranking lookups by ZIP code.
#[derive(Parser, Debug, Clone)]
#[command(name = "county-data")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the lookup endpoint over HTTP.
    Serve(ServeConfig),

    /// Run one platform event (JSON) and print the platform response.
    Invoke(InvokeConfig),

    /// Check that the database can be located and both tables read.
    Check(CheckConfig),
}

/// Database location options shared by all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// Database file to try before the standard locations.
    #[arg(long, env = "COUNTY_DATABASE")]
    pub database: Option<PathBuf>,
}

impl DatabaseArgs {
    /// Validate the database options.
    pub fn validate(&self) -> Result<(), String> {
        if matches!(&self.database, Some(path) if path.as_os_str().is_empty()) {
            return Err("--database must not be empty. Unset COUNTY_DATABASE or give a path"
                .to_string());
        }
        Ok(())
    }

    /// Build the locator: the explicit path (if any), then the standard
    /// locations.
    pub fn locator(&self) -> DatabaseLocator {
        let locator = DatabaseLocator::platform_default();
        match &self.database {
            Some(path) => locator.with_override(path.clone()),
            None => locator,
        }
    }
}

// =============================================================================
// Serve
// =============================================================================

/// Options for the `serve` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "COUNTY_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "COUNTY_PORT")]
    pub port: u16,

    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Host is required. Set --host or COUNTY_HOST".to_string());
        }
        if self.port == 0 {
            return Err("port must be greater than 0".to_string());
        }
        self.db.validate()
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Invoke
// =============================================================================

/// Options for the `invoke` subcommand.
#[derive(Args, Debug, Clone)]
pub struct InvokeConfig {
    /// File containing the event JSON. Reads stdin when omitted.
    #[arg(long)]
    pub event: Option<PathBuf>,

    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Enable verbose logging (debug level, written to stderr).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl InvokeConfig {
    pub fn validate(&self) -> Result<(), String> {
        if matches!(&self.event, Some(path) if path.as_os_str().is_empty()) {
            return Err("--event must not be empty".to_string());
        }
        self.db.validate()
    }
}

// =============================================================================
// Check
// =============================================================================

/// Options for the `check` subcommand.
#[derive(Args, Debug, Clone)]
pub struct CheckConfig {
    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Enable verbose logging.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

// =============================================================================
// Tests
// =============================================================================
