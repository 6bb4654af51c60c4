//! County Data - health ranking lookups by ZIP code.
//!
//! This binary serves the lookup endpoint, runs single platform events, and
//! checks the database bundle.

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use county_data::{
    config::{CheckConfig, Cli, Command, InvokeConfig, ServeConfig},
    function::{CountyDataFunction, FunctionEvent},
    server::{create_router, RouterConfig},
    store::SqliteRankingSource,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Serve(config) => run_serve(config).await,
        Command::Invoke(config) => run_invoke(config).await,
        Command::Check(config) => run_check(config).await,
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let source = SqliteRankingSource::new(config.db.locator());

    info!("Configuration:");
    match source.locator().resolve() {
        Ok(path) => info!("  Database: {}", path.display()),
        // Lookups fail with 500 until the file appears; still serve /health
        Err(e) => error!("  Database: {}", e),
    }

    let router = create_router(source, RouterConfig::new().with_tracing(!config.no_tracing));

    let addr = config.bind_address();
    info!("Server listening on: http://{}", addr);
    info!(
        "  Try: curl -X POST http://{}/county_data -d '{{\"zip\":\"10001\",\"measure_name\":\"Unemployment\"}}'",
        addr
    );

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

// =============================================================================
// Invoke Command
// =============================================================================

async fn run_invoke(config: InvokeConfig) -> ExitCode {
    // stdout carries the response, so logs go to stderr
    init_stderr_logging(config.verbose);

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let input = match &config.event {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map(|_| buf)
        }
    };
    let input = match input {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: failed to read event: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let event: FunctionEvent = match serde_json::from_str(&input) {
        Ok(event) => event,
        Err(e) => {
            eprintln!("Error: event is not a valid function event: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let function = CountyDataFunction::new(SqliteRankingSource::new(config.db.locator()));
    let response = function.handle(&event).await;

    match serde_json::to_string_pretty(&response) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: failed to encode response: {}", e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// Check Command
// =============================================================================

async fn run_check(config: CheckConfig) -> ExitCode {
    if config.verbose {
        init_logging(true);
    }

    println!("County Data Configuration Check");
    println!("═══════════════════════════════");
    println!();

    if let Err(e) = config.db.validate() {
        println!("✗ {}", e);
        return ExitCode::FAILURE;
    }

    let source = SqliteRankingSource::new(config.db.locator());

    println!("Search order:");
    for candidate in source.locator().candidates() {
        match candidate.path(source.locator().file_name()) {
            Some(path) => println!("  {}", path.display()),
            None => println!("  {:?} (unavailable)", candidate),
        }
    }
    println!();

    match source.check().await {
        Ok(summary) => {
            println!("✓ Database: {}", summary.path.display());
            println!("✓ zip_county: {} row(s)", summary.zip_county_rows);
            println!(
                "✓ county_health_rankings: {} row(s)",
                summary.ranking_rows
            );
        }
        Err(e) => {
            println!("✗ {}", e);
            return ExitCode::FAILURE;
        }
    }

    println!();
    println!("═══════════════════════════════");
    println!("✓ All checks passed!");

    ExitCode::SUCCESS
}

// =============================================================================
// Logging
// =============================================================================

fn env_filter(verbose: bool) -> tracing_subscriber::EnvFilter {
    let default = if verbose {
        "county_data=debug,tower_http=debug"
    } else {
        "county_data=info,tower_http=info"
    };
    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into())
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize logging on stderr.
fn init_stderr_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
