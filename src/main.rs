//! Gemini Relay
//!
//! This application accepts browser POST requests carrying a prompt payload
//! and forwards them to the Google Generative Language API using a
//! server-held API key, relaying the upstream response back with permissive
//! CORS headers attached.

mod api;
mod core;
mod models;

use crate::api::endpoints::{AppState, create_router};
use crate::core::client::GeminiClient;
use crate::core::config::Config;
use crate::core::logging::init_logging;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Check for --help flag
    if std::env::args().any(|arg| arg == "--help") {
        print_help();
        return;
    }

    // Pick up GEMINI_API_KEY from a .env file when present
    dotenv::dotenv().ok();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            eprintln!("Configuration Error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config.log_level);

    // Print startup banner
    print_startup_banner(&config);

    // A missing key is reported per request, not fatal at startup
    if !config.has_api_key() {
        warn!("GEMINI_API_KEY is not configured; POST requests will be rejected");
    }

    let client = Arc::new(GeminiClient::new(
        config.base_url.clone(),
        config.default_model.clone(),
    ));

    // Create application state
    let app_state = AppState {
        config: config.clone(),
        client,
    };

    // Create router
    let app = create_router(app_state);

    // Bind to address
    let addr = format!("{}:{}", config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server listening on http://{}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Print startup banner with configuration
fn print_startup_banner(config: &Config) {
    println!("🚀 Gemini Relay v1.0.0");
    println!("✅ Configuration loaded successfully");
    println!("   Upstream: {}", config.base_url);
    println!("   Default Model: {}", config.default_model);
    println!("   Server: {}:{}", config.host, config.port);
    println!(
        "   API Key: {}",
        if config.has_api_key() {
            "Configured"
        } else {
            "Missing"
        }
    );
    println!();
}

/// Print help message
fn print_help() {
    println!("Gemini Relay v1.0.0");
    println!();
    println!("Usage: gemini-relay [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --help    Display this help message");
    println!();
    println!("Environment variables:");
    println!("  GEMINI_API_KEY - Upstream API key (overrides the config file)");
    println!("  CONFIG_PATH - Path to the TOML config file (default: config.toml)");
    println!("  RUST_LOG - Log filter (overrides the configured log level)");
    println!();
    println!("Config file settings:");
    println!("  [gemini]  api_key, base_url, default_model (default: gemini-1.5-flash)");
    println!("  [server]  host (default: 0.0.0.0), port (default: 8080), log_level");
    println!("  [cors]    allowed_methods, allowed_headers");
    println!("  [relay]   missing_key_status (default: 500)");
}
