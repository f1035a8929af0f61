//! MarketPulse API Server Entry Point
//!
//! Bootstraps configuration, assembles the application state, and starts
//! the Axum HTTP server.

use std::net::SocketAddr;

use axum::Router;
use marketpulse_api::telemetry::init_telemetry;
use marketpulse_api::{create_api_router, ApiError, ApiResult, AppState, ServerConfig};
use marketpulse_sentiment::SentimentConfig;

#[tokio::main]
async fn main() -> ApiResult<()> {
    init_telemetry();

    let server_config = ServerConfig::from_env();
    let sentiment_config = SentimentConfig::from_env();

    let state = AppState::new(&server_config, &sentiment_config);
    tracing::info!(
        providers = ?state.sentiment.provider_names(),
        news_configured = state.news.is_configured(),
        "Assembled application state"
    );

    let app: Router = create_api_router(state, &server_config);

    let addr = resolve_bind_addr(&server_config)?;
    tracing::info!(%addr, "Starting MarketPulse API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn resolve_bind_addr(config: &ServerConfig) -> ApiResult<SocketAddr> {
    let addr = format!("{}:{}", config.bind_host, config.port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
}
