// Copyright 2025 Sociogram Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

pub mod api;
pub mod config;

use std::time::Duration;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use axum::http::HeaderValue;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{demo_graph, health_check, process_upload};
use config::ServerConfig;

/// Build the application router from a validated configuration.
pub fn build_router(config: &ServerConfig) -> Router {
    let cors = if config.server.enable_cors {
        let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
        if config.server.cors_origins.is_empty() {
            tracing::warn!(
                "CORS: Allowing all origins (development mode). Set cors_origins in production!"
            );
            cors.allow_origin(Any)
        } else {
            tracing::info!("CORS: Allowing origins: {:?}", config.server.cors_origins);
            let origins: Vec<HeaderValue> = config
                .server
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            cors.allow_origin(AllowOrigin::list(origins))
        }
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/api/process", post(process_upload))
        .route("/api/graph", get(demo_graph))
        .layer(DefaultBodyLimit::max(config.limits.max_upload_bytes))
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(config: ServerConfig) -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sociogram_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Sociogram Server");
    tracing::info!("Configuration: {:#?}", config);

    config.validate()?;

    let app = build_router(&config);

    let addr = config.socket_addr()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_router_builds_with_cors_disabled() {
        let mut config = ServerConfig::default();
        config.server.enable_cors = false;
        let _ = build_router(&config);
    }
}
