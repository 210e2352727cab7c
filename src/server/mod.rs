mod form;
pub mod handlers;
pub mod types;

use crate::{Result, config::Config, pipeline::Analyzer};
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

/// Routes for the analyze endpoint. `/api/analyze-mood` is kept for older clients.
pub fn router(state: handlers::AppState, max_upload_bytes: usize) -> Router {
    let analyze = post(handlers::analyze).fallback(handlers::method_not_allowed);

    Router::new()
        .route("/analyze", analyze.clone())
        .route("/api/analyze-mood", analyze)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // Initialize analyzer
    let analyzer = Analyzer::from_config(&config);

    // Create application state
    let app_state = handlers::AppState {
        analyzer: Arc::new(analyzer),
    };

    // Create router
    let app = router(app_state, config.server.max_upload_bytes);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
