use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use cardoctor_core::TokenIssuer;
use cardoctor_db::{Database, DatabaseConfig};
use cardoctor_server::auth::CookiePolicy;
use cardoctor_server::config::ServerConfig;
use cardoctor_server::routes;
use cardoctor_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("cardoctor=info".parse()?))
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;
    let addr = format!("0.0.0.0:{}", config.port);

    let db = Database::connect(&DatabaseConfig::from_env()?).await?;
    match db.ping().await {
        Ok(()) => tracing::info!("Pinged your deployment. Connected to MongoDB"),
        Err(e) => tracing::warn!(error = %e, "MongoDB not reachable at startup"),
    }

    let state = Arc::new(AppState {
        db,
        tokens: TokenIssuer::new(&config.token_secret),
        cookies: CookiePolicy::for_mode(config.mode),
    });

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(config.cors_layer()?);

    tracing::info!(mode = ?config.mode, "Listening at {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
