use anyhow::Result;
use api::{AppState, config::ApiConfig, create_router};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    info!("Starting session registry");

    let config = ApiConfig::from_env()?;

    // The registry lives for the lifetime of the process
    let app_state = AppState::new();

    // Start the web server
    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Session registry listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
