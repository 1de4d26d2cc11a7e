//! usersync server binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use usersync_server::config::Config;
use usersync_server::db::{self, MemoryUserRepository, PgUserRepository, UserRepository};
use usersync_server::{app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "usersync_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting usersync server on {}:{}", config.host, config.port);

    let repo: Arc<dyn UserRepository> = match &config.database_url {
        Some(url) => Arc::new(PgUserRepository::new(db::connect(url).await?)),
        None => {
            tracing::warn!("DATABASE_URL not set, users are kept in memory only");
            Arc::new(MemoryUserRepository::new())
        }
    };

    let addr = format!("{}:{}", config.host, config.port);
    let app = app(AppState::new(repo, config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
