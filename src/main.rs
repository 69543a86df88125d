use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use bookings::{
    app::create_router,
    app_state::AppState,
    config::Config,
    db::{
        init_pool,
        repositories::{MemoryRepo, PostgresRepo},
        DatabaseRepo,
    },
    telemetry::{init_telemetry, TelemetryConfig},
};
use dotenv::dotenv;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_telemetry(&TelemetryConfig::from(&config))?;

    let repo: Arc<dyn DatabaseRepo> = match &config.database.url {
        Some(url) => {
            let pool = init_pool(&config.database, url).await?;
            info!("Connected to the database");
            Arc::new(PostgresRepo::new(pool))
        }
        None => {
            warn!("DATABASE_URL is not set; bookings are kept in memory only");
            Arc::new(MemoryRepo::seeded())
        }
    };

    let addr = config.server_addr();
    let app_name = config.app.name.clone();
    let app = create_router(AppState::new(repo, config));

    info!("{} listening on {}", app_name, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .context("Failed to serve application")?;

    Ok(())
}
