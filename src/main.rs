use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fanroute::config::Config;
use fanroute::database::schema;
use fanroute::web::{self, AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    info!(
        "Starting {} (build {})",
        web::SITE_NAME,
        env!("FANROUTE_BUILD_ID")
    );

    info!("Connecting to database: {}", config.database_url);
    let pool = SqlitePoolOptions::new()
        .connect(&config.database_url)
        .await?;
    schema::ensure_schema(&pool).await?;

    if config.admin_key.is_none() {
        warn!("ADMIN_KEY is not set; /admin is disabled");
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback: SocketAddr =
                format!("{}:{}", config.host, config.port.saturating_add(1)).parse()?;
            warn!(
                "Could not bind {}: {}. Trying fallback {}",
                addr, e, fallback
            );
            tokio::net::TcpListener::bind(fallback).await?
        }
    };

    let bound_addr = listener.local_addr()?;
    let app = web::build_router(AppState {
        pool,
        config: Arc::new(config),
    });

    info!("Server listening on http://{}", bound_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
