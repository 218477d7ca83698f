use dotenvy::dotenv;
use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::str::FromStr;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fanroute::database::cities_repo::{self, NewCity};
use fanroute::database::schema;
use fanroute::services::city_service::slugify;

#[derive(Debug, Deserialize)]
struct SeedCity {
    name: String,
    slug: Option<String>,
    id: Option<String>,
    essentials: Option<serde_json::Value>,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let Ok(db_url) = env::var("DATABASE_URL") else {
        error!("DATABASE_URL must be set (see .env)");
        std::process::exit(1);
    };

    if let Err(e) = run(&db_url).await {
        error!("init_db failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let options = SqliteConnectOptions::from_str(db_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    schema::ensure_schema(&pool).await?;
    info!("Schema ready at {}", db_url);

    let Ok(seed_path) = env::var("SEED_CITIES") else {
        info!("SEED_CITIES not set; skipping city seed");
        return Ok(());
    };

    let raw = std::fs::read_to_string(&seed_path)?;
    let cities: Vec<SeedCity> = serde_json::from_str(&raw)?;
    for city in &cities {
        let slug = city
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .unwrap_or_else(|| slugify(&city.name));
        let id = city.id.clone().unwrap_or_else(|| slug.clone());
        let essentials = city.essentials.as_ref().map(|v| v.to_string());

        cities_repo::upsert_city(
            &pool,
            NewCity {
                id: &id,
                name: city.name.trim(),
                slug: &slug,
                essentials: essentials.as_deref(),
            },
        )
        .await?;
        info!("Seeded city {} ({})", city.name.trim(), slug);
    }

    info!("Seeded {} cities from {}", cities.len(), seed_path);
    Ok(())
}
