#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use fanroute::config::Config;
use fanroute::database::cities_repo::{self, NewCity};
use fanroute::database::events_repo::{self, NewEvent};
use fanroute::database::schema;
use fanroute::models::{EventKind, VenueKind};
use fanroute::web::{self, AppState};

/// One connection so every query sees the same in-memory database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    schema::ensure_schema(&pool).await.expect("schema");
    pool
}

pub async fn seed_city(pool: &SqlitePool, id: &str, name: &str, essentials: Option<&str>) {
    cities_repo::upsert_city(
        pool,
        NewCity {
            id,
            name,
            slug: id,
            essentials,
        },
    )
    .await
    .expect("seed city");
}

pub fn new_event(id: &str, city_id: &str, starts_in_hours: i64) -> NewEvent {
    NewEvent {
        id: id.to_string(),
        city_id: city_id.to_string(),
        event_type: EventKind::WatchParty,
        title: format!("{} Watch Party", id),
        match_label: Some(format!("Match {}", id)),
        starts_at: Utc::now() + Duration::hours(starts_in_hours),
        venue_name: "Café Atlas".to_string(),
        venue_type: VenueKind::Cafe,
        address: Some("123 Main St".to_string()),
        general_area: None,
        tags: vec!["alcohol_free".to_string()],
        external_link: None,
        is_featured: false,
    }
}

pub async fn insert(pool: &SqlitePool, event: NewEvent) {
    events_repo::insert_event(pool, &event).await.expect("insert event");
}

pub async fn set_status(pool: &SqlitePool, id: &str, status: &str, featured: bool) {
    sqlx::query("UPDATE events SET status = ?1, is_featured = ?2 WHERE id = ?3")
        .bind(status)
        .bind(featured)
        .bind(id)
        .execute(pool)
        .await
        .expect("set status");
}

/// Serves the router on an ephemeral port and returns its base URL.
pub async fn spawn_app(pool: SqlitePool, admin_key: Option<&str>) -> String {
    let mut config = Config::for_database("sqlite::memory:");
    config.admin_key = admin_key.map(|k| k.to_string());
    config.assets_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/assets").to_string();

    let app = web::build_router(AppState {
        pool,
        config: Arc::new(config),
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{}", addr)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client")
}
