use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;

use crate::models::{AdminEventRow, EventKind, EventRow, EventStatus, ListingEventRow, VenueKind};

/// `starts_at` column format: RFC 3339, UTC, second precision, trailing `Z`.
/// Keeping one format lets the `starts_at > ?` filters compare as text.
pub fn timestamp_column(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub id: String,
    pub city_id: String,
    pub event_type: EventKind,
    pub title: String,
    pub match_label: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub venue_name: String,
    pub venue_type: VenueKind,
    pub address: Option<String>,
    pub general_area: Option<String>,
    pub tags: Vec<String>,
    pub external_link: Option<String>,
    pub is_featured: bool,
}

// status is left to the column default (pending).
const SQL_INSERT_EVENT: &str = r#"
INSERT INTO events (
  id,
  city_id,
  event_type,
  title,
  match_label,
  starts_at,
  venue_name,
  venue_type,
  address,
  general_area,
  tags,
  external_link,
  is_featured
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
"#;

pub async fn insert_event(pool: &SqlitePool, event: &NewEvent) -> sqlx::Result<()> {
    let tags = serde_json::to_string(&event.tags).unwrap_or_else(|_| "[]".to_string());
    sqlx::query(SQL_INSERT_EVENT)
        .bind(&event.id)
        .bind(&event.city_id)
        .bind(event.event_type)
        .bind(&event.title)
        .bind(event.match_label.as_deref())
        .bind(timestamp_column(event.starts_at))
        .bind(&event.venue_name)
        .bind(event.venue_type)
        .bind(event.address.as_deref())
        .bind(event.general_area.as_deref())
        .bind(tags)
        .bind(event.external_link.as_deref())
        .bind(event.is_featured)
        .execute(pool)
        .await?;
    Ok(())
}

const SQL_LIST_UPCOMING_FOR_CITY: &str = r#"
SELECT
  id,
  event_type,
  title,
  match_label,
  starts_at,
  venue_name,
  venue_type,
  address,
  general_area,
  tags,
  is_featured
FROM events
WHERE city_id = ?1
  AND starts_at > ?2
  AND status != 'rejected'
  AND (?3 = 0 OR status = 'approved')
  AND (?4 IS NULL OR event_type = ?4)
ORDER BY starts_at ASC
"#;

pub async fn list_upcoming_for_city(
    pool: &SqlitePool,
    city_id: &str,
    now: DateTime<Utc>,
    require_approval: bool,
    kind: Option<EventKind>,
) -> sqlx::Result<Vec<ListingEventRow>> {
    sqlx::query_as::<_, ListingEventRow>(SQL_LIST_UPCOMING_FOR_CITY)
        .bind(city_id)
        .bind(timestamp_column(now))
        .bind(require_approval)
        .bind(kind)
        .fetch_all(pool)
        .await
}

const SQL_LOAD_PUBLIC_EVENT: &str = r#"
SELECT
  id,
  city_id,
  event_type,
  title,
  match_label,
  starts_at,
  venue_name,
  venue_type,
  address,
  general_area,
  tags,
  external_link,
  status,
  is_featured
FROM events
WHERE id = ?1
  AND status != 'rejected'
  AND (?2 = 0 OR status = 'approved')
LIMIT 1
"#;

pub async fn load_public_event(
    pool: &SqlitePool,
    event_id: &str,
    require_approval: bool,
) -> sqlx::Result<Option<EventRow>> {
    sqlx::query_as::<_, EventRow>(SQL_LOAD_PUBLIC_EVENT)
        .bind(event_id)
        .bind(require_approval)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_BY_STATUS: &str = r#"
SELECT
  id,
  title,
  match_label,
  starts_at,
  venue_name,
  status,
  is_featured
FROM events
WHERE status = ?1
ORDER BY starts_at ASC
LIMIT ?2
"#;

/// `limit = None` lists everything (SQLite treats a negative LIMIT as unbounded).
pub async fn list_by_status(
    pool: &SqlitePool,
    status: EventStatus,
    limit: Option<i64>,
) -> sqlx::Result<Vec<AdminEventRow>> {
    sqlx::query_as::<_, AdminEventRow>(SQL_LIST_BY_STATUS)
        .bind(status)
        .bind(limit.unwrap_or(-1))
        .fetch_all(pool)
        .await
}
