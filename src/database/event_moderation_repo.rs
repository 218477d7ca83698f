use sqlx::SqlitePool;

use crate::models::EventStatus;

// NULL leaves the column untouched.
const SQL_UPDATE_EVENT_MODERATION: &str = r#"
UPDATE events
SET status = COALESCE(?1, status),
    is_featured = COALESCE(?2, is_featured)
WHERE id = ?3
"#;

pub async fn update_event_moderation(
    pool: &SqlitePool,
    event_id: &str,
    status: Option<EventStatus>,
    is_featured: Option<bool>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_EVENT_MODERATION)
        .bind(status)
        .bind(is_featured)
        .bind(event_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventModerationRow {
    pub status: EventStatus,
    pub is_featured: bool,
}

const SQL_LOAD_EVENT_MODERATION: &str = r#"
SELECT status, is_featured
FROM events
WHERE id = ?1
LIMIT 1
"#;

pub async fn load_event_moderation(
    pool: &SqlitePool,
    event_id: &str,
) -> sqlx::Result<Option<EventModerationRow>> {
    sqlx::query_as::<_, EventModerationRow>(SQL_LOAD_EVENT_MODERATION)
        .bind(event_id)
        .fetch_optional(pool)
        .await
}
