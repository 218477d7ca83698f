use sqlx::SqlitePool;

const SQL_CREATE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS cities (
  id TEXT PRIMARY KEY NOT NULL,
  name TEXT NOT NULL,
  slug TEXT NOT NULL UNIQUE,
  is_active INTEGER NOT NULL DEFAULT 1,
  essentials TEXT
);

CREATE TABLE IF NOT EXISTS events (
  id TEXT PRIMARY KEY NOT NULL,
  city_id TEXT NOT NULL,
  event_type TEXT NOT NULL CHECK (event_type IN ('watch_party', 'meetup')),
  title TEXT NOT NULL,
  match_label TEXT,
  starts_at TEXT NOT NULL,
  venue_name TEXT NOT NULL,
  venue_type TEXT NOT NULL CHECK (venue_type IN ('cafe', 'public', 'fan_hosted', 'bar')),
  address TEXT,
  general_area TEXT,
  tags TEXT NOT NULL DEFAULT '[]',
  external_link TEXT,
  status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'approved', 'rejected')),
  is_featured INTEGER NOT NULL DEFAULT 0,
  created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_events_city_starts_at ON events (city_id, starts_at);
CREATE INDEX IF NOT EXISTS idx_events_status_starts_at ON events (status, starts_at);
"#;

pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::raw_sql(SQL_CREATE_SCHEMA).execute(pool).await?;
    Ok(())
}
