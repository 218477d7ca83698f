use sqlx::SqlitePool;

use crate::models::{CityRow, CitySummaryRow};

const SQL_LIST_ACTIVE_CITIES: &str = r#"
SELECT id, name, slug
FROM cities
WHERE is_active = 1
ORDER BY name ASC
"#;

pub async fn list_active(pool: &SqlitePool) -> sqlx::Result<Vec<CitySummaryRow>> {
    sqlx::query_as::<_, CitySummaryRow>(SQL_LIST_ACTIVE_CITIES)
        .fetch_all(pool)
        .await
}

const SQL_LOAD_ACTIVE_CITY_BY_SLUG: &str = r#"
SELECT id, name, slug, is_active, essentials
FROM cities
WHERE slug = ?1
  AND is_active = 1
LIMIT 1
"#;

pub async fn load_active_by_slug(pool: &SqlitePool, slug: &str) -> sqlx::Result<Option<CityRow>> {
    sqlx::query_as::<_, CityRow>(SQL_LOAD_ACTIVE_CITY_BY_SLUG)
        .bind(slug)
        .fetch_optional(pool)
        .await
}

const SQL_LOAD_CITY_SUMMARY: &str = r#"
SELECT id, name, slug
FROM cities
WHERE id = ?1
LIMIT 1
"#;

pub async fn load_summary(pool: &SqlitePool, city_id: &str) -> sqlx::Result<Option<CitySummaryRow>> {
    sqlx::query_as::<_, CitySummaryRow>(SQL_LOAD_CITY_SUMMARY)
        .bind(city_id)
        .fetch_optional(pool)
        .await
}

pub struct NewCity<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub slug: &'a str,
    pub essentials: Option<&'a str>,
}

const SQL_UPSERT_CITY: &str = r#"
INSERT INTO cities (id, name, slug, is_active, essentials)
VALUES (?1, ?2, ?3, 1, ?4)
ON CONFLICT (slug) DO UPDATE SET
  name = excluded.name,
  essentials = COALESCE(excluded.essentials, cities.essentials)
"#;

// Used by the init_db seed only; the site itself never writes cities.
pub async fn upsert_city(pool: &SqlitePool, city: NewCity<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_UPSERT_CITY)
        .bind(city.id)
        .bind(city.name)
        .bind(city.slug)
        .bind(city.essentials)
        .execute(pool)
        .await?;
    Ok(())
}
