use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::error::{render, AppError, AppResult};
use crate::services::city_service::{self, CityEssentials, CityPageQuery, EventCardView};

#[derive(Template)]
#[template(path = "city.html")]
pub struct CityTemplate {
    pub city_name: String,
    pub city_slug: String,
    pub kind_filter: String, // all|watch_party|meetup
    pub featured: Vec<EventCardView>,
    pub regular: Vec<EventCardView>,
    pub load_error: bool,
}

pub async fn city_handler(
    Path(slug): Path<String>,
    Query(query): Query<CityPageQuery>,
    State(pool): State<SqlitePool>,
    State(config): State<Arc<Config>>,
) -> AppResult<Html<String>> {
    let data = city_service::build_city_page(&pool, &slug, &query, config.listing_require_approval)
        .await
        .ok_or(AppError::NotFound)?;

    render(&CityTemplate {
        city_name: data.city_name,
        city_slug: data.city_slug,
        kind_filter: data
            .kind
            .map(|k| k.as_str().to_string())
            .unwrap_or_else(|| "all".to_string()),
        featured: data.featured,
        regular: data.regular,
        load_error: data.load_error,
    })
}

#[derive(Template)]
#[template(path = "essentials.html")]
pub struct EssentialsTemplate {
    pub city_name: String,
    pub city_slug: String,
    pub essentials: CityEssentials,
}

pub async fn essentials_handler(
    Path(slug): Path<String>,
    State(pool): State<SqlitePool>,
) -> AppResult<Html<String>> {
    let data = city_service::build_essentials_page(&pool, &slug)
        .await
        .ok_or(AppError::NotFound)?;

    render(&EssentialsTemplate {
        city_name: data.city_name,
        city_slug: data.city_slug,
        essentials: data.essentials,
    })
}
