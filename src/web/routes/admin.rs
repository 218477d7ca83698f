use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Extension,
};
use sqlx::SqlitePool;

use crate::error::{render, AppError, AppResult};
use crate::services::links_service;
use crate::services::moderation_service::{self, AdminEventView, ModerationAction};
use crate::web::middleware::admin_key::AdminKey;

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub pending: Vec<AdminEventView>,
    pub approved: Vec<AdminEventView>,
    /// Pre-encoded `key=...`, appended to every moderation form action.
    pub key_query: String,
}

fn key_query(key: &AdminKey) -> AppResult<String> {
    let url = links_service::local_url_with_params("/admin", &[("key", key.0.as_str())])?;
    Ok(url
        .split_once('?')
        .map(|(_, q)| q.to_string())
        .unwrap_or_default())
}

pub async fn admin_page_handler(
    Extension(key): Extension<AdminKey>,
    State(pool): State<SqlitePool>,
) -> AppResult<Html<String>> {
    let data = moderation_service::build_admin_page(&pool).await?;
    render(&AdminTemplate {
        pending: data.pending,
        approved: data.approved,
        key_query: key_query(&key)?,
    })
}

pub async fn moderate_event_handler(
    Extension(key): Extension<AdminKey>,
    Path((event_id, action)): Path<(String, String)>,
    State(pool): State<SqlitePool>,
) -> AppResult<Redirect> {
    let action = ModerationAction::parse(&action).ok_or(AppError::NotFound)?;
    moderation_service::moderate_event(&pool, &event_id, action).await?;
    let target = links_service::local_url_with_params("/admin", &[("key", key.0.as_str())])?;
    Ok(Redirect::to(&target))
}
