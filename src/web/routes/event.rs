use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, State},
    response::Html,
};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::error::{render, AppResult};
use crate::services::event_detail_service::{self, EventDetailView};

#[derive(Template)]
#[template(path = "event.html")]
pub struct EventDetailTemplate {
    pub event: EventDetailView,
}

pub async fn event_detail_handler(
    Path(event_id): Path<String>,
    State(pool): State<SqlitePool>,
    State(config): State<Arc<Config>>,
) -> AppResult<Html<String>> {
    let event = event_detail_service::load_event_detail_view(
        &pool,
        &event_id,
        config.listing_require_approval,
    )
    .await?;
    render(&EventDetailTemplate { event })
}
