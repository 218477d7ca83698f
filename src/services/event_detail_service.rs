use std::num::NonZeroU32;

use sqlx::SqlitePool;

use crate::database::{cities_repo, events_repo};
use crate::error::{AppError, AppResult};
use crate::models::event_kinds::tag_display;
use crate::models::{EventKind, EventRow};
use crate::services::city_service::{display_title, parse_tags};
use crate::services::links_service::{self, CalendarEvent};
use crate::web::SITE_NAME;

const DETAIL_CALENDAR_MINUTES: u32 = 150;

pub struct CityLinkView {
    pub name: String,
    pub slug: String,
}

pub struct EventDetailView {
    pub event_id: String,
    pub title: String,
    pub kind_label: String,
    pub is_watch_party: bool,
    pub when_label: String,
    pub venue_name: String,
    pub venue_type_label: String,
    pub where_label: Option<String>,
    pub tags: Vec<String>,
    pub map_link: Option<String>,
    pub calendar_link: String,
    pub external_link: Option<String>,
    pub city: Option<CityLinkView>,
}

pub async fn load_event_detail_view(
    pool: &SqlitePool,
    event_id: &str,
    require_approval: bool,
) -> AppResult<EventDetailView> {
    let row = events_repo::load_public_event(pool, event_id, require_approval)
        .await?
        .ok_or(AppError::NotFound)?;

    // The back link is optional; a dangling city reference still renders.
    let city = cities_repo::load_summary(pool, &row.city_id)
        .await
        .ok()
        .flatten()
        .map(|c| CityLinkView {
            name: c.name,
            slug: c.slug,
        });

    build_view(row, city)
}

fn build_view(row: EventRow, city: Option<CityLinkView>) -> AppResult<EventDetailView> {
    let title = display_title(row.match_label.as_deref(), &row.title);
    let where_label = [row.address.as_deref(), row.general_area.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(|s| s.to_string());

    let starts_at = links_service::parse_instant(&row.starts_at)
        .ok_or_else(|| AppError::Link(format!("event {} has an unreadable start time", row.id)))?;
    let details = format!("Fan listing on {}.", SITE_NAME);
    let calendar_link = links_service::calendar_url(&CalendarEvent {
        title: &title,
        starts_at,
        duration_minutes: NonZeroU32::new(DETAIL_CALENDAR_MINUTES),
        details: Some(details.as_str()),
        location: where_label.as_deref(),
    })?;

    let map_link = where_label.as_deref().map(links_service::maps_url);

    let external_link = row
        .external_link
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    Ok(EventDetailView {
        when_label: links_service::format_when(&row.starts_at),
        kind_label: row.event_type.label().to_string(),
        is_watch_party: row.event_type == EventKind::WatchParty,
        venue_type_label: row.venue_type.label().to_string(),
        tags: parse_tags(row.tags.as_deref())
            .iter()
            .map(|t| tag_display(t))
            .collect(),
        event_id: row.id,
        title,
        venue_name: row.venue_name,
        where_label,
        map_link,
        calendar_link,
        external_link,
        city,
    })
}
