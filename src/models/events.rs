use sqlx::FromRow;

use super::{EventKind, EventStatus, VenueKind};

#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: String,
    pub city_id: String,
    pub event_type: EventKind,
    pub title: String,
    pub match_label: Option<String>,
    pub starts_at: String,
    pub venue_name: String,
    pub venue_type: VenueKind,
    pub address: Option<String>,
    pub general_area: Option<String>,
    pub tags: Option<String>,
    pub external_link: Option<String>,
    pub status: EventStatus,
    pub is_featured: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct ListingEventRow {
    pub id: String,
    pub event_type: EventKind,
    pub title: String,
    pub match_label: Option<String>,
    pub starts_at: String,
    pub venue_name: String,
    pub venue_type: VenueKind,
    pub address: Option<String>,
    pub general_area: Option<String>,
    pub tags: Option<String>,
    pub is_featured: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct AdminEventRow {
    pub id: String,
    pub title: String,
    pub match_label: Option<String>,
    pub starts_at: String,
    pub venue_name: String,
    pub status: EventStatus,
    pub is_featured: bool,
}
