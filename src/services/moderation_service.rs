use sqlx::SqlitePool;
use tracing::info;

use crate::database::{event_moderation_repo, events_repo};
use crate::error::{AppError, AppResult};
use crate::models::{AdminEventRow, EventStatus};
use crate::services::city_service::display_title;
use crate::services::links_service;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Reject,
    Feature,
    Unfeature,
}

impl ModerationAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Reject => "reject",
            ModerationAction::Feature => "feature",
            ModerationAction::Unfeature => "unfeature",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "approve" => Some(ModerationAction::Approve),
            "reject" => Some(ModerationAction::Reject),
            "feature" => Some(ModerationAction::Feature),
            "unfeature" => Some(ModerationAction::Unfeature),
            _ => None,
        }
    }

    /// No transition guards: featuring a rejected event approves it again.
    pub fn patch(self) -> EventPatch {
        match self {
            ModerationAction::Approve => EventPatch {
                status: Some(EventStatus::Approved),
                is_featured: None,
            },
            ModerationAction::Reject => EventPatch {
                status: Some(EventStatus::Rejected),
                is_featured: None,
            },
            ModerationAction::Feature => EventPatch {
                status: Some(EventStatus::Approved),
                is_featured: Some(true),
            },
            ModerationAction::Unfeature => EventPatch {
                status: None,
                is_featured: Some(false),
            },
        }
    }
}

/// `None` leaves the field as it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventPatch {
    pub status: Option<EventStatus>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModerationState {
    pub status: EventStatus,
    pub is_featured: bool,
}

impl EventPatch {
    pub fn apply(self, state: ModerationState) -> ModerationState {
        ModerationState {
            status: self.status.unwrap_or(state.status),
            is_featured: self.is_featured.unwrap_or(state.is_featured),
        }
    }
}

/// One UPDATE by id. Unknown ids are `NotFound`.
pub async fn moderate_event(
    pool: &SqlitePool,
    event_id: &str,
    action: ModerationAction,
) -> AppResult<ModerationState> {
    let patch = action.patch();
    let updated = event_moderation_repo::update_event_moderation(
        pool,
        event_id,
        patch.status,
        patch.is_featured,
    )
    .await?;
    if updated == 0 {
        return Err(AppError::NotFound);
    }

    let row = event_moderation_repo::load_event_moderation(pool, event_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let state = ModerationState {
        status: row.status,
        is_featured: row.is_featured,
    };
    info!(
        "Moderation: event={} action={} status={} featured={}",
        event_id,
        action.as_str(),
        state.status.as_str(),
        state.is_featured
    );
    Ok(state)
}

pub const APPROVED_LIST_LIMIT: i64 = 50;

pub struct AdminEventView {
    pub event_id: String,
    pub label: String,
    pub venue_name: String,
    pub when_label: String,
    pub is_featured: bool,
}

pub struct AdminPageData {
    pub pending: Vec<AdminEventView>,
    pub approved: Vec<AdminEventView>,
}

pub async fn build_admin_page(pool: &SqlitePool) -> sqlx::Result<AdminPageData> {
    let pending = events_repo::list_by_status(pool, EventStatus::Pending, None).await?;
    let approved =
        events_repo::list_by_status(pool, EventStatus::Approved, Some(APPROVED_LIST_LIMIT)).await?;
    Ok(AdminPageData {
        pending: pending.into_iter().map(build_admin_view).collect(),
        approved: approved.into_iter().map(build_admin_view).collect(),
    })
}

fn build_admin_view(row: AdminEventRow) -> AdminEventView {
    AdminEventView {
        label: display_title(row.match_label.as_deref(), &row.title),
        when_label: links_service::format_when(&row.starts_at),
        event_id: row.id,
        venue_name: row.venue_name,
        is_featured: row.is_featured,
    }
}
