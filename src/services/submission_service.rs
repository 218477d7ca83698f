use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::database::{cities_repo, events_repo};
use crate::database::events_repo::NewEvent;
use crate::models::{EventKind, Tag, VenueKind};

/// One submit-form post. Every field is replaced wholesale on each edit and
/// read once on submit. Unknown choice values never reject the post: a bad
/// type falls back to its default and a bad tag is dropped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmissionDraft {
    #[serde(deserialize_with = "choice_or_default")]
    pub event_type: EventKind,
    pub city_id: String,
    pub match_label: String,
    pub title: String,
    /// `datetime-local` value: `YYYY-MM-DDTHH:MM` (seconds optional).
    pub starts_at_local: String,
    pub venue_name: String,
    #[serde(deserialize_with = "choice_or_default")]
    pub venue_type: VenueKind,
    pub address: String,
    pub general_area: String,
    pub external_link: String,
    #[serde(deserialize_with = "known_choices")]
    pub tags: Vec<Tag>,
    /// Browser `Date.getTimezoneOffset()`: minutes to add to local time to get UTC.
    pub tz_offset_minutes: String,
}

fn parse_choice<T: DeserializeOwned>(raw: &str) -> Option<T> {
    T::deserialize(StrDeserializer::<ValueError>::new(raw.trim())).ok()
}

fn choice_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = String::deserialize(deserializer)?;
    Ok(parse_choice(&raw).unwrap_or_default())
}

fn known_choices<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.iter().filter_map(|v| parse_choice(v)).collect())
}

impl SubmissionDraft {
    pub fn with_defaults(city_id: Option<String>, now: DateTime<Local>) -> Self {
        Self {
            city_id: city_id.unwrap_or_default(),
            starts_at_local: default_start_local(now),
            ..Self::default()
        }
    }

    /// Clears the per-event fields and keeps type, city, time and venue type.
    pub fn reset_after_submit(&mut self) {
        self.match_label.clear();
        self.title.clear();
        self.venue_name.clear();
        self.address.clear();
        self.general_area.clear();
        self.external_link.clear();
        self.tags.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DraftProblem {
    #[error("Pick a city.")]
    MissingCity,
    #[error("Venue name is required.")]
    MissingVenueName,
    #[error("Start date/time is required.")]
    MissingStartTime,
    #[error("Match label is required for watch parties.")]
    MissingMatchLabel,
    #[error("Provide either an address or a general area.")]
    MissingLocation,
    #[error("Title is required for meetups.")]
    MissingMeetupTitle,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(#[from] DraftProblem),
    #[error("Submit failed: {0}")]
    Store(#[from] sqlx::Error),
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn trimmed_or_none(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() {
        None
    } else {
        Some(v.to_string())
    }
}

pub fn parse_local_datetime(value: &str) -> Option<NaiveDateTime> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(v, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(v, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// First failing rule wins; the order is part of the form's contract.
pub fn validate(draft: &SubmissionDraft) -> Result<(), DraftProblem> {
    if is_blank(&draft.city_id) {
        return Err(DraftProblem::MissingCity);
    }
    if is_blank(&draft.venue_name) {
        return Err(DraftProblem::MissingVenueName);
    }
    if parse_local_datetime(&draft.starts_at_local).is_none() {
        return Err(DraftProblem::MissingStartTime);
    }
    if draft.event_type == EventKind::WatchParty && is_blank(&draft.match_label) {
        return Err(DraftProblem::MissingMatchLabel);
    }
    if is_blank(&draft.address) && is_blank(&draft.general_area) {
        return Err(DraftProblem::MissingLocation);
    }
    if draft.event_type == EventKind::Meetup && is_blank(&draft.title) {
        return Err(DraftProblem::MissingMeetupTitle);
    }
    Ok(())
}

/// The submitter's offset from the hidden form field, if it is usable.
pub fn submitter_offset(draft: &SubmissionDraft) -> Option<FixedOffset> {
    let minutes: i32 = draft.tz_offset_minutes.trim().parse().ok()?;
    FixedOffset::west_opt(minutes.checked_mul(60)?)
}

/// Reads a wall-clock time in `tz`. Ambiguous times take the earlier instant,
/// times inside a DST gap move forward an hour.
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .or_else(|| {
            let shifted = local.checked_add_signed(Duration::hours(1))?;
            tz.from_local_datetime(&shifted).earliest()
        })
        .map(|at| at.with_timezone(&Utc))
}

pub fn compose(draft: &SubmissionDraft) -> Result<NewEvent, DraftProblem> {
    match submitter_offset(draft) {
        Some(offset) => compose_in(draft, &offset),
        None => compose_in(draft, &Local),
    }
}

pub fn compose_in<Tz: TimeZone>(draft: &SubmissionDraft, tz: &Tz) -> Result<NewEvent, DraftProblem> {
    validate(draft)?;

    let starts_at = parse_local_datetime(&draft.starts_at_local)
        .and_then(|local| resolve_local(tz, local))
        .ok_or(DraftProblem::MissingStartTime)?;

    let (title, match_label) = match draft.event_type {
        EventKind::WatchParty => {
            let label = draft.match_label.trim().to_string();
            let title = trimmed_or_none(&draft.title)
                .unwrap_or_else(|| format!("{} Watch Party", label));
            (title, Some(label))
        }
        EventKind::Meetup => (draft.title.trim().to_string(), None),
    };

    let mut tags: Vec<String> = Vec::with_capacity(draft.tags.len());
    for tag in &draft.tags {
        let value = tag.as_str().to_string();
        if !tags.contains(&value) {
            tags.push(value);
        }
    }

    Ok(NewEvent {
        id: Uuid::new_v4().to_string(),
        city_id: draft.city_id.trim().to_string(),
        event_type: draft.event_type,
        title,
        match_label,
        starts_at,
        venue_name: draft.venue_name.trim().to_string(),
        venue_type: draft.venue_type,
        address: trimmed_or_none(&draft.address),
        general_area: trimmed_or_none(&draft.general_area),
        tags,
        external_link: trimmed_or_none(&draft.external_link),
        is_featured: false,
    })
}

pub async fn submit(pool: &SqlitePool, draft: &SubmissionDraft) -> Result<NewEvent, SubmitError> {
    let event = compose(draft)?;
    if let Err(e) = events_repo::insert_event(pool, &event).await {
        warn!("Event insert failed for city {}: {}", event.city_id, e);
        return Err(SubmitError::Store(e));
    }
    info!(
        "Event submitted: id={} city={} type={}",
        event.id,
        event.city_id,
        event.event_type.as_str()
    );
    Ok(event)
}

fn default_start_local(now: DateTime<Local>) -> String {
    // tomorrow, 19:00
    let tomorrow = now.date_naive().succ_opt().unwrap_or(now.date_naive());
    tomorrow
        .and_hms_opt(19, 0, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
        .unwrap_or_default()
}

pub struct SelectOptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub struct SubmitNotice {
    pub message: String,
    pub is_error: bool,
}

pub struct SubmitPageData {
    pub cities: Vec<SelectOptionView>,
    pub cities_loaded: bool,
    pub event_types: Vec<SelectOptionView>,
    pub venue_types: Vec<SelectOptionView>,
    pub tag_options: Vec<SelectOptionView>,
    pub is_watch_party: bool,
    pub draft: SubmissionDraft,
    pub notice: Option<SubmitNotice>,
}

/// Builds the form view. A failed city lookup becomes the notice unless a
/// submit outcome is already being reported.
pub async fn build_submit_page(
    pool: &SqlitePool,
    draft: Option<SubmissionDraft>,
    notice: Option<SubmitNotice>,
) -> SubmitPageData {
    let (cities, city_notice) = match cities_repo::list_active(pool).await {
        Ok(rows) => (Some(rows), None),
        Err(e) => {
            warn!("Loading cities for the submit form failed: {}", e);
            (
                None,
                Some(SubmitNotice {
                    message: format!("Error loading cities: {}", e),
                    is_error: true,
                }),
            )
        }
    };
    let cities_loaded = cities.is_some();
    let cities = cities.unwrap_or_default();

    let draft = draft.unwrap_or_else(|| {
        SubmissionDraft::with_defaults(cities.first().map(|c| c.id.clone()), Local::now())
    });

    let city_options = cities
        .into_iter()
        .map(|c| SelectOptionView {
            selected: c.id == draft.city_id,
            value: c.id,
            label: c.name,
        })
        .collect();

    let event_types = EventKind::ALL
        .iter()
        .map(|k| SelectOptionView {
            value: k.as_str().to_string(),
            label: k.label().to_string(),
            selected: *k == draft.event_type,
        })
        .collect();

    let venue_types = VenueKind::ALL
        .iter()
        .map(|v| SelectOptionView {
            value: v.as_str().to_string(),
            label: v.label().to_string(),
            selected: *v == draft.venue_type,
        })
        .collect();

    let tag_options = Tag::ALL
        .iter()
        .map(|t| SelectOptionView {
            value: t.as_str().to_string(),
            label: t.label().to_string(),
            selected: draft.tags.contains(t),
        })
        .collect();

    SubmitPageData {
        cities: city_options,
        cities_loaded,
        event_types,
        venue_types,
        tag_options,
        is_watch_party: draft.event_type == EventKind::WatchParty,
        notice: notice.or(city_notice),
        draft,
    }
}
