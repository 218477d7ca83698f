use std::fmt::Display;
use std::num::NonZeroU32;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;

use crate::error::{AppError, AppResult};

pub const INVALID_DATE: &str = "Invalid Date";
pub const DEFAULT_CALENDAR_DURATION_MINUTES: u32 = 120;

const WHEN_FORMAT: &str = "%a, %b %-d, %-I:%M %p";
const COMPACT_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";
const CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";

// Everything but the URI component unreserved marks is escaped, so a space is `%20`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn parse_instant(iso: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(iso.trim())
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

/// `Mon, Jun 15, 7:00 PM` in the server's local timezone.
pub fn format_when(iso: &str) -> String {
    format_when_in(iso, &Local)
}

pub fn format_when_in<Tz>(iso: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_instant(iso) {
        Some(at) => at.with_timezone(tz).format(WHEN_FORMAT).to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Map search for a free-text address or area. Callers only pass non-empty input.
pub fn maps_url(address_or_area: &str) -> String {
    format!(
        "{}?api=1&query={}",
        MAPS_SEARCH_URL,
        utf8_percent_encode(address_or_area, URI_COMPONENT)
    )
}

pub struct CalendarEvent<'a> {
    pub title: &'a str,
    pub starts_at: DateTime<Utc>,
    /// Defaults to [`DEFAULT_CALENDAR_DURATION_MINUTES`].
    pub duration_minutes: Option<NonZeroU32>,
    pub details: Option<&'a str>,
    pub location: Option<&'a str>,
}

pub fn calendar_url(event: &CalendarEvent<'_>) -> AppResult<String> {
    let minutes = event
        .duration_minutes
        .map_or(DEFAULT_CALENDAR_DURATION_MINUTES, NonZeroU32::get);
    let ends_at = event
        .starts_at
        .checked_add_signed(Duration::minutes(i64::from(minutes)))
        .ok_or_else(|| AppError::Link(format!("duration of {} minutes is out of range", minutes)))?;
    let dates = format!("{}/{}", compact_utc(event.starts_at), compact_utc(ends_at));

    let mut url = Url::parse(CALENDAR_RENDER_URL).map_err(|e| AppError::Link(e.to_string()))?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("action", "TEMPLATE");
        query.append_pair("text", event.title);
        query.append_pair("dates", &dates);
        if let Some(details) = non_blank(event.details) {
            query.append_pair("details", details);
        }
        if let Some(location) = non_blank(event.location) {
            query.append_pair("location", location);
        }
    }
    Ok(url.into())
}

fn compact_utc(at: DateTime<Utc>) -> String {
    at.format(COMPACT_UTC_FORMAT).to_string()
}

/// Site-relative path with encoded query parameters, e.g. `/admin?key=a%26b`.
pub fn local_url_with_params(path: &str, params: &[(&str, &str)]) -> AppResult<String> {
    let base = Url::parse("http://localhost/").map_err(|e| AppError::Link(e.to_string()))?;
    let mut url = base.join(path).map_err(|e| AppError::Link(e.to_string()))?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter());
    }
    Ok(match url.query() {
        Some(q) if !q.is_empty() => format!("{}?{}", url.path(), q),
        _ => url.path().to_string(),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
