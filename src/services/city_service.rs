use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::warn;

use crate::database::{cities_repo, events_repo};
use crate::models::event_kinds::tag_display;
use crate::models::{CityRow, CitySummaryRow, EventKind, ListingEventRow};
use crate::services::links_service;

pub const FEATURED_LIMIT: usize = 3;

pub struct HomePageData {
    pub cities: Vec<CitySummaryRow>,
    pub load_error: Option<String>,
}

pub async fn build_home_page(pool: &SqlitePool) -> HomePageData {
    match cities_repo::list_active(pool).await {
        Ok(cities) => HomePageData {
            cities,
            load_error: None,
        },
        Err(e) => {
            warn!("Loading cities failed: {}", e);
            HomePageData {
                cities: Vec::new(),
                load_error: Some(e.to_string()),
            }
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct CityPageQuery {
    pub kind: Option<String>, // watch_party|meetup
}

pub struct EventCardView {
    pub event_id: String,
    pub title: String,
    pub when_label: String,
    pub venue_name: String,
    pub venue_type_label: String,
    pub where_label: String,
    pub kind_label: String,
    pub tags: Vec<String>,
    pub is_featured: bool,
}

pub struct CityPageData {
    pub city_name: String,
    pub city_slug: String,
    pub kind: Option<EventKind>,
    pub featured: Vec<EventCardView>,
    pub regular: Vec<EventCardView>,
    pub load_error: bool,
}

/// Splits an already time-ordered list. Up to [`FEATURED_LIMIT`] featured
/// events lead and `regular` holds the unfeatured ones. Featured events past
/// the cap are left out of both. Order is preserved.
pub fn partition_featured<T>(
    events: Vec<T>,
    is_featured: impl Fn(&T) -> bool,
) -> (Vec<T>, Vec<T>) {
    let mut featured = Vec::new();
    let mut regular = Vec::new();
    for event in events {
        if !is_featured(&event) {
            regular.push(event);
        } else if featured.len() < FEATURED_LIMIT {
            featured.push(event);
        }
    }
    (featured, regular)
}

/// Looks up an active city. A failed lookup is logged and reads as unknown.
async fn find_active_city(pool: &SqlitePool, slug: &str) -> Option<CityRow> {
    match cities_repo::load_active_by_slug(pool, slug).await {
        Ok(city) => city,
        Err(e) => {
            warn!("Loading city {} failed: {}", slug, e);
            None
        }
    }
}

/// `None` when the slug is unknown, the city is inactive, or it could not be loaded.
pub async fn build_city_page(
    pool: &SqlitePool,
    slug: &str,
    query: &CityPageQuery,
    require_approval: bool,
) -> Option<CityPageData> {
    let city = find_active_city(pool, slug).await?;

    let kind = query.kind.as_deref().and_then(EventKind::parse);
    let (featured, regular, load_error) = match events_repo::list_upcoming_for_city(
        pool,
        &city.id,
        Utc::now(),
        require_approval,
        kind,
    )
    .await
    {
        Ok(rows) => {
            let (featured, regular) = partition_featured(rows, |e| e.is_featured);
            (
                featured.into_iter().map(build_card).collect(),
                regular.into_iter().map(build_card).collect(),
                false,
            )
        }
        Err(e) => {
            warn!("Loading events for city {} failed: {}", city.slug, e);
            (Vec::new(), Vec::new(), true)
        }
    };

    Some(CityPageData {
        city_name: city.name,
        city_slug: city.slug,
        kind,
        featured,
        regular,
        load_error,
    })
}

/// Match label when present, otherwise the title.
pub fn display_title(match_label: Option<&str>, title: &str) -> String {
    match_label
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(title)
        .to_string()
}

pub fn parse_tags(json: Option<&str>) -> Vec<String> {
    let Some(raw) = json else {
        return Vec::new();
    };
    serde_json::from_str::<Vec<String>>(raw).unwrap_or_default()
}

fn build_card(row: ListingEventRow) -> EventCardView {
    let where_label = row
        .address
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            row.general_area
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or("Location not specified")
        .to_string();

    EventCardView {
        title: display_title(row.match_label.as_deref(), &row.title),
        when_label: links_service::format_when(&row.starts_at),
        venue_type_label: row.venue_type.label().to_string(),
        kind_label: row.event_type.label().to_string(),
        tags: parse_tags(row.tags.as_deref())
            .iter()
            .map(|t| tag_display(t))
            .collect(),
        event_id: row.id,
        venue_name: row.venue_name,
        where_label,
        is_featured: row.is_featured,
    }
}

/// `New York / New Jersey` -> `new-york-new-jersey`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut prev_hyphen = true;
    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stadium {
    pub name: String,
    #[serde(default)]
    pub maps_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NearbyBasic {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityEssentials {
    pub stadiums: Vec<Stadium>,
    pub getting_there: Vec<String>,
    pub nearby_basics: Vec<NearbyBasic>,
}

impl CityEssentials {
    pub fn is_empty(&self) -> bool {
        self.stadiums.is_empty() && self.getting_there.is_empty() && self.nearby_basics.is_empty()
    }
}

/// Essentials are hand-edited JSON. A missing or malformed field becomes an
/// empty list, and malformed entries are dropped one at a time.
pub fn parse_essentials(json: Option<&str>) -> CityEssentials {
    let value: Value = json
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or(Value::Null);

    CityEssentials {
        stadiums: entries(&value, "stadiums"),
        getting_there: entries(&value, "getting_there"),
        nearby_basics: entries(&value, "nearby_basics"),
    }
}

fn entries<T: DeserializeOwned>(value: &Value, field: &str) -> Vec<T> {
    value
        .get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| T::deserialize(item).ok())
                .collect()
        })
        .unwrap_or_default()
}

pub struct EssentialsPageData {
    pub city_name: String,
    pub city_slug: String,
    pub essentials: CityEssentials,
}

pub async fn build_essentials_page(pool: &SqlitePool, slug: &str) -> Option<EssentialsPageData> {
    let city = find_active_city(pool, slug).await?;
    Some(EssentialsPageData {
        essentials: parse_essentials(city.essentials.as_deref()),
        city_name: city.name,
        city_slug: city.slug,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VenueKind;

    #[derive(Debug, PartialEq)]
    struct Item {
        n: u32,
        featured: bool,
    }

    fn items(featured: &[u32], count: u32) -> Vec<Item> {
        (1..=count)
            .map(|n| Item {
                n,
                featured: featured.contains(&n),
            })
            .collect()
    }

    fn numbers(items: &[Item]) -> Vec<u32> {
        items.iter().map(|i| i.n).collect()
    }

    #[test]
    fn partition_keeps_order_in_both_lists() {
        let (featured, regular) = partition_featured(items(&[2, 4], 5), |i| i.featured);
        assert_eq!(numbers(&featured), vec![2, 4]);
        assert_eq!(numbers(&regular), vec![1, 3, 5]);
    }

    #[test]
    fn partition_caps_featured_at_three() {
        let (featured, regular) = partition_featured(items(&[1, 2, 3, 4, 6], 6), |i| i.featured);
        assert_eq!(numbers(&featured), vec![1, 2, 3]);
        assert_eq!(numbers(&regular), vec![5]);
    }

    #[test]
    fn featured_overflow_never_lands_in_regular() {
        let (featured, regular) = partition_featured(items(&[1, 2, 3, 4], 5), |i| i.featured);
        assert_eq!(numbers(&featured), vec![1, 2, 3]);
        assert_eq!(numbers(&regular), vec![5]);
        assert!(regular.iter().all(|i| !i.featured));
    }

    #[test]
    fn partition_of_nothing_is_empty() {
        let (featured, regular) = partition_featured(Vec::<Item>::new(), |i| i.featured);
        assert!(featured.is_empty());
        assert!(regular.is_empty());
    }

    #[test]
    fn display_title_prefers_match_label() {
        assert_eq!(display_title(Some("Morocco vs Spain"), "Party"), "Morocco vs Spain");
        assert_eq!(display_title(Some("  "), "Party"), "Party");
        assert_eq!(display_title(None, "Party"), "Party");
    }

    #[test]
    fn card_falls_back_through_address_area_and_placeholder() {
        let row = ListingEventRow {
            id: "e1".to_string(),
            event_type: EventKind::WatchParty,
            title: "Morocco vs Spain Watch Party".to_string(),
            match_label: Some("Morocco vs Spain".to_string()),
            starts_at: "2026-06-15T23:00:00Z".to_string(),
            venue_name: "Café Atlas".to_string(),
            venue_type: VenueKind::FanHosted,
            address: Some(" ".to_string()),
            general_area: Some("Near downtown".to_string()),
            tags: Some(r#"["alcohol_free","family_friendly"]"#.to_string()),
            is_featured: false,
        };
        let card = build_card(row.clone());
        assert_eq!(card.title, "Morocco vs Spain");
        assert_eq!(card.where_label, "Near downtown");
        assert_eq!(card.venue_type_label, "Fan-hosted");
        assert_eq!(card.tags, vec!["alcohol free", "family friendly"]);

        let bare = build_card(ListingEventRow {
            address: None,
            general_area: None,
            tags: None,
            ..row
        });
        assert_eq!(bare.where_label, "Location not specified");
        assert!(bare.tags.is_empty());
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("New York / New Jersey"), "new-york-new-jersey");
        assert_eq!(slugify("  Mexico City "), "mexico-city");
        assert_eq!(slugify("--Toronto--"), "toronto");
    }

    #[test]
    fn essentials_parse_all_sections() {
        let json = r#"{
            "stadiums": [{"name": "BMO Field", "maps_url": "https://maps.example/bmo"}, {"name": "Other"}],
            "getting_there": ["Take the 509 streetcar", "Exhibition GO station"],
            "nearby_basics": [{"label": "Pharmacy", "url": "https://example.com/rx"}]
        }"#;
        let essentials = parse_essentials(Some(json));
        assert_eq!(essentials.stadiums.len(), 2);
        assert_eq!(
            essentials.stadiums[0].maps_url.as_deref(),
            Some("https://maps.example/bmo")
        );
        assert_eq!(essentials.stadiums[1].maps_url, None);
        assert_eq!(essentials.getting_there.len(), 2);
        assert_eq!(essentials.nearby_basics[0].label, "Pharmacy");
        assert!(!essentials.is_empty());
    }

    #[test]
    fn essentials_tolerate_missing_and_malformed_data() {
        assert!(parse_essentials(None).is_empty());
        assert!(parse_essentials(Some("not json")).is_empty());
        assert!(parse_essentials(Some("[1,2,3]")).is_empty());

        let json = r#"{
            "stadiums": "BMO Field",
            "getting_there": ["Walk", 42, null, "Bike"],
            "nearby_basics": [{"label": "No url"}, {"label": "Ok", "url": "https://ok"}]
        }"#;
        let essentials = parse_essentials(Some(json));
        assert!(essentials.stadiums.is_empty());
        assert_eq!(essentials.getting_there, vec!["Walk", "Bike"]);
        assert_eq!(
            essentials.nearby_basics,
            vec![NearbyBasic {
                label: "Ok".to_string(),
                url: "https://ok".to_string()
            }]
        );
    }
}
