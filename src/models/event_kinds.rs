use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
pub enum EventKind {
    #[default]
    WatchParty,
    Meetup,
}

impl EventKind {
    pub const ALL: [EventKind; 2] = [EventKind::WatchParty, EventKind::Meetup];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::WatchParty => "watch_party",
            EventKind::Meetup => "meetup",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventKind::WatchParty => "Watch Party",
            EventKind::Meetup => "Meetup",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "watch_party" => Some(EventKind::WatchParty),
            "meetup" => Some(EventKind::Meetup),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
pub enum VenueKind {
    #[default]
    Cafe,
    Public,
    FanHosted,
    Bar,
}

impl VenueKind {
    pub const ALL: [VenueKind; 4] = [
        VenueKind::Cafe,
        VenueKind::Public,
        VenueKind::FanHosted,
        VenueKind::Bar,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VenueKind::Cafe => "cafe",
            VenueKind::Public => "public",
            VenueKind::FanHosted => "fan_hosted",
            VenueKind::Bar => "bar",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VenueKind::Cafe => "Café",
            VenueKind::Public => "Public",
            VenueKind::FanHosted => "Fan-hosted",
            VenueKind::Bar => "Bar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
pub enum EventStatus {
    Pending,
    Approved,
    Rejected,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Approved => "approved",
            EventStatus::Rejected => "rejected",
        }
    }
}

/// Tags offered by the submit form. Stored tags are plain strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    AlcoholFree,
    FamilyFriendly,
    HalalFriendly,
}

impl Tag {
    pub const ALL: [Tag; 3] = [Tag::AlcoholFree, Tag::FamilyFriendly, Tag::HalalFriendly];

    pub fn as_str(self) -> &'static str {
        match self {
            Tag::AlcoholFree => "alcohol_free",
            Tag::FamilyFriendly => "family_friendly",
            Tag::HalalFriendly => "halal_friendly",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tag::AlcoholFree => "Alcohol-free",
            Tag::FamilyFriendly => "Family-friendly",
            Tag::HalalFriendly => "Halal-friendly",
        }
    }
}

/// `alcohol_free` -> `alcohol free`
pub fn tag_display(raw: &str) -> String {
    raw.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_round_trip_through_their_wire_names() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EventKind::parse("concert"), None);
    }

    #[test]
    fn serde_names_match_column_values() {
        for venue in VenueKind::ALL {
            let json = serde_json::to_string(&venue).unwrap();
            assert_eq!(json, format!("\"{}\"", venue.as_str()));
        }
        for tag in Tag::ALL {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag.as_str()));
        }
    }

    #[test]
    fn venue_labels() {
        assert_eq!(VenueKind::FanHosted.label(), "Fan-hosted");
        assert_eq!(VenueKind::Cafe.label(), "Café");
    }

    #[test]
    fn tag_display_replaces_every_underscore() {
        assert_eq!(tag_display("family_friendly"), "family friendly");
        assert_eq!(tag_display("a_b_c"), "a b c");
    }
}
