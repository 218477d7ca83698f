pub mod cities;
pub mod event_kinds;
pub mod events;

pub use cities::{CityRow, CitySummaryRow};
pub use event_kinds::{EventKind, EventStatus, Tag, VenueKind};
pub use events::{AdminEventRow, EventRow, ListingEventRow};
