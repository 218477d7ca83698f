pub mod cities_repo;
pub mod event_moderation_repo;
pub mod events_repo;
pub mod schema;
