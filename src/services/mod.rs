pub mod city_service;
pub mod event_detail_service;
pub mod links_service;
pub mod moderation_service;
pub mod submission_service;
