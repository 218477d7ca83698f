pub mod admin;
pub mod city;
pub mod event;
pub mod home;
pub mod submit;

use axum::response::Response;

use crate::error::not_found_response;

pub async fn not_found_handler() -> Response {
    not_found_response()
}
