use askama::Template;
use axum::{extract::State, response::Html};
use sqlx::SqlitePool;

use crate::error::{render, AppResult};
use crate::models::CitySummaryRow;
use crate::services::city_service;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub cities: Vec<CitySummaryRow>,
    pub load_error: Option<String>,
}

pub async fn home_handler(State(pool): State<SqlitePool>) -> AppResult<Html<String>> {
    let data = city_service::build_home_page(&pool).await;
    render(&HomeTemplate {
        cities: data.cities,
        load_error: data.load_error,
    })
}
