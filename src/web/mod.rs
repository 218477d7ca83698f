pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware as axum_middleware,
    routing::{get, get_service, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::Config;
use crate::web::middleware::admin_key;
use crate::web::routes::{admin, city, event, home, submit};

pub const SITE_NAME: &str = "Fanbase 2026";

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/admin", get(admin::admin_page_handler))
        .route(
            "/admin/events/:event_id/:action",
            post(admin::moderate_event_handler),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            admin_key::require_admin_key,
        ));

    let assets_dir = state.config.assets_dir.clone();

    Router::new()
        .route("/", get(home::home_handler))
        .route("/city/:slug", get(city::city_handler))
        .route("/city/:slug/essentials", get(city::essentials_handler))
        .route("/event/:event_id", get(event::event_detail_handler))
        .route(
            "/submit",
            get(submit::submit_page_handler).post(submit::submit_handler),
        )
        .merge(admin_routes)
        .nest_service(
            "/assets",
            get_service(ServeDir::new(assets_dir)).layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            )),
        )
        .fallback(routes::not_found_handler)
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
