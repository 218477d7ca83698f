use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use tracing::warn;

use crate::config::Config;
use crate::error::not_found_response;

/// The key that opened the admin view, for building follow-up links.
#[derive(Clone, Debug)]
pub struct AdminKey(pub String);

#[derive(Deserialize)]
struct AdminKeyQuery {
    key: Option<String>,
}

// Shared secret, not a credential system. No key configured means no admin view.
pub fn key_matches(configured: Option<&str>, provided: Option<&str>) -> bool {
    match (configured, provided) {
        (Some(expected), Some(given)) => !expected.is_empty() && expected == given,
        _ => false,
    }
}

pub async fn require_admin_key(
    State(config): State<Arc<Config>>,
    mut request: Request,
    next: Next,
) -> Response {
    let provided = Query::<AdminKeyQuery>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(q)| q.key);

    if !key_matches(config.admin_key.as_deref(), provided.as_deref()) {
        if provided.is_some() {
            warn!("Admin view requested with a wrong key: {}", request.uri().path());
        }
        // Unreachable rather than forbidden.
        return not_found_response();
    }

    if let Some(key) = provided {
        request.extensions_mut().insert(AdminKey(key));
    }
    next.run(request).await
}
