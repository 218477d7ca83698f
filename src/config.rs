use std::env;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set (see .env)")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Shared secret for `/admin`. Without it the admin view is unreachable.
    pub admin_key: Option<String>,
    /// When set, only approved events are public; otherwise everything but rejected.
    pub listing_require_approval: bool,
    pub assets_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = match env::var("PORT") {
            Ok(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: v.clone(),
            })?,
            Err(_) => 3000,
        };

        let listing_require_approval = match env::var("LISTING_REQUIRE_APPROVAL") {
            Ok(v) => parse_bool(&v).ok_or(ConfigError::Invalid {
                name: "LISTING_REQUIRE_APPROVAL",
                value: v.clone(),
            })?,
            Err(_) => false,
        };

        Ok(Self {
            database_url,
            host: non_empty_var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            admin_key: non_empty_var("ADMIN_KEY"),
            listing_require_approval,
            assets_dir: non_empty_var("ASSETS_DIR").unwrap_or_else(|| "assets".to_string()),
        })
    }

    /// Configuration for tests and tooling that bring their own pool.
    pub fn for_database(database_url: &str) -> Self {
        Self {
            database_url: database_url.to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            admin_key: None,
            listing_require_approval: false,
            assets_dir: "assets".to_string(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
