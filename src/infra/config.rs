//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, Context};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").map_err(|_| anyhow!("DATABASE_URL must be set"))
}

/// Address the API server listens on (`BIND_ADDR`, default `0.0.0.0:3000`).
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// Size of the Postgres connection pool (`DB_MAX_CONNECTIONS`, default 5).
pub fn db_max_connections() -> anyhow::Result<u32> {
    parse_max_connections(std::env::var("DB_MAX_CONNECTIONS").ok().as_deref())
}

fn parse_max_connections(raw: Option<&str>) -> anyhow::Result<u32> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_MAX_CONNECTIONS),
        Some(v) => {
            let n = v
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be a valid u32, got '{}'", v))?;
            Ok(n.max(1))
        }
    }
}
