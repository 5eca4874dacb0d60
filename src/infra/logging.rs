//! Process-wide log sink.
//!
//! Handlers log through the `tracing` macros (`debug!`, `info!`, `warn!`,
//! `error!`); this module only installs the subscriber that prints them.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. The filter is read from `LOG_LEVEL`
/// (e.g. `debug`, `bookstore_api=debug,sqlx=warn`) and defaults to `info`.
pub fn init() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;
    Ok(())
}
