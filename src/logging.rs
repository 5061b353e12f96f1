//! Logging bootstrap.
//!
//! Installs a `tracing-subscriber` fmt subscriber once per process. The filter
//! comes from `RUST_LOG` when set, otherwise from the supplied default.

use anyhow::Context;
use once_cell::sync::OnceCell;
use tracing::info;
use tracing_subscriber::EnvFilter;

static INITIALIZED: OnceCell<String> = OnceCell::new();

/// Initialize logging. Later calls are no-ops and return the filter that won.
pub fn init(default_filter: &str) -> anyhow::Result<&'static str> {
    let filter = INITIALIZED.get_or_try_init(|| -> anyhow::Result<String> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .with_context(|| format!("invalid log filter `{default_filter}`"))?;
        let directive = filter.to_string();

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))
            .context("failed to install tracing subscriber")?;

        info!(
            version = env!("CARGO_PKG_VERSION"),
            filter = %directive,
            "Logging initialized"
        );
        Ok(directive)
    })?;
    Ok(filter.as_str())
}
