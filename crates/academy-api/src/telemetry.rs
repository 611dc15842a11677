//! Tracing initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Fallback filter when RUST_LOG is unset. Targets are crate names, so each
/// workspace crate needs its own directive.
const DEFAULT_FILTER: &str =
    "academy_api=debug,academy_db=debug,academy_core=debug,academy_storage=debug,tower_http=debug";

/// Initialize tracing with an env-filter and a formatted output layer.
pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses_and_covers_workspace_crates() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
        for target in [
            "academy_api",
            "academy_db",
            "academy_core",
            "academy_storage",
            "tower_http",
        ] {
            assert!(
                DEFAULT_FILTER.contains(&format!("{}=debug", target)),
                "missing directive for {}",
                target
            );
        }
    }
}
