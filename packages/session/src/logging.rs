//! Process-wide `tracing` subscriber.

use tracing_subscriber::{fmt, EnvFilter};

/// Default directive when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a formatted subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already set, in which case the
/// existing one stays in place.
pub fn init() -> bool {
    let filter = filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());
    let installed = fmt().with_env_filter(filter).with_target(false).try_init().is_ok();
    if installed {
        tracing::debug!("Logging initialized");
    }
    installed
}

fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_falls_back_to_default() {
        assert_eq!(filter_from(None).to_string(), DEFAULT_FILTER);
    }

    #[test]
    fn test_directives_are_honored() {
        assert_eq!(filter_from(Some("session=debug")).to_string(), "session=debug");
    }

    #[test]
    fn test_invalid_directives_fall_back_to_default() {
        assert_eq!(filter_from(Some("session=verbose")).to_string(), DEFAULT_FILTER);
    }
}
