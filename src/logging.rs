//! Diagnostic logging to stderr.
//!
//! Verbosity comes from `GH_REVIEW_LOG` using `EnvFilter` directives
//! (`debug`, `gh_review=trace`, ...). Without it only warnings are shown,
//! so stdout stays clean for rendered results.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "GH_REVIEW_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Builds the filter from `directives`, falling back to warnings when they
/// are absent or unparsable.
#[must_use]
pub fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs the global subscriber; a subscriber that is already set wins.
pub fn init() {
    let directives = std::env::var(LOG_ENV).ok();
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    if tracing_subscriber::registry()
        .with(filter_from(directives.as_deref()))
        .with(layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}
