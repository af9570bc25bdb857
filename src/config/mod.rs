//! Application configuration loaded from environment and files.
//!
//! Command-line flags are owned by the CLI; this module supplies the layered
//! defaults beneath them using ortho-config.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.gh-review.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `GH_REVIEW_TOKEN`, `GH_REVIEW_API_URL`,
//!    `GH_REVIEW_FORMAT`, `GH_REVIEW_REMOTE`
//! 4. **Command-line flags** – `--format`/`-f` and `--repo`/`-R`, applied by
//!    the CLI after loading
//!
//! # Configuration File
//!
//! ```toml
//! token = "ghp_example"
//! api_url = "https://api.github.com"
//! format = "plain"
//! remote = "upstream"
//! ```

use std::env;
use std::ffi::OsString;
use std::process::Stdio;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::github::error::ReviewError;
use crate::github::token::PersonalAccessToken;

/// Default GitHub API base; the GraphQL endpoint is `<api_url>/graphql`.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const DEFAULT_FORMAT: &str = "table";
const DEFAULT_REMOTE: &str = "origin";

/// Layered configuration for every subcommand.
///
/// # Example
///
/// ```no_run
/// use gh_review::ReviewConfig;
///
/// let config = ReviewConfig::from_environment().expect("failed to load configuration");
/// assert!(!config.api_url.is_empty());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "GH_REVIEW",
    discovery(
        dotfile_name = ".gh-review.toml",
        config_file_name = "gh-review.toml",
        app_name = "gh-review"
    )
)]
pub struct ReviewConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - Environment: `GH_REVIEW_TOKEN`, then `GH_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    /// - Fallback: `gh auth token`
    #[ortho_config()]
    pub token: Option<String>,

    /// GitHub API base URL, for GitHub Enterprise or test servers.
    #[ortho_config()]
    pub api_url: String,

    /// Output format used when `--format` is absent.
    #[ortho_config()]
    pub format: String,

    /// Git remote consulted when no repository is given.
    #[ortho_config()]
    pub remote: String,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: DEFAULT_API_URL.to_owned(),
            format: DEFAULT_FORMAT.to_owned(),
            remote: DEFAULT_REMOTE.to_owned(),
        }
    }
}

impl ReviewConfig {
    /// Loads defaults, configuration files, and `GH_REVIEW_*` variables.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] when a file or variable cannot
    /// be parsed.
    pub fn from_environment() -> Result<Self, ReviewError> {
        Self::load_from_iter([OsString::from("gh-review")]).map_err(|error| {
            ReviewError::Configuration {
                message: error.to_string(),
            }
        })
    }

    /// Resolves the token from configuration, `GH_TOKEN`, `GITHUB_TOKEN`,
    /// and finally `gh auth token`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::MissingToken`] when no source yields a value.
    pub async fn resolve_token(&self) -> Result<PersonalAccessToken, ReviewError> {
        if let Some(token) = first_token([
            self.token.clone(),
            env::var("GH_TOKEN").ok(),
            env::var("GITHUB_TOKEN").ok(),
        ]) {
            return PersonalAccessToken::new(token);
        }

        let token = gh_auth_token().await.ok_or(ReviewError::MissingToken)?;
        PersonalAccessToken::new(token)
    }
}

/// Picks the first non-blank candidate.
fn first_token<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|token| !token.trim().is_empty())
}

/// Asks the GitHub CLI for its stored token; any failure means "no token".
async fn gh_auth_token() -> Option<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await
        .inspect_err(|error| tracing::debug!(%error, "gh CLI unavailable"))
        .ok()?;
    if !output.status.success() {
        tracing::debug!(status = %output.status, "gh auth token failed");
        return None;
    }
    let token = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    (!token.is_empty()).then_some(token)
}
