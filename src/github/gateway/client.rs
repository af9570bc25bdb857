//! Octocrab client construction.

use http::Uri;
use octocrab::Octocrab;

use crate::github::error::ReviewError;
use crate::github::token::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client for the given token and API base URL.
///
/// # Errors
///
/// Returns [`ReviewError::Configuration`] when the base URI cannot be parsed
/// and a mapped Octocrab error when the client cannot be constructed.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
) -> Result<Octocrab, ReviewError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| ReviewError::Configuration {
            message: format!("invalid API URL {api_base:?}: {error}"),
        })?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| ReviewError::Configuration {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
