//! Git remote URL parsing.
//!
//! Accepts the shapes Git itself writes into `remote.<name>.url`: SCP-style
//! SSH (`git@host:owner/repo.git`) and URL-style (`https://`, `ssh://`,
//! `git://`). Any host is accepted so GitHub Enterprise remotes resolve too.

use crate::github::locator::RepositorySlug;

use super::error::LocalDiscoveryError;

/// Host and repository named by a remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOrigin {
    host: String,
    slug: RepositorySlug,
}

impl RemoteOrigin {
    /// Host portion of the remote, as written.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Repository as `owner/name`.
    #[must_use]
    pub const fn slug(&self) -> &RepositorySlug {
        &self.slug
    }

    /// Consumes the origin, keeping only the repository.
    #[must_use]
    pub fn into_slug(self) -> RepositorySlug {
        self.slug
    }
}

/// Parses a Git remote URL into its host and `owner/repo`.
///
/// A trailing `.git` and trailing slashes are ignored; paths deeper than
/// `owner/repo` are rejected.
///
/// # Errors
///
/// Returns [`LocalDiscoveryError::InvalidRemoteUrl`] when the URL has no
/// recognisable `owner/repo` path.
pub fn parse_remote_url(url: &str) -> Result<RemoteOrigin, LocalDiscoveryError> {
    let trimmed = url.trim();
    scp_style(trimmed)
        .or_else(|| url_style(trimmed))
        .ok_or_else(|| LocalDiscoveryError::InvalidRemoteUrl {
            url: url.to_owned(),
        })
}

/// `user@host:owner/repo.git`
fn scp_style(url: &str) -> Option<RemoteOrigin> {
    if url.contains("://") {
        return None;
    }
    let (user_host, path) = url.split_once(':')?;
    let (_, host) = user_host.split_once('@')?;
    origin(host, path)
}

/// `scheme://[user@]host[:port]/owner/repo.git`
fn url_style(url: &str) -> Option<RemoteOrigin> {
    let parsed = url::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    origin(host, parsed.path())
}

fn origin(host: &str, path: &str) -> Option<RemoteOrigin> {
    if host.is_empty() {
        return None;
    }
    let mut segments = path.trim_matches('/').split('/');
    let owner = segments.next()?;
    let raw_name = segments.next()?;
    if segments.next().is_some() {
        return None;
    }
    let name = raw_name.strip_suffix(".git").unwrap_or(raw_name);
    let slug = RepositorySlug::new(owner, name).ok()?;
    Some(RemoteOrigin {
        host: host.to_owned(),
        slug,
    })
}
