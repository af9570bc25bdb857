//! Ambient repository discovery from the working directory's Git remote.

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::github::error::ReviewError;
use crate::github::locator::{RepositoryContext, RepositorySlug};

use super::error::LocalDiscoveryError;
use super::remote::{RemoteOrigin, parse_remote_url};

/// Reads the repository from a Git remote of the checkout containing `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRemoteContext {
    start: PathBuf,
    remote: String,
}

impl GitRemoteContext {
    /// Searches upward from `start` and reads the remote called `remote`.
    #[must_use]
    pub fn new(start: impl Into<PathBuf>, remote: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            remote: remote.into(),
        }
    }

    /// Name of the remote consulted.
    #[must_use]
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Locates the checkout and parses its remote.
    ///
    /// # Errors
    ///
    /// Returns [`LocalDiscoveryError`] when `start` is outside a repository,
    /// the repository has no such remote, or its URL names no `owner/repo`.
    pub fn discover(&self) -> Result<RemoteOrigin, LocalDiscoveryError> {
        let repo = open_repository(&self.start)?;
        let origin = remote_origin(&repo, &self.remote)?;
        tracing::debug!(
            remote = %self.remote,
            host = origin.host(),
            repository = %origin.slug(),
            "resolved ambient repository"
        );
        Ok(origin)
    }
}

impl RepositoryContext for GitRemoteContext {
    fn current_repository(&self) -> Result<RepositorySlug, ReviewError> {
        Ok(self.discover()?.into_slug())
    }
}

fn open_repository(start: &Path) -> Result<Repository, LocalDiscoveryError> {
    Repository::discover(start).map_err(|error| {
        if error.code() == git2::ErrorCode::NotFound {
            LocalDiscoveryError::NotARepository
        } else {
            LocalDiscoveryError::from(error)
        }
    })
}

fn remote_origin(repo: &Repository, name: &str) -> Result<RemoteOrigin, LocalDiscoveryError> {
    if repo.remotes()?.is_empty() {
        return Err(LocalDiscoveryError::NoRemotes);
    }

    let remote = repo.find_remote(name).map_err(|error| {
        if error.code() == git2::ErrorCode::NotFound {
            LocalDiscoveryError::RemoteNotFound {
                name: name.to_owned(),
            }
        } else {
            LocalDiscoveryError::from(error)
        }
    })?;

    let url = remote
        .url()
        .ok_or_else(|| LocalDiscoveryError::InvalidRemoteUrl {
            url: "(no URL)".to_owned(),
        })?;
    parse_remote_url(url)
}
