//! Error types for local repository discovery.

use thiserror::Error;

use crate::github::error::ReviewError;

/// Errors that may occur while reading the ambient repository.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocalDiscoveryError {
    /// The directory is not within a Git repository.
    #[error("not inside a Git repository")]
    NotARepository,

    /// The repository has no remotes configured.
    #[error("repository has no remotes configured")]
    NoRemotes,

    /// The configured remote does not exist.
    #[error("remote '{name}' not found")]
    RemoteNotFound {
        /// Name of the missing remote.
        name: String,
    },

    /// The remote URL does not name an `owner/repo` pair.
    #[error("could not parse remote URL: {url}")]
    InvalidRemoteUrl {
        /// The unparseable URL string.
        url: String,
    },

    /// Git operation failed.
    #[error("git error: {message}")]
    Git {
        /// Error detail from the git2 library.
        message: String,
    },
}

impl From<git2::Error> for LocalDiscoveryError {
    fn from(error: git2::Error) -> Self {
        Self::Git {
            message: error.message().to_owned(),
        }
    }
}

impl From<LocalDiscoveryError> for ReviewError {
    fn from(error: LocalDiscoveryError) -> Self {
        Self::RepositoryResolution {
            message: error.to_string(),
        }
    }
}
