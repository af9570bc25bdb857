//! Error types exposed by the review layer.

use thiserror::Error;

/// Errors surfaced while parsing input, validating requests, or talking to
/// GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// The pull request argument could not be parsed.
    #[error("{message}")]
    InvalidReference {
        /// Why the argument was rejected.
        message: String,
    },

    /// No repository could be determined for the pull request.
    #[error("{message}")]
    RepositoryResolution {
        /// Details about the missing or malformed repository.
        message: String,
    },

    /// A required field was missing or malformed before any request was sent.
    #[error("{message}")]
    Validation {
        /// The rejected field and reason.
        message: String,
    },

    /// GitHub returned no entity, or returned one with empty metadata.
    #[error("{message}")]
    NotFound {
        /// Which entity was missing.
        message: String,
    },

    /// No authentication token could be found.
    #[error("GitHub token is required (set GH_TOKEN, GITHUB_TOKEN, or run `gh auth login`)")]
    MissingToken,

    /// GitHub rejected the credentials or the viewer could not be determined.
    #[error("{message}")]
    Authentication {
        /// Detail returned by GitHub.
        message: String,
    },

    /// The underlying request failed.
    #[error("{message}")]
    Transport {
        /// Operation-prefixed failure detail.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The requested output format is not known.
    #[error("unsupported output format: {format} (use table, plain, or json)")]
    UnsupportedFormat {
        /// The rejected format name.
        format: String,
    },

    /// Writing output failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl ReviewError {
    /// Prefixes the error message with an operation name, keeping the variant.
    ///
    /// Variants without a free-form message are returned unchanged.
    #[must_use]
    pub fn context(self, operation: &str) -> Self {
        match self {
            Self::InvalidReference { message } => Self::InvalidReference {
                message: format!("{operation}: {message}"),
            },
            Self::RepositoryResolution { message } => Self::RepositoryResolution {
                message: format!("{operation}: {message}"),
            },
            Self::Validation { message } => Self::Validation {
                message: format!("{operation}: {message}"),
            },
            Self::NotFound { message } => Self::NotFound {
                message: format!("{operation}: {message}"),
            },
            Self::Authentication { message } => Self::Authentication {
                message: format!("{operation}: {message}"),
            },
            Self::Transport { message } => Self::Transport {
                message: format!("{operation}: {message}"),
            },
            Self::Configuration { message } => Self::Configuration {
                message: format!("{operation}: {message}"),
            },
            Self::Io { message } => Self::Io {
                message: format!("{operation}: {message}"),
            },
            other @ (Self::MissingToken | Self::UnsupportedFormat { .. }) => other,
        }
    }
}
