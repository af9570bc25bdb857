//! Typed GraphQL operations for pending reviews, comments, and threads.
//!
//! [`ReviewClient`] owns request construction and response normalization.
//! The network hop sits behind [`GraphQlTransport`] so operations can be
//! exercised against mocks; [`OctocrabTransport`] is the real implementation.

mod client;
mod error_mapping;
mod mutations;
mod queries;
mod transport;
mod validation;

pub use mutations::{AddThreadInput, CreateReviewInput, SubmitReviewInput};
pub use queries::{AllCommentsOptions, PendingReviewsOptions, ReviewThreadsOptions};
pub use transport::OctocrabTransport;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::github::error::ReviewError;

/// Executes one GraphQL document and returns its `data` member.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    /// Sends `document` with `variables`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Authentication`] when GitHub rejects the token
    /// and [`ReviewError::Transport`] for any other failure, including
    /// GraphQL-level `errors`.
    async fn execute(&self, document: &str, variables: Value) -> Result<Value, ReviewError>;
}

/// Client issuing review operations over a [`GraphQlTransport`].
pub struct ReviewClient<T> {
    transport: T,
}

impl<T: GraphQlTransport> ReviewClient<T> {
    /// Wraps a transport.
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Runs a document and decodes `data`, prefixing failures with
    /// `operation`.
    async fn run<R: DeserializeOwned>(
        &self,
        operation: &str,
        document: &str,
        variables: Value,
    ) -> Result<R, ReviewError> {
        tracing::debug!(operation, "sending GraphQL request");
        let data = self
            .transport
            .execute(document, variables)
            .await
            .map_err(|error| error.context(operation))?;
        serde_json::from_value(data).map_err(|error| ReviewError::Transport {
            message: format!("{operation}: unexpected response shape: {error}"),
        })
    }
}

#[cfg(test)]
mod tests;
