//! `discard`: delete a pending review with its draft comments.

use clap::Args;
use gh_review::github::GraphQlTransport;
use gh_review::{PullRequestReference, ReviewClient, ReviewError, ReviewResult};

use super::{Outcome, review_id_or_latest};

/// Flags for `discard`.
#[derive(Debug, Clone, Args)]
pub struct DiscardArgs {
    /// Pull request number or URL.
    #[arg(value_name = "PR")]
    pub pr: String,

    /// Pending review to discard; defaults to your latest.
    #[arg(long)]
    pub review_id: Option<String>,
}

/// `discard` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscardRequest {
    /// Explicit pending review.
    pub review_id: Option<String>,
}

impl From<&DiscardArgs> for DiscardRequest {
    fn from(args: &DiscardArgs) -> Self {
        Self {
            review_id: args.review_id.clone(),
        }
    }
}

/// Deletes the chosen pending review.
///
/// # Errors
///
/// Returns [`ReviewError::NotFound`] when no review is given and none is
/// pending, and propagates request failures.
pub async fn run<T: GraphQlTransport>(
    client: &ReviewClient<T>,
    pr: &PullRequestReference,
    request: &DiscardRequest,
) -> Result<Outcome, ReviewError> {
    let review_id = review_id_or_latest(client, pr, request.review_id.as_deref()).await?;
    client.delete_review(&review_id).await?;
    Ok(Outcome::complete(ReviewResult::Discarded { review_id }))
}
