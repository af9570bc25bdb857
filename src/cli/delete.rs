//! `delete`: remove a review comment.

use clap::Args;
use gh_review::github::GraphQlTransport;
use gh_review::{ReviewClient, ReviewError, ReviewResult};

use super::Outcome;

/// Flags for `delete`.
#[derive(Debug, Clone, Args)]
pub struct DeleteArgs {
    /// Pull request number or URL.
    #[arg(value_name = "PR")]
    pub pr: String,

    /// Comment node ID (`PRRC_...`).
    #[arg(short = 'c', long, required = true)]
    pub comment: String,
}

/// `delete` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    /// Comment to delete.
    pub comment_id: String,
}

impl From<&DeleteArgs> for DeleteRequest {
    fn from(args: &DeleteArgs) -> Self {
        Self {
            comment_id: args.comment.clone(),
        }
    }
}

/// Deletes the comment.
///
/// # Errors
///
/// Returns validation failures for a malformed ID and propagates request
/// failures.
pub async fn run<T: GraphQlTransport>(
    client: &ReviewClient<T>,
    request: &DeleteRequest,
) -> Result<Outcome, ReviewError> {
    client.delete_comment(&request.comment_id).await?;
    Ok(Outcome::complete(ReviewResult::Deleted {
        comment_id: request.comment_id.clone(),
    }))
}
