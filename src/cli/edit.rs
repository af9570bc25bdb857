//! `edit`: replace a review comment's body.

use clap::Args;
use gh_review::github::GraphQlTransport;
use gh_review::{ReviewClient, ReviewError, ReviewResult};

use super::Outcome;

/// Flags for `edit`.
#[derive(Debug, Clone, Args)]
pub struct EditArgs {
    /// Pull request number or URL.
    #[arg(value_name = "PR")]
    pub pr: String,

    /// Comment node ID (`PRRC_...`).
    #[arg(short = 'c', long, required = true)]
    pub comment: String,

    /// New comment body.
    #[arg(short = 'b', long, required = true)]
    pub body: String,
}

/// `edit` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    /// Comment to update.
    pub comment_id: String,
    /// Replacement body.
    pub body: String,
}

impl From<&EditArgs> for EditRequest {
    fn from(args: &EditArgs) -> Self {
        Self {
            comment_id: args.comment.clone(),
            body: args.body.clone(),
        }
    }
}

/// Updates the comment body.
///
/// # Errors
///
/// Returns validation failures for a malformed ID or blank body, and
/// propagates request failures.
pub async fn run<T: GraphQlTransport>(
    client: &ReviewClient<T>,
    request: &EditRequest,
) -> Result<Outcome, ReviewError> {
    client
        .update_comment(&request.comment_id, &request.body)
        .await?;
    Ok(Outcome::complete(ReviewResult::Edited {
        comment_id: request.comment_id.clone(),
    }))
}
