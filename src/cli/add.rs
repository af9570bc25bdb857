//! `add`: attach an inline comment to a pending review.

use clap::Args;
use gh_review::github::{
    AddThreadInput, CreateReviewInput, GraphQlTransport, PendingReviewsOptions,
};
use gh_review::{PullRequestReference, ReviewClient, ReviewError, ReviewResult, templates};

use super::Outcome;

/// Flags for `add`.
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Pull request number or URL.
    #[arg(value_name = "PR")]
    pub pr: String,

    /// File path relative to the repository root.
    #[arg(short = 'p', long, required = true)]
    pub path: String,

    /// Line to comment on (last line of a range).
    #[arg(short = 'l', long, required = true)]
    pub line: u32,

    /// Comment body.
    #[arg(short = 'b', long)]
    pub body: Option<String>,

    /// Use a canned body: naming, perf, security, or style.
    #[arg(short = 't', long)]
    pub template: Option<String>,

    /// Diff side: LEFT or RIGHT.
    #[arg(short = 's', long, default_value = "RIGHT")]
    pub side: String,

    /// First line of a multi-line comment.
    #[arg(long)]
    pub start_line: Option<u32>,

    /// Diff side of the first line.
    #[arg(long)]
    pub start_side: Option<String>,

    /// Pending review to add to; defaults to your latest.
    #[arg(long)]
    pub review_id: Option<String>,
}

/// Validated `add` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    /// File path.
    pub path: String,
    /// Target line.
    pub line: u32,
    /// Resolved comment body.
    pub body: String,
    /// Diff side.
    pub side: String,
    /// Range start, when positive.
    pub start_line: Option<u32>,
    /// Range start side, when non-blank.
    pub start_side: Option<String>,
    /// Explicit pending review.
    pub review_id: Option<String>,
}

impl TryFrom<&AddArgs> for AddRequest {
    type Error = ReviewError;

    fn try_from(args: &AddArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            path: args.path.clone(),
            line: args.line,
            body: resolve_body(args.body.as_deref(), args.template.as_deref())?,
            side: args.side.clone(),
            start_line: args.start_line.filter(|line| *line > 0),
            start_side: args
                .start_side
                .clone()
                .filter(|side| !side.trim().is_empty()),
            review_id: args.review_id.clone(),
        })
    }
}

/// A template replaces any `--body`.
fn resolve_body(body: Option<&str>, template: Option<&str>) -> Result<String, ReviewError> {
    if let Some(name) = template.filter(|name| !name.is_empty()) {
        return templates::get(name)
            .map(str::to_owned)
            .ok_or_else(|| ReviewError::Validation {
                message: format!(
                    "unknown template {name:?} (available: [{}])",
                    templates::names().join(" ")
                ),
            });
    }
    body.filter(|text| !text.trim().is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ReviewError::Validation {
            message: "body is required (use -b or -t)".to_owned(),
        })
}

/// Adds the comment, opening a review at the head commit when none is
/// pending.
///
/// # Errors
///
/// Propagates review lookup, creation, and thread failures.
pub async fn run<T: GraphQlTransport>(
    client: &ReviewClient<T>,
    pr: &PullRequestReference,
    request: &AddRequest,
) -> Result<Outcome, ReviewError> {
    let review_id = match request.review_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_owned(),
        _ => pending_or_new_review(client, pr).await?,
    };

    client
        .add_thread(&AddThreadInput {
            review_id,
            path: request.path.clone(),
            line: request.line,
            side: Some(request.side.clone()),
            body: request.body.clone(),
            start_line: request.start_line,
            start_side: request.start_side.clone(),
        })
        .await?;

    Ok(Outcome::complete(ReviewResult::Added {
        path: request.path.clone(),
        line: request.line,
    }))
}

async fn pending_or_new_review<T: GraphQlTransport>(
    client: &ReviewClient<T>,
    pr: &PullRequestReference,
) -> Result<String, ReviewError> {
    match client
        .latest_pending_review(pr, &PendingReviewsOptions::default())
        .await
    {
        Ok(review) => Ok(review.id),
        Err(ReviewError::NotFound { .. }) => {
            tracing::debug!(%pr, "no pending review, creating one");
            let identity = client.resolve_pr(pr).await?;
            let created = client
                .create_review(&CreateReviewInput {
                    pull_request_id: identity.node_id,
                    commit_oid: Some(identity.head_commit),
                })
                .await?;
            Ok(created.id)
        }
        Err(error) => Err(error),
    }
}
