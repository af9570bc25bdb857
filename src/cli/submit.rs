//! `submit`: submit a pending review with a verdict.

use std::fmt;
use std::str::FromStr;

use clap::Args;
use gh_review::github::{GraphQlTransport, SubmitReviewInput};
use gh_review::{PullRequestReference, ReviewClient, ReviewError, ReviewResult};

use super::{Outcome, review_id_or_latest};

/// Flags for `submit`.
#[derive(Debug, Clone, Args)]
pub struct SubmitArgs {
    /// Pull request number or URL.
    #[arg(value_name = "PR")]
    pub pr: String,

    /// approve, comment, or request_changes.
    #[arg(short = 'v', long, required = true)]
    pub verdict: String,

    /// Review summary.
    #[arg(short = 'b', long)]
    pub body: Option<String>,

    /// Pending review to submit; defaults to your latest.
    #[arg(long)]
    pub review_id: Option<String>,
}

/// Review outcome sent as the submission event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// `APPROVE`.
    Approve,
    /// `COMMENT`.
    Comment,
    /// `REQUEST_CHANGES`.
    RequestChanges,
}

impl Verdict {
    /// GraphQL `PullRequestReviewEvent` name.
    #[must_use]
    pub const fn event(self) -> &'static str {
        match self {
            Self::Approve => "APPROVE",
            Self::Comment => "COMMENT",
            Self::RequestChanges => "REQUEST_CHANGES",
        }
    }
}

impl FromStr for Verdict {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "APPROVE" => Ok(Self::Approve),
            "COMMENT" => Ok(Self::Comment),
            "REQUEST_CHANGES" => Ok(Self::RequestChanges),
            _ => Err(ReviewError::Validation {
                message: format!(
                    "invalid verdict {s:?}: use approve, comment, or request_changes"
                ),
            }),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.event().to_lowercase())
    }
}

/// Validated `submit` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    /// Parsed verdict.
    pub verdict: Verdict,
    /// Optional summary.
    pub body: Option<String>,
    /// Explicit pending review.
    pub review_id: Option<String>,
}

impl TryFrom<&SubmitArgs> for SubmitRequest {
    type Error = ReviewError;

    fn try_from(args: &SubmitArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            verdict: args.verdict.parse()?,
            body: args.body.clone(),
            review_id: args.review_id.clone(),
        })
    }
}

/// Submits the chosen pending review.
///
/// # Errors
///
/// Returns [`ReviewError::NotFound`] when no review is given and none is
/// pending, and propagates request failures.
pub async fn run<T: GraphQlTransport>(
    client: &ReviewClient<T>,
    pr: &PullRequestReference,
    request: &SubmitRequest,
) -> Result<Outcome, ReviewError> {
    let review_id = review_id_or_latest(client, pr, request.review_id.as_deref()).await?;
    client
        .submit_review(&SubmitReviewInput {
            review_id,
            event: request.verdict.event().to_owned(),
            body: request.body.clone(),
        })
        .await?;
    Ok(Outcome::complete(ReviewResult::Submitted {
        verdict: request.verdict.to_string(),
    }))
}
