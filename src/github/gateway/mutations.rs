//! GraphQL mutations for reviews and review comments.
//!
//! Every operation validates its inputs before touching the transport, so a
//! malformed identifier or empty body never costs a round trip.

use serde::de::IgnoredAny;
use serde_json::{Map, Value, json};

use crate::github::error::ReviewError;
use crate::github::models::api::{ApiAddReviewData, ApiAddThreadData};
use crate::github::models::{AddedThread, CreatedReview};

use super::validation::{NodeKind, node_id, required};
use super::{GraphQlTransport, ReviewClient};

const DEFAULT_SIDE: &str = "RIGHT";

const CREATE_REVIEW: &str = r"mutation CreateReview($input: AddPullRequestReviewInput!) {
  addPullRequestReview(input: $input) {
    pullRequestReview { id state }
  }
}";

const ADD_THREAD: &str = r"mutation AddThread($input: AddPullRequestReviewThreadInput!) {
  addPullRequestReviewThread(input: $input) {
    thread { id path line isOutdated }
  }
}";

const UPDATE_COMMENT: &str = r"mutation UpdateComment($input: UpdatePullRequestReviewCommentInput!) {
  updatePullRequestReviewComment(input: $input) {
    pullRequestReviewComment { id }
  }
}";

const DELETE_COMMENT: &str = r"mutation DeleteComment($input: DeletePullRequestReviewCommentInput!) {
  deletePullRequestReviewComment(input: $input) {
    clientMutationId
  }
}";

const SUBMIT_REVIEW: &str = r"mutation SubmitReview($input: SubmitPullRequestReviewInput!) {
  submitPullRequestReview(input: $input) {
    pullRequestReview { id state }
  }
}";

const DELETE_REVIEW: &str = r"mutation DeleteReview($input: DeletePullRequestReviewInput!) {
  deletePullRequestReview(input: $input) {
    clientMutationId
  }
}";

/// Input for [`ReviewClient::create_review`].
#[derive(Debug, Clone, Default)]
pub struct CreateReviewInput {
    /// Pull request node ID.
    pub pull_request_id: String,
    /// Commit to anchor the review to; omitted when blank.
    pub commit_oid: Option<String>,
}

/// Input for [`ReviewClient::add_thread`].
#[derive(Debug, Clone, Default)]
pub struct AddThreadInput {
    /// Pending review node ID (`PRR_...`).
    pub review_id: String,
    /// File path relative to the repository root.
    pub path: String,
    /// Last line of the commented range.
    pub line: u32,
    /// Diff side; defaults to `RIGHT`.
    pub side: Option<String>,
    /// Comment body.
    pub body: String,
    /// First line of a multi-line range.
    pub start_line: Option<u32>,
    /// Diff side of `start_line`.
    pub start_side: Option<String>,
}

/// Input for [`ReviewClient::submit_review`].
#[derive(Debug, Clone, Default)]
pub struct SubmitReviewInput {
    /// Pending review node ID (`PRR_...`).
    pub review_id: String,
    /// `APPROVE`, `COMMENT`, or `REQUEST_CHANGES`.
    pub event: String,
    /// Optional summary; omitted when blank.
    pub body: Option<String>,
}

fn input_variables(input: Map<String, Value>) -> Value {
    json!({ "input": input })
}

impl<T: GraphQlTransport> ReviewClient<T> {
    /// Opens a new pending review.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Validation`] when the pull request ID is blank
    /// and [`ReviewError::NotFound`] when GitHub returns no review ID.
    pub async fn create_review(
        &self,
        input: &CreateReviewInput,
    ) -> Result<CreatedReview, ReviewError> {
        let pull_request_id = required(&input.pull_request_id, "PR node ID")?;

        let mut fields = Map::new();
        fields.insert("pullRequestId".to_owned(), json!(pull_request_id));
        if let Some(commit) = input
            .commit_oid
            .as_deref()
            .map(str::trim)
            .filter(|commit| !commit.is_empty())
        {
            fields.insert("commitOID".to_owned(), json!(commit));
        }

        let data: ApiAddReviewData = self
            .run("create review", CREATE_REVIEW, input_variables(fields))
            .await?;
        data.add_pull_request_review
            .and_then(|payload| payload.pull_request_review)
            .and_then(|review| review.into_created())
            .ok_or_else(|| ReviewError::NotFound {
                message: "create review returned empty ID".to_owned(),
            })
    }

    /// Adds an inline comment thread to a pending review.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Validation`] for a missing or malformed review
    /// ID, a blank path or body, or a zero line.
    pub async fn add_thread(&self, input: &AddThreadInput) -> Result<AddedThread, ReviewError> {
        let review_id = node_id(&input.review_id, NodeKind::Review)?;
        let path = required(&input.path, "path")?;
        if input.line == 0 {
            return Err(ReviewError::Validation {
                message: "line must be positive".to_owned(),
            });
        }
        let body = required(&input.body, "body")?;
        let side = input
            .side
            .as_deref()
            .map(str::trim)
            .filter(|side| !side.is_empty())
            .map_or_else(|| DEFAULT_SIDE.to_owned(), str::to_uppercase);

        let mut fields = Map::new();
        fields.insert("pullRequestReviewId".to_owned(), json!(review_id));
        fields.insert("path".to_owned(), json!(path));
        fields.insert("line".to_owned(), json!(input.line));
        fields.insert("side".to_owned(), json!(side));
        fields.insert("body".to_owned(), json!(body));
        if let Some(start_line) = input.start_line {
            fields.insert("startLine".to_owned(), json!(start_line));
        }
        if let Some(start_side) = &input.start_side {
            fields.insert(
                "startSide".to_owned(),
                json!(start_side.trim().to_uppercase()),
            );
        }

        let data: ApiAddThreadData = self
            .run("add thread", ADD_THREAD, input_variables(fields))
            .await?;
        data.add_pull_request_review_thread
            .and_then(|payload| payload.thread)
            .and_then(|thread| thread.into_added())
            .ok_or_else(|| ReviewError::NotFound {
                message: "add thread returned empty ID".to_owned(),
            })
    }

    /// Replaces the body of a review comment.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Validation`] for a missing or malformed comment
    /// ID or a blank body.
    pub async fn update_comment(&self, comment_id: &str, body: &str) -> Result<(), ReviewError> {
        let id = node_id(comment_id, NodeKind::Comment)?;
        let trimmed_body = required(body, "body")?;

        let mut fields = Map::new();
        fields.insert("pullRequestReviewCommentId".to_owned(), json!(id));
        fields.insert("body".to_owned(), json!(trimmed_body));

        let _: IgnoredAny = self
            .run("update comment", UPDATE_COMMENT, input_variables(fields))
            .await?;
        Ok(())
    }

    /// Deletes a review comment.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Validation`] for a missing or malformed comment
    /// ID.
    pub async fn delete_comment(&self, comment_id: &str) -> Result<(), ReviewError> {
        let id = node_id(comment_id, NodeKind::Comment)?;

        let mut fields = Map::new();
        fields.insert("id".to_owned(), json!(id));

        let _: IgnoredAny = self
            .run("delete comment", DELETE_COMMENT, input_variables(fields))
            .await?;
        Ok(())
    }

    /// Submits a pending review with a verdict.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Validation`] for a missing or malformed review
    /// ID or a blank event.
    pub async fn submit_review(&self, input: &SubmitReviewInput) -> Result<(), ReviewError> {
        let review_id = node_id(&input.review_id, NodeKind::Review)?;
        let event = required(&input.event, "event")?.to_uppercase();

        let mut fields = Map::new();
        fields.insert("pullRequestReviewId".to_owned(), json!(review_id));
        fields.insert("event".to_owned(), json!(event));
        if let Some(body) = input
            .body
            .as_deref()
            .map(str::trim)
            .filter(|body| !body.is_empty())
        {
            fields.insert("body".to_owned(), json!(body));
        }

        let _: IgnoredAny = self
            .run("submit review", SUBMIT_REVIEW, input_variables(fields))
            .await?;
        Ok(())
    }

    /// Deletes a pending review and its draft comments.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Validation`] for a missing or malformed review
    /// ID.
    pub async fn delete_review(&self, review_id: &str) -> Result<(), ReviewError> {
        let id = node_id(review_id, NodeKind::Review)?;

        let mut fields = Map::new();
        fields.insert("pullRequestReviewId".to_owned(), json!(id));

        let _: IgnoredAny = self
            .run("delete review", DELETE_REVIEW, input_variables(fields))
            .await?;
        Ok(())
    }
}
