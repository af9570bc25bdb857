//! Data models for pending reviews, review comments, and review threads.
//!
//! Types in [`api`] mirror the nullable shapes GraphQL returns and are
//! converted into the domain types below exactly once, straight after
//! decoding. Nothing downstream re-derives a fallback.

pub(crate) mod api;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Canonical comment state used for filtering and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentState {
    /// Draft comment on a review that has not been submitted.
    Pending,
    /// Comment on an approving review.
    Approved,
    /// Comment on a review requesting changes.
    ChangesRequested,
    /// Comment on a comment-only review.
    Commented,
    /// Top-level pull request conversation comment.
    Discussion,
    /// Comment on a thread that has not been resolved.
    Unresolved,
    /// Any other submitted review state.
    Submitted,
}

impl CommentState {
    /// Maps a GraphQL `PullRequestReviewState` case-insensitively.
    ///
    /// Anything outside the four known review states, including the empty
    /// string, becomes [`CommentState::Submitted`].
    #[must_use]
    pub fn from_review_state(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "changes_requested" => Self::ChangesRequested,
            "commented" => Self::Commented,
            _ => Self::Submitted,
        }
    }

    /// Parses a canonical state name, ignoring case and surrounding space.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "changes_requested" => Some(Self::ChangesRequested),
            "commented" => Some(Self::Commented),
            "discussion" => Some(Self::Discussion),
            "unresolved" => Some(Self::Unresolved),
            "submitted" => Some(Self::Submitted),
            _ => None,
        }
    }

    /// Returns the lowercase canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::ChangesRequested => "changes_requested",
            Self::Commented => "commented",
            Self::Discussion => "discussion",
            Self::Unresolved => "unresolved",
            Self::Submitted => "submitted",
        }
    }

    /// Returns the GraphQL enum name for review-backed states.
    ///
    /// States with no `PullRequestReviewState` counterpart return `None`.
    #[must_use]
    pub const fn review_state_name(self) -> Option<&'static str> {
        match self {
            Self::Pending => Some("PENDING"),
            Self::Approved => Some("APPROVED"),
            Self::ChangesRequested => Some("CHANGES_REQUESTED"),
            Self::Commented => Some("COMMENTED"),
            Self::Discussion | Self::Unresolved | Self::Submitted => None,
        }
    }
}

impl fmt::Display for CommentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node identifiers needed to open a new review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestIdentity {
    /// Pull request node ID.
    pub node_id: String,
    /// Head commit object ID.
    pub head_commit: String,
}

/// Inline review comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewComment {
    /// Comment node ID (`PRRC_...`).
    pub id: String,
    /// File path the comment is attached to.
    pub path: String,
    /// Live line, else original line, else 0.
    pub line: u32,
    /// First line of a multi-line comment.
    pub start_line: Option<u32>,
    /// Diff side (`LEFT` or `RIGHT`) of `line`.
    pub side: Option<String>,
    /// Diff side of `start_line`.
    pub start_side: Option<String>,
    /// Comment body.
    pub body: String,
    /// Whether the diff position is stale.
    pub outdated: bool,
    /// Author login; empty when GitHub returned none.
    pub author: String,
}

/// A review that has not been submitted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReview {
    /// Review node ID (`PRR_...`).
    pub id: String,
    /// Uppercase review state.
    pub state: String,
    /// Web URL of the review.
    pub url: String,
    /// Last update; `None` when GitHub sent an unparsable timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Reviewer login.
    pub author: String,
    /// Draft comments.
    pub comments: Vec<ReviewComment>,
    /// Number of comments on the review as reported by GitHub.
    pub total_count: u32,
}

/// A review comment tagged with its parent review's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatefulReviewComment {
    /// The comment itself.
    pub comment: ReviewComment,
    /// Normalized state of the parent review.
    pub state: CommentState,
}

/// Top-level pull request conversation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionComment {
    /// Comment node ID.
    pub id: String,
    /// Comment body.
    pub body: String,
    /// Author login.
    pub author: String,
    /// Creation time, when parsable.
    pub created_at: Option<DateTime<Utc>>,
}

/// Every comment on a pull request, review-attached and conversational.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllComments {
    /// Comments attached to reviews.
    pub review_comments: Vec<StatefulReviewComment>,
    /// Conversation comments.
    pub discussion_comments: Vec<DiscussionComment>,
    /// True when either connection holds more entries than were fetched.
    pub truncated: bool,
}

/// One comment inside a review thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadComment {
    /// Comment node ID.
    pub id: String,
    /// Comment body.
    pub body: String,
    /// Author login.
    pub author: String,
}

/// Comments anchored to one file location with a single resolution flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewThread {
    /// Thread node ID.
    pub id: String,
    /// File path.
    pub path: String,
    /// Live line, else original line, else 0.
    pub line: u32,
    /// Whether the thread has been resolved.
    pub is_resolved: bool,
    /// State of the first comment's review; `None` for an empty thread.
    pub state: Option<CommentState>,
    /// Comments in thread order.
    pub comments: Vec<ThreadComment>,
}

/// A page of review threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewThreads {
    /// Threads that passed the query filters.
    pub threads: Vec<ReviewThread>,
    /// True when GitHub holds more threads than were fetched.
    pub truncated: bool,
}

/// A freshly created review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedReview {
    /// Review node ID.
    pub id: String,
    /// Review state as returned by GitHub.
    pub state: String,
}

/// A freshly added review thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedThread {
    /// Thread node ID.
    pub id: String,
    /// File path.
    pub path: String,
    /// Line, or 0 when GitHub returned none.
    pub line: u32,
    /// Whether the new thread is already outdated.
    pub outdated: bool,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::CommentState;

    #[rstest]
    #[case("PENDING", CommentState::Pending)]
    #[case("APPROVED", CommentState::Approved)]
    #[case("approved", CommentState::Approved)]
    #[case("Changes_Requested", CommentState::ChangesRequested)]
    #[case("CHANGES_REQUESTED", CommentState::ChangesRequested)]
    #[case("commented", CommentState::Commented)]
    #[case("DISMISSED", CommentState::Submitted)]
    #[case("", CommentState::Submitted)]
    fn from_review_state_normalizes(#[case] raw: &str, #[case] expected: CommentState) {
        assert_eq!(CommentState::from_review_state(raw), expected);
    }

    #[rstest]
    fn serializes_as_snake_case() {
        let value = serde_json::to_value(CommentState::ChangesRequested)
            .expect("state should serialize");

        assert_eq!(value, serde_json::json!("changes_requested"));
    }

    #[rstest]
    #[case(CommentState::Pending, Some("PENDING"))]
    #[case(CommentState::ChangesRequested, Some("CHANGES_REQUESTED"))]
    #[case(CommentState::Discussion, None)]
    #[case(CommentState::Unresolved, None)]
    #[case(CommentState::Submitted, None)]
    fn review_state_name_covers_review_states(
        #[case] state: CommentState,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(state.review_state_name(), expected);
    }
}
