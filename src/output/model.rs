//! Render-ready result records.
//!
//! Every command produces exactly one [`ReviewResult`]. The records carry
//! only what the renderers need and are independent of how the data was
//! fetched.

use crate::github::{
    CommentState, DiscussionComment, ReviewThread, StatefulReviewComment, ThreadComment,
};

/// A comment in the uniform shape all renderers consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Node identifier.
    pub id: String,
    /// File path; empty for discussion-level comments.
    pub path: String,
    /// Line number; zero when unknown.
    pub line: u32,
    /// Comment body.
    pub body: String,
    /// Review or listing state.
    pub state: CommentState,
    /// Author login.
    pub author: String,
}

impl Comment {
    /// Wraps a pull request discussion comment, which has no file location.
    #[must_use]
    pub fn discussion(comment: DiscussionComment) -> Self {
        Self {
            id: comment.id,
            path: String::new(),
            line: 0,
            body: comment.body,
            state: CommentState::Discussion,
            author: comment.author,
        }
    }

    /// Flattens one comment of an unresolved thread, taking the thread's
    /// location.
    #[must_use]
    pub fn unresolved(thread: &ReviewThread, comment: ThreadComment) -> Self {
        Self {
            id: comment.id,
            path: thread.path.clone(),
            line: thread.line,
            body: comment.body,
            state: CommentState::Unresolved,
            author: comment.author,
        }
    }

    /// Location as `path:line`, `path`, or `None` for global comments.
    #[must_use]
    pub fn location(&self) -> Option<String> {
        location(&self.path, self.line)
    }
}

impl From<StatefulReviewComment> for Comment {
    fn from(value: StatefulReviewComment) -> Self {
        let StatefulReviewComment { comment, state } = value;
        Self {
            id: comment.id,
            path: comment.path,
            line: comment.line,
            body: comment.body,
            state,
            author: comment.author,
        }
    }
}

/// Comments sharing an author, or the single unlabelled group of flat mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
    /// Group label; `None` renders the author per comment instead.
    pub author: Option<String>,
    /// Comments in display order.
    pub comments: Vec<Comment>,
}

/// Output of `comments`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentsResult {
    /// Pull request as `owner/repo#N`.
    pub pr: String,
    /// Groups in display order.
    pub groups: Vec<CommentGroup>,
    /// Whether node identifiers are shown.
    pub include_ids: bool,
}

/// One comment inside a rendered thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewComment {
    /// Node identifier.
    pub id: String,
    /// Author login.
    pub author: String,
    /// Comment body.
    pub body: String,
}

/// A review thread as shown by `view`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewThread {
    /// Thread node identifier.
    pub id: String,
    /// File path.
    pub path: String,
    /// Line number; zero when unknown.
    pub line: u32,
    /// Resolution flag.
    pub resolved: bool,
    /// Comments in thread order.
    pub comments: Vec<ViewComment>,
}

impl ViewThread {
    /// Location as `path:line` or `path`.
    #[must_use]
    pub fn location(&self) -> String {
        location(&self.path, self.line).unwrap_or_default()
    }

    /// `resolved` or `unresolved`.
    #[must_use]
    pub const fn status(&self) -> &'static str {
        if self.resolved { "resolved" } else { "unresolved" }
    }
}

impl From<ReviewThread> for ViewThread {
    fn from(thread: ReviewThread) -> Self {
        Self {
            id: thread.id,
            path: thread.path,
            line: thread.line,
            resolved: thread.is_resolved,
            comments: thread
                .comments
                .into_iter()
                .map(|comment| ViewComment {
                    id: comment.id,
                    author: comment.author,
                    body: comment.body,
                })
                .collect(),
        }
    }
}

/// Output of `view`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewResult {
    /// Pull request as `owner/repo#N`.
    pub pr: String,
    /// Threads in API order.
    pub threads: Vec<ViewThread>,
    /// Whether node identifiers are shown.
    pub include_ids: bool,
}

/// The closed set of command outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewResult {
    /// Listed comments.
    Comments(CommentsResult),
    /// Listed threads.
    View(ViewResult),
    /// A comment thread was added.
    Added {
        /// File path of the new comment.
        path: String,
        /// Line of the new comment.
        line: u32,
    },
    /// A comment body was replaced.
    Edited {
        /// Edited comment ID.
        comment_id: String,
    },
    /// A comment was deleted.
    Deleted {
        /// Deleted comment ID.
        comment_id: String,
    },
    /// A pending review was submitted.
    Submitted {
        /// Verdict name as typed by the user, lowercased.
        verdict: String,
    },
    /// A pending review was deleted.
    Discarded {
        /// Deleted review ID.
        review_id: String,
    },
    /// Nothing needed doing.
    NoOp {
        /// Explanation shown to the user.
        message: String,
    },
}

fn location(path: &str, line: u32) -> Option<String> {
    if path.is_empty() {
        None
    } else if line > 0 {
        Some(format!("{path}:{line}"))
    } else {
        Some(path.to_owned())
    }
}
