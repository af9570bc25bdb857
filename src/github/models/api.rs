//! GraphQL decode targets.
//!
//! Every field is optional because GraphQL nullability is pervasive; the
//! conversions here apply trimming and fallbacks once.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{
    AddedThread, CommentState, CreatedReview, DiscussionComment, PendingReview,
    PullRequestIdentity, ReviewComment, ReviewThread, StatefulReviewComment, ThreadComment,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiRepositoryData<P> {
    pub(crate) repository: Option<ApiRepository<P>>,
}

impl<P> ApiRepositoryData<P> {
    pub(crate) fn into_pull_request(self) -> Option<P> {
        self.repository.and_then(|repository| repository.pull_request)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiRepository<P> {
    pub(crate) pull_request: Option<P>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiConnection<T> {
    pub(crate) total_count: Option<u32>,
    pub(crate) nodes: Option<Vec<Option<T>>>,
}

impl<T> ApiConnection<T> {
    pub(crate) fn total(&self) -> u32 {
        self.total_count.unwrap_or(0)
    }

    pub(crate) fn into_nodes(self) -> impl Iterator<Item = T> {
        self.nodes.into_iter().flatten().flatten()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiActor {
    pub(crate) login: Option<String>,
}

fn login_of(actor: Option<ApiActor>) -> String {
    actor
        .and_then(|actor| actor.login)
        .map(|login| login.trim().to_owned())
        .unwrap_or_default()
}

fn trimmed_id(id: Option<String>) -> Option<String> {
    id.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Prefers the live line, then the original line, then 0.
pub(crate) fn resolve_line(line: Option<u32>, original_line: Option<u32>) -> u32 {
    line.or(original_line).unwrap_or(0)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiPullRequestIdentity {
    pub(crate) id: Option<String>,
    pub(crate) head_ref_oid: Option<String>,
}

impl ApiPullRequestIdentity {
    /// Returns `None` when either identifier is blank.
    pub(crate) fn into_identity(self) -> Option<PullRequestIdentity> {
        Some(PullRequestIdentity {
            node_id: trimmed_id(self.id)?,
            head_commit: trimmed_id(self.head_ref_oid)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiViewerData {
    pub(crate) viewer: Option<ApiActor>,
}

impl ApiViewerData {
    pub(crate) fn into_login(self) -> Option<String> {
        Some(login_of(self.viewer)).filter(|login| !login.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiReviewComment {
    pub(crate) id: Option<String>,
    pub(crate) path: Option<String>,
    pub(crate) line: Option<u32>,
    pub(crate) start_line: Option<u32>,
    pub(crate) side: Option<String>,
    pub(crate) start_side: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) outdated: Option<bool>,
    pub(crate) original_line: Option<u32>,
    pub(crate) author: Option<ApiActor>,
}

impl ApiReviewComment {
    /// Converts the node, falling back to `review_author` when the comment
    /// carries no author of its own.
    pub(crate) fn into_comment(self, review_author: &str) -> Option<ReviewComment> {
        let id = trimmed_id(self.id)?;
        let own_author = login_of(self.author);
        let author = if own_author.is_empty() {
            review_author.to_owned()
        } else {
            own_author
        };
        Some(ReviewComment {
            id,
            path: self.path.unwrap_or_default(),
            line: resolve_line(self.line, self.original_line),
            start_line: self.start_line,
            side: self.side.filter(|side| !side.is_empty()),
            start_side: self.start_side.filter(|side| !side.is_empty()),
            body: self.body.unwrap_or_default(),
            outdated: self.outdated.unwrap_or(false),
            author,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiReview {
    pub(crate) id: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) updated_at: Option<String>,
    pub(crate) author: Option<ApiActor>,
    pub(crate) comments: Option<ApiConnection<ApiReviewComment>>,
}

impl ApiReview {
    pub(crate) fn into_pending_review(self) -> Option<PendingReview> {
        let id = trimmed_id(self.id)?;
        let author = login_of(self.author);
        let (comments, total_count) = match self.comments {
            Some(connection) => {
                let total = connection.total();
                let comments = connection
                    .into_nodes()
                    .filter_map(|node| node.into_comment(""))
                    .collect();
                (comments, total)
            }
            None => (Vec::new(), 0),
        };
        Some(PendingReview {
            id,
            state: self.state.unwrap_or_default().to_uppercase(),
            url: self.url.unwrap_or_default(),
            updated_at: parse_timestamp(self.updated_at.as_deref()),
            author,
            comments,
            total_count,
        })
    }

    /// Flattens the review into comments tagged with its normalized state.
    pub(crate) fn into_stateful_comments(self) -> Vec<StatefulReviewComment> {
        let state = CommentState::from_review_state(self.state.as_deref().unwrap_or_default());
        let review_author = login_of(self.author);
        self.comments
            .into_iter()
            .flat_map(ApiConnection::into_nodes)
            .filter_map(|node| node.into_comment(&review_author))
            .map(|comment| StatefulReviewComment { comment, state })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPendingReviewsPullRequest {
    pub(crate) reviews: Option<ApiConnection<ApiReview>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiDiscussionComment {
    pub(crate) id: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) author: Option<ApiActor>,
    pub(crate) created_at: Option<String>,
}

impl ApiDiscussionComment {
    pub(crate) fn into_comment(self) -> Option<DiscussionComment> {
        Some(DiscussionComment {
            id: trimmed_id(self.id)?,
            body: self.body.unwrap_or_default(),
            author: login_of(self.author),
            created_at: parse_timestamp(self.created_at.as_deref()),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiAllCommentsPullRequest {
    pub(crate) reviews: Option<ApiConnection<ApiReview>>,
    pub(crate) comments: Option<ApiConnection<ApiDiscussionComment>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiReviewState {
    pub(crate) state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiThreadComment {
    pub(crate) id: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) author: Option<ApiActor>,
    pub(crate) pull_request_review: Option<ApiReviewState>,
}

impl ApiThreadComment {
    fn review_state(&self) -> CommentState {
        let raw = self
            .pull_request_review
            .as_ref()
            .and_then(|review| review.state.as_deref())
            .unwrap_or_default();
        CommentState::from_review_state(raw)
    }

    fn into_comment(self) -> Option<ThreadComment> {
        Some(ThreadComment {
            id: trimmed_id(self.id)?,
            body: self.body.unwrap_or_default(),
            author: login_of(self.author),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiThread {
    pub(crate) id: Option<String>,
    pub(crate) is_resolved: Option<bool>,
    pub(crate) path: Option<String>,
    pub(crate) line: Option<u32>,
    pub(crate) original_line: Option<u32>,
    pub(crate) comments: Option<ApiConnection<ApiThreadComment>>,
}

impl ApiThread {
    pub(crate) fn into_thread(self) -> Option<ReviewThread> {
        let id = trimmed_id(self.id)?;
        let nodes: Vec<ApiThreadComment> = self
            .comments
            .into_iter()
            .flat_map(ApiConnection::into_nodes)
            .collect();
        let state = nodes.first().map(ApiThreadComment::review_state);
        Some(ReviewThread {
            id,
            path: self.path.unwrap_or_default(),
            line: resolve_line(self.line, self.original_line),
            is_resolved: self.is_resolved.unwrap_or(false),
            state,
            comments: nodes
                .into_iter()
                .filter_map(ApiThreadComment::into_comment)
                .collect(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiReviewThreadsPullRequest {
    pub(crate) review_threads: Option<ApiConnection<ApiThread>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiReviewRef {
    pub(crate) id: Option<String>,
    pub(crate) state: Option<String>,
}

impl ApiReviewRef {
    pub(crate) fn into_created(self) -> Option<CreatedReview> {
        Some(CreatedReview {
            id: trimmed_id(self.id)?,
            state: self.state.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiReviewPayload {
    pub(crate) pull_request_review: Option<ApiReviewRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiAddReviewData {
    pub(crate) add_pull_request_review: Option<ApiReviewPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiAddedThread {
    pub(crate) id: Option<String>,
    pub(crate) path: Option<String>,
    pub(crate) line: Option<u32>,
    pub(crate) is_outdated: Option<bool>,
}

impl ApiAddedThread {
    pub(crate) fn into_added(self) -> Option<AddedThread> {
        Some(AddedThread {
            id: trimmed_id(self.id)?,
            path: self.path.unwrap_or_default(),
            line: self.line.unwrap_or(0),
            outdated: self.is_outdated.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiThreadPayload {
    pub(crate) thread: Option<ApiAddedThread>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiAddThreadData {
    pub(crate) add_pull_request_review_thread: Option<ApiThreadPayload>,
}
