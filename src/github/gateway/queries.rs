//! Read-only GraphQL operations.

use serde_json::{Value, json};

use crate::github::error::ReviewError;
use crate::github::locator::PullRequestReference;
use crate::github::models::api::{
    ApiAllCommentsPullRequest, ApiPendingReviewsPullRequest, ApiPullRequestIdentity,
    ApiRepositoryData, ApiReviewThreadsPullRequest, ApiViewerData,
};
use crate::github::models::{
    AllComments, CommentState, PendingReview, PullRequestIdentity, ReviewThreads,
};

use super::{GraphQlTransport, ReviewClient};

const DEFAULT_PENDING_PAGE: u32 = 20;
const DEFAULT_LIMIT: u32 = 100;

const RESOLVE_PR: &str = r"query ResolvePR($owner: String!, $name: String!, $number: Int!) {
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      id
      headRefOid
    }
  }
}";

const VIEWER_LOGIN: &str = "query ViewerLogin { viewer { login } }";

const PENDING_REVIEWS: &str = r"query PendingReviews($owner: String!, $name: String!, $number: Int!, $first: Int!) {
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      reviews(states: [PENDING], first: $first) {
        nodes {
          id
          state
          url
          updatedAt
          author { login }
          comments(first: 100) {
            totalCount
            nodes { id path line startLine side startSide body outdated originalLine }
          }
        }
      }
    }
  }
}";

const ALL_PR_COMMENTS: &str = r"query AllPRComments($owner: String!, $name: String!, $number: Int!, $limit: Int!) {
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      reviews(first: $limit) {
        totalCount
        nodes {
          id
          state
          author { login }
          comments(first: 100) {
            nodes { id path line startLine side startSide body outdated originalLine author { login } }
          }
        }
      }
      comments(first: $limit) {
        totalCount
        nodes { id body author { login } createdAt }
      }
    }
  }
}";

const ALL_PR_COMMENTS_BY_STATE: &str = r"query AllPRComments($owner: String!, $name: String!, $number: Int!, $limit: Int!, $states: [PullRequestReviewState!]) {
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      reviews(states: $states, first: $limit) {
        totalCount
        nodes {
          id
          state
          author { login }
          comments(first: 100) {
            nodes { id path line startLine side startSide body outdated originalLine author { login } }
          }
        }
      }
      comments(first: $limit) {
        totalCount
        nodes { id body author { login } createdAt }
      }
    }
  }
}";

const REVIEW_THREADS: &str = r"query ReviewThreads($owner: String!, $name: String!, $number: Int!, $limit: Int!) {
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      reviewThreads(first: $limit) {
        totalCount
        nodes {
          id
          isResolved
          path
          line
          originalLine
          comments(first: 50) {
            nodes { id body author { login } pullRequestReview { state } }
          }
        }
      }
    }
  }
}";

/// Options for [`ReviewClient::pending_reviews`].
#[derive(Debug, Clone, Default)]
pub struct PendingReviewsOptions {
    /// Reviewer login; defaults to the authenticated viewer.
    pub reviewer: Option<String>,
    /// Page size; defaults to 20.
    pub first: Option<u32>,
}

/// Options for [`ReviewClient::all_pr_comments`].
#[derive(Debug, Clone, Default)]
pub struct AllCommentsOptions {
    /// Page size for reviews and conversation comments; defaults to 100.
    pub limit: Option<u32>,
    /// Requested states; review states among them are filtered server-side.
    pub states: Vec<String>,
}

/// Options for [`ReviewClient::review_threads`].
#[derive(Debug, Clone, Default)]
pub struct ReviewThreadsOptions {
    /// Page size; defaults to 100.
    pub limit: Option<u32>,
    /// Skip resolved threads.
    pub unresolved_only: bool,
    /// Keep only threads whose first comment's review has one of these states.
    pub states: Vec<String>,
}

fn pull_request_variables(pr: &PullRequestReference) -> serde_json::Map<String, Value> {
    let mut variables = serde_json::Map::new();
    variables.insert("owner".to_owned(), json!(pr.owner().as_str()));
    variables.insert("name".to_owned(), json!(pr.name().as_str()));
    variables.insert("number".to_owned(), json!(pr.number().get()));
    variables
}

fn effective_limit(limit: Option<u32>, default: u32) -> u32 {
    limit.filter(|value| *value > 0).unwrap_or(default)
}

/// Review states that can be pushed into the GraphQL `states` argument.
///
/// `submitted` stands for every state outside the known four, so asking for
/// it disables server-side filtering altogether.
fn server_review_states(states: &[String]) -> Vec<&'static str> {
    let parsed: Vec<CommentState> = states
        .iter()
        .filter_map(|state| CommentState::parse(state))
        .collect();
    if parsed.contains(&CommentState::Submitted) {
        return Vec::new();
    }
    let mut names: Vec<&'static str> = parsed
        .into_iter()
        .filter_map(CommentState::review_state_name)
        .collect();
    names.dedup();
    names
}

fn matches_any_state(state: &str, requested: &[String]) -> bool {
    requested
        .iter()
        .any(|candidate| candidate.trim().eq_ignore_ascii_case(state))
}

impl<T: GraphQlTransport> ReviewClient<T> {
    /// Looks up the pull request node ID and head commit.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::NotFound`] when either identifier is blank and
    /// a `resolve PR:`-prefixed error when the request fails.
    pub async fn resolve_pr(
        &self,
        pr: &PullRequestReference,
    ) -> Result<PullRequestIdentity, ReviewError> {
        let data: ApiRepositoryData<ApiPullRequestIdentity> = self
            .run(
                "resolve PR",
                RESOLVE_PR,
                Value::Object(pull_request_variables(pr)),
            )
            .await?;

        data.into_pull_request()
            .and_then(ApiPullRequestIdentity::into_identity)
            .ok_or_else(|| ReviewError::NotFound {
                message: format!("PR {pr} not found or missing metadata"),
            })
    }

    /// Returns the authenticated user's login.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Authentication`] when GitHub reports no login.
    pub async fn viewer_login(&self) -> Result<String, ReviewError> {
        let data: ApiViewerData = self
            .run("get viewer login", VIEWER_LOGIN, json!({}))
            .await?;

        data.into_login().ok_or_else(|| ReviewError::Authentication {
            message: "viewer login unavailable".to_owned(),
        })
    }

    /// Lists pending reviews written by the reviewer.
    ///
    /// # Errors
    ///
    /// Propagates viewer lookup failures and `query pending reviews:`-prefixed
    /// request failures.
    pub async fn pending_reviews(
        &self,
        pr: &PullRequestReference,
        options: &PendingReviewsOptions,
    ) -> Result<Vec<PendingReview>, ReviewError> {
        let first = effective_limit(options.first, DEFAULT_PENDING_PAGE);
        let reviewer = match options
            .reviewer
            .as_deref()
            .map(str::trim)
            .filter(|login| !login.is_empty())
        {
            Some(login) => login.to_owned(),
            None => self.viewer_login().await?,
        };

        let mut variables = pull_request_variables(pr);
        variables.insert("first".to_owned(), json!(first));
        let data: ApiRepositoryData<ApiPendingReviewsPullRequest> = self
            .run(
                "query pending reviews",
                PENDING_REVIEWS,
                Value::Object(variables),
            )
            .await?;

        let reviews = data
            .into_pull_request()
            .and_then(|pull_request| pull_request.reviews)
            .into_iter()
            .flat_map(|connection| connection.into_nodes())
            .filter_map(|node| node.into_pending_review())
            .filter(|review| review.author.eq_ignore_ascii_case(&reviewer))
            .collect();
        Ok(reviews)
    }

    /// Returns the most recently updated pending review.
    ///
    /// Ties keep the review GitHub listed first.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::NotFound`] when the reviewer has no pending
    /// review.
    pub async fn latest_pending_review(
        &self,
        pr: &PullRequestReference,
        options: &PendingReviewsOptions,
    ) -> Result<PendingReview, ReviewError> {
        let reviews = self.pending_reviews(pr, options).await?;
        let latest = reviews
            .into_iter()
            .reduce(|current, candidate| {
                if candidate.updated_at > current.updated_at {
                    candidate
                } else {
                    current
                }
            })
            .ok_or_else(|| ReviewError::NotFound {
                message: "no pending review found".to_owned(),
            })?;
        tracing::debug!(review_id = %latest.id, "selected latest pending review");
        Ok(latest)
    }

    /// Fetches review comments and conversation comments in one request.
    ///
    /// # Errors
    ///
    /// Returns `query all PR comments:`-prefixed request failures.
    pub async fn all_pr_comments(
        &self,
        pr: &PullRequestReference,
        options: &AllCommentsOptions,
    ) -> Result<AllComments, ReviewError> {
        let limit = effective_limit(options.limit, DEFAULT_LIMIT);
        let server_states = server_review_states(&options.states);

        let mut variables = pull_request_variables(pr);
        variables.insert("limit".to_owned(), json!(limit));
        let document = if server_states.is_empty() {
            ALL_PR_COMMENTS
        } else {
            variables.insert("states".to_owned(), json!(server_states));
            ALL_PR_COMMENTS_BY_STATE
        };

        let data: ApiRepositoryData<ApiAllCommentsPullRequest> = self
            .run("query all PR comments", document, Value::Object(variables))
            .await?;
        let Some(pull_request) = data.into_pull_request() else {
            return Ok(AllComments::default());
        };

        let review_total = pull_request.reviews.as_ref().map_or(0, |c| c.total());
        let comment_total = pull_request.comments.as_ref().map_or(0, |c| c.total());

        let review_comments = pull_request
            .reviews
            .into_iter()
            .flat_map(|connection| connection.into_nodes())
            .flat_map(|review| review.into_stateful_comments())
            .collect();
        let discussion_comments = pull_request
            .comments
            .into_iter()
            .flat_map(|connection| connection.into_nodes())
            .filter_map(|comment| comment.into_comment())
            .collect();

        Ok(AllComments {
            review_comments,
            discussion_comments,
            truncated: review_total > limit || comment_total > limit,
        })
    }

    /// Fetches review threads.
    ///
    /// # Errors
    ///
    /// Returns `query review threads:`-prefixed request failures.
    pub async fn review_threads(
        &self,
        pr: &PullRequestReference,
        options: &ReviewThreadsOptions,
    ) -> Result<ReviewThreads, ReviewError> {
        let limit = effective_limit(options.limit, DEFAULT_LIMIT);
        let mut variables = pull_request_variables(pr);
        variables.insert("limit".to_owned(), json!(limit));

        let data: ApiRepositoryData<ApiReviewThreadsPullRequest> = self
            .run(
                "query review threads",
                REVIEW_THREADS,
                Value::Object(variables),
            )
            .await?;
        let Some(connection) = data
            .into_pull_request()
            .and_then(|pull_request| pull_request.review_threads)
        else {
            return Ok(ReviewThreads::default());
        };

        let total = connection.total();
        let threads = connection
            .into_nodes()
            .filter(|node| !(options.unresolved_only && node.is_resolved.unwrap_or(false)))
            .filter_map(|node| node.into_thread())
            .filter(|thread| {
                options.states.is_empty()
                    || matches_any_state(
                        thread.state.map_or("", CommentState::as_str),
                        &options.states,
                    )
            })
            .collect();

        Ok(ReviewThreads {
            threads,
            truncated: total > limit,
        })
    }
}
