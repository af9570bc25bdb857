//! GitHub pull request review access over GraphQL.
//!
//! This module resolves pull request references, validates personal access
//! tokens, and wraps Octocrab's GraphQL endpoint in a typed review client.
//! Errors are mapped into user-facing variants so callers can surface precise
//! failures without exposing Octocrab internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod token;

pub use error::ReviewError;
pub use gateway::{
    AddThreadInput, AllCommentsOptions, CreateReviewInput, GraphQlTransport, OctocrabTransport,
    PendingReviewsOptions, ReviewClient, ReviewThreadsOptions, SubmitReviewInput,
};
pub use locator::{
    PullRequestArgument, PullRequestNumber, PullRequestReference, RepositoryContext,
    RepositoryName, RepositoryOwner, RepositorySlug, parse_reference,
};
pub use models::{
    AddedThread, AllComments, CommentState, CreatedReview, DiscussionComment, PendingReview,
    PullRequestIdentity, ReviewComment, ReviewThread, ReviewThreads, StatefulReviewComment,
    ThreadComment,
};
pub use token::PersonalAccessToken;

#[cfg(test)]
pub use gateway::MockGraphQlTransport;
#[cfg(test)]
pub use locator::MockRepositoryContext;
