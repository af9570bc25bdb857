//! gh-review library crate for managing pull request review comments.
//!
//! The library resolves pull request references, talks to GitHub's GraphQL
//! API through a typed review client, filters and groups listed comments, and
//! renders command results as tables, tab-separated text, or JSON.

pub mod config;
pub mod filter;
pub mod github;
pub mod local;
pub mod logging;
pub mod output;
pub mod templates;

pub use config::ReviewConfig;
pub use filter::{CommentFilter, Grouping};
pub use github::{
    OctocrabTransport, PersonalAccessToken, PullRequestReference, ReviewClient, ReviewError,
};
pub use local::GitRemoteContext;
pub use output::{OutputFormat, ReviewResult};
