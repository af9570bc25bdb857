//! `comments`: list, filter, and group comments on a pull request.

use clap::Args;
use gh_review::filter::{self, CommentFilter, Grouping};
use gh_review::github::{AllCommentsOptions, GraphQlTransport, ReviewThreadsOptions};
use gh_review::output::{Comment, CommentsResult};
use gh_review::{PullRequestReference, ReviewClient, ReviewError, ReviewResult};

use super::Outcome;

/// Flags for `comments`.
#[derive(Debug, Clone, Args)]
pub struct CommentsArgs {
    /// Pull request number or URL.
    #[arg(value_name = "PR")]
    pub pr: String,

    /// Keep comments in these states (pending, approved, commented,
    /// changes_requested, submitted, discussion).
    #[arg(long, value_delimiter = ',')]
    pub states: Vec<String>,

    /// Keep comments by this author.
    #[arg(short = 'a', long)]
    pub author: Option<String>,

    /// Keep only your own comments.
    #[arg(long)]
    pub mine: bool,

    /// Show comments from unresolved threads only.
    #[arg(long)]
    pub unresolved: bool,

    /// Keep the last N comments.
    #[arg(long, value_name = "N")]
    pub tail: Option<usize>,

    /// Show node IDs.
    #[arg(long)]
    pub ids: bool,

    /// One list instead of per-author groups.
    #[arg(long)]
    pub flat: bool,

    /// Maximum items to fetch per connection.
    #[arg(long, default_value_t = 100)]
    pub limit: u32,
}

/// `comments` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentsRequest {
    /// Requested states.
    pub states: Vec<String>,
    /// Author filter.
    pub author: Option<String>,
    /// Replace the author filter with the viewer's login.
    pub mine: bool,
    /// Read unresolved threads instead of reviews.
    pub unresolved: bool,
    /// Tail length.
    pub tail: Option<usize>,
    /// Show IDs.
    pub include_ids: bool,
    /// Grouping mode.
    pub grouping: Grouping,
    /// Page size.
    pub limit: u32,
}

impl From<&CommentsArgs> for CommentsRequest {
    fn from(args: &CommentsArgs) -> Self {
        Self {
            states: args.states.clone(),
            author: args.author.clone(),
            mine: args.mine,
            unresolved: args.unresolved,
            tail: args.tail,
            include_ids: args.ids,
            grouping: Grouping::from_flat(args.flat),
            limit: args.limit,
        }
    }
}

/// Fetches comments, then filters, tails, and groups them.
///
/// # Errors
///
/// Propagates viewer lookup and query failures.
pub async fn run<T: GraphQlTransport>(
    client: &ReviewClient<T>,
    pr: &PullRequestReference,
    request: &CommentsRequest,
) -> Result<Outcome, ReviewError> {
    let author = if request.mine {
        let login = client
            .viewer_login()
            .await
            .map_err(|error| error.context("resolve current user"))?;
        Some(login)
    } else {
        request.author.clone()
    };

    let (comments, truncated) = if request.unresolved {
        fetch_unresolved(client, pr, request.limit).await?
    } else {
        fetch_all(client, pr, request).await?
    };

    let selected = CommentFilter::new(&request.states, author.as_deref()).apply(comments);
    let groups = request
        .grouping
        .group(filter::tail(selected, request.tail));

    Ok(Outcome {
        result: ReviewResult::Comments(CommentsResult {
            pr: pr.to_string(),
            groups,
            include_ids: request.include_ids,
        }),
        truncated,
    })
}

async fn fetch_unresolved<T: GraphQlTransport>(
    client: &ReviewClient<T>,
    pr: &PullRequestReference,
    limit: u32,
) -> Result<(Vec<Comment>, bool), ReviewError> {
    let threads = client
        .review_threads(
            pr,
            &ReviewThreadsOptions {
                limit: Some(limit),
                unresolved_only: true,
                states: Vec::new(),
            },
        )
        .await?;
    let comments = threads
        .threads
        .into_iter()
        .flat_map(|mut thread| {
            let comments = std::mem::take(&mut thread.comments);
            comments
                .into_iter()
                .map(move |comment| Comment::unresolved(&thread, comment))
        })
        .collect();
    Ok((comments, threads.truncated))
}

async fn fetch_all<T: GraphQlTransport>(
    client: &ReviewClient<T>,
    pr: &PullRequestReference,
    request: &CommentsRequest,
) -> Result<(Vec<Comment>, bool), ReviewError> {
    let all = client
        .all_pr_comments(
            pr,
            &AllCommentsOptions {
                limit: Some(request.limit),
                states: request.states.clone(),
            },
        )
        .await?;
    let comments = all
        .review_comments
        .into_iter()
        .map(Comment::from)
        .chain(all.discussion_comments.into_iter().map(Comment::discussion))
        .collect();
    Ok((comments, all.truncated))
}
