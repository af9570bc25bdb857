//! Command-line surface and per-subcommand handlers.
//!
//! Parsing happens in [`Cli`]; every subcommand then passes through the same
//! pipeline: load configuration, pick the output format, resolve the pull
//! request, validate local input, authenticate, call GitHub, and render.
//! Handlers are generic over [`GraphQlTransport`] so they run against
//! scripted transports in tests.

pub mod add;
pub mod comments;
pub mod delete;
pub mod discard;
pub mod edit;
pub mod submit;
pub mod view;

#[cfg(test)]
pub mod test_utils;

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use gh_review::github::{GraphQlTransport, PendingReviewsOptions};
use gh_review::output::{Style, render};
use gh_review::{
    GitRemoteContext, OctocrabTransport, OutputFormat, PullRequestReference, ReviewClient,
    ReviewConfig, ReviewError, ReviewResult,
};

/// Printed to stderr when GitHub reported more items than were fetched.
pub const TRUNCATION_WARNING: &str =
    "Warning: results may be truncated. Use --limit to fetch more.";

/// Manage pull request review comments.
#[derive(Debug, Parser)]
#[command(
    name = "gh-review",
    version,
    about = "Manage pull request review comments",
    long_about = "Manage pending reviews and review comments on GitHub pull requests.\n\n\
                  PR can be a number (using -R or the current repository) or a full URL."
)]
pub struct Cli {
    /// Output format: table, plain, or json.
    #[arg(short = 'f', long, global = true, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Repository as OWNER/REPO; defaults to the current Git remote.
    #[arg(short = 'R', long = "repo", global = true, value_name = "OWNER/REPO")]
    pub repo: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a comment to a pending review.
    Add(add::AddArgs),
    /// List review and conversation comments.
    Comments(comments::CommentsArgs),
    /// Delete a review comment.
    Delete(delete::DeleteArgs),
    /// Discard a pending review and its draft comments.
    Discard(discard::DiscardArgs),
    /// Edit a review comment.
    Edit(edit::EditArgs),
    /// Submit a pending review.
    Submit(submit::SubmitArgs),
    /// Show review threads.
    View(view::ViewArgs),
}

impl Command {
    /// The raw pull request argument.
    fn pull_request(&self) -> &str {
        match self {
            Self::Add(args) => &args.pr,
            Self::Comments(args) => &args.pr,
            Self::Delete(args) => &args.pr,
            Self::Discard(args) => &args.pr,
            Self::Edit(args) => &args.pr,
            Self::Submit(args) => &args.pr,
            Self::View(args) => &args.pr,
        }
    }
}

/// A subcommand whose local input has been validated.
#[derive(Debug, Clone)]
pub enum Request {
    /// See [`add::run`].
    Add(add::AddRequest),
    /// See [`comments::run`].
    Comments(comments::CommentsRequest),
    /// See [`delete::run`].
    Delete(delete::DeleteRequest),
    /// See [`discard::run`].
    Discard(discard::DiscardRequest),
    /// See [`edit::run`].
    Edit(edit::EditRequest),
    /// See [`submit::run`].
    Submit(submit::SubmitRequest),
    /// See [`view::run`].
    View(view::ViewRequest),
}

impl TryFrom<&Command> for Request {
    type Error = ReviewError;

    fn try_from(command: &Command) -> Result<Self, Self::Error> {
        Ok(match command {
            Command::Add(args) => Self::Add(add::AddRequest::try_from(args)?),
            Command::Comments(args) => Self::Comments(comments::CommentsRequest::from(args)),
            Command::Delete(args) => Self::Delete(delete::DeleteRequest::from(args)),
            Command::Discard(args) => Self::Discard(discard::DiscardRequest::from(args)),
            Command::Edit(args) => Self::Edit(edit::EditRequest::from(args)),
            Command::Submit(args) => Self::Submit(submit::SubmitRequest::try_from(args)?),
            Command::View(args) => Self::View(view::ViewRequest::from(args)),
        })
    }
}

impl Request {
    /// Dispatches to the matching handler.
    ///
    /// # Errors
    ///
    /// Propagates handler failures.
    pub async fn execute<T: GraphQlTransport>(
        &self,
        client: &ReviewClient<T>,
        pr: &PullRequestReference,
    ) -> Result<Outcome, ReviewError> {
        match self {
            Self::Add(request) => add::run(client, pr, request).await,
            Self::Comments(request) => comments::run(client, pr, request).await,
            Self::Delete(request) => delete::run(client, request).await,
            Self::Discard(request) => discard::run(client, pr, request).await,
            Self::Edit(request) => edit::run(client, request).await,
            Self::Submit(request) => submit::run(client, pr, request).await,
            Self::View(request) => view::run(client, pr, request).await,
        }
    }
}

/// What a handler produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Record to render.
    pub result: ReviewResult,
    /// Whether GitHub held more items than were fetched.
    pub truncated: bool,
}

impl Outcome {
    /// An outcome with nothing left unfetched.
    #[must_use]
    pub const fn complete(result: ReviewResult) -> Self {
        Self {
            result,
            truncated: false,
        }
    }
}

/// Runs a parsed command line end to end.
///
/// # Errors
///
/// Returns the first failure from configuration, reference resolution,
/// validation, authentication, the GitHub call, or rendering.
pub async fn run(cli: &Cli) -> Result<(), ReviewError> {
    let config = ReviewConfig::from_environment()?;
    let format = select_format(cli.format.as_deref(), &config)?;

    let context = GitRemoteContext::new(".", config.remote.clone());
    let pr = PullRequestReference::resolve(
        cli.command.pull_request(),
        cli.repo.as_deref(),
        &context,
    )?;
    let request = Request::try_from(&cli.command)?;

    let token = config.resolve_token().await?;
    let client = ReviewClient::new(OctocrabTransport::new(&token, &config.api_url)?);
    tracing::debug!(%pr, "running command");
    let outcome = request.execute(&client, &pr).await?;

    emit(
        &outcome,
        format,
        Style::for_stdout(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}

/// The `--format` flag wins over the configured default.
///
/// # Errors
///
/// Returns [`ReviewError::UnsupportedFormat`] for unknown names.
pub fn select_format(
    flag: Option<&str>,
    config: &ReviewConfig,
) -> Result<OutputFormat, ReviewError> {
    flag.unwrap_or(&config.format).parse()
}

/// Renders the outcome, then warns about truncation.
///
/// # Errors
///
/// Returns [`ReviewError::Io`] when either stream cannot be written.
pub fn emit<W: Write, E: Write>(
    outcome: &Outcome,
    format: OutputFormat,
    style: Style,
    out: &mut W,
    err: &mut E,
) -> Result<(), ReviewError> {
    render(out, &outcome.result, format, style)?;
    if outcome.truncated {
        writeln!(err, "{TRUNCATION_WARNING}").map_err(|error| ReviewError::Io {
            message: error.to_string(),
        })?;
    }
    Ok(())
}

/// Uses `explicit` when given, else the viewer's latest pending review.
async fn review_id_or_latest<T: GraphQlTransport>(
    client: &ReviewClient<T>,
    pr: &PullRequestReference,
    explicit: Option<&str>,
) -> Result<String, ReviewError> {
    if let Some(id) = explicit.map(str::trim).filter(|id| !id.is_empty()) {
        return Ok(id.to_owned());
    }
    let review = client
        .latest_pending_review(pr, &PendingReviewsOptions::default())
        .await?;
    Ok(review.id)
}
