//! `view`: show review threads with their resolution status.

use clap::Args;
use gh_review::github::{GraphQlTransport, ReviewThreadsOptions};
use gh_review::output::{ViewResult, ViewThread};
use gh_review::{PullRequestReference, ReviewClient, ReviewError, ReviewResult};

use super::Outcome;

/// Flags for `view`.
#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    /// Pull request number or URL.
    #[arg(value_name = "PR")]
    pub pr: String,

    /// Hide resolved threads.
    #[arg(long)]
    pub unresolved: bool,

    /// Show node IDs.
    #[arg(long)]
    pub ids: bool,

    /// Maximum threads to fetch.
    #[arg(long, default_value_t = 100)]
    pub limit: u32,

    /// Keep threads whose first comment's review is in these states.
    #[arg(long, value_delimiter = ',')]
    pub states: Vec<String>,
}

/// `view` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRequest {
    /// Skip resolved threads.
    pub unresolved: bool,
    /// Show IDs.
    pub include_ids: bool,
    /// Page size.
    pub limit: u32,
    /// Thread state filter.
    pub states: Vec<String>,
}

impl From<&ViewArgs> for ViewRequest {
    fn from(args: &ViewArgs) -> Self {
        Self {
            unresolved: args.unresolved,
            include_ids: args.ids,
            limit: args.limit,
            states: args.states.clone(),
        }
    }
}

/// Fetches threads for display.
///
/// # Errors
///
/// Propagates query failures.
pub async fn run<T: GraphQlTransport>(
    client: &ReviewClient<T>,
    pr: &PullRequestReference,
    request: &ViewRequest,
) -> Result<Outcome, ReviewError> {
    let fetched = client
        .review_threads(
            pr,
            &ReviewThreadsOptions {
                limit: Some(request.limit),
                unresolved_only: request.unresolved,
                states: request.states.clone(),
            },
        )
        .await?;

    Ok(Outcome {
        result: ReviewResult::View(ViewResult {
            pr: pr.to_string(),
            threads: fetched.threads.into_iter().map(ViewThread::from).collect(),
            include_ids: request.include_ids,
        }),
        truncated: fetched.truncated,
    })
}

#[cfg(test)]
mod tests {
    use gh_review::ReviewResult;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::{ViewRequest, run};
    use crate::cli::test_utils::{ScriptedTransport, pull_request};

    fn threads(total: u32) -> Value {
        json!({ "repository": { "pullRequest": { "reviewThreads": {
            "totalCount": total,
            "nodes": [
                { "id": "PRRT_1", "isResolved": true, "path": "a.rs", "line": null,
                  "originalLine": 3,
                  "comments": { "nodes": [ { "id": "PRRC_1", "body": "fixed",
                      "author": { "login": "alice" },
                      "pullRequestReview": { "state": "COMMENTED" } } ] } },
                { "id": "PRRT_2", "isResolved": false, "path": "b.rs", "line": 8,
                  "comments": { "nodes": [ { "id": "PRRC_2", "body": "still open",
                      "author": { "login": "bob" },
                      "pullRequestReview": { "state": "CHANGES_REQUESTED" } } ] } }
            ]
        } } } })
    }

    #[rstest]
    #[case(false, &[], &["PRRT_1", "PRRT_2"])]
    #[case(true, &[], &["PRRT_2"])]
    #[case(false, &["commented"], &["PRRT_1"])]
    #[tokio::test]
    async fn selects_threads(
        #[case] unresolved: bool,
        #[case] states: &[&str],
        #[case] expected: &[&str],
    ) {
        let transport = ScriptedTransport::new([Ok(threads(2))]);
        let request = ViewRequest {
            unresolved,
            include_ids: true,
            limit: 100,
            states: states.iter().map(|state| (*state).to_owned()).collect(),
        };

        let outcome = run(&transport.client(), &pull_request(), &request)
            .await
            .expect("threads should load");

        let ReviewResult::View(view) = outcome.result else {
            panic!("expected view result");
        };
        let ids: Vec<&str> = view.threads.iter().map(|thread| thread.id.as_str()).collect();
        assert_eq!(ids, expected);
        assert!(view.include_ids);
        assert_eq!(view.pr, "octo/cat#7");
    }

    #[tokio::test]
    async fn line_falls_back_to_original_and_limit_is_sent() {
        let transport = ScriptedTransport::new([Ok(threads(150))]);
        let request = ViewRequest {
            unresolved: false,
            include_ids: false,
            limit: 1,
            states: Vec::new(),
        };

        let outcome = run(&transport.client(), &pull_request(), &request)
            .await
            .expect("threads should load");

        assert!(outcome.truncated);
        assert_eq!(transport.variables_of("ReviewThreads")["limit"], 1);
        let ReviewResult::View(view) = outcome.result else {
            panic!("expected view result");
        };
        let first = view.threads.first().expect("a thread");
        assert_eq!(first.location(), "a.rs:3");
        assert!(first.resolved);
    }
}
