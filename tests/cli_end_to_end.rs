//! The `gh-review` binary against a stub GraphQL endpoint.

use std::process::Output;

use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run_against(server: &MockServer, args: &[&str]) -> Output {
    let home = TempDir::new().expect("temp dir should be created");
    Command::new(env!("CARGO_BIN_EXE_gh-review"))
        .args(args)
        .current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("GH_REVIEW_API_URL", server.uri())
        .env("GH_TOKEN", "ghp_end_to_end")
        .env_remove("GH_REVIEW_TOKEN")
        .env_remove("GH_REVIEW_FORMAT")
        .env("NO_COLOR", "1")
        .output()
        .await
        .expect("binary should run")
}

async fn answer(server: &MockServer, operation: &str, data: Value) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains(operation))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .mount(server)
        .await;
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[tokio::test]
async fn delete_prints_json_action() {
    let server = MockServer::start().await;
    answer(
        &server,
        "DeleteComment",
        json!({ "deletePullRequestReviewComment": { "clientMutationId": null } }),
    )
    .await;

    let output = run_against(
        &server,
        &["delete", "7", "-R", "octo/cat", "-c", "PRRC_1", "-f", "json"],
    )
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let document: Value = serde_json::from_str(&stdout(&output)).expect("stdout should be JSON");
    assert_eq!(
        document,
        json!({ "action": "deleted", "comment_id": "PRRC_1" })
    );
}

#[tokio::test]
async fn view_warns_when_threads_are_truncated() {
    let server = MockServer::start().await;
    answer(
        &server,
        "ReviewThreads",
        json!({ "repository": { "pullRequest": { "reviewThreads": {
            "totalCount": 5,
            "nodes": [
                { "id": "PRRT_1", "isResolved": false, "path": "src/main.rs", "line": 4,
                  "comments": { "nodes": [ { "id": "PRRC_1", "body": "Handle the error",
                      "author": { "login": "alice" },
                      "pullRequestReview": { "state": "COMMENTED" } } ] } }
            ]
        } } } }),
    )
    .await;

    let output = run_against(
        &server,
        &[
            "view",
            "https://github.com/octo/cat/pull/7",
            "--limit",
            "1",
            "-f",
            "plain",
        ],
    )
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "unresolved\tsrc/main.rs:4\n\talice\tHandle the error\n"
    );
    assert!(
        stderr(&output).contains("Warning: results may be truncated. Use --limit to fetch more."),
        "{}",
        stderr(&output)
    );
}

#[tokio::test]
async fn graphql_errors_exit_with_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [ { "message": "Could not resolve to a node with the global id of 'PRR_x'" } ]
        })))
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &["discard", "7", "-R", "octo/cat", "--review-id", "PRR_x"],
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("delete review: Could not resolve to a node"),
        "{}",
        stderr(&output)
    );
    assert!(output.stdout.is_empty());
}
