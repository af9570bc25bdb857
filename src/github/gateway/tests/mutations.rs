//! Write operation tests.

use rstest::rstest;
use serde_json::json;

use super::{assert_validation, responding, untouched};
use crate::github::error::ReviewError;
use crate::github::gateway::{
    AddThreadInput, CreateReviewInput, MockGraphQlTransport, ReviewClient, SubmitReviewInput,
};

fn thread_input() -> AddThreadInput {
    AddThreadInput {
        review_id: "PRR_abc".to_owned(),
        path: "src/lib.rs".to_owned(),
        line: 12,
        side: None,
        body: "Consider a guard clause".to_owned(),
        start_line: None,
        start_side: None,
    }
}

fn added_thread_response() -> serde_json::Value {
    json!({ "addPullRequestReviewThread": { "thread": {
        "id": "PRRT_1", "path": "src/lib.rs", "line": 12, "isOutdated": false
    }}})
}

#[tokio::test]
async fn add_thread_rejects_zero_line_without_calling_transport() {
    let client = untouched();
    let input = AddThreadInput {
        line: 0,
        ..thread_input()
    };

    assert_validation(client.add_thread(&input).await, "line must be positive");
}

#[rstest]
#[case(AddThreadInput { review_id: String::new(), ..thread_input() }, "review ID required")]
#[case(
    AddThreadInput { review_id: "PRRC_1".to_owned(), ..thread_input() },
    "invalid review ID \"PRRC_1\": expected GraphQL node ID"
)]
#[case(AddThreadInput { path: "  ".to_owned(), ..thread_input() }, "path required")]
#[case(AddThreadInput { body: "\n".to_owned(), ..thread_input() }, "body required")]
#[tokio::test]
async fn add_thread_validates_before_sending(
    #[case] input: AddThreadInput,
    #[case] expected: &str,
) {
    let client = untouched();

    assert_validation(client.add_thread(&input).await, expected);
}

#[tokio::test]
async fn add_thread_defaults_side_and_omits_range() {
    let mut transport = MockGraphQlTransport::new();
    transport
        .expect_execute()
        .withf(|document, variables| {
            document.contains("addPullRequestReviewThread")
                && *variables
                    == json!({ "input": {
                        "pullRequestReviewId": "PRR_abc",
                        "path": "src/lib.rs",
                        "line": 12,
                        "side": "RIGHT",
                        "body": "Consider a guard clause"
                    }})
        })
        .times(1)
        .returning(|_, _| Ok(added_thread_response()));
    let client = ReviewClient::new(transport);

    let thread = client
        .add_thread(&thread_input())
        .await
        .expect("thread should be added");

    assert_eq!(thread.id, "PRRT_1");
    assert_eq!(thread.line, 12);
}

#[tokio::test]
async fn add_thread_uppercases_sides_and_sends_range() {
    let mut transport = MockGraphQlTransport::new();
    transport
        .expect_execute()
        .withf(|_, variables| {
            let input = &variables["input"];
            input["side"] == json!("LEFT")
                && input["startLine"] == json!(10)
                && input["startSide"] == json!("LEFT")
        })
        .times(1)
        .returning(|_, _| Ok(added_thread_response()));
    let client = ReviewClient::new(transport);
    let input = AddThreadInput {
        side: Some("left".to_owned()),
        start_line: Some(10),
        start_side: Some("left".to_owned()),
        ..thread_input()
    };

    client
        .add_thread(&input)
        .await
        .expect("thread should be added");
}

#[tokio::test]
async fn add_thread_rejects_empty_thread_id() {
    let client = responding(json!({ "addPullRequestReviewThread": { "thread": { "id": "" } } }));

    let error = client
        .add_thread(&thread_input())
        .await
        .expect_err("empty id should fail");

    assert_eq!(
        error,
        ReviewError::NotFound {
            message: "add thread returned empty ID".to_owned(),
        }
    );
}

#[tokio::test]
async fn create_review_requires_pull_request_id() {
    let client = untouched();

    assert_validation(
        client.create_review(&CreateReviewInput::default()).await,
        "PR node ID required",
    );
}

#[tokio::test]
async fn create_review_sends_commit() {
    let mut transport = MockGraphQlTransport::new();
    transport
        .expect_execute()
        .withf(|_, variables| {
            *variables == json!({ "input": { "pullRequestId": "PR_1", "commitOID": "abc" } })
        })
        .times(1)
        .returning(|_, _| {
            Ok(json!({ "addPullRequestReview": { "pullRequestReview": {
                "id": "PRR_new", "state": "PENDING"
            }}}))
        });
    let client = ReviewClient::new(transport);
    let input = CreateReviewInput {
        pull_request_id: "PR_1".to_owned(),
        commit_oid: Some("abc".to_owned()),
    };

    let review = client
        .create_review(&input)
        .await
        .expect("review should be created");

    assert_eq!(review.id, "PRR_new");
    assert_eq!(review.state, "PENDING");
}

#[rstest]
#[case("", "body", "comment ID required")]
#[case("PRR_1", "body", "invalid comment ID \"PRR_1\": expected GraphQL node ID")]
#[case("PRRC_1", "   ", "body required")]
#[tokio::test]
async fn update_comment_validates(
    #[case] comment_id: &str,
    #[case] body: &str,
    #[case] expected: &str,
) {
    let client = untouched();

    assert_validation(client.update_comment(comment_id, body).await, expected);
}

#[tokio::test]
async fn update_comment_sends_trimmed_body() {
    let mut transport = MockGraphQlTransport::new();
    transport
        .expect_execute()
        .withf(|_, variables| {
            *variables
                == json!({ "input": { "pullRequestReviewCommentId": "PRRC_1", "body": "new text" } })
        })
        .times(1)
        .returning(|_, _| {
            Ok(json!({ "updatePullRequestReviewComment": {
                "pullRequestReviewComment": { "id": "PRRC_1" }
            }}))
        });
    let client = ReviewClient::new(transport);

    client
        .update_comment(" PRRC_1 ", "  new text \n")
        .await
        .expect("update should succeed");
}

#[tokio::test]
async fn delete_comment_sends_id() {
    let mut transport = MockGraphQlTransport::new();
    transport
        .expect_execute()
        .withf(|_, variables| *variables == json!({ "input": { "id": "PRRC_9" } }))
        .times(1)
        .returning(|_, _| {
            Ok(json!({ "deletePullRequestReviewComment": { "clientMutationId": null } }))
        });
    let client = ReviewClient::new(transport);

    client
        .delete_comment("PRRC_9")
        .await
        .expect("delete should succeed");
}

#[tokio::test]
async fn delete_comment_prefixes_failures() {
    let mut transport = MockGraphQlTransport::new();
    transport.expect_execute().times(1).returning(|_, _| {
        Err(ReviewError::Transport {
            message: "Could not resolve to a node".to_owned(),
        })
    });
    let client = ReviewClient::new(transport);

    let error = client
        .delete_comment("PRRC_9")
        .await
        .expect_err("failure should propagate");

    assert_eq!(
        error.to_string(),
        "delete comment: Could not resolve to a node"
    );
}

#[tokio::test]
async fn submit_review_uppercases_event_and_omits_blank_body() {
    let mut transport = MockGraphQlTransport::new();
    transport
        .expect_execute()
        .withf(|_, variables| {
            *variables
                == json!({ "input": { "pullRequestReviewId": "PRR_1", "event": "REQUEST_CHANGES" } })
        })
        .times(1)
        .returning(|_, _| Ok(json!({ "submitPullRequestReview": null })));
    let client = ReviewClient::new(transport);
    let input = SubmitReviewInput {
        review_id: "PRR_1".to_owned(),
        event: "request_changes".to_owned(),
        body: Some("   ".to_owned()),
    };

    client
        .submit_review(&input)
        .await
        .expect("submit should succeed");
}

#[tokio::test]
async fn submit_review_sends_body_when_present() {
    let mut transport = MockGraphQlTransport::new();
    transport
        .expect_execute()
        .withf(|_, variables| variables["input"]["body"] == json!("Looks good"))
        .times(1)
        .returning(|_, _| Ok(json!({ "submitPullRequestReview": null })));
    let client = ReviewClient::new(transport);
    let input = SubmitReviewInput {
        review_id: "PRR_1".to_owned(),
        event: "APPROVE".to_owned(),
        body: Some(" Looks good ".to_owned()),
    };

    client
        .submit_review(&input)
        .await
        .expect("submit should succeed");
}

#[rstest]
#[case(SubmitReviewInput { review_id: String::new(), event: "APPROVE".to_owned(), body: None }, "review ID required")]
#[case(SubmitReviewInput { review_id: "PRR_1".to_owned(), event: " ".to_owned(), body: None }, "event required")]
#[tokio::test]
async fn submit_review_validates(#[case] input: SubmitReviewInput, #[case] expected: &str) {
    let client = untouched();

    assert_validation(client.submit_review(&input).await, expected);
}

#[tokio::test]
async fn delete_review_rejects_comment_id() {
    let client = untouched();

    assert_validation(
        client.delete_review("PRRC_1").await,
        "invalid review ID \"PRRC_1\": expected GraphQL node ID",
    );
}

#[tokio::test]
async fn delete_review_sends_review_id() {
    let mut transport = MockGraphQlTransport::new();
    transport
        .expect_execute()
        .withf(|_, variables| {
            *variables == json!({ "input": { "pullRequestReviewId": "PRR_7" } })
        })
        .times(1)
        .returning(|_, _| Ok(json!({ "deletePullRequestReview": { "clientMutationId": null } })));
    let client = ReviewClient::new(transport);

    client
        .delete_review("PRR_7")
        .await
        .expect("delete should succeed");
}
