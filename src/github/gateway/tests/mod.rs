//! Unit tests for the review client.
//!
//! - `queries`: read operations against a mocked transport
//! - `mutations`: write operations and their local preconditions
//! - `transport`: the Octocrab transport against a stub GraphQL endpoint

mod mutations;

use serde_json::Value;

use super::{MockGraphQlTransport, ReviewClient};
use crate::github::error::ReviewError;
use crate::github::locator::{MockRepositoryContext, PullRequestReference};

pub(super) fn sample_reference() -> PullRequestReference {
    PullRequestReference::resolve(
        "https://github.com/octo/cat/pull/42",
        None,
        &MockRepositoryContext::new(),
    )
    .expect("sample reference should parse")
}

/// Transport answering every call with `response` and recording nothing.
pub(super) fn responding(response: Value) -> ReviewClient<MockGraphQlTransport> {
    let mut transport = MockGraphQlTransport::new();
    transport
        .expect_execute()
        .times(1)
        .returning(move |_, _| Ok(response.clone()));
    ReviewClient::new(transport)
}

/// Transport that must never be called.
pub(super) fn untouched() -> ReviewClient<MockGraphQlTransport> {
    let mut transport = MockGraphQlTransport::new();
    transport.expect_execute().times(0);
    ReviewClient::new(transport)
}

pub(super) fn assert_validation(result: Result<impl std::fmt::Debug, ReviewError>, expected: &str) {
    match result {
        Err(ReviewError::Validation { message }) => assert_eq!(message, expected),
        other => panic!("expected Validation({expected}), got {other:?}"),
    }
}
