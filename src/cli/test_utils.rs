//! Shared test utilities for command handler tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gh_review::github::{GraphQlTransport, RepositoryContext, RepositorySlug};
use gh_review::{PullRequestReference, ReviewClient, ReviewError};
use serde_json::Value;

/// A transport that replays canned responses and records every request.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Result<Value, ReviewError>>>>,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

impl ScriptedTransport {
    /// Queues `responses` in the order requests will consume them.
    pub fn new(responses: impl IntoIterator<Item = Result<Value, ReviewError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into_iter().collect())),
            requests: Arc::default(),
        }
    }

    /// A client sharing this transport's script and log.
    pub fn client(&self) -> ReviewClient<Self> {
        ReviewClient::new(self.clone())
    }

    /// GraphQL operation names in request order.
    pub fn operations(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("requests mutex should be available")
            .iter()
            .map(|(operation, _)| operation.clone())
            .collect()
    }

    /// Variables sent with the request named `operation`.
    pub fn variables_of(&self, operation: &str) -> Value {
        self.requests
            .lock()
            .expect("requests mutex should be available")
            .iter()
            .find(|(name, _)| name == operation)
            .map(|(_, variables)| variables.clone())
            .unwrap_or_else(|| panic!("no {operation} request was sent"))
    }
}

#[async_trait]
impl GraphQlTransport for ScriptedTransport {
    async fn execute(&self, document: &str, variables: Value) -> Result<Value, ReviewError> {
        let operation = document
            .split(|c: char| c == '(' || c == '{' || c.is_whitespace())
            .filter(|word| !word.is_empty())
            .nth(1)
            .unwrap_or_default()
            .to_owned();
        self.requests
            .lock()
            .expect("requests mutex should be available")
            .push((operation.clone(), variables));
        self.responses
            .lock()
            .expect("responses mutex should be available")
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected {operation} request"))
    }
}

struct NoRepository;

impl RepositoryContext for NoRepository {
    fn current_repository(&self) -> Result<RepositorySlug, ReviewError> {
        Err(ReviewError::RepositoryResolution {
            message: "no ambient repository in tests".to_owned(),
        })
    }
}

/// `octo/cat#7`.
pub fn pull_request() -> PullRequestReference {
    PullRequestReference::build(7, Some("octo/cat"), &NoRepository)
        .expect("fixture reference should build")
}
