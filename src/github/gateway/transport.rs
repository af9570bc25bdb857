//! GraphQL transport backed by Octocrab.

use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::github::error::ReviewError;
use crate::github::token::PersonalAccessToken;

use super::GraphQlTransport;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;

/// Sends GraphQL documents to `<api_base>/graphql` through Octocrab.
pub struct OctocrabTransport {
    client: Octocrab,
}

impl OctocrabTransport {
    /// Creates a transport for the given token and API base URL.
    ///
    /// # Arguments
    ///
    /// * `token` - Personal access token for authentication.
    /// * `api_base` - Base URL for the GitHub API (e.g. `https://api.github.com`).
    ///
    /// # Errors
    ///
    /// Returns an error if the Octocrab client cannot be built.
    pub fn new(token: &PersonalAccessToken, api_base: &str) -> Result<Self, ReviewError> {
        let client = build_octocrab_client(token, api_base)?;
        Ok(Self { client })
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    data: Option<Value>,
    errors: Option<Vec<GraphQlErrorMessage>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: Option<String>,
}

impl GraphQlEnvelope {
    /// Surfaces GraphQL `errors` even when GitHub answered with HTTP 200.
    fn into_data(self) -> Result<Value, ReviewError> {
        let messages: Vec<String> = self
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(|error| error.message.unwrap_or_else(|| "unknown error".to_owned()))
            .collect();
        if !messages.is_empty() {
            return Err(ReviewError::Transport {
                message: messages.join("; "),
            });
        }
        self.data.ok_or_else(|| ReviewError::Transport {
            message: "GraphQL response contained no data".to_owned(),
        })
    }
}

#[async_trait]
impl GraphQlTransport for OctocrabTransport {
    async fn execute(&self, document: &str, variables: Value) -> Result<Value, ReviewError> {
        let payload = json!({ "query": document, "variables": variables });
        let envelope: GraphQlEnvelope = self
            .client
            .graphql(&payload)
            .await
            .map_err(|error| map_octocrab_error("GraphQL request", &error))?;
        envelope.into_data()
    }
}
