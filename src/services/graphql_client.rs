//! Thin NerdGraph transport: POST a query, unwrap the GraphQL envelope.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphQlError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("upstream GraphQL errors: {}", join_messages(.0))]
    Upstream(Vec<GraphQlErrorEntry>),
    #[error("upstream response had no data")]
    MissingData,
    #[error("could not decode upstream data: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type GraphQlResult<T> = Result<T, GraphQlError>;

/// A top-level entry of the GraphQL `errors` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlErrorEntry {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

fn join_messages(errors: &[GraphQlErrorEntry]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct GraphQlEnvelope {
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorEntry>>,
}

/// Client for a single GraphQL endpoint authenticated with an `API-Key` header.
#[derive(Clone)]
pub struct GraphQlClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GraphQlClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> GraphQlResult<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Send `query` and decode its `data` member into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, query: &str) -> GraphQlResult<T> {
        tracing::debug!(endpoint = %self.endpoint, "Sending GraphQL request");

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("API-Key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&GraphQlRequest { query })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "GraphQL endpoint returned an error status");
            return Err(GraphQlError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let envelope: GraphQlEnvelope = serde_json::from_slice(&body)?;
        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            tracing::warn!(count = errors.len(), "GraphQL response carried errors");
            return Err(GraphQlError::Upstream(errors));
        }

        let data = envelope.data.ok_or(GraphQlError::MissingData)?;
        Ok(serde_json::from_value(data)?)
    }
}
