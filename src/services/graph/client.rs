use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use url::Url;

use super::query::Query;
use crate::services::{UpstreamError, join, with_trailing_slash};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub gid: String,
    pub label: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// One row of a traversal result.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub vertex: Option<Vertex>,
    #[serde(default)]
    pub render: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct StreamLine {
    #[serde(default)]
    result: Option<QueryResult>,
    #[serde(default)]
    error: Option<StreamError>,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    #[serde(default)]
    message: String,
}

/// Client for the graph engine's REST traversal endpoint.
#[derive(Clone, Debug)]
pub struct GraphClient {
    http: Client,
    base_url: Url,
    graph: String,
}

impl GraphClient {
    pub fn new(http: Client, base_url: Url, graph: impl Into<String>) -> Self {
        Self {
            http,
            base_url: with_trailing_slash(base_url),
            graph: graph.into(),
        }
    }

    pub fn graph(&self) -> &str {
        &self.graph
    }

    pub async fn traverse(&self, query: &Query) -> Result<Vec<QueryResult>, UpstreamError> {
        let url = join(&self.base_url, &format!("v1/graph/{}/query", self.graph))?;

        let response = self
            .http
            .post(url)
            .json(&json!({ "query": query.statements() }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("graph engine error").to_string()
            } else {
                body.trim().to_string()
            };
            return Err(UpstreamError::status(status, message));
        }

        parse_stream(&body)
    }
}

/// Newline-delimited `{"result": ...}` objects; an `{"error": ...}` line aborts.
fn parse_stream(body: &str) -> Result<Vec<QueryResult>, UpstreamError> {
    let mut results = Vec::new();

    for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let parsed: StreamLine =
            serde_json::from_str(line).map_err(|e| UpstreamError::Decode(e.to_string()))?;

        if let Some(err) = parsed.error {
            return Err(UpstreamError::Transport(format!(
                "graph traversal failed: {}",
                err.message
            )));
        }
        if let Some(result) = parsed.result {
            results.push(result);
        }
    }

    Ok(results)
}
