use axum::http::StatusCode;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::services::{UpstreamError, join, with_trailing_slash};

/// Engine statuses that clients get to see; anything else becomes 500.
const PASSTHROUGH: [StatusCode; 5] = [
    StatusCode::BAD_REQUEST,
    StatusCode::UNAUTHORIZED,
    StatusCode::NOT_FOUND,
    StatusCode::CONFLICT,
    StatusCode::SERVICE_UNAVAILABLE,
];

pub fn map_engine_status(status: StatusCode) -> StatusCode {
    if PASSTHROUGH.contains(&status) {
        status
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    result: Value,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    status: ErrorStatus,
}

#[derive(Debug, Deserialize)]
struct ErrorStatus {
    error: String,
}

/// REST client for a Qdrant-compatible vector engine.
#[derive(Clone, Debug)]
pub struct VectorClient {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl VectorClient {
    pub fn new(http: Client, base_url: Url, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: with_trailing_slash(base_url),
            api_key,
        }
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, UpstreamError> {
        let url = join(&self.base_url, path)?;
        let builder = self.http.request(method, url);
        Ok(match &self.api_key {
            Some(key) => builder.header("api-key", key),
            None => builder,
        })
    }

    /// Sends the request and unwraps the engine's `{"result": ...}` envelope.
    /// `op` names the operation in error messages (`failed to {op}: ...`).
    async fn send(&self, op: &str, builder: RequestBuilder) -> Result<Value, UpstreamError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            let envelope: Envelope = response.json().await?;
            return Ok(envelope.result);
        }

        let text = response.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<ErrorEnvelope>(&text) {
            Ok(body) => body.status.error,
            Err(_) if !text.trim().is_empty() => text.trim().to_string(),
            Err(_) => status.canonical_reason().unwrap_or("engine error").to_string(),
        };

        tracing::warn!(%status, op, detail = %detail, "vector engine rejected request");
        Err(UpstreamError::status(
            map_engine_status(status),
            format!("failed to {op}: {detail}"),
        ))
    }

    pub async fn list_collections(&self) -> Result<Value, UpstreamError> {
        let req = self.request(Method::GET, "collections")?;
        self.send("list collections", req).await
    }

    pub async fn create_collection(&self, name: &str, body: &Value) -> Result<Value, UpstreamError> {
        let req = self
            .request(Method::PUT, &format!("collections/{name}"))?
            .json(body);
        self.send("create collection", req).await
    }

    pub async fn get_collection(&self, name: &str) -> Result<Value, UpstreamError> {
        let req = self.request(Method::GET, &format!("collections/{name}"))?;
        self.send("get collection info", req).await
    }

    pub async fn update_collection(&self, name: &str, body: &Value) -> Result<Value, UpstreamError> {
        let req = self
            .request(Method::PATCH, &format!("collections/{name}"))?
            .json(body);
        self.send("update collection", req).await
    }

    pub async fn delete_collection(&self, name: &str) -> Result<Value, UpstreamError> {
        let req = self.request(Method::DELETE, &format!("collections/{name}"))?;
        self.send("delete collection", req).await
    }

    pub async fn upsert_points(&self, collection: &str, body: &Value) -> Result<Value, UpstreamError> {
        let req = self
            .request(Method::PUT, &format!("collections/{collection}/points"))?
            .query(&[("wait", "true")])
            .json(body);
        self.send("upsert points", req).await
    }

    pub async fn get_point(&self, collection: &str, id: &str) -> Result<Value, UpstreamError> {
        let req = self.request(Method::GET, &format!("collections/{collection}/points/{id}"))?;
        self.send("get point", req).await
    }

    pub async fn query_points(&self, collection: &str, body: &Value) -> Result<Value, UpstreamError> {
        let req = self
            .request(Method::POST, &format!("collections/{collection}/points/query"))?
            .json(body);
        self.send("query points", req).await
    }

    pub async fn delete_points(&self, collection: &str, body: &Value) -> Result<Value, UpstreamError> {
        let req = self
            .request(Method::POST, &format!("collections/{collection}/points/delete"))?
            .query(&[("wait", "true")])
            .json(body);
        self.send("delete points", req).await
    }
}
