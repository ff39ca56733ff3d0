use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::policy::{PolicyError, ResourceListingPolicy, ServiceAccessPolicy, coerce_resource_paths};

/// Policy-service client speaking the arborist-style HTTP API.
///
/// - `POST /auth/resources` → `{"resources": [...]}` (permitted set)
/// - `POST /auth/request`   → `{"auth": bool}` (coarse check)
///
/// Non-2xx answers keep their status and message (structured errors);
/// transport and decoding failures are reported as `PolicyError::Unexpected`.
#[derive(Clone, Debug)]
pub struct ArboristClient {
    http: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct ResourcesResponse {
    #[serde(default)]
    resources: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct AuthRequestResponse {
    auth: bool,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: ServiceErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorDetail {
    message: String,
}

impl ArboristClient {
    pub fn new(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn endpoint(&self, path: &str) -> Result<Url, PolicyError> {
        self.base_url
            .join(path)
            .map_err(|e| PolicyError::Unexpected(format!("invalid policy endpoint {path}: {e}")))
    }

    async fn post(
        &self,
        path: &str,
        token: &str,
        body: serde_json::Value,
    ) -> Result<reqwest::Response, PolicyError> {
        let url = self.endpoint(path)?;
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| PolicyError::Unexpected(e.to_string()))?;

        if response.status().is_success() {
            return Ok(response);
        }
        Err(service_error(response).await)
    }
}

async fn service_error(response: reqwest::Response) -> PolicyError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ServiceErrorBody>(&text) {
        Ok(body) => body.error.message,
        Err(_) if !text.trim().is_empty() => text.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("policy service error")
            .to_string(),
    };

    PolicyError::Service { status, message }
}

#[async_trait]
impl ResourceListingPolicy for ArboristClient {
    async fn get_allowed_resources(
        &self,
        token: &str,
        action: &str,
        service: &str,
    ) -> Result<Vec<String>, PolicyError> {
        let response = self
            .post(
                "auth/resources",
                token,
                json!({ "method": action, "service": service }),
            )
            .await?;

        let body: ResourcesResponse = response
            .json()
            .await
            .map_err(|e| PolicyError::Unexpected(e.to_string()))?;

        coerce_resource_paths(body.resources)
    }
}

#[async_trait]
impl ServiceAccessPolicy for ArboristClient {
    async fn check_resource_service_access(
        &self,
        token: &str,
        action: &str,
        service: &str,
        resource_path: &str,
    ) -> Result<bool, PolicyError> {
        let response = self
            .post(
                "auth/request",
                token,
                json!({
                    "requests": [{
                        "resource": resource_path,
                        "action": { "service": service, "method": action },
                    }]
                }),
            )
            .await?;

        let body: AuthRequestResponse = response
            .json()
            .await
            .map_err(|e| PolicyError::Unexpected(e.to_string()))?;

        Ok(body.auth)
    }
}
