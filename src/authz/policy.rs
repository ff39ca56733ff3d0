//! Policy-service capabilities consumed by the authorization middleware.
//!
//! The policy service (JWT validation + RBAC/ABAC evaluation) is a black box.
//! It is split into two capabilities so a middleware can declare which one it
//! needs when it is wired, instead of probing the client per request.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Structured failure reported by the policy service itself
    /// (e.g. expired token → 401). Propagated as-is.
    #[error("{message}")]
    Service { status: StatusCode, message: String },

    /// The permitted set contained something other than a string.
    #[error("Element {value} is not a string")]
    NonStringElement { value: String },

    /// Anything without the structured shape (transport, decoding, ...).
    #[error("unexpected policy client failure: {0}")]
    Unexpected(String),
}

impl PolicyError {
    pub fn service(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    pub fn timed_out() -> Self {
        Self::service(StatusCode::SERVICE_UNAVAILABLE, "policy service timed out")
    }
}

/// Given a token, action and service, lists the resource paths the caller may act on.
#[async_trait]
pub trait ResourceListingPolicy: Send + Sync {
    async fn get_allowed_resources(
        &self,
        token: &str,
        action: &str,
        service: &str,
    ) -> Result<Vec<String>, PolicyError>;
}

/// Coarse, non-project-scoped check against a single resource path.
#[async_trait]
pub trait ServiceAccessPolicy: Send + Sync {
    async fn check_resource_service_access(
        &self,
        token: &str,
        action: &str,
        service: &str,
        resource_path: &str,
    ) -> Result<bool, PolicyError>;
}

/// Validates an untyped permitted set at the deserialization boundary.
pub fn coerce_resource_paths(values: Vec<serde_json::Value>) -> Result<Vec<String>, PolicyError> {
    values
        .into_iter()
        .map(|v| match v {
            serde_json::Value::String(s) => Ok(s),
            other => Err(PolicyError::NonStringElement {
                value: other.to_string(),
            }),
        })
        .collect()
}

/// Policy capabilities available to the router, plus the bound applied to
/// every policy call.
#[derive(Clone)]
pub struct PolicyClients {
    listing: Arc<dyn ResourceListingPolicy>,
    service_access: Option<Arc<dyn ServiceAccessPolicy>>,
    timeout: Duration,
}

impl std::fmt::Debug for PolicyClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyClients")
            .field("service_access", &self.service_access.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub const DEFAULT_POLICY_TIMEOUT: Duration = Duration::from_secs(10);

impl PolicyClients {
    /// Listing capability only.
    pub fn new(listing: Arc<dyn ResourceListingPolicy>) -> Self {
        Self {
            listing,
            service_access: None,
            timeout: DEFAULT_POLICY_TIMEOUT,
        }
    }

    /// A client that implements both capabilities.
    pub fn full<C>(client: Arc<C>) -> Self
    where
        C: ResourceListingPolicy + ServiceAccessPolicy + 'static,
    {
        Self::new(client.clone()).with_service_access(client)
    }

    pub fn with_service_access(mut self, service_access: Arc<dyn ServiceAccessPolicy>) -> Self {
        self.service_access = Some(service_access);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn service_access(&self) -> Option<&Arc<dyn ServiceAccessPolicy>> {
        self.service_access.as_ref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn allowed_resources(
        &self,
        token: &str,
        action: &str,
        service: &str,
    ) -> Result<Vec<String>, PolicyError> {
        bounded(
            self.timeout,
            self.listing.get_allowed_resources(token, action, service),
        )
        .await
    }
}

/// Runs a policy call under a deadline; expiry is a 503-class service error.
pub async fn bounded<T, F>(timeout: Duration, call: F) -> Result<T, PolicyError>
where
    F: Future<Output = Result<T, PolicyError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(PolicyError::timed_out()),
    }
}
