//! Authorization middleware: bearer token → policy service → allow / reject.
//!
//! Every variant runs its checks in the same order and stops at the first
//! failure:
//! 1. bearer token present (400 otherwise)
//! 2. target resource path derivable from the route (404 otherwise)
//! 3. policy service consulted (its own status, or the unstructured-fault status)
//! 4. decision applied (403 on denial)
//!
//! On success an `AuthContext` is placed in request extensions for the handler.

mod base_configs;
mod config;
mod project;

pub use base_configs::BaseConfigsAuth;
pub use config::ConfigAuth;
pub use project::ProjectAuth;

use axum::{
    http::{HeaderMap, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::authz::{
    AccessDecision, Denial, MalformedIdentifier, PolicyClients, PolicyError, ResourcePath, decide,
    derive_project_path, policy::bounded,
};
use crate::error::{AppError, error_response};
use crate::middleware::request_log::RequestLog;

/// Status used for policy failures that lack the structured `{status, message}` shape.
/// Kept for compatibility with existing clients; 500 would be the more accurate choice.
pub const UNSTRUCTURED_POLICY_FAULT_STATUS: StatusCode = StatusCode::NOT_FOUND;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization token not provided")]
    MissingToken,

    #[error("Failed to parse project id: incorrect path {input}")]
    MalformedIdentifier { input: String },

    #[error("Could not determine resource path for authorization")]
    UnresolvedResource,

    #[error("{message}")]
    Policy { status: StatusCode, message: String },

    #[error("expecting error to be serverError type")]
    UnexpectedPolicyFault { detail: String },

    #[error("Element {value} is not a string")]
    NonStringElement { value: String },

    #[error("{0}")]
    AccessDenied(Denial),

    #[error("User does not have required {action} permission on resource {resource}")]
    ServiceAccessDenied { action: String, resource: String },

    #[error("Internal server error: invalid policy-client configuration")]
    MisconfiguredPolicyClient,

    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(Method),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::UnresolvedResource => StatusCode::BAD_REQUEST,
            // 404 rather than 400 for a malformed project id; existing clients rely on it.
            AuthError::MalformedIdentifier { .. } => StatusCode::NOT_FOUND,
            AuthError::Policy { status, .. } => *status,
            AuthError::UnexpectedPolicyFault { .. } => UNSTRUCTURED_POLICY_FAULT_STATUS,
            AuthError::NonStringElement { .. } | AuthError::MisconfiguredPolicyClient => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AuthError::AccessDenied(_) | AuthError::ServiceAccessDenied { .. } => {
                StatusCode::FORBIDDEN
            }
            AuthError::UnsupportedMethod(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Records the rejection into the request's log buffer.
    pub fn record(&self, log: &RequestLog) {
        match self {
            AuthError::UnexpectedPolicyFault { detail } => {
                log.error(format!("policy client returned an unstructured error: {detail}"));
            }
            other if other.status().is_server_error() => log.error(other.to_string()),
            other => log.info(other.to_string()),
        }
    }

    /// Records the rejection, then renders it.
    pub fn reject(self, log: &RequestLog) -> Response {
        self.record(log);
        self.into_response()
    }
}

impl From<MalformedIdentifier> for AuthError {
    fn from(e: MalformedIdentifier) -> Self {
        AuthError::MalformedIdentifier { input: e.input }
    }
}

impl From<PolicyError> for AuthError {
    fn from(e: PolicyError) -> Self {
        match e {
            PolicyError::Service { status, message } => AuthError::Policy { status, message },
            PolicyError::NonStringElement { value } => AuthError::NonStringElement { value },
            PolicyError::Unexpected(detail) => AuthError::UnexpectedPolicyFault { detail },
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        error_response(self.status(), self.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::with_status(e.status(), e.to_string())
    }
}

/// Request-local authorization state handed to the terminal handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub token: String,
    pub resource_path: ResourcePath,
    pub action: String,
    pub service: String,
}

/// `Authorization: Bearer <token>` → `<token>`. A header without the scheme is
/// passed through as the raw token; the scheme alone carries no token.
pub fn bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or_default();

    let token = match raw.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        None if raw.eq_ignore_ascii_case("bearer") => "",
        _ => raw,
    };

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token.to_string())
}

/// Project-scoped check: derive the path, fetch the permitted set, decide.
pub async fn authorize_project(
    policy: &PolicyClients,
    token: &str,
    composite_id: &str,
    action: &str,
    service: &str,
) -> Result<AuthContext, AuthError> {
    let resource_path = derive_project_path(composite_id)?;

    let permitted = policy.allowed_resources(token, action, service).await?;

    match decide(&permitted, &resource_path, action) {
        AccessDecision::Allowed => Ok(AuthContext {
            token: token.to_string(),
            resource_path,
            action: action.to_string(),
            service: service.to_string(),
        }),
        AccessDecision::Denied(denial) => Err(AuthError::AccessDenied(denial)),
    }
}

/// Coarse check against a fixed resource path. Fails closed when the
/// service-access capability was not wired.
pub async fn authorize_service_access(
    policy: &PolicyClients,
    token: &str,
    resource: &ResourcePath,
    action: &str,
    service: &str,
) -> Result<AuthContext, AuthError> {
    let checker = policy
        .service_access()
        .ok_or(AuthError::MisconfiguredPolicyClient)?;

    let allowed = bounded(
        policy.timeout(),
        checker.check_resource_service_access(token, action, service, resource.as_str()),
    )
    .await?;

    if !allowed {
        return Err(AuthError::ServiceAccessDenied {
            action: action.to_string(),
            resource: resource.to_string(),
        });
    }

    Ok(AuthContext {
        token: token.to_string(),
        resource_path: resource.clone(),
        action: action.to_string(),
        service: service.to_string(),
    })
}
