use std::collections::HashMap;

use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::{Method, Request},
    middleware::{self, Next},
    response::Response,
};

use super::{AuthError, authorize_project, authorize_service_access, bearer_token};
use crate::authz::{PolicyClients, ResourcePath};
use crate::middleware::request_log::RequestLog;

/// Config type whose documents belong to a single project.
pub const PROJECT_SCOPED_CONFIG_TYPE: &str = "explorer";

const GLOBAL_CONFIG_RESOURCE: &str = "/programs";
const ANY_SERVICE: &str = "*";

/// Authorization for `/config/{config_type}/{config_id}`.
///
/// - `explorer` documents are keyed by `{program}-{project}` → project-scoped check.
/// - every other type is global → coarse check on `/programs`.
///
/// Read and write map to different actions (`GET`/`HEAD` → read, `PUT` → create,
/// `DELETE` → delete); other methods are rejected.
#[derive(Clone, Debug)]
pub struct ConfigAuth {
    policy: PolicyClients,
    global_resource: ResourcePath,
}

impl ConfigAuth {
    /// Without the service-access capability only project-scoped documents can
    /// be authorized; global types then fail closed per request.
    pub fn new(policy: PolicyClients) -> Self {
        if policy.service_access().is_none() {
            tracing::warn!(
                "config routes wired without coarse policy checks; global config types will be rejected"
            );
        }

        Self {
            policy,
            global_resource: ResourcePath::from_static(GLOBAL_CONFIG_RESOURCE),
        }
    }

    pub fn apply<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.route_layer(middleware::from_fn_with_state(self, config_auth))
    }
}

pub fn action_for(method: &Method) -> Result<&'static str, AuthError> {
    match *method {
        Method::GET | Method::HEAD => Ok("read"),
        Method::PUT => Ok("create"),
        Method::DELETE => Ok("delete"),
        _ => Err(AuthError::UnsupportedMethod(method.clone())),
    }
}

async fn config_auth(
    State(auth): State<ConfigAuth>,
    Path(params): Path<HashMap<String, String>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let log = RequestLog::of(&req);

    let token = match bearer_token(req.headers()) {
        Ok(token) => token,
        Err(err) => return err.reject(&log),
    };

    let action = match action_for(req.method()) {
        Ok(action) => action,
        Err(err) => return err.reject(&log),
    };

    let config_type = params.get("config_type").map(String::as_str).unwrap_or_default();
    let config_id = params.get("config_id").map(String::as_str).unwrap_or_default();

    let result = match (config_type, config_id) {
        ("", _) | (_, "") => Err(AuthError::UnresolvedResource),
        (PROJECT_SCOPED_CONFIG_TYPE, project_id) => {
            authorize_project(&auth.policy, &token, project_id, action, ANY_SERVICE).await
        }
        _ => {
            authorize_service_access(
                &auth.policy,
                &token,
                &auth.global_resource,
                action,
                ANY_SERVICE,
            )
            .await
        }
    };

    match result {
        Ok(ctx) => {
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
        Err(err) => err.reject(&log),
    }
}
