use std::collections::HashMap;

use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use super::{AuthError, authorize_project, bearer_token};
use crate::authz::PolicyClients;
use crate::middleware::request_log::RequestLog;

/// Project-scoped authorization for routes carrying a `{program}-{project}` id.
///
/// ```ignore
/// let dir = Router::new().route("/dir/{project_id}", get(handle_dir_get));
/// let dir = ProjectAuth::new(policy, "read", "*").apply(dir);
/// ```
#[derive(Clone, Debug)]
pub struct ProjectAuth {
    policy: PolicyClients,
    action: &'static str,
    service: &'static str,
    param: &'static str,
}

impl ProjectAuth {
    pub fn new(policy: PolicyClients, action: &'static str, service: &'static str) -> Self {
        Self {
            policy,
            action,
            service,
            param: "project_id",
        }
    }

    /// Route parameter holding the composite id (default: `project_id`).
    pub fn with_param(mut self, param: &'static str) -> Self {
        self.param = param;
        self
    }

    pub fn apply<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.route_layer(middleware::from_fn_with_state(self, project_auth))
    }
}

async fn project_auth(
    State(auth): State<ProjectAuth>,
    Path(params): Path<HashMap<String, String>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let log = RequestLog::of(&req);

    let token = match bearer_token(req.headers()) {
        Ok(token) => token,
        Err(err) => return err.reject(&log),
    };

    let Some(composite_id) = params.get(auth.param) else {
        return AuthError::UnresolvedResource.reject(&log);
    };

    let ctx = match authorize_project(
        &auth.policy,
        &token,
        composite_id,
        auth.action,
        auth.service,
    )
    .await
    {
        Ok(ctx) => ctx,
        Err(err) => return err.reject(&log),
    };

    log.info(format!(
        "authorized {} on {} (service {})",
        ctx.action, ctx.resource_path, ctx.service
    ));
    req.extensions_mut().insert(ctx);

    next.run(req).await
}
