use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use super::{AuthError, authorize_service_access, bearer_token};
use crate::authz::{PolicyClients, ResourcePath};
use crate::middleware::request_log::RequestLog;

/// Coarse authorization against a fixed resource path (e.g. `/programs`),
/// for actions that are not project-scoped.
#[derive(Clone, Debug)]
pub struct BaseConfigsAuth {
    policy: PolicyClients,
    action: &'static str,
    service: &'static str,
    resource: ResourcePath,
}

impl BaseConfigsAuth {
    /// Fails when the policy clients were wired without the service-access capability.
    pub fn new(
        policy: PolicyClients,
        action: &'static str,
        service: &'static str,
        resource: &'static str,
    ) -> Result<Self, AuthError> {
        if policy.service_access().is_none() {
            return Err(AuthError::MisconfiguredPolicyClient);
        }

        Ok(Self {
            policy,
            action,
            service,
            resource: ResourcePath::from_static(resource),
        })
    }

    pub fn apply<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.route_layer(middleware::from_fn_with_state(self, base_configs_auth))
    }
}

async fn base_configs_auth(
    State(auth): State<BaseConfigsAuth>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let log = RequestLog::of(&req);

    let token = match bearer_token(req.headers()) {
        Ok(token) => token,
        Err(err) => return err.reject(&log),
    };

    match authorize_service_access(
        &auth.policy,
        &token,
        &auth.resource,
        auth.action,
        auth.service,
    )
    .await
    {
        Ok(ctx) => {
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
        Err(err) => err.reject(&log),
    }
}
