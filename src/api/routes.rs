/*
 * Responsibility
 * - URL 構造を定義
 * - /health, /config, /dir, /vector を merge (バックエンド未設定ならマウントしない)
 * - 認可が必要な範囲は route_layer で適用 (ProjectAuth / BaseConfigsAuth / ConfigAuth)
 */
use axum::{
    Router,
    routing::{get, post, put},
};

use crate::{
    api::handlers::{config, dir, health::health, not_found, vector},
    middleware::auth::{AuthError, BaseConfigsAuth, ConfigAuth, ProjectAuth},
    state::{AppState, DirState},
};

/// Fails when an authorization layer cannot be wired with the given policy clients.
pub fn routes(state: &AppState) -> Result<Router, AuthError> {
    let mut router = Router::new()
        .route("/health", get(health))
        .with_state(state.clone());

    match &state.config_store {
        Some(store) => {
            let list = BaseConfigsAuth::new(state.policy.clone(), "read", "*", "/programs")?.apply(
                Router::new().route("/config/{config_type}/list", get(config::list_configs)),
            );

            let docs = ConfigAuth::new(state.policy.clone()).apply(Router::new().route(
                "/config/{config_type}/{config_id}",
                get(config::get_config)
                    .put(config::put_config)
                    .delete(config::delete_config)
                    .fallback(config::unsupported_method),
            ));

            router = router.merge(list.merge(docs).with_state(store.clone()));
        }
        None => tracing::warn!("no config store configured; /config routes disabled"),
    }

    match &state.graph {
        Some(graph) => {
            let browse = ProjectAuth::new(state.policy.clone(), "read", "*")
                .apply(Router::new().route("/dir/{project_id}", get(dir::browse_dir)));

            let dir_routes = Router::new()
                .route("/dir", get(dir::list_projects))
                .merge(browse)
                .with_state(DirState {
                    graph: graph.clone(),
                    policy: state.policy.clone(),
                });

            router = router.merge(dir_routes);
        }
        None => tracing::warn!("no graph engine configured; /dir routes disabled"),
    }

    match &state.vector {
        Some(client) => {
            let collections = Router::new()
                .route("/vector/collections", get(vector::list_collections))
                .route(
                    "/vector/collections/{collection}",
                    put(vector::create_collection)
                        .get(vector::get_collection)
                        .patch(vector::update_collection)
                        .delete(vector::delete_collection),
                )
                .route(
                    "/vector/collections/{collection}/points",
                    put(vector::upsert_points),
                )
                .route(
                    "/vector/collections/{collection}/points/{id}",
                    get(vector::get_point),
                )
                .route(
                    "/vector/collections/{collection}/points/search",
                    post(vector::query_points),
                )
                .route(
                    "/vector/collections/{collection}/points/delete",
                    post(vector::delete_points),
                )
                .with_state(client.clone());

            router = router.merge(collections);
        }
        None => tracing::warn!("no vector engine configured; /vector routes disabled"),
    }

    Ok(router.fallback(not_found))
}
