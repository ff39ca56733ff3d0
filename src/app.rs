/*
 * Responsibility
 * - Config読み込み → tracing 初期化 → 依存生成 (policy / config store / graph / vector)
 * - Router 組み立て + Middleware の適用 (http pipeline, 末尾スラッシュ正規化)
 * - axum::serve() で起動 (SIGINT / SIGTERM で graceful shutdown)
 */
use std::sync::Arc;

use anyhow::Result;
use axum::{Router, ServiceExt, extract::Request};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tracing_subscriber::EnvFilter;

use crate::{
    api,
    authz::{ArboristClient, PolicyClients},
    config::{AppEnv, Config},
    middleware::{self, AuthError, LogSink, PipelineSettings, TracingSink},
    repos::PgConfigStore,
    services::{GraphClient, VectorClient, with_trailing_slash},
    state::AppState,
};

pub type App = NormalizePath<Router>;

pub async fn run() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.app_env);

    let state = build_state(&config).await?;
    let app = build_app(&state, config.pipeline(), Arc::new(TracingSink))?;

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "gecko gateway listening");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Routes + pipeline, wrapped in trailing-slash normalisation (which must see
/// the request before routing does).
pub fn build_app(
    state: &AppState,
    settings: PipelineSettings,
    sink: Arc<dyn LogSink>,
) -> Result<App, AuthError> {
    let router = api::routes(state)?;
    let router = middleware::http::apply(router, settings, sink);
    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}

/// Optional backends that are unset or unreachable are skipped with a warning.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let http = reqwest::Client::builder().build()?;

    let arborist = ArboristClient::new(
        http.clone(),
        with_trailing_slash(config.policy_service_url.clone()),
    );
    let policy = PolicyClients::full(Arc::new(arborist)).with_timeout(config.policy_timeout);
    let mut state = AppState::new(policy);

    match &config.database_url {
        Some(url) => match PgConfigStore::connect(url).await {
            Ok(store) => {
                tracing::info!("connected to config store");
                state = state.with_config_store(Arc::new(store));
            }
            Err(e) => tracing::warn!(error = %e, "config store unavailable"),
        },
        None => tracing::warn!("DATABASE_URL not set"),
    }

    match (&config.grip_url, &config.grip_graph) {
        (Some(url), Some(graph)) => {
            state = state.with_graph(GraphClient::new(http.clone(), url.clone(), graph.clone()));
        }
        _ => tracing::warn!("GRIP_URL / GRIP_GRAPH not set"),
    }

    match &config.qdrant_url {
        Some(url) => {
            state = state.with_vector(VectorClient::new(
                http.clone(),
                url.clone(),
                config.qdrant_api_key.clone(),
            ));
        }
        None => tracing::warn!("QDRANT_URL not set"),
    }

    Ok(state)
}

fn init_tracing(app_env: AppEnv) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gecko_gateway=info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = if app_env.is_production() {
        builder.json().try_init()
    } else {
        builder.pretty().try_init()
    };
    if let Err(e) = installed {
        eprintln!("tracing subscriber already installed: {e}");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
