/*
 * Responsibility
 * - GET /health (疎通用)
 * - config store があれば ping して DB 疎通も確認
 */
use axum::{Json, extract::State};

use crate::{error::AppError, middleware::RequestLog, state::AppState};

pub async fn health(
    State(state): State<AppState>,
    log: RequestLog,
) -> Result<Json<&'static str>, AppError> {
    if let Some(store) = &state.config_store {
        if let Err(e) = store.ping().await {
            log.error(format!("database ping failed: {e}"));
            return Err(AppError::internal("database unavailable"));
        }
    }

    log.info("health check passed");
    Ok(Json("Healthy"))
}
