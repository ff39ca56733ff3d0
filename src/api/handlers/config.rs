/*
 * Responsibility
 * - /config/{config_type}/list, /config/{config_type}/{config_id} の CRUD handler
 * - 認可は ConfigAuth / BaseConfigsAuth (route_layer) で済んでいる前提
 * - body は config_type ごとの型で検証してから保存
 */
use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
};
use serde::Serialize;
use serde_json::Value;

use crate::{
    configs::{ConfigDocument, ConfigType},
    error::AppError,
    middleware::{
        RequestLog,
        auth::{AuthError, bearer_token},
    },
    repos::{ConfigStore, RepoError},
};

pub type Store = Arc<dyn ConfigStore>;

#[derive(Debug, Serialize, PartialEq)]
pub struct Ack {
    pub code: u16,
    pub message: String,
}

impl Ack {
    fn ok(message: String) -> Json<Self> {
        Json(Self {
            code: StatusCode::OK.as_u16(),
            message,
        })
    }
}

fn parse_type(raw: &str) -> Result<ConfigType, AppError> {
    raw.parse::<ConfigType>()
        .map_err(|e| AppError::bad_request(e.to_string()))
}

pub async fn list_configs(
    State(store): State<Store>,
    Path(config_type): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let ids = store.list(&config_type).await?;
    if ids.is_empty() {
        return Err(AppError::not_found(format!(
            "No configs found for type: {config_type}"
        )));
    }
    Ok(Json(ids))
}

pub async fn get_config(
    State(store): State<Store>,
    Path((config_type, config_id)): Path<(String, String)>,
) -> Result<Json<ConfigDocument>, AppError> {
    let kind = parse_type(&config_type)?;
    let not_found = || {
        AppError::not_found(format!(
            "no config found with configId: {config_id} of type: {config_type}"
        ))
    };

    let stored = store.get(&config_type, &config_id).await?.ok_or_else(not_found)?;
    let doc = ConfigDocument::from_value(kind, stored).map_err(RepoError::from)?;

    // An empty document is reported as absent.
    if doc.is_zero() {
        return Err(not_found());
    }
    Ok(Json(doc))
}

pub async fn put_config(
    State(store): State<Store>,
    Path((config_type, config_id)): Path<(String, String)>,
    log: RequestLog,
    body: Bytes,
) -> Result<Json<Ack>, AppError> {
    let kind = parse_type(&config_type)?;

    let raw: Value =
        serde_json::from_slice(&body).map_err(|_| AppError::bad_request("Invalid JSON format"))?;
    let doc = ConfigDocument::from_value(kind, raw)
        .map_err(|e| AppError::bad_request(format!("body data unmarshal failed: {e}")))?;

    let content = doc.to_value().map_err(RepoError::from)?;
    store.put(&config_type, &config_id, &content).await?;

    log.info(format!("stored config {config_id} of type {config_type}"));
    Ok(Ack::ok(format!(
        "ACCEPTED: {config_id} for type: {config_type}"
    )))
}

pub async fn delete_config(
    State(store): State<Store>,
    Path((config_type, config_id)): Path<(String, String)>,
    log: RequestLog,
) -> Result<Json<Ack>, AppError> {
    if !store.delete(&config_type, &config_id).await? {
        return Err(AppError::not_found(format!(
            "no configId found with configId: {config_id} in type: {config_type}"
        )));
    }

    log.info(format!("deleted config {config_id} of type {config_type}"));
    Ok(Ack::ok(format!(
        "DELETED: {config_id} from type: {config_type}"
    )))
}

/// Method fallback for the document route; the token is still checked first.
pub async fn unsupported_method(method: Method, headers: HeaderMap, log: RequestLog) -> AppError {
    let err = match bearer_token(&headers) {
        Err(missing) => missing,
        Ok(_) => AuthError::UnsupportedMethod(method),
    };
    err.record(&log);
    err.into()
}
