/*
 * Responsibility
 * - /vector/collections 配下の handler (ベクトルエンジンへのプロキシ)
 * - リクエスト body の検証 → adapter でエンジン形式へ変換 → VectorClient
 */
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    error::AppError,
    services::vector::{
        CreateCollectionRequest, DeletePointsRequest, QueryPointsRequest, ScoredPoint,
        UpsertRequest, VectorClient, simplify_query_result,
    },
};

fn parse_body<T: DeserializeOwned>(body: &Bytes, message: &'static str) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "rejected vector request body");
        AppError::bad_request(message)
    })
}

fn done() -> Json<Value> {
    Json(json!({ "result": true }))
}

pub async fn list_collections(State(client): State<VectorClient>) -> Result<Json<Value>, AppError> {
    let result = client.list_collections().await?;
    Ok(Json(json!({ "result": result, "status": "ok" })))
}

pub async fn create_collection(
    State(client): State<VectorClient>,
    Path(collection): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let req: CreateCollectionRequest = parse_body(&body, "invalid request body")?;
    let engine_body = req
        .to_engine()
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    client.create_collection(&collection, &engine_body).await?;
    Ok(done())
}

pub async fn get_collection(
    State(client): State<VectorClient>,
    Path(collection): Path<String>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(client.get_collection(&collection).await?))
}

pub async fn update_collection(
    State(client): State<VectorClient>,
    Path(collection): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let update: serde_json::Map<String, Value> = parse_body(&body, "invalid request body")?;

    client
        .update_collection(&collection, &Value::Object(update))
        .await?;
    Ok(done())
}

pub async fn delete_collection(
    State(client): State<VectorClient>,
    Path(collection): Path<String>,
) -> Result<Json<Value>, AppError> {
    client.delete_collection(&collection).await?;
    Ok(done())
}

pub async fn upsert_points(
    State(client): State<VectorClient>,
    Path(collection): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let req: UpsertRequest = parse_body(&body, "invalid request body")?;
    let engine_body = req
        .to_engine()
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    Ok(Json(client.upsert_points(&collection, &engine_body).await?))
}

pub async fn get_point(
    State(client): State<VectorClient>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    Uuid::parse_str(&id).map_err(|_| AppError::bad_request("invalid UUID"))?;

    let point = client.get_point(&collection, &id).await?;
    if point.is_null() {
        return Err(AppError::not_found("point not found"));
    }
    Ok(Json(point))
}

pub async fn query_points(
    State(client): State<VectorClient>,
    Path(collection): Path<String>,
    body: Bytes,
) -> Result<Json<Vec<ScoredPoint>>, AppError> {
    let req: QueryPointsRequest = parse_body(&body, "invalid request body format")?;
    let engine_body = req
        .to_engine()
        .map_err(|e| AppError::bad_request(format!("invalid query parameter: {e}")))?;

    let result = client.query_points(&collection, &engine_body).await?;
    Ok(Json(simplify_query_result(&result)))
}

pub async fn delete_points(
    State(client): State<VectorClient>,
    Path(collection): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let req: DeletePointsRequest = parse_body(&body, "invalid request body")?;

    client.delete_points(&collection, &req.to_engine()).await?;
    Ok(done())
}
