/*
 * Responsibility
 * - GET /dir: 呼び出し元が read できるプロジェクトの一覧
 * - GET /dir/{project_id}?dir=/a/b: プロジェクト配下のディレクトリ内容
 *   - 認可は ProjectAuth (route_layer) で済んでいる → AuthContext から resource path を受け取る
 *   - dir は validate_posix_sub_path で検証してからクエリに埋め込む
 */
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::HeaderMap,
};
use serde::Deserialize;

use crate::{
    authz::{resource_path::sub_path_segments, validate_posix_sub_path},
    error::AppError,
    middleware::{
        RequestLog,
        auth::{AuthContext, AuthError, bearer_token},
    },
    services::graph::{DirectoryListing, directory_query, project_paths, visible_projects_query},
    state::DirState,
};

const LIST_ACTION: &str = "read";
const LIST_SERVICE: &str = "*";

pub async fn list_projects(
    State(state): State<DirState>,
    headers: HeaderMap,
    log: RequestLog,
) -> Result<Json<Vec<String>>, AppError> {
    let rejected = |e: AuthError| {
        e.record(&log);
        AppError::from(e)
    };

    let token = bearer_token(&headers).map_err(rejected)?;
    let permitted = state
        .policy
        .allowed_resources(&token, LIST_ACTION, LIST_SERVICE)
        .await
        .map_err(|e| rejected(e.into()))?;

    let rows = state
        .graph
        .traverse(&visible_projects_query(&permitted))
        .await?;

    Ok(Json(project_paths(rows)))
}

#[derive(Debug, Deserialize)]
pub struct DirParams {
    pub dir: Option<String>,
}

pub async fn browse_dir(
    State(state): State<DirState>,
    Extension(ctx): Extension<AuthContext>,
    Query(params): Query<DirParams>,
    log: RequestLog,
) -> Result<Json<DirectoryListing>, AppError> {
    let dir = params
        .dir
        .filter(|d| validate_posix_sub_path(d))
        .ok_or_else(|| AppError::bad_request("Invalid or missing Directory path"))?;

    let segments = sub_path_segments(&dir);
    log.info(format!(
        "listing {dir} in {} ({} hops)",
        ctx.resource_path,
        segments.len()
    ));

    let rows = state
        .graph
        .traverse(&directory_query(&ctx.resource_path, &segments))
        .await?;

    Ok(Json(DirectoryListing::from_rows(rows)))
}
