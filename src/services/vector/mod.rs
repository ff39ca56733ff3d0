/*
 * Responsibility
 * - ベクトル検索エンジン (Qdrant 互換 REST) への薄いプロキシ
 * - クライアント向け DTO ↔ エンジンの JSON 変換とバリデーション
 */
pub mod adapter;
pub mod client;

pub use adapter::{
    CreateCollectionRequest, DeletePointsRequest, QueryPointsRequest, ScoredPoint, UpsertRequest,
    VectorRequestError, simplify_query_result,
};
pub use client::VectorClient;
