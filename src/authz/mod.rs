/*
 * Responsibility
 * - 認可のコア: ResourcePath の導出、許可/拒否の判定、policy service の capability 定義
 * - HTTP (axum) への依存は middleware::auth 側に置く
 */
pub mod arborist;
pub mod decision;
pub mod policy;
pub mod resource_path;

pub use arborist::ArboristClient;
pub use decision::{AccessDecision, Denial, DenialReason, decide};
pub use policy::{
    PolicyClients, PolicyError, ResourceListingPolicy, ServiceAccessPolicy, coerce_resource_paths,
};
pub use resource_path::{
    MalformedIdentifier, ResourcePath, derive_project_path, validate_posix_sub_path,
};
