/*
 * Responsibility
 * - グラフエンジン (traversal API) のクライアント
 * - プロジェクト一覧 / ディレクトリ階層の探索クエリ組み立て
 */
pub mod client;
pub mod directory;
pub mod query;

pub use client::{GraphClient, QueryResult, Vertex};
pub use directory::{DirectoryListing, directory_query, project_paths, visible_projects_query};
pub use query::{Condition, Query};
