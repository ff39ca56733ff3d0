/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - policy: 認可クライアント, config_store / graph / vector: 任意のバックエンド
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - 未設定のバックエンドは None → 対応するルートはマウントしない
 */
use std::sync::Arc;

use crate::authz::PolicyClients;
use crate::repos::ConfigStore;
use crate::services::{GraphClient, VectorClient};

#[derive(Clone)]
pub struct AppState {
    pub policy: PolicyClients,
    pub config_store: Option<Arc<dyn ConfigStore>>,
    pub graph: Option<GraphClient>,
    pub vector: Option<VectorClient>,
}

impl AppState {
    pub fn new(policy: PolicyClients) -> Self {
        Self {
            policy,
            config_store: None,
            graph: None,
            vector: None,
        }
    }

    pub fn with_config_store(mut self, store: Arc<dyn ConfigStore>) -> Self {
        self.config_store = Some(store);
        self
    }

    pub fn with_graph(mut self, graph: GraphClient) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn with_vector(mut self, vector: VectorClient) -> Self {
        self.vector = Some(vector);
        self
    }
}

/// State of the directory routes: listing projects needs the policy service too.
#[derive(Clone, Debug)]
pub struct DirState {
    pub graph: GraphClient,
    pub policy: PolicyClients,
}
