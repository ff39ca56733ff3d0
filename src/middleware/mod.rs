/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - auth: 認可 (project / base configs / config)
 * - http: 横断的な layer 群, request_log: リクエスト単位のログバッファ
 */
pub mod auth;
pub mod http;
pub mod request_log;

pub use auth::{AuthContext, AuthError, BaseConfigsAuth, ConfigAuth, ProjectAuth};
pub use http::PipelineSettings;
pub use request_log::{LogSink, RequestLog, TracingSink};
