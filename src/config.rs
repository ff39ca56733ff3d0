/*
 * Responsibility
 * - 環境変数や設定の読み込み (POLICY_SERVICE_URL, DATABASE_URL, QDRANT_URL, GRIP_URL など)
 * - 設定値のバリデーション (必須が欠けていれば起動失敗)
 * - 任意バックエンドは未設定なら None (ルートを出さないだけ)
 */
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::authz::policy::DEFAULT_POLICY_TIMEOUT;
use crate::middleware::PipelineSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub policy_service_url: Url,
    pub policy_timeout: Duration,

    pub database_url: Option<String>,

    pub qdrant_url: Option<Url>,
    pub qdrant_api_key: Option<String>,

    pub grip_url: Option<Url>,
    pub grip_graph: Option<String>,

    pub request_timeout: Duration,
    pub request_body_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port: u16 = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8080,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env = AppEnv::parse(get("APP_ENV").as_deref());

        let policy_service_url = get("POLICY_SERVICE_URL")
            .ok_or(ConfigError::Missing("POLICY_SERVICE_URL"))
            .and_then(|raw| parse_url(&raw, "POLICY_SERVICE_URL"))?;

        let policy_timeout = seconds(get("POLICY_TIMEOUT_SECONDS"), "POLICY_TIMEOUT_SECONDS")?
            .unwrap_or(DEFAULT_POLICY_TIMEOUT);

        let database_url = get("DATABASE_URL");

        let qdrant_url = get("QDRANT_URL")
            .map(|raw| parse_url(&raw, "QDRANT_URL"))
            .transpose()?;
        let qdrant_api_key = get("QDRANT_API_KEY");

        let grip_url = get("GRIP_URL")
            .map(|raw| parse_url(&raw, "GRIP_URL"))
            .transpose()?;
        let grip_graph = get("GRIP_GRAPH");

        let defaults = PipelineSettings::default();
        let request_timeout = seconds(get("REQUEST_TIMEOUT_SECONDS"), "REQUEST_TIMEOUT_SECONDS")?
            .unwrap_or(defaults.timeout);
        let request_body_limit = match get("REQUEST_BODY_LIMIT_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES"))?,
            None => defaults.body_limit,
        };

        Ok(Self {
            addr,
            app_env,
            policy_service_url,
            policy_timeout,
            database_url,
            qdrant_url,
            qdrant_api_key,
            grip_url,
            grip_graph,
            request_timeout,
            request_body_limit,
        })
    }

    pub fn pipeline(&self) -> PipelineSettings {
        PipelineSettings {
            timeout: self.request_timeout,
            body_limit: self.request_body_limit,
        }
    }
}

fn parse_url(raw: &str, key: &'static str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|_| ConfigError::Invalid(key))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::Invalid(key)),
    }
}

/// Positive whole seconds.
fn seconds(raw: Option<String>, key: &'static str) -> Result<Option<Duration>, ConfigError> {
    raw.map(|v| match v.parse::<u64>() {
        Ok(n) if n > 0 => Ok(Duration::from_secs(n)),
        _ => Err(ConfigError::Invalid(key)),
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn policy_url_is_required() {
        assert_eq!(
            load(&[]).unwrap_err(),
            ConfigError::Missing("POLICY_SERVICE_URL")
        );
    }

    #[test]
    fn defaults_apply() {
        let config = load(&[("POLICY_SERVICE_URL", "http://arborist-service")]).unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.policy_timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.request_body_limit, 1024 * 1024);
        assert!(config.database_url.is_none());
        assert!(config.qdrant_url.is_none());
        assert!(config.grip_graph.is_none());
    }

    #[test]
    fn blank_optional_values_are_unset() {
        let config = load(&[
            ("POLICY_SERVICE_URL", "http://arborist-service"),
            ("DATABASE_URL", "  "),
            ("APP_ENV", "PROD"),
        ])
        .unwrap();
        assert!(config.database_url.is_none());
        assert!(config.app_env.is_production());
    }

    #[test]
    fn rejects_bad_values() {
        let base = ("POLICY_SERVICE_URL", "http://arborist-service");
        assert_eq!(
            load(&[base, ("PORT", "eighty")]).unwrap_err(),
            ConfigError::Invalid("PORT")
        );
        assert_eq!(
            load(&[base, ("POLICY_TIMEOUT_SECONDS", "0")]).unwrap_err(),
            ConfigError::Invalid("POLICY_TIMEOUT_SECONDS")
        );
        assert_eq!(
            load(&[base, ("QDRANT_URL", "qdrant:6333")]).unwrap_err(),
            ConfigError::Invalid("QDRANT_URL")
        );
        assert_eq!(
            load(&[("POLICY_SERVICE_URL", "not a url")]).unwrap_err(),
            ConfigError::Invalid("POLICY_SERVICE_URL")
        );
    }
}
