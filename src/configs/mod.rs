/*
 * Responsibility
 * - フロントエンド設定ドキュメントの型定義 (explorer / nav / file_summary / apps_page / footer)
 * - config_type 文字列 → 型付きドキュメントへの変換
 * - 未知フィールドは拒否 (deny_unknown_fields)
 */
pub mod apps_page;
pub mod explorer;
pub mod file_summary;
pub mod footer;
pub mod nav;

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

pub use apps_page::AppsConfig;
pub use explorer::ExplorerConfig;
pub use file_summary::FileSummaryConfig;
pub use footer::FooterProps;
pub use nav::NavPageLayoutProps;

/// A stored document that may be "effectively empty".
/// An empty document is reported to clients as absent.
pub trait Configurable: Serialize + DeserializeOwned {
    fn is_zero(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigType {
    Explorer,
    Nav,
    FileSummary,
    AppsPage,
    Footer,
}

impl ConfigType {
    pub const ALL: [ConfigType; 5] = [
        ConfigType::Explorer,
        ConfigType::Nav,
        ConfigType::FileSummary,
        ConfigType::AppsPage,
        ConfigType::Footer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigType::Explorer => "explorer",
            ConfigType::Nav => "nav",
            ConfigType::FileSummary => "file_summary",
            ConfigType::AppsPage => "apps_page",
            ConfigType::Footer => "footer",
        }
    }
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown config type: {0}")]
pub struct UnknownConfigType(pub String);

impl FromStr for ConfigType {
    type Err = UnknownConfigType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownConfigType(s.to_string()))
    }
}

/// A document decoded into the struct matching its type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigDocument {
    Explorer(ExplorerConfig),
    Nav(NavPageLayoutProps),
    FileSummary(FileSummaryConfig),
    AppsPage(AppsConfig),
    Footer(FooterProps),
}

impl ConfigDocument {
    pub fn from_value(config_type: ConfigType, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match config_type {
            ConfigType::Explorer => Self::Explorer(serde_json::from_value(value)?),
            ConfigType::Nav => Self::Nav(serde_json::from_value(value)?),
            ConfigType::FileSummary => Self::FileSummary(serde_json::from_value(value)?),
            ConfigType::AppsPage => Self::AppsPage(serde_json::from_value(value)?),
            ConfigType::Footer => Self::Footer(serde_json::from_value(value)?),
        })
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Explorer(doc) => doc.is_zero(),
            Self::Nav(doc) => doc.is_zero(),
            Self::FileSummary(doc) => doc.is_zero(),
            Self::AppsPage(doc) => doc.is_zero(),
            Self::Footer(doc) => doc.is_zero(),
        }
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

pub(crate) fn is_false(b: &bool) -> bool {
    !*b
}

pub(crate) fn is_zero_i64(n: &i64) -> bool {
    *n == 0
}

pub(crate) fn is_zero_f64(n: &f64) -> bool {
    *n == 0.0
}
