use serde::{Deserialize, Serialize};

use super::Configurable;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppCard {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub href: String,
    pub perms: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct AppsConfig {
    pub app_cards: Vec<AppCard>,
}

impl Configurable for AppsConfig {
    fn is_zero(&self) -> bool {
        self.app_cards.is_empty()
    }
}
