//! Site footer layout. Also embedded in the `nav` document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Configurable, is_false};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylingMergeMode {
    Replace,
    Merge,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct StylingOverrideWithMergeControl {
    pub root: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub layout: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_mode: Option<StylingMergeMode>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub navigation_panel: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub button: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub item: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Gen3ff,
    Portal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BottomLink {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ColumnLinkItem {
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_type: Option<LinkType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnLinks {
    pub heading: String,
    pub items: Vec<ColumnLinkItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FooterText {
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub class_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FooterLink {
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub class_name: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_type: Option<LinkType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FooterLinks {
    pub links: Vec<FooterLink>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub class_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FooterLogo {
    #[serde(rename = "logolight")]
    pub logo_light: String,
    pub logo: String,
    pub description: String,
    pub width: i64,
    pub height: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub class_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub href: String,
}

/// One footer row; serialized as a single-key object, e.g. `{"Icon": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FooterRow {
    Icon(FooterLogo),
    Text(FooterText),
    Link(FooterLink),
    Links(FooterLinks),
    Section(FooterSectionProps),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FooterColumnProps {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub heading: String,
    pub rows: Vec<FooterRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_names: Option<StylingOverrideWithMergeControl>,
    #[serde(skip_serializing_if = "is_false")]
    pub base_page: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FooterSectionProps {
    pub columns: Vec<FooterColumnProps>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub class_name: String,
    #[serde(skip_serializing_if = "is_false")]
    pub base_page: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FooterProps {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bottom_links: Vec<BottomLink>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub column_links: Vec<ColumnLinks>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub footer_logos: Vec<FooterLogo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub footer_right_logos: Vec<FooterLogo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_section: Option<FooterSectionProps>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_section: Option<FooterSectionProps>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_names: Option<StylingOverrideWithMergeControl>,
    /// Opaque front-end component; stored as given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_footer: Option<Value>,
    #[serde(skip_serializing_if = "is_false")]
    pub base_page: bool,
}

impl Configurable for FooterProps {
    fn is_zero(&self) -> bool {
        self.bottom_links.is_empty() && self.column_links.is_empty() && self.right_section.is_none()
    }
}
