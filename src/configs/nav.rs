//! Page chrome: header, navigation bar and the embedded footer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::footer::{FooterProps, StylingOverrideWithMergeControl};
use super::{Configurable, is_false, is_zero_f64};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct NavigationButtonProps {
    pub icon: String,
    pub tooltip: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_base_path: Option<bool>,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon_height: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_names: Option<StylingOverrideWithMergeControl>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct NavigationBarLogo {
    pub src: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "is_zero_f64")]
    pub width: f64,
    #[serde(skip_serializing_if = "is_zero_f64")]
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_base_path: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divider: Option<bool>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub base_path: String,
    pub href: String,
    /// Client-side callback; kept opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_toggle: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basepage: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_names: Option<StylingOverrideWithMergeControl>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct NavigationProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<NavigationBarLogo>,
    pub items: Vec<NavigationButtonProps>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Element or icon name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_icon: Option<Value>,
    pub class_names: Option<StylingOverrideWithMergeControl>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LeftNavBarProps {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub href: String,
    /// String or null.
    pub perms: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TopBarItemClassNames {
    pub button: String,
    pub label: String,
    pub root: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TopBarItem {
    pub class_names: TopBarItemClassNames,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TopBarProps {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<TopBarItem>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub login_button_visibility: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct HeaderProps {
    pub top_bar: TopBarProps,
    pub navigation: NavigationProps,
    #[serde(rename = "leftnav")]
    pub left_nav: Vec<LeftNavBarProps>,
    #[serde(skip_serializing_if = "is_false")]
    pub base_page: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderMetadata {
    pub title: String,
    pub content: String,
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct NavPageLayoutProps {
    pub header_props: HeaderProps,
    pub footer_props: FooterProps,
    pub header_metadata: HeaderMetadata,
}

impl Configurable for NavPageLayoutProps {
    fn is_zero(&self) -> bool {
        let footer_columns = self
            .footer_props
            .right_section
            .as_ref()
            .map_or(0, |section| section.columns.len());

        self.header_props.left_nav.is_empty() && footer_columns == 0
    }
}
