//! Data explorer page: one tab per indexed data type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Configurable, is_false, is_zero_i64};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ExplorerConfig {
    pub shared_filters: SharedFiltersConfig,
    pub explorer_config: Vec<ConfigItem>,
}

impl Configurable for ExplorerConfig {
    fn is_zero(&self) -> bool {
        self.explorer_config.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SharedFiltersConfig {
    pub defined: BTreeMap<String, Vec<FilterPair>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterPair {
    pub index: String,
    pub field: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ConfigItem {
    pub tab_title: String,
    pub guppy_config: GuppyConfig,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub charts: BTreeMap<String, Chart>,
    pub filters: FiltersConfig,
    pub table: TableConfig,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub dropdowns: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<ButtonConfig>,
    #[serde(skip_serializing_if = "is_false")]
    pub login_for_download: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct GuppyConfig {
    pub data_type: String,
    pub node_count_title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_mapping: Vec<GuppyFieldMapping>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub accessible_field_check_list: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub accessible_validation_field: String,
    pub manifest_mapping: ManifestMapping,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuppyFieldMapping {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ManifestMapping {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_index_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_id_field: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reference_id_field_in_resource_index: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reference_id_field_in_data_index: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Chart {
    pub chart_type: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FiltersConfig {
    pub tabs: Vec<FilterTab>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FilterTab {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields_config: BTreeMap<String, FieldConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FieldConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub data_field: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub index: String,
    pub label: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TableConfig {
    pub enabled: bool,
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub columns: BTreeMap<String, TableColumnsConfig>,
    pub details_config: TableDetailsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryTableColumnType {
    String,
    Number,
    Date,
    Array,
    Link,
    Boolean,
    Paragraphs,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TableColumnsConfig {
    pub field: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub accessor_path: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SummaryTableColumnType>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cell_render_function: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "is_zero_i64")]
    pub width: i64,
    #[serde(skip_serializing_if = "is_false")]
    pub sortable: bool,
    // sic: the front end reads this spelling
    #[serde(skip_serializing_if = "is_false")]
    pub visable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TableDetailsConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub panel: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mode: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id_field: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub filter_field: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub node_type: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub node_fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ButtonConfig {
    #[serde(skip_serializing_if = "is_false")]
    pub enabled: bool,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub action: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub left_icon: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub right_icon: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub file_name: String,
    pub action_args: ButtonActionArgs,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ButtonActionArgs {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_index_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_id_field: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reference_id_field_in_data_index: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reference_id_field_in_resource_index: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file_fields: Vec<String>,
}
