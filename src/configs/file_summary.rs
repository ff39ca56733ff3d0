use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Configurable;
use super::explorer::TableColumnsConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FileSummaryConfig {
    pub config: BTreeMap<String, TableColumnsConfig>,
    pub bar_chart_color: String,
    pub default_project: String,
    pub binslice_points: Vec<i64>,
    pub id_field: String,
    pub index: String,
}

impl Configurable for FileSummaryConfig {
    fn is_zero(&self) -> bool {
        self.config.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn column_type_is_omitted_when_unset() {
        let doc: FileSummaryConfig = serde_json::from_value(json!({
            "config": {
                "file_name": { "field": "file_name", "title": "File Name" },
                "size": { "field": "size", "title": "Size", "type": "number" }
            },
            "barChartColor": "#0e7490",
            "defaultProject": "ohsu-test",
            "binslicePoints": [10, 20, 50],
            "idField": "id",
            "index": "file"
        }))
        .unwrap();

        assert!(!doc.is_zero());
        let out = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            out["config"]["file_name"],
            json!({ "field": "file_name", "title": "File Name" })
        );
        assert_eq!(out["config"]["size"]["type"], "number");
    }
}
