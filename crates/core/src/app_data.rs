#![forbid(unsafe_code)]

use crate::taxonomy::{Taxonomy, default_taxonomy, normalize};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DATA_FILE_NAME: &str = "app-data.json";

/// Everything the application keeps between sessions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    pub categories: Taxonomy,
    #[serde(default)]
    pub last_project_name: String,
    #[serde(default)]
    pub last_agreement_number: String,
    /// Carried through load/save; nothing edits it yet.
    #[serde(default)]
    pub project_names: Vec<String>,
}

impl AppData {
    /// Lenient decode of a loaded blob. `categories` goes through [`normalize`];
    /// other fields fall back to empty values when missing or mistyped.
    pub fn from_raw(raw: &Value) -> Self {
        let text = |key: &str| {
            raw.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let project_names = raw
            .get("projectNames")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            categories: normalize(raw.get("categories")),
            last_project_name: text("lastProjectName"),
            last_agreement_number: text("lastAgreementNumber"),
            project_names,
        }
    }
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            categories: default_taxonomy(),
            last_project_name: String::new(),
            last_agreement_number: String::new(),
            project_names: Vec::new(),
        }
    }
}
