#![forbid(unsafe_code)]

use kf_core::form::CostFormValues;
use kf_core::taxonomy::{CategoryItem, Taxonomy};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct SessionDto {
    pub categories: Taxonomy,
    pub form: CostFormValues,
    pub data_path: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SaveOutcomeDto {
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ApplyDto {
    Applied { categories: Taxonomy },
    Rejected { code: &'static str, message: String },
}

#[derive(Clone, Debug, Serialize)]
pub struct FormOptionsDto {
    pub groups: Vec<String>,
    pub items: Vec<CategoryItem>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExportDto {
    pub path: String,
    pub file_name: String,
    pub merged: bool,
    pub next_form: CostFormValues,
}
