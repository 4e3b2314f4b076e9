#![forbid(unsafe_code)]

use super::model::{CostType, MISSING_LABEL, Taxonomy};

/// Display label of `item_id` in `taxonomy[cost_type].groups[group]`, or `"-"`.
pub fn resolve_label(
    taxonomy: &Taxonomy,
    cost_type: CostType,
    group: &str,
    item_id: &str,
) -> String {
    taxonomy
        .section(cost_type)
        .find_item(group, item_id)
        .map(|item| item.label.clone())
        .unwrap_or_else(|| MISSING_LABEL.to_string())
}

pub fn group_label(group: Option<&str>) -> String {
    match group.map(str::trim) {
        Some(group) if !group.is_empty() => group.to_string(),
        _ => MISSING_LABEL.to_string(),
    }
}
