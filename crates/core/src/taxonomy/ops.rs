#![forbid(unsafe_code)]

use super::model::{CategoryItem, CostType, Taxonomy};
use serde::{Deserialize, Serialize};

/// Why an admin action left the taxonomy unchanged.
///
/// The display text is shown to the user as-is.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Nazwa grupy nie może być pusta")]
    BlankGroupName,
    #[error("Grupa o tej nazwie już istnieje!")]
    GroupExists { group: String },
    #[error("Nazwa kategorii nie może być pusta")]
    BlankLabel,
    #[error("Nie znaleziono grupy \"{group}\"")]
    UnknownGroup { group: String },
    #[error("Nie znaleziono kategorii \"{id}\" w grupie \"{group}\"")]
    UnknownItem { group: String, id: String },
}

impl Rejection {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BlankGroupName => "BLANK_GROUP_NAME",
            Self::GroupExists { .. } => "GROUP_EXISTS",
            Self::BlankLabel => "BLANK_LABEL",
            Self::UnknownGroup { .. } => "UNKNOWN_GROUP",
            Self::UnknownItem { .. } => "UNKNOWN_ITEM",
        }
    }
}

/// One admin-view action over the taxonomy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaxonomyAction {
    AddGroup {
        section: CostType,
        name: String,
    },
    DeleteGroup {
        section: CostType,
        name: String,
    },
    AddItem {
        section: CostType,
        group: String,
        label: String,
    },
    EditItem {
        section: CostType,
        group: String,
        item_id: String,
        label: String,
    },
    DeleteItem {
        section: CostType,
        group: String,
        item_id: String,
    },
}

impl TaxonomyAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddGroup { .. } => "add_group",
            Self::DeleteGroup { .. } => "delete_group",
            Self::AddItem { .. } => "add_item",
            Self::EditItem { .. } => "edit_item",
            Self::DeleteItem { .. } => "delete_item",
        }
    }

    /// Actions that drop data and must be confirmed by the user first.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::DeleteGroup { .. } | Self::DeleteItem { .. })
    }
}

/// Applies `action` to `state`, producing the next state.
pub fn reduce(state: &Taxonomy, action: &TaxonomyAction) -> Result<Taxonomy, Rejection> {
    match action {
        TaxonomyAction::AddGroup { section, name } => add_group(state, *section, name),
        TaxonomyAction::DeleteGroup { section, name } => delete_group(state, *section, name),
        TaxonomyAction::AddItem {
            section,
            group,
            label,
        } => add_item(state, *section, group, label),
        TaxonomyAction::EditItem {
            section,
            group,
            item_id,
            label,
        } => edit_item(state, *section, group, item_id, label),
        TaxonomyAction::DeleteItem {
            section,
            group,
            item_id,
        } => delete_item(state, *section, group, item_id),
    }
}

pub fn add_group(state: &Taxonomy, section: CostType, name: &str) -> Result<Taxonomy, Rejection> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Rejection::BlankGroupName);
    }
    if state.section(section).groups.contains_key(name) {
        return Err(Rejection::GroupExists {
            group: name.to_string(),
        });
    }

    let mut next = state.clone();
    next.section_mut(section)
        .groups
        .insert(name.to_string(), Vec::new());
    Ok(next)
}

pub fn delete_group(
    state: &Taxonomy,
    section: CostType,
    name: &str,
) -> Result<Taxonomy, Rejection> {
    if !state.section(section).groups.contains_key(name) {
        return Err(unknown_group(name));
    }

    let mut next = state.clone();
    // shift_remove keeps the remaining groups in display order.
    next.section_mut(section).groups.shift_remove(name);
    Ok(next)
}

pub fn add_item(
    state: &Taxonomy,
    section: CostType,
    group: &str,
    label: &str,
) -> Result<Taxonomy, Rejection> {
    let label = label.trim();
    if label.is_empty() {
        return Err(Rejection::BlankLabel);
    }

    let mut next = state.clone();
    let items = next
        .section_mut(section)
        .groups
        .get_mut(group)
        .ok_or_else(|| unknown_group(group))?;
    let id = synthesize_item_id(group, items.len());
    items.push(CategoryItem::new(id, label));
    Ok(next)
}

/// Replaces the label of the first item with `item_id`.
///
/// The label is trimmed the same way `add_item` trims it; a blank label is kept.
pub fn edit_item(
    state: &Taxonomy,
    section: CostType,
    group: &str,
    item_id: &str,
    label: &str,
) -> Result<Taxonomy, Rejection> {
    let mut next = state.clone();
    let items = next
        .section_mut(section)
        .groups
        .get_mut(group)
        .ok_or_else(|| unknown_group(group))?;
    let item = items
        .iter_mut()
        .find(|item| item.id == item_id)
        .ok_or_else(|| unknown_item(group, item_id))?;
    item.label = label.trim().to_string();
    Ok(next)
}

pub fn delete_item(
    state: &Taxonomy,
    section: CostType,
    group: &str,
    item_id: &str,
) -> Result<Taxonomy, Rejection> {
    let mut next = state.clone();
    let items = next
        .section_mut(section)
        .groups
        .get_mut(group)
        .ok_or_else(|| unknown_group(group))?;
    let before = items.len();
    items.retain(|item| item.id != item_id);
    if items.len() == before {
        return Err(unknown_item(group, item_id));
    }
    Ok(next)
}

/// `<first letter of group>.<position>`; ids may repeat after deletions.
pub fn synthesize_item_id(group: &str, existing: usize) -> String {
    let prefix = group.chars().next().map(String::from).unwrap_or_default();
    format!("{prefix}.{}", existing + 1)
}

fn unknown_group(group: &str) -> Rejection {
    Rejection::UnknownGroup {
        group: group.to_string(),
    }
}

fn unknown_item(group: &str, id: &str) -> Rejection {
    Rejection::UnknownItem {
        group: group.to_string(),
        id: id.to_string(),
    }
}
