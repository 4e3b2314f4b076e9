#![forbid(unsafe_code)]

use super::defaults::{
    DIRECT_LABEL, INDIRECT_LABEL, default_direct_section, default_indirect_section,
    default_taxonomy,
};
use super::model::{CategoryItem, CategorySection, FALLBACK_INDIRECT_GROUP, Group, Taxonomy};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Shapes a single section has been persisted in.
///
/// `Grouped` is the current layout. `Legacy` covers the historical flat
/// `{ label, items: [...] }` layout, and any object that lacks a usable
/// `groups` mapping. `Absent` is everything that is not an object at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PersistedSection {
    Grouped {
        label: Option<String>,
        groups: IndexMap<String, Group>,
    },
    Legacy {
        label: Option<String>,
        items: Group,
    },
    Absent,
}

impl PersistedSection {
    pub fn classify(value: Option<&Value>) -> Self {
        let Some(Value::Object(section)) = value else {
            return Self::Absent;
        };
        let label = section
            .get("label")
            .and_then(Value::as_str)
            .map(str::to_string);

        match section.get("groups") {
            Some(Value::Object(groups)) => Self::Grouped {
                label,
                groups: parse_groups(groups),
            },
            _ => Self::Legacy {
                label,
                items: section.get("items").map(parse_items).unwrap_or_default(),
            },
        }
    }

    fn into_direct(self) -> CategorySection {
        match self {
            Self::Grouped { label, groups } => CategorySection {
                label: label.unwrap_or_else(|| DIRECT_LABEL.to_string()),
                groups,
            },
            // Direct costs never had a flat layout; a missing `groups` takes the seed groups.
            Self::Legacy { label, .. } => CategorySection {
                label: label.unwrap_or_else(|| DIRECT_LABEL.to_string()),
                groups: default_direct_section().groups,
            },
            Self::Absent => default_direct_section(),
        }
    }

    fn into_indirect(self) -> CategorySection {
        match self {
            Self::Grouped { label, groups } => CategorySection {
                label: label.unwrap_or_else(|| INDIRECT_LABEL.to_string()),
                groups,
            },
            Self::Legacy { label, items } => {
                let mut groups = IndexMap::new();
                groups.insert(FALLBACK_INDIRECT_GROUP.to_string(), items);
                CategorySection {
                    label: label.unwrap_or_else(|| INDIRECT_LABEL.to_string()),
                    groups,
                }
            }
            Self::Absent => default_indirect_section(),
        }
    }
}

/// Heals any persisted `categories` value into the canonical taxonomy.
///
/// Never fails. `None` and `null` yield the default taxonomy; every other
/// input is repaired section by section against the defaults.
pub fn normalize(raw: Option<&Value>) -> Taxonomy {
    let root = match raw {
        None | Some(Value::Null) => return default_taxonomy(),
        Some(Value::Object(root)) => Some(root),
        Some(_) => None,
    };

    let direct = PersistedSection::classify(root.and_then(|root| root.get("DIRECT")));
    let indirect = PersistedSection::classify(root.and_then(|root| root.get("INDIRECT")));

    Taxonomy {
        direct: direct.into_direct(),
        indirect: indirect.into_indirect(),
    }
}

fn parse_groups(groups: &Map<String, Value>) -> IndexMap<String, Group> {
    groups
        .iter()
        .map(|(name, items)| (name.clone(), parse_items(items)))
        .collect()
}

fn parse_items(value: &Value) -> Group {
    let Value::Array(entries) = value else {
        return Vec::new();
    };
    entries.iter().filter_map(parse_item).collect()
}

fn parse_item(value: &Value) -> Option<CategoryItem> {
    let entry = value.as_object()?;
    let id = scalar_text(entry.get("id")?)?;
    let label = scalar_text(entry.get("label")?)?;
    Some(CategoryItem { id, label })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
