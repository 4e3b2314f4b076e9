#![forbid(unsafe_code)]

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Group name that receives the flat item list of a legacy `INDIRECT` section.
pub const FALLBACK_INDIRECT_GROUP: &str = "PODSTAWOWE";

/// Label returned for any lookup that cannot be resolved.
pub const MISSING_LABEL: &str = "-";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostType {
    #[serde(rename = "DIRECT")]
    Direct,
    #[serde(rename = "INDIRECT")]
    Indirect,
}

impl CostType {
    pub const ALL: [CostType; 2] = [CostType::Direct, CostType::Indirect];

    pub fn as_str(self) -> &'static str {
        match self {
            CostType::Direct => "DIRECT",
            CostType::Indirect => "INDIRECT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "DIRECT" => Some(CostType::Direct),
            "INDIRECT" => Some(CostType::Indirect),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryItem {
    pub id: String,
    pub label: String,
}

impl CategoryItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

pub type Group = Vec<CategoryItem>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySection {
    pub label: String,
    pub groups: IndexMap<String, Group>,
}

impl CategorySection {
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// First item with `id` in `group`; duplicate ids resolve to the earliest entry.
    pub fn find_item(&self, group: &str, id: &str) -> Option<&CategoryItem> {
        self.groups.get(group)?.iter().find(|item| item.id == id)
    }
}

/// Canonical two-section category tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    #[serde(rename = "DIRECT")]
    pub direct: CategorySection,
    #[serde(rename = "INDIRECT")]
    pub indirect: CategorySection,
}

impl Taxonomy {
    pub fn section(&self, cost_type: CostType) -> &CategorySection {
        match cost_type {
            CostType::Direct => &self.direct,
            CostType::Indirect => &self.indirect,
        }
    }

    pub fn section_mut(&mut self, cost_type: CostType) -> &mut CategorySection {
        match cost_type {
            CostType::Direct => &mut self.direct,
            CostType::Indirect => &mut self.indirect,
        }
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        super::default_taxonomy()
    }
}
