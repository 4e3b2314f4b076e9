#![forbid(unsafe_code)]

use crate::taxonomy::{CostType, Taxonomy, group_label, resolve_label};
use serde::{Deserialize, Serialize};

/// Raw cost form as filled in by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostFormValues {
    pub project_name: String,
    pub agreement_number: String,
    pub cost_type: Option<CostType>,
    /// Only read when `cost_type` is DIRECT.
    pub direct_group: Option<String>,
    /// Only read when `cost_type` is INDIRECT.
    pub indirect_group: Option<String>,
    pub cost_category: String,
    pub notes: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    ProjectName,
    AgreementNumber,
    CostType,
    CostCategory,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProjectName => "projectName",
            Self::AgreementNumber => "agreementNumber",
            Self::CostType => "costType",
            Self::CostCategory => "costCategory",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

/// A form that passed validation; every required field is present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedCostForm {
    pub project_name: String,
    pub agreement_number: String,
    pub cost_type: CostType,
    pub group: Option<String>,
    pub cost_category: String,
    pub notes: Option<String>,
}

impl ValidatedCostForm {
    pub fn group_label(&self) -> String {
        group_label(self.group.as_deref())
    }

    pub fn category_label(&self, taxonomy: &Taxonomy) -> String {
        match self.group.as_deref() {
            Some(group) => resolve_label(taxonomy, self.cost_type, group, &self.cost_category),
            None => group_label(None),
        }
    }
}

impl CostFormValues {
    pub fn selected_group(&self) -> Option<&str> {
        let group = match self.cost_type? {
            CostType::Direct => self.direct_group.as_deref(),
            CostType::Indirect => self.indirect_group.as_deref(),
        };
        group.map(str::trim).filter(|group| !group.is_empty())
    }

    /// Collects one error per invalid field, in form order.
    pub fn validate(&self) -> Result<ValidatedCostForm, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut require = |value: &str, field: FormField, message: &'static str| {
            if value.trim().is_empty() {
                errors.push(FieldError { field, message });
            }
        };
        require(
            &self.project_name,
            FormField::ProjectName,
            "Wpisz nazwę projektu",
        );
        require(
            &self.agreement_number,
            FormField::AgreementNumber,
            "Wpisz numer umowy",
        );
        if self.cost_type.is_none() {
            errors.push(FieldError {
                field: FormField::CostType,
                message: "Wybierz rodzaj kosztu",
            });
        }
        if self.cost_category.trim().is_empty() {
            errors.push(FieldError {
                field: FormField::CostCategory,
                message: "Wybierz kategorię",
            });
        }

        let Some(cost_type) = self.cost_type else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidatedCostForm {
            project_name: self.project_name.trim().to_string(),
            agreement_number: self.agreement_number.trim().to_string(),
            cost_type,
            group: self.selected_group().map(str::to_string),
            cost_category: self.cost_category.trim().to_string(),
            notes: self
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|notes| !notes.is_empty())
                .map(str::to_string),
        })
    }

    /// Blank form that keeps the project name and agreement number.
    pub fn reset_after_submit(&self) -> Self {
        Self {
            project_name: self.project_name.clone(),
            agreement_number: self.agreement_number.clone(),
            ..Self::default()
        }
    }
}
