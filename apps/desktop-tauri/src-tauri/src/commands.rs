#![forbid(unsafe_code)]

use crate::dto::*;
use crate::support::*;
use kf_app::{Session, read_attachment};
use kf_core::form::{CostFormValues, FieldError};
use kf_core::taxonomy::{CostType, TaxonomyAction};
use std::path::PathBuf;
use std::sync::Mutex;
use tauri::State;

type SessionState<'a> = State<'a, Mutex<Session>>;

#[tauri::command]
pub fn load_data(session: SessionState<'_>) -> Result<SessionDto, String> {
    let session = lock_session(&session);
    Ok(SessionDto {
        categories: session.taxonomy().clone(),
        form: session.form_defaults(),
        data_path: session.data_path().to_string_lossy().to_string(),
    })
}

#[tauri::command]
pub fn save_data(session: SessionState<'_>) -> SaveOutcomeDto {
    let outcome = lock_session(&session).save();
    SaveOutcomeDto {
        success: outcome.success,
        error: outcome.error,
    }
}

#[tauri::command]
pub fn taxonomy_get(session: SessionState<'_>) -> Result<kf_core::taxonomy::Taxonomy, String> {
    Ok(lock_session(&session).taxonomy().clone())
}

/// Deletes are only dispatched once the UI reports the user confirmed them.
#[tauri::command]
pub fn taxonomy_apply(
    session: SessionState<'_>,
    action: TaxonomyAction,
    confirmed: Option<bool>,
) -> Result<ApplyDto, String> {
    if action.is_destructive() && !confirmed.unwrap_or(false) {
        return Err(format!("CONFIRMATION_REQUIRED: {}", action.name()));
    }
    let mut session = lock_session(&session);
    Ok(match session.apply(&action) {
        Ok(state) => ApplyDto::Applied {
            categories: state.clone(),
        },
        Err(rejection) => ApplyDto::Rejected {
            code: rejection.code(),
            message: rejection.to_string(),
        },
    })
}

#[tauri::command]
pub fn form_options(
    session: SessionState<'_>,
    cost_type: CostType,
    group: Option<String>,
) -> Result<FormOptionsDto, String> {
    let session = lock_session(&session);
    let section = session.taxonomy().section(cost_type);
    let items = non_blank(group)
        .and_then(|group| section.group(&group).cloned())
        .unwrap_or_default();
    Ok(FormOptionsDto {
        groups: section.group_names().map(str::to_string).collect(),
        items,
    })
}

#[tauri::command]
pub fn form_validate(values: CostFormValues) -> Vec<FieldError> {
    values.validate().err().unwrap_or_default()
}

#[tauri::command]
pub fn cost_summary_export(
    session: SessionState<'_>,
    values: CostFormValues,
    attachment_path: Option<String>,
) -> Result<ExportDto, String> {
    let attachment = non_blank(attachment_path)
        .map(PathBuf::from)
        .and_then(|path| read_attachment(&path));
    let mut session = lock_session(&session);
    let submission = session
        .submit(&values, attachment)
        .map_err(app_err_to_string)?;
    Ok(ExportDto {
        path: submission.path.to_string_lossy().to_string(),
        file_name: submission.file_name,
        merged: submission.merged,
        next_form: submission.next_form,
    })
}
