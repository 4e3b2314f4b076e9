#![forbid(unsafe_code)]

use kf_app::{AppError, Session};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub fn lock_session(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn app_err_to_string(err: AppError) -> String {
    match err {
        AppError::InvalidForm(errors) => {
            let fields = errors
                .iter()
                .map(|err| format!("{}: {}", err.field.as_str(), err.message))
                .collect::<Vec<_>>()
                .join("; ");
            format!("INVALID_FORM: {fields}")
        }
        AppError::Io { .. } => format!("IO: {err}"),
        other => other.to_string(),
    }
}

pub fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
