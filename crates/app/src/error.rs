#![forbid(unsafe_code)]

use kf_core::form::FieldError;
use kf_report::ReportError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("io: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("form has {} invalid field(s)", .0.len())]
    InvalidForm(Vec<FieldError>),
}
