#![forbid(unsafe_code)]

mod error;
mod export;
mod merge;
mod summary;
pub mod text;

pub use error::ReportError;
pub use export::{GeneratedDocument, generate, output_file_name};
pub use merge::merge_pdfs;
pub use summary::{NOTES_HEADING, SUMMARY_TITLE, SummaryRequest, render_summary};
