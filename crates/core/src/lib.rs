#![forbid(unsafe_code)]

mod app_data;
pub mod form;
pub mod taxonomy;

pub use app_data::{AppData, DATA_FILE_NAME};
