#![forbid(unsafe_code)]

mod config;
mod error;
mod logging;
mod session;

pub use config::*;
pub use error::AppError;
pub use logging::init_logging;
pub use session::{Session, Submission, read_attachment};
