#![forbid(unsafe_code)]

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("pdf encode: {0}")]
    Encode(String),
    #[error("pdf input #{part} is not a readable document: {source}")]
    InvalidInput {
        part: usize,
        #[source]
        source: lopdf::Error,
    },
    #[error("pdf input #{part} has no pages")]
    EmptyInput { part: usize },
}

impl ReportError {
    pub(crate) fn encode<E: std::fmt::Display>(err: E) -> Self {
        Self::Encode(err.to_string())
    }
}
