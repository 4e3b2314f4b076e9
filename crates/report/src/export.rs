#![forbid(unsafe_code)]

use crate::error::ReportError;
use crate::merge::merge_pdfs;
use crate::summary::{SummaryRequest, render_summary};
use tracing::{info, warn};

const FILE_PREFIX: &str = "koszt";
const PLACEHOLDER_NAME: &str = "dane";
const MERGED_SUFFIX: &str = "-z-faktura";

/// A finished export ready to be written wherever the user wants it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// True when the attachment pages were appended.
    pub merged: bool,
}

/// `koszt-<agreement>.pdf`, or `koszt-<agreement>-z-faktura.pdf` for merged output.
pub fn output_file_name(agreement_number: &str, merged: bool) -> String {
    let trimmed = agreement_number.trim();
    let stem = if trimmed.is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        trimmed
            .chars()
            .map(|ch| match ch {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                ch if ch.is_control() => '_',
                ch => ch,
            })
            .collect()
    };
    let suffix = if merged { MERGED_SUFFIX } else { "" };
    format!("{FILE_PREFIX}-{stem}{suffix}.pdf")
}

/// Renders the summary and appends the attachment when there is one.
///
/// A failed merge is logged and the summary alone is returned.
pub fn generate(request: &SummaryRequest) -> Result<GeneratedDocument, ReportError> {
    let summary = render_summary(request)?;
    let summary_only = |bytes| GeneratedDocument {
        file_name: output_file_name(&request.agreement_number, false),
        bytes,
        merged: false,
    };

    let Some(attachment) = request.attachment.as_deref() else {
        return Ok(summary_only(summary));
    };

    let merged = merge_pdfs(&[&summary, attachment]);
    match merged {
        Ok(bytes) => {
            info!(
                attachment_bytes = attachment.len(),
                "summary merged with attachment"
            );
            Ok(GeneratedDocument {
                file_name: output_file_name(&request.agreement_number, true),
                bytes,
                merged: true,
            })
        }
        Err(err) => {
            warn!(error = %err, "attachment merge failed, exporting summary only");
            Ok(summary_only(summary))
        }
    }
}
