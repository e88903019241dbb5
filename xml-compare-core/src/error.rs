use thiserror::Error;

use crate::diff::DifferenceCode;
use crate::parser::ParseError;

/// Errors returned by the comparison engine and its collaborators.
#[derive(Debug, Error)]
pub enum CompareError {
    /// Source document could not be turned into a path table.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Path table could not be folded into a single tree.
    #[error("malformed path table: {0}")]
    MalformedTable(String),
    /// A configured value extractor is not a usable pattern.
    #[error("invalid value extractor for {path}: {reason}")]
    InvalidExtractor { path: String, reason: String },
    /// An extractor matched but its first capture group did not participate.
    #[error("value extractor for {path} matched {value:?} without capturing group 1")]
    ExtractorGroupMissing { path: String, value: String },
    /// Two padding slots were paired inside the assignment engine.
    #[error("sibling group {simple_path}: two absent slots cannot be paired")]
    AbsentPair { simple_path: String },
    /// A difference record was built from inconsistent parts.
    #[error("invalid difference record: {0}")]
    InvalidDifference(String),
    /// An omission list could not be read.
    #[error("failed to read omission list {path}: {source}")]
    OmitList {
        path: String,
        source: std::io::Error,
    },
}

impl CompareError {
    pub(crate) fn both_absent(code: DifferenceCode) -> Self {
        Self::InvalidDifference(format!("{code} requires at least one node"))
    }
}
