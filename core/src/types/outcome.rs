use super::record::FileResult;
use crate::error::ExtractError;

/// Result of one extraction attempt
///
/// Expected per-file outcomes are plain values here. The reporter
/// dispatches on the variant; nothing in this type aborts a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// File parsed; records in header order
    Extracted(FileResult),

    /// File is not a DICOM container
    Skipped(String),

    /// File looked eligible but could not be read or decoded
    Errored(String),
}

impl From<ExtractError> for Extraction {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::NotDicom(reason) => Extraction::Skipped(reason),
            other => Extraction::Errored(other.to_string()),
        }
    }
}

impl From<Result<FileResult, ExtractError>> for Extraction {
    fn from(result: Result<FileResult, ExtractError>) -> Self {
        match result {
            Ok(records) => Extraction::Extracted(records),
            Err(e) => e.into(),
        }
    }
}
