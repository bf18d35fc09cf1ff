use std::path::PathBuf;
use thiserror::Error;

/// Result type for harvest runs
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Fatal environment errors
///
/// Any of these aborts the whole run. Per-file problems are reported
/// through [`ExtractError`] instead and never reach this type.
#[derive(Error, Debug)]
pub enum HarvestError {
    /// Root directory missing or not listable
    #[error("Root directory {path} is unreadable: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output document or log file could not be created
    #[error("Cannot create {path}: {source}")]
    CreateSink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to the run log failed
    #[error("Cannot write log: {0}")]
    WriteLog(#[source] std::io::Error),

    /// Writing the aggregate document failed
    #[error("Cannot write metadata document {path}: {source}")]
    WriteDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reporter used out of order
    #[error("Invalid run state: {0}")]
    InvalidState(String),
}

/// Per-file extraction failures
#[derive(Error, Debug)]
pub enum ExtractError {
    /// File does not carry the DICOM magic
    #[error("not a DICOM file: {0}")]
    NotDicom(String),

    /// Filesystem-level failure reading the candidate
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),

    /// File looked like DICOM but could not be decoded
    #[error("DICOM parse failed: {0}")]
    Parse(String),
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for ExtractError {
    fn from(e: dicom_object::ReadError) -> Self {
        ExtractError::Parse(format!("{}", e))
    }
}

/// A single tag value that could not be rendered as text
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct TagValueError(pub String);

impl From<dicom_core::value::ConvertValueError> for TagValueError {
    fn from(e: dicom_core::value::ConvertValueError) -> Self {
        TagValueError(format!("{}", e))
    }
}
