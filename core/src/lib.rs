pub mod api;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod extraction;
pub mod report;
pub mod types;

#[cfg(test)]
mod testing;

pub use api::{extract_file, DicomExtractor};
pub use cli::Cli;
pub use discovery::{Discovered, Discoverer};
pub use error::{ExtractError, HarvestError, Result, TagValueError};
pub use report::{harvest, Reporter, RunCounts, RunSummary, TextReport};
pub use types::*;
