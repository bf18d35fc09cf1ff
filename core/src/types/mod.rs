//! Core type definitions for metadata harvesting
//!
//! This module provides the fundamental types used throughout the dcmharvest library:
//! - [`MetadataRecord`]: One extracted tag (identifier, keyword, rendered value)
//! - [`AggregateDocument`]: Ordered mapping from file path to its records
//! - [`Extraction`]: Outcome of one extraction attempt
//! - [`HarvestConfig`]: Explicit configuration of a run
//! - [`SequenceMode`]: Rendering of nested sequence values

mod config;
mod document;
mod enums;
mod outcome;
mod record;

pub use config::{
    ExtractOptions, HarvestConfig, DEFAULT_EXTENSIONS, DEFAULT_LOG_NAME,
    DEFAULT_MAX_BINARY_LENGTH, DEFAULT_OUTPUT_NAME,
};
pub use document::AggregateDocument;
pub use enums::{RunPhase, SequenceMode};
pub use outcome::Extraction;
pub use record::{FileResult, MetadataRecord, TagId};
