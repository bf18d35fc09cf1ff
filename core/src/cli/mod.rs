use crate::types::{
    HarvestConfig, SequenceMode, DEFAULT_LOG_NAME, DEFAULT_MAX_BINARY_LENGTH, DEFAULT_OUTPUT_NAME,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for dcmharvest
#[derive(Parser, Debug)]
#[command(name = "dcmharvest")]
#[command(about = "Harvest DICOM metadata from a directory tree into one JSON document")]
#[command(version)]
pub struct Cli {
    /// Directory to scan (defaults to the directory holding this executable)
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Metadata document, relative to the root unless absolute
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_NAME)]
    pub output: PathBuf,

    /// Run log, relative to the root unless absolute
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_LOG_NAME)]
    pub log: PathBuf,

    /// Byte values longer than this are summarized
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_BINARY_LENGTH)]
    pub max_binary_length: usize,

    /// Rendering of sequence values
    #[arg(short, long, default_value = "summary")]
    pub sequences: SequenceArg,

    /// Candidate file extension, repeatable (defaults to dcm and dicom)
    #[arg(short = 'e', long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Maximum directory depth below the root
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Leave out the file meta group (0002,xxxx)
    #[arg(long)]
    pub no_file_meta: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Sequence rendering options
#[derive(Debug, Clone, ValueEnum)]
pub enum SequenceArg {
    /// Item count only
    Summary,
    /// Items rendered inline, recursively
    Expand,
}

impl From<SequenceArg> for SequenceMode {
    fn from(arg: SequenceArg) -> Self {
        match arg {
            SequenceArg::Summary => SequenceMode::Summary,
            SequenceArg::Expand => SequenceMode::Expand,
        }
    }
}

impl Cli {
    /// Builds the run configuration
    ///
    /// # Errors
    ///
    /// Fails only when no root was given and the executable's directory
    /// cannot be determined.
    pub fn into_config(self) -> std::io::Result<HarvestConfig> {
        let root = match self.root {
            Some(root) => root,
            None => HarvestConfig::default_root()?,
        };

        let mut config = HarvestConfig::new(root);
        if !self.extensions.is_empty() {
            config = config.with_extensions(&self.extensions);
        }

        Ok(config
            .with_output(&self.output)
            .with_log(&self.log)
            .with_max_depth(self.max_depth)
            .with_max_binary_length(self.max_binary_length)
            .with_sequence_mode(self.sequences.into())
            .include_file_meta(!self.no_file_meta))
    }
}
