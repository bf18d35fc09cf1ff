use super::enums::SequenceMode;
use std::path::{Path, PathBuf};

/// Default file name of the aggregate document
pub const DEFAULT_OUTPUT_NAME: &str = "dicom_metadata.json";

/// Default file name of the run log
pub const DEFAULT_LOG_NAME: &str = "dicom_processor_log.txt";

/// Extensions treated as DICOM candidates (compared case-insensitively)
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["dcm", "dicom"];

/// Byte values longer than this are summarized instead of rendered
pub const DEFAULT_MAX_BINARY_LENGTH: usize = 1024;

/// Options controlling how a single file is turned into records
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Byte values above this length are summarized
    pub max_binary_length: usize,

    /// Rendering of sequence values
    pub sequence_mode: SequenceMode,

    /// Emit the file meta group (0002,xxxx) ahead of the dataset
    pub include_file_meta: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_binary_length: DEFAULT_MAX_BINARY_LENGTH,
            sequence_mode: SequenceMode::Summary,
            include_file_meta: true,
        }
    }
}

/// Explicit configuration of one harvest run
///
/// Output and log paths default to fixed names inside the root.
///
/// # Example
///
/// ```
/// use dcmharvest_core::{HarvestConfig, SequenceMode};
/// use std::path::Path;
///
/// let config = HarvestConfig::new("/data/scans")
///     .with_output("meta.json")
///     .with_sequence_mode(SequenceMode::Expand)
///     .with_max_depth(Some(3));
///
/// assert_eq!(config.output_path, Path::new("/data/scans/meta.json"));
/// assert_eq!(config.log_path, Path::new("/data/scans/dicom_processor_log.txt"));
/// assert_eq!(config.extract.sequence_mode, SequenceMode::Expand);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestConfig {
    /// Directory to traverse
    pub root: PathBuf,

    /// Where the aggregate document is written
    pub output_path: PathBuf,

    /// Where the run log is written
    pub log_path: PathBuf,

    /// Candidate extensions, lowercase, without the dot
    pub extensions: Vec<String>,

    /// Maximum recursion depth below the root (None = unbounded)
    pub max_depth: Option<usize>,

    /// Per-file extraction options
    pub extract: ExtractOptions,
}

impl HarvestConfig {
    /// Creates a configuration rooted at `root` with default file names
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            output_path: root.join(DEFAULT_OUTPUT_NAME),
            log_path: root.join(DEFAULT_LOG_NAME),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_depth: None,
            extract: ExtractOptions::default(),
            root,
        }
    }

    /// Directory holding the running executable
    pub fn default_root() -> std::io::Result<PathBuf> {
        let exe = std::env::current_exe()?;
        exe.parent().map(Path::to_path_buf).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} has no parent directory", exe.display()),
            )
        })
    }

    /// Sets the output document path; relative paths resolve against the root
    pub fn with_output(mut self, path: impl AsRef<Path>) -> Self {
        self.output_path = self.root.join(path);
        self
    }

    /// Sets the log path; relative paths resolve against the root
    pub fn with_log(mut self, path: impl AsRef<Path>) -> Self {
        self.log_path = self.root.join(path);
        self
    }

    /// Replaces the candidate extension list
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_binary_length(mut self, max_binary_length: usize) -> Self {
        self.extract.max_binary_length = max_binary_length;
        self
    }

    pub fn with_sequence_mode(mut self, mode: SequenceMode) -> Self {
        self.extract.sequence_mode = mode;
        self
    }

    pub fn include_file_meta(mut self, include: bool) -> Self {
        self.extract.include_file_meta = include;
        self
    }
}
