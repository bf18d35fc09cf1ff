//! Recursive discovery of candidate DICOM files
//!
//! [`Discoverer`] walks a root directory lazily, in file-name order within
//! each directory, without following symbolic links. It yields files whose
//! extension is a known DICOM suffix or that have no extension at all,
//! and reports unreadable entries instead of stopping.

use crate::types::HarvestConfig;
use log::debug;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// One item produced by the traversal
#[derive(Debug, Clone, PartialEq)]
pub enum Discovered {
    /// Regular file eligible for extraction
    Candidate(PathBuf),

    /// Entry the traversal could not read; its subtree is skipped
    Inaccessible {
        path: Option<PathBuf>,
        reason: String,
    },
}

/// A file excluded from traversal, matched by name within a directory
#[derive(Debug, Clone)]
struct Exclusion {
    file_name: OsString,
    parent: PathBuf,
}

impl Exclusion {
    fn new(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_os_string();
        let parent = path.parent()?;
        let parent = parent.canonicalize().unwrap_or_else(|_| parent.to_path_buf());
        Some(Self { file_name, parent })
    }

    /// The running executable, when it can be resolved
    fn current_exe() -> Option<Self> {
        let exe = std::env::current_exe().ok()?.canonicalize().ok()?;
        Self::new(&exe)
    }

    fn matches(&self, path: &Path) -> bool {
        if path.file_name() != Some(self.file_name.as_os_str()) {
            return false;
        }
        path.parent()
            .and_then(|p| p.canonicalize().ok())
            .map(|p| p == self.parent)
            .unwrap_or(false)
    }
}

/// Lazy, finite iterator over candidate files below a root
pub struct Discoverer {
    walker: walkdir::IntoIter,
    extensions: Vec<String>,
    excluded: Vec<Exclusion>,
}

impl Discoverer {
    /// Creates a discoverer for the run described by `config`
    ///
    /// The output document, the log file and the running executable are
    /// excluded.
    pub fn new(config: &HarvestConfig) -> Self {
        let mut walker = WalkDir::new(&config.root)
            .follow_links(false)
            .min_depth(1)
            .sort_by_file_name();
        if let Some(depth) = config.max_depth {
            walker = walker.max_depth(depth + 1);
        }

        let excluded: Vec<Exclusion> = [&config.output_path, &config.log_path]
            .into_iter()
            .filter_map(|p| Exclusion::new(p))
            .chain(Exclusion::current_exe())
            .collect();

        Self {
            walker: walker.into_iter(),
            extensions: config.extensions.clone(),
            excluded,
        }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.excluded.iter().any(|e| e.matches(path))
    }
}

impl Iterator for Discoverer {
    type Item = Discovered;

    fn next(&mut self) -> Option<Discovered> {
        loop {
            match self.walker.next()? {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let path = entry.path();
                    if !has_candidate_extension(path, &self.extensions) {
                        continue;
                    }
                    if self.is_excluded(path) {
                        debug!("Excluding own file: {}", path.display());
                        continue;
                    }
                    return Some(Discovered::Candidate(entry.into_path()));
                }
                Err(e) => {
                    return Some(Discovered::Inaccessible {
                        path: e.path().map(Path::to_path_buf),
                        reason: e
                            .io_error()
                            .map(|io| io.to_string())
                            .unwrap_or_else(|| e.to_string()),
                    });
                }
            }
        }
    }
}

/// Whether a file name qualifies as a candidate
///
/// Accepts any extension in `extensions` (case-insensitive) and files
/// with no extension at all.
pub fn has_candidate_extension(path: &Path, extensions: &[String]) -> bool {
    match path.extension() {
        None => true,
        Some(ext) => extensions
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known.as_str())),
    }
}

/// Stable document key for `path`: relative to `root`, `/`-separated
///
/// Paths outside the root keep their full form.
pub fn document_key(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.display().to_string(),
    }
}
