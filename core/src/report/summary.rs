use chrono::{DateTime, Local};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Per-run counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounts {
    /// Candidates handed to the extractor
    pub scanned: usize,
    pub extracted: usize,
    /// Candidates that were not DICOM
    pub skipped: usize,
    pub errored: usize,
    /// Entries the traversal could not read
    pub inaccessible: usize,
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub root: PathBuf,
    pub output_path: PathBuf,
    pub log_path: PathBuf,
    pub started_at: DateTime<Local>,
    pub elapsed: Duration,
    pub counts: RunCounts,
}

/// Text report formatter for a run summary
pub struct TextReport<'a> {
    summary: &'a RunSummary,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(summary: &'a RunSummary) -> Self {
        Self { summary }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = &self.summary.counts;

        writeln!(f, "DICOM Metadata Harvest")?;
        writeln!(f, "======================")?;
        writeln!(f)?;
        writeln!(f, "Root:           {}", self.summary.root.display())?;
        writeln!(
            f,
            "Started:        {}",
            self.summary.started_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(
            f,
            "Elapsed:        {:.3}s",
            self.summary.elapsed.as_secs_f64()
        )?;
        writeln!(f)?;
        writeln!(f, "Files scanned:  {}", counts.scanned)?;
        writeln!(f, "Extracted:      {}", counts.extracted)?;
        writeln!(f, "Skipped:        {}", counts.skipped)?;
        writeln!(f, "Errors:         {}", counts.errored)?;
        if counts.inaccessible > 0 {
            writeln!(f, "Inaccessible:   {}", counts.inaccessible)?;
        }
        writeln!(f)?;
        writeln!(f, "Metadata:       {}", self.summary.output_path.display())?;
        writeln!(f, "Log:            {}", self.summary.log_path.display())?;

        Ok(())
    }
}
