//! Run driver: discovery, extraction, aggregation and persistence
//!
//! [`Reporter`] owns everything a run mutates (the aggregate document and
//! the run log) and moves through `INIT -> SCANNING -> FINALIZING -> DONE`.
//! Per-file problems are logged and counted; only environment failures
//! abort the run.

mod run_log;
mod summary;

pub use run_log::{RunLog, TIMESTAMP_FORMAT};
pub use summary::{RunCounts, RunSummary, TextReport};

use crate::api::DicomExtractor;
use crate::discovery::{document_key, Discovered, Discoverer};
use crate::error::{HarvestError, Result};
use crate::types::{AggregateDocument, Extraction, HarvestConfig, RunPhase};
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

/// Drives one harvest run
pub struct Reporter {
    config: HarvestConfig,
    extractor: DicomExtractor,
    document: AggregateDocument,
    counts: RunCounts,
    log: Option<RunLog>,
    phase: RunPhase,
    started: Instant,
    started_at: DateTime<Local>,
}

impl Reporter {
    /// Creates a reporter in the `INIT` phase; nothing is opened yet
    pub fn new(config: HarvestConfig) -> Self {
        Self {
            extractor: DicomExtractor::new(config.extract.clone()),
            config,
            document: AggregateDocument::new(),
            counts: RunCounts::default(),
            log: None,
            phase: RunPhase::Init,
            started: Instant::now(),
            started_at: Local::now(),
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Runs the whole pipeline
    ///
    /// On a fatal error the failure is written to the run log (when one
    /// was opened) and the log is flushed before the error is returned.
    pub fn run(mut self) -> Result<RunSummary> {
        let result = self.execute();
        if let Err(e) = &result {
            self.abort(e);
        }
        result
    }

    fn execute(&mut self) -> Result<RunSummary> {
        self.start()?;
        self.scan()?;
        self.finish()
    }

    /// `INIT`: checks the root and opens the run log
    pub fn start(&mut self) -> Result<()> {
        self.expect_phase(RunPhase::Init)?;

        let root = self.config.root.clone();
        fs::read_dir(&root).map_err(|source| HarvestError::RootUnreadable {
            path: root.clone(),
            source,
        })?;

        self.log = Some(RunLog::create(&self.config.log_path)?);
        self.started = Instant::now();
        self.started_at = Local::now();

        let lines = [
            format!(
                "Starting DICOM metadata harvest - {}",
                self.started_at.format(TIMESTAMP_FORMAT)
            ),
            format!("Scanning for DICOM files in: {} (and subdirectories)", root.display()),
            format!("Metadata will be saved to: {}", self.config.output_path.display()),
            format!("Logs will be saved to: {}", self.config.log_path.display()),
        ];
        for line in &lines {
            self.log_info(line)?;
        }

        self.phase = RunPhase::Scanning;
        Ok(())
    }

    /// `SCANNING`: processes every discovered entry
    pub fn scan(&mut self) -> Result<()> {
        self.expect_phase(RunPhase::Scanning)?;

        for discovered in Discoverer::new(&self.config) {
            self.process(discovered)?;
        }
        Ok(())
    }

    /// Handles one discovered entry
    ///
    /// Only log write failures escape; extraction outcomes never do.
    pub fn process(&mut self, discovered: Discovered) -> Result<()> {
        self.expect_phase(RunPhase::Scanning)?;

        match discovered {
            Discovered::Candidate(path) => self.process_candidate(&path),
            Discovered::Inaccessible { path, reason } => {
                self.counts.inaccessible += 1;
                let location = path
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                self.log_warn(&format!("Skipped inaccessible entry {}: {}", location, reason))
            }
        }
    }

    fn process_candidate(&mut self, path: &Path) -> Result<()> {
        self.counts.scanned += 1;
        self.log_info(&format!(
            "[{}] Discovered: {}",
            self.counts.scanned,
            path.display()
        ))?;

        match self.extractor.extract_file(path) {
            Extraction::Extracted(records) => {
                self.counts.extracted += 1;
                self.log_info(&format!(
                    "Extracted {} tags from {}",
                    records.len(),
                    path.display()
                ))?;
                let key = self.unique_key(path)?;
                self.document.insert(key, records);
            }
            Extraction::Skipped(reason) => {
                self.counts.skipped += 1;
                self.log_warn(&format!(
                    "Skipped {}: not a recognized container ({})",
                    path.display(),
                    reason
                ))?;
            }
            Extraction::Errored(reason) => {
                self.counts.errored += 1;
                self.log_error(&format!("Error processing {}: {}", path.display(), reason))?;
            }
        }
        Ok(())
    }

    /// Document key for `path`, never one already in the document
    ///
    /// Distinct non-UTF-8 names can map to the same lossy key; later files
    /// get a `#n` suffix instead of replacing earlier records.
    fn unique_key(&mut self, path: &Path) -> Result<String> {
        let key = document_key(&self.config.root, path);
        let vacant = self.document.vacant_key(&key);
        if vacant != key {
            self.log_warn(&format!(
                "Document key {} already taken; storing {} as {}",
                key,
                path.display(),
                vacant
            ))?;
        }
        Ok(vacant)
    }

    /// `FINALIZING`: writes the document, logs totals, closes the log
    pub fn finish(&mut self) -> Result<RunSummary> {
        self.expect_phase(RunPhase::Scanning)?;
        self.phase = RunPhase::Finalizing;

        write_document(&self.config.output_path, &self.document)?;

        let elapsed = self.started.elapsed();
        let counts = self.counts;
        self.log_info(&format!(
            "Saved metadata for {} files to: {}",
            self.document.len(),
            self.config.output_path.display()
        ))?;
        self.log_info(&format!(
            "Run complete: {} scanned, {} extracted, {} skipped, {} errors, {} inaccessible in {:.3}s",
            counts.scanned,
            counts.extracted,
            counts.skipped,
            counts.errored,
            counts.inaccessible,
            elapsed.as_secs_f64()
        ))?;

        if let Some(log) = self.log.take() {
            log.close()?;
        }
        self.phase = RunPhase::Done;

        Ok(RunSummary {
            root: self.config.root.clone(),
            output_path: self.config.output_path.clone(),
            log_path: self.config.log_path.clone(),
            started_at: self.started_at,
            elapsed,
            counts,
        })
    }

    /// Best-effort record of a fatal error, then close the log
    fn abort(&mut self, e: &HarvestError) {
        if let Some(mut log) = self.log.take() {
            let _ = log.error(&format!("Fatal: {}; run aborted", e));
            let _ = log.close();
        }
        self.phase = RunPhase::Done;
    }

    fn expect_phase(&self, expected: RunPhase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(HarvestError::InvalidState(format!(
                "expected {}, run is in {}",
                expected, self.phase
            )))
        }
    }

    fn sink(&mut self) -> Result<&mut RunLog> {
        self.log
            .as_mut()
            .ok_or_else(|| HarvestError::InvalidState("run log is not open".to_string()))
    }

    fn log_info(&mut self, message: &str) -> Result<()> {
        self.sink()?.info(message)
    }

    fn log_warn(&mut self, message: &str) -> Result<()> {
        self.sink()?.warn(message)
    }

    fn log_error(&mut self, message: &str) -> Result<()> {
        self.sink()?.error(message)
    }
}

/// Writes the document pretty-printed with two-space indentation
pub fn write_document(path: &Path, document: &AggregateDocument) -> Result<()> {
    let file = File::create(path).map_err(|source| HarvestError::CreateSink {
        path: path.to_path_buf(),
        source,
    })?;
    let to_write_error = |source| HarvestError::WriteDocument {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document).map_err(to_write_error)?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| to_write_error(serde_json::Error::io(e)))
}

/// Runs a complete harvest for `config`
pub fn harvest(config: HarvestConfig) -> Result<RunSummary> {
    Reporter::new(config).run()
}
