use crate::error::{HarvestError, Result};
use chrono::Local;
use log::Level;
use std::fs::File;
use std::io::{LineWriter, Write};
use std::path::Path;

/// Timestamp format of run log lines
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Plain-text log sink owned by one run
///
/// Each event becomes one line, `<timestamp> [<LEVEL>] <message>`, and is
/// flushed as soon as it is written, so the file stays complete even if
/// the run aborts. Every event is mirrored to the `log` facade.
pub struct RunLog {
    writer: LineWriter<File>,
}

impl RunLog {
    /// Creates (or truncates) the log file
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| HarvestError::CreateSink {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            writer: LineWriter::new(file),
        })
    }

    /// Appends one event
    pub fn record(&mut self, level: Level, message: &str) -> Result<()> {
        log::log!(level, "{}", message);
        writeln!(
            self.writer,
            "{} [{}] {}",
            Local::now().format(TIMESTAMP_FORMAT),
            level,
            message
        )
        .map_err(HarvestError::WriteLog)
    }

    pub fn info(&mut self, message: &str) -> Result<()> {
        self.record(Level::Info, message)
    }

    pub fn warn(&mut self, message: &str) -> Result<()> {
        self.record(Level::Warn, message)
    }

    pub fn error(&mut self, message: &str) -> Result<()> {
        self.record(Level::Error, message)
    }

    /// Flushes and closes the sink
    pub fn close(mut self) -> Result<()> {
        self.writer.flush().map_err(HarvestError::WriteLog)
    }
}
