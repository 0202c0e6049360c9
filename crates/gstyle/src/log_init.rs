//! File logging for hosts that have no logger of their own.

use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends one `[LEVEL] message` line per record at or below `level`.
struct FileLogger {
    file_path: PathBuf,
    level: LevelFilter,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path);
        if let Ok(mut file) = file {
            let _ = writeln!(file, "[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Installs a logger appending `[LEVEL] message` lines to `path`.
///
/// Stylesheet loading logs at debug level, per-query cascade details at
/// trace level. Fails if a logger is already installed.
pub fn init_logger(path: impl AsRef<Path>, level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = FileLogger {
        file_path: path.as_ref().to_path_buf(),
        level,
    };
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}
