use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use thiserror::Error;

/// `log` backend for the binaries: one line per record on stderr, and the
/// same line appended to a log file when one is configured.
struct GameLogger {
    file: Mutex<Option<File>>,
}

static LOGGER: GameLogger = GameLogger { file: Mutex::new(None) };

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("could not open log file {}: {source}", path.display())]
    OpenFile { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Install(#[from] SetLoggerError),
}

impl Log for GameLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{:<5}] {}", record.level(), record.args());
        eprintln!("{line}");
        if let Ok(mut file) = self.file.lock() {
            if let Some(file) = file.as_mut() {
                // write errors are dropped
                let _ = writeln!(file, "{line}");
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            if let Some(file) = file.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the logger. With `log_file` set, records are also appended to that
/// file, creating it and its directory if needed. Fails if the file cannot be
/// opened or another logger is already installed.
pub fn init(level: LevelFilter, log_file: Option<&Path>) -> Result<(), LoggerError> {
    if let Some(path) = log_file {
        let file = open_append(path).map_err(|source| LoggerError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;
        if let Ok(mut slot) = LOGGER.file.lock() {
            *slot = Some(file);
        }
    }
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
