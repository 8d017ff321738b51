//! Per-run log file.
//!
//! Each run appends to `<logs dir>/organizer_<YYYYMMDD>_<HHMMSS>.log` with
//! lines of the form `<timestamp> - <LEVEL> - <message>`.

use chrono::{DateTime, Local};
use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Returns the log file path for a run started at `started`.
pub fn log_file_path(logs_dir: &Path, started: &DateTime<Local>) -> PathBuf {
    logs_dir.join(format!("organizer_{}.log", started.format("%Y%m%d_%H%M%S")))
}

/// Level names as written to the log file.
pub fn level_label(level: Level) -> &'static str {
    match level {
        Level::Warn => "WARNING",
        other => other.as_str(),
    }
}

/// Installs the global logger writing to a fresh log file under `logs_dir`.
///
/// Call once at process start. `RUST_LOG` can override the default `info`
/// level.
///
/// # Errors
///
/// Fails if the directory or file cannot be created, or if a logger was
/// already installed.
pub fn init(logs_dir: &Path) -> std::io::Result<PathBuf> {
    fs::create_dir_all(logs_dir)?;
    let path = log_file_path(logs_dir, &Local::now());
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                level_label(record.level()),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(std::io::Error::other)?;

    Ok(path)
}
