/// Placement of single files into the category/year/month hierarchy.
///
/// This module provides the mover: it asks the planner where a file belongs,
/// records the intended placement, and then either skips (destination already
/// taken), simulates (dry run), or performs the move.
use crate::output::OutputFormatter;
use crate::planner::PathPlanner;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One row of the audit report.
///
/// Records are produced for every placed file, including duplicates and
/// dry-run simulations, and never change once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    #[serde(rename = "File Name")]
    pub file_name: String,
    #[serde(rename = "Original Path")]
    pub original_path: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Target Path")]
    pub target_path: String,
}

impl FileRecord {
    /// Column headers, in report order.
    pub const COLUMNS: [&'static str; 6] = [
        "File Name",
        "Original Path",
        "Category",
        "Year",
        "Month",
        "Target Path",
    ];

    /// Returns the record's cells in [`FileRecord::COLUMNS`] order.
    pub fn cells(&self) -> [&str; 6] {
        [
            self.file_name.as_str(),
            self.original_path.as_str(),
            self.category.as_str(),
            self.year.as_str(),
            self.month.as_str(),
            self.target_path.as_str(),
        ]
    }
}

/// What happened to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// The file was moved to its destination.
    Moved,
    /// Dry run: the move was only reported.
    Simulated,
    /// The destination already existed; the file was left alone.
    SkippedDuplicate,
}

/// Result of placing one file: its outcome and its report row.
#[derive(Debug, Clone)]
pub struct Placed {
    pub outcome: PlaceOutcome,
    pub record: FileRecord,
}

/// Errors that can occur during file organization operations.
#[derive(Debug)]
pub enum OrganizeError {
    /// The modification time of a file could not be read.
    Timestamp {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create a destination directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its destination.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// The path has no final file name component.
    InvalidFileName { path: PathBuf },
    /// Directory traversal failed.
    WalkFailed { root: PathBuf, reason: String },
    /// The report could not be written.
    ReportWriteFailed { path: PathBuf, reason: String },
    /// A directory entry could not be removed during reset.
    ResetFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timestamp { path, source } => {
                write!(
                    f,
                    "Cannot read modification time of {}: {}",
                    path.display(),
                    source
                )
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::InvalidFileName { path } => {
                write!(f, "Path has no file name: {}", path.display())
            }
            Self::WalkFailed { root, reason } => {
                write!(f, "Failed to scan {}: {}", root.display(), reason)
            }
            Self::ReportWriteFailed { path, reason } => {
                write!(f, "Failed to write report {}: {}", path.display(), reason)
            }
            Self::ResetFailed { path, source } => {
                write!(f, "Failed to remove {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Moves files into their planned category/year/month directory.
#[derive(Debug, Clone, Default)]
pub struct FileOrganizer {
    planner: PathPlanner,
}

impl FileOrganizer {
    pub fn new(planner: PathPlanner) -> Self {
        Self { planner }
    }

    /// Places a single file under `root` and returns its outcome and record.
    ///
    /// The record is produced regardless of outcome, so the report reflects
    /// intended placement. An existing destination is never overwritten; the
    /// file is skipped with a warning instead. In dry-run mode nothing on disk
    /// changes, not even directory creation.
    ///
    /// # Errors
    ///
    /// Fails if the modification time cannot be read, the destination
    /// directory cannot be created, or the move itself fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use datesort::file_organizer::{FileOrganizer, PlaceOutcome};
    /// use std::path::Path;
    ///
    /// let organizer = FileOrganizer::default();
    /// let placed = organizer
    ///     .place(Path::new("/data/in/photo.jpg"), Path::new("/data/in"), false)
    ///     .expect("placement failed");
    /// assert_eq!(placed.outcome, PlaceOutcome::Moved);
    /// ```
    pub fn place(&self, path: &Path, root: &Path, dry_run: bool) -> OrganizeResult<Placed> {
        let placement = self.planner.plan(path, root)?;

        let file_name = path
            .file_name()
            .ok_or_else(|| OrganizeError::InvalidFileName {
                path: path.to_path_buf(),
            })?;
        let destination = placement.directory.join(file_name);

        let record = FileRecord {
            file_name: file_name.to_string_lossy().to_string(),
            original_path: path.display().to_string(),
            category: placement.category.to_string(),
            year: placement.year,
            month: placement.month,
            target_path: destination.display().to_string(),
        };

        let outcome = if destination.exists() {
            let message = format!("Duplicate found, skipping: {}", path.display());
            log::warn!("{}", message);
            OutputFormatter::warning(&message);
            PlaceOutcome::SkippedDuplicate
        } else if dry_run {
            let message = format!(
                "Would move {} -> {}",
                path.display(),
                destination.display()
            );
            log::info!("[DRY RUN] {}", message);
            OutputFormatter::dry_run_notice(&message);
            PlaceOutcome::Simulated
        } else {
            fs::create_dir_all(&placement.directory).map_err(|e| {
                OrganizeError::DirectoryCreationFailed {
                    path: placement.directory.clone(),
                    source: e,
                }
            })?;
            move_file(path, &destination)?;

            let message = format!("Moved {} -> {}", path.display(), destination.display());
            log::info!("{}", message);
            OutputFormatter::success(&message);
            PlaceOutcome::Moved
        };

        Ok(Placed { outcome, record })
    }
}

/// Renames `source` to `destination`, falling back to copy + delete when the
/// rename fails (typically across filesystems).
fn move_file(source: &Path, destination: &Path) -> OrganizeResult<()> {
    if fs::rename(source, destination).is_ok() {
        return Ok(());
    }
    copy_then_remove(source, destination)
}

/// Copies `source` to `destination` keeping its modification time, then
/// removes `source`.
fn copy_then_remove(source: &Path, destination: &Path) -> OrganizeResult<()> {
    let failure = |e: std::io::Error| OrganizeError::FileMoveFailure {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        source_error: e,
    };

    let modified = fs::metadata(source)
        .and_then(|meta| meta.modified())
        .map_err(failure)?;
    fs::copy(source, destination).map_err(failure)?;

    let finished = fs::File::options()
        .write(true)
        .open(destination)
        .and_then(|f| f.set_modified(modified))
        .and_then(|()| fs::remove_file(source));
    if let Err(e) = finished {
        // Keep a single copy.
        let _ = fs::remove_file(destination);
        return Err(failure(e));
    }
    Ok(())
}
