/// Reset functionality: emptying a directory in place.
///
/// Every direct child of the target is removed (directories recursively).
/// The target directory itself is kept. There is no confirmation step and no
/// way back; callers own that decision.
use crate::file_organizer::{OrganizeError, OrganizeResult};
use std::fs;
use std::path::Path;

/// Report of a reset operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetReport {
    /// False when the target did not exist and nothing was done.
    pub existed: bool,
    /// Number of files (and symlinks) removed.
    pub removed_files: usize,
    /// Number of top-level directories removed, with their contents.
    pub removed_dirs: usize,
}

/// Manages reset operations.
pub struct ResetManager;

impl ResetManager {
    /// Deletes all files and subdirectories inside `path`.
    ///
    /// A missing `path` is a no-op reported through `existed = false`.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizeError::ResetFailed`] on the first entry that cannot
    /// be read or removed. Entries removed before that stay removed.
    pub fn reset(path: &Path) -> OrganizeResult<ResetReport> {
        if !path.exists() {
            return Ok(ResetReport::default());
        }

        let failed = |p: &Path, e: std::io::Error| OrganizeError::ResetFailed {
            path: p.to_path_buf(),
            source: e,
        };

        let mut report = ResetReport {
            existed: true,
            ..Default::default()
        };

        for entry in fs::read_dir(path).map_err(|e| failed(path, e))? {
            let entry = entry.map_err(|e| failed(path, e))?;
            let entry_path = entry.path();
            // file_type() does not follow symlinks, so a link to a directory
            // is removed as a link.
            let file_type = entry.file_type().map_err(|e| failed(&entry_path, e))?;

            if file_type.is_dir() {
                fs::remove_dir_all(&entry_path).map_err(|e| failed(&entry_path, e))?;
                report.removed_dirs += 1;
            } else {
                fs::remove_file(&entry_path).map_err(|e| failed(&entry_path, e))?;
                report.removed_files += 1;
            }
        }

        log::info!("Reset folder: {}", path.display());
        Ok(report)
    }
}
