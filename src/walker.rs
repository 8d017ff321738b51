//! Recursive organization of a source tree.
//!
//! The walker collects every regular file below the root, leaves alone
//! anything already inside a category directory from an earlier run, hands
//! the rest to the mover one by one, and finally writes the report.

use crate::config::CompiledFilters;
use crate::file_category::Category;
use crate::file_organizer::{
    FileOrganizer, FileRecord, OrganizeError, OrganizeResult, PlaceOutcome, Placed,
};
use crate::output::OutputFormatter;
use crate::report::Reporter;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Outcome of one organize run.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub moved: usize,
    pub simulated: usize,
    pub skipped: usize,
    /// Report rows in placement order.
    pub records: Vec<FileRecord>,
    /// Where the report was written, if anything was reported.
    pub report_path: Option<PathBuf>,
}

impl Summary {
    /// Number of files handed to the mover, whatever the outcome.
    pub fn processed(&self) -> usize {
        self.records.len()
    }

    fn add(&mut self, placed: Placed) {
        match placed.outcome {
            PlaceOutcome::Moved => self.moved += 1,
            PlaceOutcome::Simulated => self.simulated += 1,
            PlaceOutcome::SkippedDuplicate => self.skipped += 1,
        }
        self.records.push(placed.record);
    }
}

/// Drives a full organize run over a source root.
#[derive(Debug, Clone)]
pub struct Organizer {
    mover: FileOrganizer,
    reporter: Reporter,
    filters: CompiledFilters,
    excluded_dirs: Vec<PathBuf>,
    log_file: Option<PathBuf>,
}

impl Organizer {
    pub fn new(mover: FileOrganizer, reporter: Reporter) -> Self {
        Self {
            mover,
            reporter,
            filters: CompiledFilters::default(),
            excluded_dirs: Vec::new(),
            log_file: None,
        }
    }

    pub fn with_filters(mut self, filters: CompiledFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Never descend into `dir`, e.g. the run's own logs or reports folder.
    pub fn exclude_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.excluded_dirs.push(dir.into());
        self
    }

    /// Log file to point the user at once the run completes.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Organizes every eligible file under `root`.
    ///
    /// A missing root is not an error: a message is printed and an empty
    /// summary returned. The report is written after the walk even when
    /// nothing was found; if a file fails fatally, the rows gathered so far
    /// are still written before the error is returned.
    ///
    /// # Errors
    ///
    /// Propagates traversal failures and the first fatal placement error.
    pub fn organize(&self, root: &Path, dry_run: bool) -> OrganizeResult<Summary> {
        if !root.exists() {
            let message = format!("Source folder does not exist: {}", root.display());
            log::warn!("{}", message);
            OutputFormatter::warning(&message);
            return Ok(Summary::default());
        }

        OutputFormatter::info(&format!("Organizing contents of: {}", root.display()));
        let candidates = self.collect_candidates(root)?;

        let mut summary = Summary::default();
        let mut failure = None;
        let pb = OutputFormatter::create_progress_bar(candidates.len() as u64);
        for path in &candidates {
            match pb.suspend(|| self.mover.place(path, root, dry_run)) {
                Ok(placed) => summary.add(placed),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        let exported = self.reporter.export(&summary.records);
        if let Some(e) = failure {
            if let Err(report_err) = exported {
                log::error!("{}", report_err);
            }
            return Err(e);
        }
        summary.report_path = exported?;

        if summary.processed() > 0 {
            OutputFormatter::success("File organization complete!");
            if let Some(log_file) = &self.log_file {
                OutputFormatter::plain(&format!("Logs saved in: {}", log_file.display()));
            }
        } else {
            OutputFormatter::plain("No files found to organize.");
        }

        Ok(summary)
    }

    /// Lists the files an organize run would place, in walk order.
    ///
    /// Skips non-regular files, anything below a directory named after a
    /// category, excluded directories, and files rejected by the configured
    /// filters. Symlinks are not followed, so a symlink pointing at a regular
    /// file is skipped too rather than moved.
    pub fn collect_candidates(&self, root: &Path) -> OrganizeResult<Vec<PathBuf>> {
        let excluded: Vec<PathBuf> = self
            .excluded_dirs
            .iter()
            .filter_map(|dir| dir.canonicalize().ok())
            .collect();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_organized_dir(e) && !is_excluded_dir(e, &excluded));

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| OrganizeError::WalkFailed {
                root: root.to_path_buf(),
                reason: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            if !self.filters.should_include(entry.path()) {
                log::info!("Excluded by filters: {}", entry.path().display());
                continue;
            }
            files.push(entry.into_path());
        }

        Ok(files)
    }
}

/// A directory below the root whose name is a category name.
fn is_organized_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(Category::is_category_dir)
}

fn is_excluded_dir(entry: &DirEntry, excluded: &[PathBuf]) -> bool {
    if excluded.is_empty() || entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    entry
        .path()
        .canonicalize()
        .is_ok_and(|path| excluded.contains(&path))
}
