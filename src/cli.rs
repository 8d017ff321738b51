//! Command-line interface module.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Configuration loading
//! - Organize / reset dispatch

use crate::config::OrganizerConfig;
use crate::file_organizer::FileOrganizer;
use crate::output::OutputFormatter;
use crate::report::{ReportFormat, Reporter};
use crate::reset::{ResetManager, ResetReport};
use crate::walker::{Organizer, Summary};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Organize files into category/year/month folders.
#[derive(Parser, Debug)]
#[command(name = "organize", author, version, about, long_about = None)]
pub struct Args {
    /// Path to the folder to organize
    pub source_folder: PathBuf,

    /// Show what would be done without moving files
    #[arg(long)]
    pub dry_run: bool,

    /// Delete all files and subfolders in the folder (takes precedence)
    #[arg(long)]
    pub reset: bool,

    /// Configuration file (default: .organizerrc.toml, then ~/.config/datesort/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report file format
    #[arg(long, value_enum)]
    pub report_format: Option<ReportFormat>,

    /// Directory for run logs
    #[arg(long, default_value = "logs")]
    pub logs_dir: PathBuf,

    /// Directory for the report file
    #[arg(long, default_value = "reports")]
    pub reports_dir: PathBuf,
}

impl Args {
    /// The command selected by the flags. `--reset` wins over everything.
    pub fn command(&self) -> OrganizeCommand {
        if self.reset {
            OrganizeCommand::Reset
        } else {
            OrganizeCommand::Organize {
                dry_run: self.dry_run,
            }
        }
    }
}

/// Represents a CLI command to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizeCommand {
    /// Organize files in a directory.
    Organize {
        /// If true, simulate the operation without making changes.
        dry_run: bool,
    },
    /// Empty the directory.
    Reset,
}

/// Settings shared by both commands.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config_path: Option<PathBuf>,
    /// Overrides the configured report format.
    pub report_format: Option<ReportFormat>,
    pub logs_dir: PathBuf,
    pub reports_dir: PathBuf,
    /// Log file of this run, if logging was set up.
    pub log_file: Option<PathBuf>,
}

impl RunOptions {
    pub fn from_args(args: &Args, log_file: Option<PathBuf>) -> Self {
        Self {
            config_path: args.config.clone(),
            report_format: args.report_format,
            logs_dir: args.logs_dir.clone(),
            reports_dir: args.reports_dir.clone(),
            log_file,
        }
    }
}

/// What a command did.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Organized(Summary),
    Reset(ResetReport),
}

/// Runs the CLI application with the given command and directory path.
///
/// # Examples
///
/// ```no_run
/// use datesort::cli::{run_cli, OrganizeCommand, RunOptions};
/// use std::path::Path;
///
/// let options = RunOptions {
///     reports_dir: "reports".into(),
///     logs_dir: "logs".into(),
///     ..Default::default()
/// };
/// match run_cli(OrganizeCommand::Organize { dry_run: true }, Path::new("/path/to/dir"), &options) {
///     Ok(_) => println!("Operation completed successfully"),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(
    command: OrganizeCommand,
    dir_path: &Path,
    options: &RunOptions,
) -> Result<RunOutcome, String> {
    match command {
        OrganizeCommand::Organize { dry_run } => {
            organize_directory(dir_path, dry_run, options).map(RunOutcome::Organized)
        }
        OrganizeCommand::Reset => reset_directory(dir_path).map(RunOutcome::Reset),
    }
}

/// Organizes `base_path` with the configured tables and filters.
fn organize_directory(
    base_path: &Path,
    dry_run: bool,
    options: &RunOptions,
) -> Result<Summary, String> {
    let config = OrganizerConfig::load(options.config_path.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let compiled = config
        .compile()
        .map_err(|e| format!("Error compiling configuration: {}", e))?;

    let format = options
        .report_format
        .or(compiled.report_format)
        .unwrap_or_default();

    let mut organizer = Organizer::new(
        FileOrganizer::new(compiled.planner),
        Reporter::new(&options.reports_dir, format),
    )
    .with_filters(compiled.filters)
    .exclude_dir(&options.logs_dir)
    .exclude_dir(&options.reports_dir);
    if let Some(log_file) = &options.log_file {
        organizer = organizer.with_log_file(log_file);
    }

    if dry_run {
        OutputFormatter::dry_run_notice("No files will be moved.");
    }

    let summary = organizer
        .organize(base_path, dry_run)
        .map_err(|e| e.to_string())?;

    if summary.processed() > 0 {
        OutputFormatter::run_summary(summary.moved, summary.simulated, summary.skipped);
    }
    Ok(summary)
}

/// Deletes everything inside `base_path`.
fn reset_directory(base_path: &Path) -> Result<ResetReport, String> {
    let report = ResetManager::reset(base_path).map_err(|e| e.to_string())?;

    if report.existed {
        OutputFormatter::success(&format!(
            "All files and subfolders in '{}' have been deleted!",
            base_path.display()
        ));
    } else {
        let message = format!("Folder does not exist: {}", base_path.display());
        log::warn!("{}", message);
        OutputFormatter::warning(&message);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_takes_precedence() {
        let args = Args::parse_from(["organize", "inbox", "--dry-run", "--reset"]);
        assert_eq!(args.command(), OrganizeCommand::Reset);
    }

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["organize", "inbox"]);

        assert_eq!(args.command(), OrganizeCommand::Organize { dry_run: false });
        assert_eq!(args.source_folder, PathBuf::from("inbox"));
        assert_eq!(args.logs_dir, PathBuf::from("logs"));
        assert_eq!(args.reports_dir, PathBuf::from("reports"));
        assert!(args.report_format.is_none());
    }

    #[test]
    fn test_report_format_flag() {
        let args = Args::parse_from(["organize", "inbox", "--dry-run", "--report-format", "json"]);

        assert_eq!(args.command(), OrganizeCommand::Organize { dry_run: true });
        assert_eq!(args.report_format, Some(ReportFormat::Json));
    }

    #[test]
    fn test_missing_source_folder_rejected() {
        assert!(Args::try_parse_from(["organize"]).is_err());
    }
}
