//! datesort - sort a directory tree into category/year/month folders
//!
//! This library classifies files by extension, plans their destination from
//! their modification time, moves them (or simulates the move), and writes a
//! tabular report of every placement. A reset utility empties a directory.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod logging;
pub mod output;
pub mod planner;
pub mod report;
pub mod reset;
pub mod walker;

pub use config::{CompiledConfig, CompiledFilters, ConfigError, OrganizerConfig};
pub use file_category::{Category, CategoryTable};
pub use file_organizer::{FileOrganizer, FileRecord, OrganizeError, PlaceOutcome};
pub use planner::{MonthTable, PathPlanner, Placement};
pub use report::{ReportFormat, Reporter};
pub use reset::{ResetManager, ResetReport};
pub use walker::{Organizer, Summary};

pub use cli::{OrganizeCommand, RunOptions, RunOutcome, run_cli};
