//! Destination planning from category and modification time.
//!
//! Each file lands in `<root>/<Category>/<Year>/<NN_MonthName>/`. The month
//! label comes from a 12-entry name table indexed by `month - 1`.

use crate::file_category::{Category, CategoryTable};
use crate::file_organizer::{OrganizeError, OrganizeResult};
use chrono::{DateTime, Datelike, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// The twelve month names used to build month folder labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTable {
    names: [String; 12],
}

impl MonthTable {
    /// Builds a table from exactly twelve names.
    ///
    /// Returns the rejected input when the count is not twelve.
    pub fn new(names: Vec<String>) -> Result<Self, Vec<String>> {
        let names: [String; 12] = names.try_into()?;
        Ok(Self { names })
    }

    /// Returns the folder label for a 1-based month, e.g. `05_May`.
    ///
    /// # Panics
    ///
    /// Panics if `month` is outside `1..=12`.
    pub fn label(&self, month: u32) -> String {
        assert!((1..=12).contains(&month), "month out of range: {}", month);
        format!("{:02}_{}", month, self.names[(month - 1) as usize])
    }
}

impl Default for MonthTable {
    fn default() -> Self {
        Self {
            names: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]
            .map(String::from),
        }
    }
}

/// Where a single file is going, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub category: Category,
    /// Four-digit calendar year of the modification time.
    pub year: String,
    /// Month folder label, e.g. `11_November`.
    pub month: String,
    /// `root/category/year/month`
    pub directory: PathBuf,
}

/// Computes destination directories for files under an organized root.
#[derive(Debug, Clone, Default)]
pub struct PathPlanner {
    categories: CategoryTable,
    months: MonthTable,
}

impl PathPlanner {
    pub fn new(categories: CategoryTable, months: MonthTable) -> Self {
        Self { categories, months }
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    /// Plans the destination directory of `path` under `root`.
    ///
    /// Reads the file's modification time (one stat call) and interprets it
    /// in local time.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizeError::Timestamp`] if the modification time cannot
    /// be read.
    pub fn plan(&self, path: &Path, root: &Path) -> OrganizeResult<Placement> {
        let modified = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(|e| OrganizeError::Timestamp {
                path: path.to_path_buf(),
                source: e,
            })?;
        let modified: DateTime<Local> = modified.into();

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        let category = self.categories.classify(&name);

        Ok(self.placement_for(category, &modified, root))
    }

    /// Builds the placement for a known category and timestamp.
    pub fn placement_for(
        &self,
        category: Category,
        modified: &DateTime<Local>,
        root: &Path,
    ) -> Placement {
        let year = format!("{:04}", modified.year());
        let month = self.months.label(modified.month());
        let directory = root.join(category.dir_name()).join(&year).join(&month);

        Placement {
            category,
            year,
            month,
            directory,
        }
    }
}
