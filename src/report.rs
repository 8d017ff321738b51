//! Tabular audit report of a run.
//!
//! Rows are sorted by category, year, month label and file name, then written
//! to `<reports dir>/file_report.<ext>`, replacing any earlier report.

use crate::file_organizer::{FileRecord, OrganizeError, OrganizeResult};
use crate::output::OutputFormatter;
use clap::ValueEnum;
use rust_xlsxwriter::{Format, Workbook};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Base name of the report file.
pub const REPORT_STEM: &str = "file_report";

/// On-disk format of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Excel workbook with a single sheet.
    #[default]
    Xlsx,
    /// Comma-separated values with a header row.
    Csv,
    /// JSON array of objects keyed by column name.
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

/// Writes the sorted report for a run.
#[derive(Debug, Clone)]
pub struct Reporter {
    dir: PathBuf,
    format: ReportFormat,
}

impl Reporter {
    pub fn new(dir: impl Into<PathBuf>, format: ReportFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    /// Path the report is written to.
    pub fn report_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}.{}", REPORT_STEM, self.format.extension()))
    }

    /// Sorts `records` and writes them out.
    ///
    /// Returns `Ok(None)` without touching the filesystem when there is
    /// nothing to report.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizeError::ReportWriteFailed`] if the reports directory
    /// or the file cannot be written.
    pub fn export(&self, records: &[FileRecord]) -> OrganizeResult<Option<PathBuf>> {
        if records.is_empty() {
            OutputFormatter::plain("No files to report.");
            return Ok(None);
        }

        let path = self.report_path();
        fs::create_dir_all(&self.dir).map_err(|e| OrganizeError::ReportWriteFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let rows = sorted(records);
        let written = match self.format {
            ReportFormat::Xlsx => write_xlsx(&path, &rows),
            ReportFormat::Csv => write_csv(&path, &rows),
            ReportFormat::Json => write_json(&path, &rows),
        };
        written.map_err(|reason| OrganizeError::ReportWriteFailed {
            path: path.clone(),
            reason,
        })?;

        OutputFormatter::success(&format!("Structured report saved: {}", path.display()));
        log::info!("Report saved: {}", path.display());
        Ok(Some(path))
    }
}

/// Orders records by (Category, Year, Month, File Name).
pub fn sorted(records: &[FileRecord]) -> Vec<&FileRecord> {
    let mut rows: Vec<&FileRecord> = records.iter().collect();
    rows.sort_by(|a, b| {
        (&a.category, &a.year, &a.month, &a.file_name).cmp(&(
            &b.category,
            &b.year,
            &b.month,
            &b.file_name,
        ))
    });
    rows
}

fn write_xlsx(path: &Path, rows: &[&FileRecord]) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, header) in FileRecord::COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| e.to_string())?;
    }
    for (i, record) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in record.cells().iter().enumerate() {
            worksheet
                .write_string(row, col as u16, *cell)
                .map_err(|e| e.to_string())?;
        }
    }
    worksheet.autofit();

    workbook.save(path).map_err(|e| e.to_string())
}

fn write_csv(path: &Path, rows: &[&FileRecord]) -> Result<(), String> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| e.to_string())?;
    writer
        .write_record(FileRecord::COLUMNS)
        .map_err(|e| e.to_string())?;
    for record in rows {
        writer
            .write_record(record.cells())
            .map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())
}

fn write_json(path: &Path, rows: &[&FileRecord]) -> Result<(), String> {
    let json = serde_json::to_string_pretty(rows).map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| e.to_string())
}
