use chrono::{Local, TimeZone};
use datesort::cli::{OrganizeCommand, RunOptions, RunOutcome, run_cli};
use datesort::report::ReportFormat;
use datesort::reset::ResetReport;
use datesort::walker::Summary;
/// Integration tests for datesort
///
/// These tests run the complete organize and reset commands against
/// temporary directory trees.
///
/// Test categories:
/// 1. Basic organization workflows
/// 2. Dry-run mode verification
/// 3. Duplicates and re-runs
/// 4. Configuration and filtering
/// 5. Reset
/// 6. Edge cases
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// A source tree to organize plus a separate working directory that holds
/// the configuration file and the reports.
struct TestFixture {
    source: TempDir,
    work: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        let source = TempDir::new().expect("Failed to create source directory");
        let work = TempDir::new().expect("Failed to create work directory");
        let fixture = TestFixture { source, work };
        fixture.write_config("");
        fixture
    }

    fn path(&self) -> &Path {
        self.source.path()
    }

    fn reports_dir(&self) -> PathBuf {
        self.work.path().join("reports")
    }

    fn config_path(&self) -> PathBuf {
        self.work.path().join("config.toml")
    }

    fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).expect("Failed to write config");
    }

    fn options(&self, format: ReportFormat) -> RunOptions {
        RunOptions {
            config_path: Some(self.config_path()),
            report_format: Some(format),
            logs_dir: self.work.path().join("logs"),
            reports_dir: self.reports_dir(),
            log_file: None,
        }
    }

    /// Create a file (and its parent directories) with the given mtime.
    fn create_file_at(&self, rel_path: &str, content: &str, (y, m, d): (i32, u32, u32)) {
        let path = self.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
        let when: SystemTime = Local
            .with_ymd_and_hms(y, m, d, 12, 0, 0)
            .single()
            .expect("Unambiguous local time")
            .into();
        File::options()
            .write(true)
            .open(&path)
            .and_then(|f| f.set_modified(when))
            .expect("Failed to set mtime");
    }

    fn organize(&self, dry_run: bool, format: ReportFormat) -> Summary {
        match run_cli(
            OrganizeCommand::Organize { dry_run },
            self.path(),
            &self.options(format),
        ) {
            Ok(RunOutcome::Organized(summary)) => summary,
            other => panic!("Unexpected organize outcome: {:?}", other),
        }
    }

    fn reset(&self, path: &Path) -> ResetReport {
        match run_cli(OrganizeCommand::Reset, path, &self.options(ReportFormat::Csv)) {
            Ok(RunOutcome::Reset(report)) => report,
            other => panic!("Unexpected reset outcome: {:?}", other),
        }
    }

    fn assert_file_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(path.is_file(), "File should exist: {}", path.display());
    }

    fn assert_not_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(!path.exists(), "Path should not exist: {}", path.display());
    }

    /// Every path below the source root with file contents, sorted.
    fn snapshot(&self) -> Vec<(PathBuf, Option<Vec<u8>>)> {
        let mut entries = Vec::new();
        Self::walk_dir(self.path(), &mut entries);
        entries.sort();
        entries
    }

    fn walk_dir(dir: &Path, entries: &mut Vec<(PathBuf, Option<Vec<u8>>)>) {
        if let Ok(read) = fs::read_dir(dir) {
            for entry in read.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    entries.push((path.clone(), None));
                    Self::walk_dir(&path, entries);
                } else {
                    let content = fs::read(&path).ok();
                    entries.push((path, content));
                }
            }
        }
    }

    /// Header plus data rows of the csv report.
    fn read_csv_report(&self) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(self.reports_dir().join("file_report.csv"))
            .expect("Missing report");
        reader
            .records()
            .map(|record| {
                record
                    .expect("Failed to parse report row")
                    .iter()
                    .map(str::to_string)
                    .collect()
            })
            .collect()
    }
}

// ============================================================================
// Test Suite 1: Basic Organization
// ============================================================================

#[test]
fn test_photo_and_notes_scenario() {
    let fixture = TestFixture::new();
    fixture.create_file_at("photo.JPG", "jpeg", (2023, 5, 10));
    fixture.create_file_at("notes.txt", "text", (2024, 11, 2));

    let summary = fixture.organize(false, ReportFormat::Csv);

    assert_eq!(summary.moved, 2);
    fixture.assert_file_exists("Images/2023/05_May/photo.JPG");
    fixture.assert_file_exists("Documents/2024/11_November/notes.txt");
    fixture.assert_not_exists("photo.JPG");
    fixture.assert_not_exists("notes.txt");

    let rows = fixture.read_csv_report();
    assert_eq!(
        rows[0],
        ["File Name", "Original Path", "Category", "Year", "Month", "Target Path"]
    );
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][0], "notes.txt");
    assert_eq!(rows[1][2], "Documents");
    assert_eq!(rows[1][3], "2024");
    assert_eq!(rows[1][4], "11_November");
    assert_eq!(rows[2][0], "photo.JPG");
    assert_eq!(rows[2][2], "Images");
    assert_eq!(
        PathBuf::from(&rows[2][5]),
        fixture.path().join("Images/2023/05_May/photo.JPG")
    );
}

#[test]
fn test_nested_files_move_to_root_categories() {
    let fixture = TestFixture::new();
    fixture.create_file_at("downloads/2020/album.zip", "zip", (2020, 1, 31));
    fixture.create_file_at("downloads/track.FLAC", "flac", (2022, 7, 4));
    fixture.create_file_at("clip.mov", "mov", (2021, 12, 25));

    let summary = fixture.organize(false, ReportFormat::Csv);

    assert_eq!(summary.moved, 3);
    fixture.assert_file_exists("Archives/2020/01_January/album.zip");
    fixture.assert_file_exists("Music/2022/07_July/track.FLAC");
    fixture.assert_file_exists("Videos/2021/12_December/clip.mov");
    // Source subdirectories are left in place, only emptied.
    assert!(fixture.path().join("downloads/2020").is_dir());
}

#[test]
fn test_unknown_extension_goes_to_others() {
    let fixture = TestFixture::new();
    fixture.create_file_at("installer.exe", "bin", (2024, 2, 29));
    fixture.create_file_at("README", "readme", (2024, 2, 1));

    fixture.organize(false, ReportFormat::Csv);

    fixture.assert_file_exists("Others/2024/02_February/installer.exe");
    fixture.assert_file_exists("Others/2024/02_February/README");
}

#[test]
fn test_csv_report_quotes_paths_with_commas() {
    let fixture = TestFixture::new();
    fixture.create_file_at("inbox, old/a,b.txt", "a", (2024, 3, 1));

    fixture.organize(false, ReportFormat::Csv);

    let rows = fixture.read_csv_report();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], "a,b.txt");
    assert_eq!(
        PathBuf::from(&rows[1][1]),
        fixture.path().join("inbox, old/a,b.txt")
    );
    assert_eq!(
        PathBuf::from(&rows[1][5]),
        fixture.path().join("Documents/2024/03_March/a,b.txt")
    );
}

#[test]
fn test_default_xlsx_report() {
    let fixture = TestFixture::new();
    fixture.create_file_at("slides.pptx", "pptx", (2023, 3, 3));

    let summary = fixture.organize(false, ReportFormat::Xlsx);

    let report = fixture.reports_dir().join("file_report.xlsx");
    assert_eq!(summary.report_path, Some(report.clone()));
    let bytes = fs::read(&report).expect("Missing xlsx report");
    assert_eq!(&bytes[..2], b"PK");
}

// ============================================================================
// Test Suite 2: Dry Run
// ============================================================================

#[test]
fn test_dry_run_leaves_tree_untouched_and_reports() {
    let fixture = TestFixture::new();
    fixture.create_file_at("photo.JPG", "jpeg", (2023, 5, 10));
    fixture.create_file_at("inbox/notes.txt", "text", (2024, 11, 2));
    let before = fixture.snapshot();

    let summary = fixture.organize(true, ReportFormat::Csv);

    assert_eq!(fixture.snapshot(), before);
    assert_eq!(summary.moved, 0);
    assert_eq!(summary.simulated, 2);
    fixture.assert_not_exists("Images");
    fixture.assert_not_exists("Documents");

    let rows = fixture.read_csv_report();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        PathBuf::from(&rows[1][5]),
        fixture.path().join("Documents/2024/11_November/notes.txt")
    );
}

// ============================================================================
// Test Suite 3: Duplicates and Re-runs
// ============================================================================

#[test]
fn test_same_named_files_move_once() {
    let fixture = TestFixture::new();
    fixture.create_file_at("a/song.mp3", "first", (2022, 6, 1));
    fixture.create_file_at("b/song.mp3", "second", (2022, 6, 20));

    let summary = fixture.organize(false, ReportFormat::Csv);

    assert_eq!(summary.moved, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.processed(), 2);
    let target = fixture.path().join("Music/2022/06_June/song.mp3");
    assert_eq!(fs::read_to_string(&target).expect("read target"), "first");
    fixture.assert_file_exists("b/song.mp3");

    // Both rows are reported, with the same intended target.
    let rows = fixture.read_csv_report();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][5], rows[2][5]);
}

#[test]
fn test_rerun_moves_nothing() {
    let fixture = TestFixture::new();
    fixture.create_file_at("photo.JPG", "jpeg", (2023, 5, 10));
    fixture.create_file_at("notes.txt", "text", (2024, 11, 2));

    let first = fixture.organize(false, ReportFormat::Csv);
    let after_first = fixture.snapshot();
    let second = fixture.organize(false, ReportFormat::Csv);

    assert_eq!(first.moved, 2);
    assert_eq!(second.moved, 0);
    assert_eq!(second.processed(), 0);
    assert!(second.report_path.is_none());
    assert_eq!(fixture.snapshot(), after_first);
}

#[test]
fn test_rerun_picks_up_new_files_only() {
    let fixture = TestFixture::new();
    fixture.create_file_at("a.pdf", "a", (2024, 1, 5));
    fixture.organize(false, ReportFormat::Csv);

    fixture.create_file_at("b.pdf", "b", (2024, 1, 6));
    let second = fixture.organize(false, ReportFormat::Csv);

    assert_eq!(second.moved, 1);
    assert_eq!(second.records[0].file_name, "b.pdf");
    fixture.assert_file_exists("Documents/2024/01_January/a.pdf");
    fixture.assert_file_exists("Documents/2024/01_January/b.pdf");
}

// ============================================================================
// Test Suite 4: Configuration and Filtering
// ============================================================================

#[test]
fn test_config_custom_months_and_categories() {
    let fixture = TestFixture::new();
    fixture.write_config(
        r#"
        months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun",
                  "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]

        [categories]
        Images = [".webp"]
        "#,
    );
    fixture.create_file_at("scan.webp", "webp", (2021, 9, 9));
    fixture.create_file_at("old.jpg", "jpg", (2021, 9, 9));

    fixture.organize(false, ReportFormat::Csv);

    fixture.assert_file_exists("Images/2021/09_Sep/scan.webp");
    fixture.assert_file_exists("Others/2021/09_Sep/old.jpg");
}

#[test]
fn test_config_exclusions() {
    let fixture = TestFixture::new();
    fixture.write_config(
        r#"
        [filters.exclude]
        filenames = ["Thumbs.db"]
        extensions = ["part"]
        "#,
    );
    fixture.create_file_at("Thumbs.db", "db", (2024, 4, 4));
    fixture.create_file_at("movie.mkv.part", "partial", (2024, 4, 4));
    fixture.create_file_at("movie.mkv", "full", (2024, 4, 4));

    let summary = fixture.organize(false, ReportFormat::Csv);

    assert_eq!(summary.moved, 1);
    fixture.assert_file_exists("Thumbs.db");
    fixture.assert_file_exists("movie.mkv.part");
    fixture.assert_file_exists("Videos/2024/04_April/movie.mkv");
}

#[test]
fn test_invalid_config_is_an_error() {
    let fixture = TestFixture::new();
    fixture.write_config("months = [\"only one\"]\n");
    fixture.create_file_at("a.txt", "a", (2024, 4, 4));

    let result = run_cli(
        OrganizeCommand::Organize { dry_run: false },
        fixture.path(),
        &fixture.options(ReportFormat::Csv),
    );

    assert!(result.is_err());
    fixture.assert_file_exists("a.txt");
}

// ============================================================================
// Test Suite 5: Reset
// ============================================================================

#[test]
fn test_reset_empties_root() {
    let fixture = TestFixture::new();
    fixture.create_file_at("one.txt", "1", (2024, 1, 1));
    fixture.create_file_at("two.jpg", "2", (2024, 1, 1));
    fixture.create_file_at("three.zip", "3", (2024, 1, 1));
    fixture.create_file_at("sub1/nested.txt", "n", (2024, 1, 1));
    fs::create_dir(fixture.path().join("sub2")).expect("Failed to create sub2");

    let report = fixture.reset(fixture.path());

    assert!(report.existed);
    assert_eq!(report.removed_files, 3);
    assert_eq!(report.removed_dirs, 2);
    assert!(fixture.path().is_dir());
    assert!(fixture.snapshot().is_empty());
}

#[test]
fn test_reset_after_organize() {
    let fixture = TestFixture::new();
    fixture.create_file_at("photo.JPG", "jpeg", (2023, 5, 10));
    fixture.organize(false, ReportFormat::Csv);

    fixture.reset(fixture.path());

    assert!(fixture.snapshot().is_empty());
}

// ============================================================================
// Test Suite 6: Edge Cases
// ============================================================================

#[test]
fn test_missing_source_folder_is_soft() {
    let fixture = TestFixture::new();
    let missing = fixture.path().join("does-not-exist");

    let organized = run_cli(
        OrganizeCommand::Organize { dry_run: false },
        &missing,
        &fixture.options(ReportFormat::Csv),
    );
    assert!(matches!(organized, Ok(RunOutcome::Organized(ref s)) if s.processed() == 0));

    let report = fixture.reset(&missing);
    assert!(!report.existed);
    assert!(!fixture.reports_dir().exists());
}

#[test]
fn test_empty_directory_writes_no_report() {
    let fixture = TestFixture::new();

    let summary = fixture.organize(false, ReportFormat::Csv);

    assert_eq!(summary.processed(), 0);
    assert!(summary.report_path.is_none());
    assert!(!fixture.reports_dir().exists());
}

#[test]
fn test_reports_dir_inside_source_is_not_organized() {
    let fixture = TestFixture::new();
    fixture.create_file_at("a.txt", "a", (2024, 8, 8));
    let mut options = fixture.options(ReportFormat::Csv);
    options.reports_dir = fixture.path().join("reports");

    run_cli(
        OrganizeCommand::Organize { dry_run: false },
        fixture.path(),
        &options,
    )
    .expect("First run failed");
    let second = run_cli(
        OrganizeCommand::Organize { dry_run: false },
        fixture.path(),
        &options,
    )
    .expect("Second run failed");

    fixture.assert_file_exists("reports/file_report.csv");
    assert!(matches!(second, RunOutcome::Organized(ref s) if s.processed() == 0));
}
