/// File categorization by extension.
///
/// This module maps file names to one of a fixed set of categories using an
/// ordered extension table. The table is plain data owned by the classifier so
/// that callers (and tests) can supply their own.
///
/// # Examples
///
/// ```
/// use datesort::file_category::{Category, CategoryTable};
///
/// let table = CategoryTable::default();
/// assert_eq!(table.classify("photo.JPG"), Category::Images);
/// assert_eq!(table.classify("notes.txt"), Category::Documents);
/// assert_eq!(table.classify("setup.exe"), Category::Others);
/// ```
use std::fmt;

/// Represents a broad file category.
///
/// The display name of a category doubles as the name of its top-level
/// directory under the organized root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Image files (JPG, PNG, GIF, etc.)
    Images,
    /// Document files (PDF, DOCX, TXT, etc.)
    Documents,
    /// Video files (MP4, AVI, MOV, MKV)
    Videos,
    /// Audio files (MP3, WAV, FLAC)
    Music,
    /// Archive files (ZIP, RAR, TAR, GZ)
    Archives,
    /// Anything not matched by the table
    Others,
}

impl Category {
    /// Every category, in table declaration order.
    pub const ALL: [Category; 6] = [
        Category::Images,
        Category::Documents,
        Category::Videos,
        Category::Music,
        Category::Archives,
        Category::Others,
    ];

    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use datesort::file_category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "Images");
    /// assert_eq!(Category::Others.dir_name(), "Others");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "Images",
            Category::Documents => "Documents",
            Category::Videos => "Videos",
            Category::Music => "Music",
            Category::Archives => "Archives",
            Category::Others => "Others",
        }
    }

    /// Looks a category up by its directory name (exact match).
    pub fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.dir_name() == name)
    }

    /// Returns true if `segment` is the directory name of any category.
    pub fn is_category_dir(segment: &str) -> bool {
        Self::from_dir_name(segment).is_some()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Ordered extension table used to classify file names.
///
/// Matching walks the table in order and the first category whose extension
/// list contains a suffix of the (lowercased) file name wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    entries: Vec<(Category, Vec<String>)>,
}

impl CategoryTable {
    /// Builds a table from `(category, extensions)` pairs.
    ///
    /// Extensions are lowercased; a missing leading dot is added so that
    /// `"jpg"` and `".jpg"` behave the same.
    pub fn new<I, E, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Category, E)>,
        E: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(category, exts)| {
                let exts = exts.into_iter().map(|e| normalize_extension(e.as_ref())).collect();
                (category, exts)
            })
            .collect();
        Self { entries }
    }

    /// Replaces the extension list of `category`, keeping its position.
    ///
    /// A category absent from the table is appended at the end.
    pub fn set_extensions<E, S>(&mut self, category: Category, extensions: E)
    where
        E: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let exts: Vec<String> = extensions
            .into_iter()
            .map(|e| normalize_extension(e.as_ref()))
            .collect();
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some((_, slot)) => *slot = exts,
            None => self.entries.push((category, exts)),
        }
    }

    /// Returns the extensions registered for `category`.
    pub fn extensions(&self, category: Category) -> &[String] {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, exts)| exts.as_slice())
            .unwrap_or(&[])
    }

    /// Classifies a file name (or path string) by its suffix.
    ///
    /// Matching is case-insensitive. No match yields [`Category::Others`].
    pub fn classify(&self, name: &str) -> Category {
        let lower = name.to_lowercase();
        self.entries
            .iter()
            .find(|(_, exts)| exts.iter().any(|ext| lower.ends_with(ext.as_str())))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Others)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::new([
            (
                Category::Images,
                vec![".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff"],
            ),
            (
                Category::Documents,
                vec![".pdf", ".docx", ".doc", ".txt", ".xlsx", ".pptx", ".csv"],
            ),
            (Category::Videos, vec![".mp4", ".avi", ".mov", ".mkv"]),
            (Category::Music, vec![".mp3", ".wav", ".flac"]),
            (Category::Archives, vec![".zip", ".rar", ".tar", ".gz"]),
            (Category::Others, vec![]),
        ])
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}
