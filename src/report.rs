//! Data report for the `check-data` command.

use std::fmt;
use std::path::PathBuf;

use strum::IntoEnumIterator;

use crate::error::StoreError;
use crate::service::{category_counts, CategoryCount};
use crate::store::{JsonFileStore, SourceFile};

/// What was found in a data directory.
#[derive(Debug, Clone, PartialEq)]
pub struct DataReport {
    /// Directory that was read.
    pub data_dir: PathBuf,
    /// Questions per file; `None` for missing or blank files.
    pub files: Vec<(SourceFile, Option<usize>)>,
    /// Questions per category across every file.
    pub categories: Vec<CategoryCount>,
}

impl DataReport {
    /// Load every source file once, counting per file and per category.
    ///
    /// Fails on the first malformed file, like server startup does.
    pub fn collect(store: &JsonFileStore) -> Result<Self, StoreError> {
        let mut files = Vec::new();
        let mut questions = Vec::new();

        for source in SourceFile::iter() {
            let batch = store.load_file(source)?;
            files.push((source, batch.as_ref().map(Vec::len)));
            questions.extend(batch.unwrap_or_default());
        }

        Ok(Self {
            data_dir: store.data_dir().to_path_buf(),
            files,
            categories: category_counts(&questions),
        })
    }

    /// Total questions across every file.
    pub fn total(&self) -> usize {
        self.files.iter().filter_map(|(_, count)| *count).sum()
    }
}

impl fmt::Display for DataReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(70);
        let thin = "-".repeat(70);

        writeln!(f, "{}", rule)?;
        writeln!(f, "TRIVIA API - DATA CHECK")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Data directory: {}", self.data_dir.display())?;
        writeln!(f, "Files:")?;
        for (source, count) in &self.files {
            match count {
                Some(n) => writeln!(f, "  {:<40} {:>5}", source.to_string(), n)?,
                None => writeln!(f, "  {:<40} {:>5}", source.to_string(), "-")?,
            }
        }

        writeln!(f, "{}", thin)?;
        writeln!(f, "Categories:")?;
        for category in &self.categories {
            writeln!(f, "  {:<40} {:>5}", category.categoria, category.total)?;
        }

        writeln!(f, "{}", thin)?;
        writeln!(f, "Total questions: {}", self.total())?;
        write!(f, "{}", rule)
    }
}
