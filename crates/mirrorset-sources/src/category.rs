//! Category text sources — curated `<n>. <category>: <example>` lists.
//!
//! A missing category file is tolerated and contributes no records.

use std::path::{Path, PathBuf};

use mirrorset_core::standardize::standardize_categories;
use mirrorset_core::{Label, SourceKind, StandardRecord};

use crate::error::{Result, SourceError};
use crate::RecordSource;

/// Read `path` line by line. A file that does not exist yields no lines;
/// any other read failure is fatal.
pub fn text_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "text source not found; treating as empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(SourceError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect())
}

/// Anchor records parsed from a category file.
#[derive(Debug, Clone)]
pub struct CategorySource {
    path: PathBuf,
    label: Label,
}

impl CategorySource {
    pub fn new(path: impl Into<PathBuf>, label: Label) -> Self {
        Self {
            path: path.into(),
            label,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for CategorySource {
    fn kind(&self) -> SourceKind {
        SourceKind::CategoryText
    }

    fn label(&self) -> Label {
        self.label
    }

    fn load(&self) -> Result<Vec<StandardRecord>> {
        let lines = text_lines(&self.path)?;
        Ok(standardize_categories(&lines, self.label))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
