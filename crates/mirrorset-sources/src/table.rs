//! Tabular sources — delimited exports with a header row.
//!
//! Rows are read as raw bytes and converted lossily, so a stray non-UTF-8
//! cell never sinks the whole table. Rows with more cells than the header
//! are skipped; rows with fewer simply lack the trailing columns.

use std::path::{Path, PathBuf};

use mirrorset_core::standardize::{standardize, ColumnMap, SourceRow};
use mirrorset_core::{Label, SourceKind, StandardRecord};

use crate::error::{Result, SourceError};
use crate::RecordSource;

/// Field delimiter for `path`: tab for `.tsv`, comma otherwise.
fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

/// Load a delimited table into rows keyed by header name.
///
/// A missing or unreadable file is fatal. Malformed individual rows are
/// skipped and counted.
pub fn tabular_load(path: &Path) -> Result<Vec<SourceRow>> {
    if !path.exists() {
        return Err(SourceError::Missing {
            path: path.to_path_buf(),
        });
    }
    let table_err = |source: csv::Error| SourceError::Table {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter_for(path))
        .from_path(path)
        .map_err(table_err)?;
    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(table_err)?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.byte_records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(table_err(e)),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping malformed row");
                skipped += 1;
                continue;
            }
        };
        if record.len() > headers.len() {
            skipped += 1;
            continue;
        }
        let row: SourceRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, cell)| (h.clone(), String::from_utf8_lossy(cell).into_owned()))
            .collect();
        rows.push(row);
    }

    if skipped > 0 {
        tracing::warn!(path = %path.display(), skipped, "skipped malformed rows");
    }
    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded table");
    Ok(rows)
}

/// A tabular export mapped onto the canonical schema through a [`ColumnMap`].
#[derive(Debug, Clone)]
pub struct TableSource {
    kind: SourceKind,
    path: PathBuf,
    columns: ColumnMap,
    label: Label,
}

impl TableSource {
    /// Security-scanner / WAF export; every row is an attack.
    pub fn scanner_export(path: impl Into<PathBuf>, columns: ColumnMap) -> Self {
        Self {
            kind: SourceKind::ScannerExport,
            path: path.into(),
            columns,
            label: Label::Attack,
        }
    }

    /// Ordinary-traffic export; every row is normal.
    pub fn normal_export(path: impl Into<PathBuf>, columns: ColumnMap) -> Self {
        Self {
            kind: SourceKind::NormalExport,
            path: path.into(),
            columns,
            label: Label::Normal,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for TableSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    fn label(&self) -> Label {
        self.label
    }

    fn load(&self) -> Result<Vec<StandardRecord>> {
        let rows = tabular_load(&self.path)?;
        Ok(standardize(&rows, &self.columns, self.label))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
