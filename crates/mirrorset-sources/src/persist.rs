//! Table persistence — writes [`StandardRecord`]s as CSV.
//!
//! Column order is fixed to [`COLUMNS`] and the header is written even for
//! an empty table. [`persist_split`] stages both tables next to their final
//! names and renames them only once both are complete, so a failed run never
//! leaves a partial train/val pair behind.

use std::path::{Path, PathBuf};

use mirrorset_core::{StandardRecord, COLUMNS};

use crate::error::{Result, SourceError};

pub const TRAIN_FILE: &str = "train.csv";
pub const VAL_FILE: &str = "val.csv";

/// Where [`persist_split`] put the two tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPaths {
    pub train: PathBuf,
    pub val: PathBuf,
}

/// Write `rows` to `path` as CSV with a header row.
pub fn persist_table(rows: &[StandardRecord], path: &Path) -> Result<()> {
    let write_err = |source: csv::Error| SourceError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(write_err)?;
    writer.write_record(COLUMNS).map_err(write_err)?;
    for row in rows {
        writer.serialize(row).map_err(write_err)?;
    }
    writer.flush().map_err(|e| write_err(e.into()))?;
    Ok(())
}

/// Write `train.csv` and `val.csv` into `dir`, creating it if needed.
pub fn persist_split(
    dir: &Path,
    train: &[StandardRecord],
    val: &[StandardRecord],
) -> Result<SplitPaths> {
    std::fs::create_dir_all(dir).map_err(|source| SourceError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let paths = SplitPaths {
        train: dir.join(TRAIN_FILE),
        val: dir.join(VAL_FILE),
    };
    let staged = [
        (staging_path(&paths.train), train, &paths.train),
        (staging_path(&paths.val), val, &paths.val),
    ];

    let written = staged
        .iter()
        .try_for_each(|(tmp, rows, _)| persist_table(rows, tmp));
    if let Err(e) = written {
        discard(staged.iter().map(|(tmp, _, _)| tmp.as_path()));
        return Err(e);
    }

    let mut published: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (tmp, _, target) in &staged {
        if let Err(source) = std::fs::rename(tmp, target) {
            discard(staged.iter().map(|(tmp, _, _)| tmp.as_path()));
            for path in &published {
                tracing::warn!(path = %path.display(), "table already published; pair is incomplete");
            }
            return Err(SourceError::Publish {
                path: target.to_path_buf(),
                published,
                source,
            });
        }
        published.push(target.to_path_buf());
    }

    tracing::info!(
        train = %paths.train.display(),
        val = %paths.val.display(),
        train_rows = train.len(),
        val_rows = val.len(),
        "persisted dataset"
    );
    Ok(paths)
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

fn discard<'a>(paths: impl Iterator<Item = &'a Path>) {
    for path in paths {
        if let Err(e) = std::fs::remove_file(path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove staged file");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
