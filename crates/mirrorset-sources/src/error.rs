//! Error types for mirrorset-sources.
//!
//! Every variant is fatal for a pipeline run and carries the path involved so
//! the operator can see which input or output was at fault. Row-level
//! problems inside a readable table are not errors; they are skipped.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("required source table {} does not exist", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unreadable table {}: {source}", path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// `published` lists the tables already renamed into place before the
    /// failure.
    #[error(
        "failed to move {} into place ({} table(s) already published): {source}",
        path.display(),
        published.len()
    )]
    Publish {
        path: PathBuf,
        published: Vec<PathBuf>,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = SourceError> = std::result::Result<T, E>;
