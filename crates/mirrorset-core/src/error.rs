//! Error types for mirrorset-core.
//!
//! Only configuration problems are errors here. Per-record anomalies (missing
//! cells, unparseable URLs, malformed category lines, bad percent-encoding)
//! are degraded locally and never surface as an [`Error`].

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("validation_fraction must lie strictly between 0 and 1, got {0}")]
    InvalidFraction(f64),

    #[error("label must be 0 (normal) or 1 (attack), got {0}")]
    InvalidLabel(u8),

    #[error("failed to write configuration to {}: {source}", path.display())]
    ConfigWrite {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
