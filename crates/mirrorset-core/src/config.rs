//! Configuration types for mirrorset.
//!
//! [`Config::load`] layers, in order: the embedded defaults, a TOML file
//! (`--config` path, or `~/.config/mirrorset/config.toml` when present), and
//! `MIRRORSET_<SECTION>__<KEY>` environment variables. [`Config::defaults`]
//! returns the embedded defaults without touching the filesystem (useful in
//! tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::standardize::ColumnMap;
use crate::types::{Field, Label};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[paths]
data_dir   = "data"
output_dir = "data/processed"

[sources.attack]
table      = "attack.csv"
categories = "attack.txt"

[sources.attack.columns]
method  = "http_method"
path    = "http_path"
query   = "http_query"
headers = "http_headers"

[sources.normal]
table      = "nm2.xlsx.csv"
categories = "normal.txt"

[sources.normal.columns]
method  = "Method"
path    = "Path"
query   = "Query"
headers = "Headers"
body    = "Body"

[balance]
attack_anchor_repeat = 200
normal_anchor_repeat = 100
baseline_fill        = 10000
max_pool_size        = 100000
validation_fraction  = 0.1
seed                 = 42
"#;

const ENV_PREFIX: &str = "MIRRORSET";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub balance: BalanceConfig,
}

/// `[paths]` section. Relative source paths resolve against `data_dir`.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_output_dir() -> PathBuf { PathBuf::from("data/processed") }

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
        }
    }
}

/// `[sources.attack]` / `[sources.normal]`: one tabular export plus one
/// category text file per label.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub table: PathBuf,
    pub categories: PathBuf,
    #[serde(default)]
    pub columns: ColumnMap,
}

/// `[sources]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_attack_source")]
    pub attack: SourceConfig,
    #[serde(default = "default_normal_source")]
    pub normal: SourceConfig,
}

fn default_attack_source() -> SourceConfig {
    SourceConfig {
        table: PathBuf::from("attack.csv"),
        categories: PathBuf::from("attack.txt"),
        columns: ColumnMap::default()
            .map(Field::Method, "http_method")
            .map(Field::Path, "http_path")
            .map(Field::Query, "http_query")
            .map(Field::Headers, "http_headers"),
    }
}

fn default_normal_source() -> SourceConfig {
    SourceConfig {
        table: PathBuf::from("nm2.xlsx.csv"),
        categories: PathBuf::from("normal.txt"),
        columns: ColumnMap::default()
            .map(Field::Method, "Method")
            .map(Field::Path, "Path")
            .map(Field::Query, "Query")
            .map(Field::Headers, "Headers")
            .map(Field::Body, "Body"),
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            attack: default_attack_source(),
            normal: default_normal_source(),
        }
    }
}

impl SourcesConfig {
    pub fn for_label(&self, label: Label) -> &SourceConfig {
        match label {
            Label::Attack => &self.attack,
            Label::Normal => &self.normal,
        }
    }
}

/// `[balance]` section — the mirror-construction knobs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BalanceConfig {
    /// Copies of each attack anchor record added to the attack pool.
    #[serde(default = "default_attack_anchor_repeat")]
    pub attack_anchor_repeat: usize,
    /// Copies of each normal anchor record added to the normal pool.
    #[serde(default = "default_normal_anchor_repeat")]
    pub normal_anchor_repeat: usize,
    /// Trivial `GET /` records appended to the normal pool.
    #[serde(default = "default_baseline_fill")]
    pub baseline_fill: usize,
    /// Upper bound on records sampled per label.
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: usize,
    /// Held-out share for the validation table, in `(0, 1)`.
    #[serde(default = "default_validation_fraction")]
    pub validation_fraction: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_attack_anchor_repeat() -> usize { 200 }
fn default_normal_anchor_repeat() -> usize { 100 }
fn default_baseline_fill() -> usize { 10_000 }
fn default_max_pool_size() -> usize { 100_000 }
fn default_validation_fraction() -> f64 { 0.1 }
fn default_seed() -> u64 { 42 }

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            attack_anchor_repeat: default_attack_anchor_repeat(),
            normal_anchor_repeat: default_normal_anchor_repeat(),
            baseline_fill: default_baseline_fill(),
            max_pool_size: default_max_pool_size(),
            validation_fraction: default_validation_fraction(),
            seed: default_seed(),
        }
    }
}

impl BalanceConfig {
    pub fn anchor_repeat(&self, label: Label) -> usize {
        match label {
            Label::Attack => self.attack_anchor_repeat,
            Label::Normal => self.normal_anchor_repeat,
        }
    }

    /// Reject settings the balancer cannot honour.
    pub fn validate(&self) -> Result<()> {
        let f = self.validation_fraction;
        if !(f > 0.0 && f < 1.0) {
            return Err(Error::InvalidFraction(f));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration layered on top of the built-in defaults.
    ///
    /// An explicit `path` must exist; the per-user default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (file, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path(), false),
        };
        tracing::debug!(path = %file.display(), required, "loading configuration");

        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(file.as_path()).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        cfg.balance.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Resolve a source path against `data_dir` unless it is absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.paths.data_dir.join(path)
        }
    }

    /// Write the embedded defaults to `path` (or the per-user default
    /// location). Existing files are left alone unless `force` is set.
    /// Returns the path written, or `None` if it already existed.
    pub fn write_defaults(path: Option<&Path>, force: bool) -> Result<Option<PathBuf>> {
        let path = path.map_or_else(config_path, Path::to_path_buf);
        if path.exists() && !force {
            return Ok(None);
        }
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())
        };
        write().map_err(|source| Error::ConfigWrite {
            path: path.clone(),
            source,
        })?;
        Ok(Some(path))
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Per-user config location: `$XDG_CONFIG_HOME/mirrorset/config.toml`.
pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("mirrorset")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
