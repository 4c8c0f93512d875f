//! Test builders — ergonomic constructors for records, pools and data
//! directories.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use std::path::{Path, PathBuf};

use mirrorset::balance::PoolComponents;
use mirrorset::config::{BalanceConfig, Config};
use mirrorset::{Field, Label, StandardRecord};

use super::fixtures::*;

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`StandardRecord`] test fixtures.
///
/// # Example
///
/// ```rust
/// let rec = RecordBuilder::attack()
///     .path("/api/users")
///     .query("id=1' OR '1'='1")
///     .build();
/// ```
pub struct RecordBuilder {
    record: StandardRecord,
}

impl RecordBuilder {
    pub fn new(label: Label) -> Self {
        Self {
            record: StandardRecord::new(label),
        }
    }

    pub fn attack() -> Self {
        Self::new(Label::Attack)
    }

    pub fn normal() -> Self {
        Self::new(Label::Normal)
    }

    pub fn method(self, v: &str) -> Self {
        self.set(Field::Method, v)
    }

    pub fn path(self, v: &str) -> Self {
        self.set(Field::Path, v)
    }

    pub fn query(self, v: &str) -> Self {
        self.set(Field::Query, v)
    }

    pub fn body(self, v: &str) -> Self {
        self.set(Field::Body, v)
    }

    fn set(mut self, field: Field, v: &str) -> Self {
        *self.record.field_mut(field) = v.to_string();
        self
    }

    pub fn build(self) -> StandardRecord {
        self.record
    }
}

// ---------------------------------------------------------------------------
// Pools
// ---------------------------------------------------------------------------

/// `n` records with unique paths `/{prefix}/{i}`.
pub fn unique_records(label: Label, prefix: &str, n: usize) -> Vec<StandardRecord> {
    (0..n)
        .map(|i| RecordBuilder::new(label).path(&format!("/{prefix}/{i}")).build())
        .collect()
}

/// Pool components holding only `n` unique source records.
pub fn source_only(label: Label, n: usize) -> PoolComponents {
    PoolComponents {
        source: unique_records(label, &label.to_string(), n),
        ..Default::default()
    }
}

/// Balance settings with no amplification or filler, so pool size equals the
/// number of source records.
pub fn plain_balance(max_pool_size: usize, seed: u64) -> BalanceConfig {
    BalanceConfig {
        attack_anchor_repeat: 1,
        normal_anchor_repeat: 1,
        baseline_fill: 0,
        max_pool_size,
        validation_fraction: 0.1,
        seed,
    }
}

// ---------------------------------------------------------------------------
// Data directories
// ---------------------------------------------------------------------------

/// A temporary data directory populated with the fixture sources, plus a
/// [`Config`] pointing at it.
pub struct DataDir {
    pub dir: tempfile::TempDir,
    pub config: Config,
}

impl DataDir {
    /// All four fixture sources, small amplification factors.
    pub fn populated() -> Self {
        let dir = tempfile::tempdir().expect("create temp data dir");
        write(dir.path(), "attack.csv", ATTACK_CSV);
        write(dir.path(), "nm2.xlsx.csv", NORMAL_CSV);
        write(dir.path(), "attack.txt", ATTACK_CATEGORIES);
        write(dir.path(), "normal.txt", NORMAL_CATEGORIES);

        let mut config = Config::defaults();
        config.paths.data_dir = dir.path().to_path_buf();
        config.paths.output_dir = dir.path().join("processed");
        config.balance = BalanceConfig {
            attack_anchor_repeat: 5,
            normal_anchor_repeat: 3,
            baseline_fill: 20,
            max_pool_size: 1_000,
            validation_fraction: 0.2,
            seed: 7,
        };
        Self { dir, config }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn remove(&self, name: &str) {
        std::fs::remove_file(self.path(name)).expect("remove fixture file");
    }

    /// Same sources, different output directory.
    pub fn config_with_output(&self, name: &str) -> Config {
        let mut config = self.config.clone();
        config.paths.output_dir = self.path(name);
        config
    }
}

fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("write fixture file");
}
