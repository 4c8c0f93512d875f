//! Pipeline — one end-to-end run from raw sources to persisted tables.
//!
//! ```text
//! TableSource ─┐
//! golden ──────┼──► PoolComponents ──► balance ──► persist_split ──► manifest.json
//! CategorySource┘
//! ```
//!
//! Source-load failures abort the run before anything is written.

use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

use mirrorset_core::balance::{build_dataset, Dataset, PoolComponents};
use mirrorset_core::config::Config;
use mirrorset_core::{golden, Label, SourceKind, StandardRecord};
use mirrorset_sources::{persist_split, CategorySource, RecordSource, SplitPaths, TableSource};

pub const MANIFEST_FILE: &str = "manifest.json";

/// Record count contributed by one source.
#[derive(Debug, Clone, Serialize)]
pub struct SourceStat {
    pub kind: SourceKind,
    pub label: u8,
    pub path: Option<PathBuf>,
    pub records: usize,
}

/// Written next to the tables; describes how they were produced.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub seed: u64,
    pub attack_pool: usize,
    pub normal_pool: usize,
    pub per_label: usize,
    pub train_rows: usize,
    pub val_rows: usize,
    pub sources: Vec<SourceStat>,
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub tables: SplitPaths,
    pub manifest: PathBuf,
    pub dataset: Dataset,
}

/// Load every source for `label` and return its pool ingredients.
fn gather(
    config: &Config,
    label: Label,
    stats: &mut Vec<SourceStat>,
) -> anyhow::Result<PoolComponents> {
    let source_cfg = config.sources.for_label(label);
    let table_path = config.resolve(&source_cfg.table);
    let table = match label {
        Label::Attack => TableSource::scanner_export(&table_path, source_cfg.columns.clone()),
        Label::Normal => TableSource::normal_export(&table_path, source_cfg.columns.clone()),
    };
    let source = load(&table, Some(table_path.clone()), stats)
        .with_context(|| format!("loading {label} table {}", table_path.display()))?;

    tracing::info!(%label, "injecting golden samples");
    let golden = golden::samples(label);
    stats.push(SourceStat {
        kind: SourceKind::Golden,
        label: label.as_u8(),
        path: None,
        records: golden.len(),
    });

    tracing::info!(%label, "injecting categorical anchors");
    let categories_path = config.resolve(&source_cfg.categories);
    let categories = CategorySource::new(&categories_path, label);
    let anchors = load(&categories, Some(categories_path.clone()), stats)
        .with_context(|| format!("loading {label} categories {}", categories_path.display()))?;

    Ok(PoolComponents {
        source,
        golden,
        anchors,
    })
}

fn load(
    source: &dyn RecordSource,
    path: Option<PathBuf>,
    stats: &mut Vec<SourceStat>,
) -> anyhow::Result<Vec<StandardRecord>> {
    let records = source.load()?;
    tracing::debug!(
        kind = %source.kind(),
        label = %source.label(),
        records = records.len(),
        "loaded source"
    );
    stats.push(SourceStat {
        kind: source.kind(),
        label: source.label().as_u8(),
        path,
        records: records.len(),
    });
    Ok(records)
}

/// Run the whole pipeline with `config` and persist the result under
/// `config.paths.output_dir`.
pub fn run(config: &Config) -> anyhow::Result<RunSummary> {
    config.balance.validate()?;

    let mut stats = Vec::new();
    let attack = gather(config, Label::Attack, &mut stats)?;
    let normal = gather(config, Label::Normal, &mut stats)?;

    let balance = &config.balance;
    stats.push(SourceStat {
        kind: SourceKind::Baseline,
        label: Label::Normal.as_u8(),
        path: None,
        records: balance.baseline_fill,
    });

    let dataset = build_dataset(attack, normal, balance)?;

    let out = &config.paths.output_dir;
    let tables = persist_split(out, &dataset.train, &dataset.val)
        .with_context(|| format!("writing dataset to {}", out.display()))?;

    let manifest = Manifest {
        generated_at: chrono::Utc::now(),
        seed: balance.seed,
        attack_pool: dataset.attack_pool,
        normal_pool: dataset.normal_pool,
        per_label: dataset.per_label,
        train_rows: dataset.train.len(),
        val_rows: dataset.val.len(),
        sources: stats,
    };
    let manifest_path = out.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(&manifest_path, json)
        .with_context(|| format!("writing {}", manifest_path.display()))?;

    tracing::info!(out = %out.display(), "standardized dataset (mirror split) saved");
    Ok(RunSummary {
        tables,
        manifest: manifest_path,
        dataset,
    })
}
