//! Mirror balancer — builds one candidate pool per label, samples both to
//! the same size and splits the result into train and validation halves.
//!
//! # Pools
//!
//! ```text
//! attack pool = scanner rows ++ golden ++ anchors × attack_anchor_repeat
//! normal pool = normal rows  ++ golden ++ anchors × normal_anchor_repeat ++ baseline × baseline_fill
//! ```
//!
//! A pool is a list of segments indexed virtually, so repeated anchors and
//! baseline filler are never copied until they are drawn. Pool membership is
//! authoritative: every record drawn from a pool carries that pool's label.
//!
//! # Randomness
//!
//! Each label samples from its own stream derived from the run seed, and the
//! split uses a third stream. The result does not depend on the order the
//! draws are made in.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::BalanceConfig;
use crate::error::Result;
use crate::split::stratified_split;
use crate::types::{Label, SourceKind, StandardRecord};

/// Seed-stream tags. Mixed into the run seed so each consumer gets an
/// independent generator.
const ATTACK_STREAM: u64 = 0xA7;
const NORMAL_STREAM: u64 = 0x40;
const SPLIT_STREAM: u64 = 0x5B;

/// Derive an independent generator for one consumer of the run seed.
fn stream_rng(seed: u64, tag: u64) -> StdRng {
    StdRng::seed_from_u64(stream_seed(seed, tag))
}

fn stream_seed(seed: u64, tag: u64) -> u64 {
    seed ^ tag.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn label_stream(label: Label) -> u64 {
    match label {
        Label::Attack => ATTACK_STREAM,
        Label::Normal => NORMAL_STREAM,
    }
}

/// A contiguous run of a pool: `records` repeated `repeat` times.
#[derive(Debug, Clone)]
pub struct PoolSegment {
    pub kind: SourceKind,
    pub records: Vec<StandardRecord>,
    pub repeat: usize,
}

impl PoolSegment {
    /// Virtual length. Saturates rather than overflowing on extreme repeats.
    pub fn len(&self) -> usize {
        self.records.len().saturating_mul(self.repeat)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// All candidate records for one label, before size-capping.
#[derive(Debug, Clone)]
pub struct LabelPool {
    label: Label,
    segments: Vec<PoolSegment>,
}

impl LabelPool {
    pub fn new(label: Label) -> Self {
        Self {
            label,
            segments: Vec::new(),
        }
    }

    /// Append `records` repeated `repeat` times. Empty segments are dropped.
    pub fn concat(mut self, kind: SourceKind, records: Vec<StandardRecord>, repeat: usize) -> Self {
        let segment = PoolSegment {
            kind,
            records,
            repeat,
        };
        if !segment.is_empty() {
            self.segments.push(segment);
        }
        self
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn segments(&self) -> &[PoolSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments
            .iter()
            .map(PoolSegment::len)
            .fold(0, usize::saturating_add)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The record at virtual position `index`, relabelled with the pool's
    /// label.
    pub fn get(&self, index: usize) -> Option<StandardRecord> {
        let mut offset = index;
        for segment in &self.segments {
            let len = segment.len();
            if offset < len {
                let mut record = segment.records[offset % segment.records.len()].clone();
                record.label = self.label;
                return Some(record);
            }
            offset -= len;
        }
        None
    }

    /// Draw `n` distinct positions uniformly at random, without replacement.
    /// `n` is clamped to the pool size.
    pub fn sample(&self, n: usize, rng: &mut StdRng) -> Vec<StandardRecord> {
        let len = self.len();
        rand::seq::index::sample(rng, len, n.min(len))
            .into_iter()
            .filter_map(|i| self.get(i))
            .collect()
    }
}

/// The raw ingredients of one label's pool.
#[derive(Debug, Clone, Default)]
pub struct PoolComponents {
    /// Records standardized from the label's tabular export.
    pub source: Vec<StandardRecord>,
    pub golden: Vec<StandardRecord>,
    /// Records parsed from the label's category file.
    pub anchors: Vec<StandardRecord>,
}

/// Build one label's pool from its components.
///
/// `source_kind` names the tabular export the `source` records came from.
/// The normal pool also receives `baseline_fill` trivial `GET /` records.
pub fn build_pool(
    label: Label,
    source_kind: SourceKind,
    components: PoolComponents,
    settings: &BalanceConfig,
) -> LabelPool {
    let pool = LabelPool::new(label)
        .concat(source_kind, components.source, 1)
        .concat(SourceKind::Golden, components.golden, 1)
        .concat(
            SourceKind::CategoryText,
            components.anchors,
            settings.anchor_repeat(label),
        );
    match label {
        Label::Normal => pool.concat(
            SourceKind::Baseline,
            vec![StandardRecord::new(Label::Normal)],
            settings.baseline_fill,
        ),
        Label::Attack => pool,
    }
}

/// Sample both pools down to `min(|attack|, |normal|, max_pool_size)` and
/// concatenate: all attack records first, then all normal records.
///
/// Returns the combined records and the per-label sample size.
pub fn mirror_sample(
    attack: &LabelPool,
    normal: &LabelPool,
    max_pool_size: usize,
    seed: u64,
) -> (Vec<StandardRecord>, usize) {
    let n = attack.len().min(normal.len()).min(max_pool_size);
    let mut combined = Vec::with_capacity(n * 2);
    for pool in [attack, normal] {
        let mut rng = stream_rng(seed, label_stream(pool.label()));
        combined.extend(pool.sample(n, &mut rng));
    }
    (combined, n)
}

/// The realized, balanced dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub train: Vec<StandardRecord>,
    pub val: Vec<StandardRecord>,
    /// Records drawn from each pool.
    pub per_label: usize,
    pub attack_pool: usize,
    pub normal_pool: usize,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.per_label == 0
    }
}

/// Build both pools, balance them and split into train/validation.
///
/// An empty pool is not an error: it yields an empty dataset the caller can
/// detect with [`Dataset::is_empty`].
pub fn build_dataset(
    attack: PoolComponents,
    normal: PoolComponents,
    settings: &BalanceConfig,
) -> Result<Dataset> {
    settings.validate()?;

    let attack_pool = build_pool(Label::Attack, SourceKind::ScannerExport, attack, settings);
    let normal_pool = build_pool(Label::Normal, SourceKind::NormalExport, normal, settings);
    balance_pools(&attack_pool, &normal_pool, settings)
}

/// Balance and split two already-built pools.
pub fn balance_pools(
    attack_pool: &LabelPool,
    normal_pool: &LabelPool,
    settings: &BalanceConfig,
) -> Result<Dataset> {
    settings.validate()?;

    tracing::debug!(
        attack = attack_pool.len(),
        normal = normal_pool.len(),
        cap = settings.max_pool_size,
        "pool sizes before balancing"
    );
    let (combined, per_label) =
        mirror_sample(attack_pool, normal_pool, settings.max_pool_size, settings.seed);
    if per_label == 0 {
        tracing::warn!(
            attack = attack_pool.len(),
            normal = normal_pool.len(),
            "a label pool is empty; the balanced dataset is empty"
        );
    } else {
        tracing::info!(per_label, "sampled records per label for mirror balance");
    }

    let (train, val) = stratified_split(
        combined,
        settings.validation_fraction,
        |r| r.label,
        stream_seed(settings.seed, SPLIT_STREAM),
    );

    Ok(Dataset {
        train,
        val,
        per_label,
        attack_pool: attack_pool.len(),
        normal_pool: normal_pool.len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
