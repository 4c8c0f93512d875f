#![allow(unused)]
//! Mirror balancer and stratified split harness.
//!
//! # What this covers
//!
//! - **Mirror sizing**: each label contributes exactly
//!   `min(|attack pool|, |normal pool|, max_pool_size)` records.
//! - **Pool assembly**: anchors are amplified, baseline filler only joins
//!   the normal pool, and pool membership decides the label.
//! - **Determinism**: same inputs and seed give identical train/val.
//! - **Split**: validation size is `ceil(f * total)`, both halves keep the
//!   50/50 ratio within one row, and no row lands in both halves.
//!
//! # What this does NOT cover
//!
//! - Source loading and persistence (see `pipeline_harness`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test balance_harness
//! ```

mod common;
use common::*;

use mirrorset::balance::{build_dataset, build_pool, mirror_sample, Dataset, PoolComponents};
use mirrorset::config::BalanceConfig;
use mirrorset::split::stratified_split;
use mirrorset::{golden, Label, SourceKind, StandardRecord};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn dataset(attack: usize, normal: usize, settings: &BalanceConfig) -> Dataset {
    build_dataset(
        source_only(Label::Attack, attack),
        source_only(Label::Normal, normal),
        settings,
    )
    .expect("valid settings")
}

// ---------------------------------------------------------------------------
// Mirror sizing
// ---------------------------------------------------------------------------

#[test]
fn smaller_pool_sets_the_size() {
    let ds = dataset(30, 100, &plain_balance(1_000, 1));
    assert_eq!(ds.per_label, 30);
    assert_eq!(ds.train.len() + ds.val.len(), 60);
    assert_balanced(&[ds.train.clone(), ds.val.clone()].concat());
}

#[test]
fn cap_limits_both_labels() {
    let ds = dataset(500, 800, &plain_balance(120, 1));
    assert_eq!(ds.per_label, 120);
    assert_eq!(ds.attack_pool, 500);
    assert_eq!(ds.normal_pool, 800);
    assert_eq!(ds.train.len() + ds.val.len(), 240);
}

#[test]
fn equal_pools_use_everything() {
    let ds = dataset(25, 25, &plain_balance(1_000, 3));
    let all = [ds.train, ds.val].concat();
    assert_eq!(all.len(), 50);
    for label in Label::ALL {
        let prefix = format!("/{label}/");
        let mut seen: Vec<_> = all
            .iter()
            .filter(|r| r.label == label)
            .map(|r| r.path.clone())
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 25, "every {label} record drawn once");
        assert!(seen.iter().all(|p| p.starts_with(&prefix)));
    }
}

#[test]
fn empty_label_yields_empty_dataset() {
    let ds = dataset(0, 40, &plain_balance(1_000, 1));
    assert!(ds.is_empty());
    assert!(ds.train.is_empty());
    assert!(ds.val.is_empty());
}

#[test]
fn combined_order_is_attack_then_normal() {
    let settings = plain_balance(1_000, 9);
    let attack = build_pool(
        Label::Attack,
        SourceKind::ScannerExport,
        source_only(Label::Attack, 12),
        &settings,
    );
    let normal = build_pool(
        Label::Normal,
        SourceKind::NormalExport,
        source_only(Label::Normal, 20),
        &settings,
    );
    let (combined, n) = mirror_sample(&attack, &normal, settings.max_pool_size, settings.seed);
    assert_eq!(n, 12);
    assert_eq!(count_label(&combined[..12], Label::Attack), 12);
    assert_eq!(count_label(&combined[12..], Label::Normal), 12);
}

// ---------------------------------------------------------------------------
// Pool assembly
// ---------------------------------------------------------------------------

#[test]
fn default_amplification_dominates_small_sources() {
    let settings = BalanceConfig::default();
    let anchors = |label| PoolComponents {
        source: unique_records(label, "src", 4),
        golden: golden::samples(label),
        anchors: unique_records(label, "anchor", 2),
    };
    let attack = build_pool(
        Label::Attack,
        SourceKind::ScannerExport,
        anchors(Label::Attack),
        &settings,
    );
    let normal = build_pool(
        Label::Normal,
        SourceKind::NormalExport,
        anchors(Label::Normal),
        &settings,
    );
    assert_eq!(attack.len(), 4 + 5 + 2 * 200);
    assert_eq!(normal.len(), 4 + 3 + 2 * 100 + 10_000);
}

#[test]
fn mislabelled_source_rows_take_the_pool_label() {
    let comps = PoolComponents {
        source: unique_records(Label::Normal, "oops", 10),
        ..Default::default()
    };
    let ds = build_dataset(comps, source_only(Label::Normal, 10), &plain_balance(1_000, 5))
        .expect("valid settings");
    let oops: Vec<_> = [ds.train, ds.val]
        .concat()
        .into_iter()
        .filter(|r| r.path.starts_with("/oops/"))
        .collect();
    assert_eq!(oops.len(), 10);
    assert!(oops.iter().all(|r| r.label == Label::Attack));
}

#[test]
fn baseline_filler_is_get_root() {
    let settings = BalanceConfig {
        baseline_fill: 50,
        ..plain_balance(1_000, 11)
    };
    let ds = build_dataset(
        source_only(Label::Attack, 50),
        PoolComponents::default(),
        &settings,
    )
    .expect("valid settings");
    let normal: Vec<_> = [ds.train, ds.val]
        .concat()
        .into_iter()
        .filter(|r| r.label == Label::Normal)
        .collect();
    assert_eq!(normal.len(), 50);
    assert!(normal.iter().all(|r| *r == StandardRecord::new(Label::Normal)));
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn same_seed_same_dataset() {
    let settings = plain_balance(1_000, 42);
    assert_eq!(dataset(80, 120, &settings), dataset(80, 120, &settings));
}

#[test]
fn different_seed_different_sample() {
    let a = dataset(80, 500, &plain_balance(1_000, 1));
    let b = dataset(80, 500, &plain_balance(1_000, 2));
    assert_ne!(a.train, b.train);
}

// ---------------------------------------------------------------------------
// Split
// ---------------------------------------------------------------------------

#[test]
fn validation_size_rounds_up() {
    // 2 * 33 = 66 rows, 10% -> ceil(6.6) = 7.
    let ds = dataset(33, 33, &plain_balance(1_000, 4));
    assert_eq!(ds.val.len(), 7);
    assert_eq!(ds.train.len(), 59);
    assert_nearly_balanced(&ds.val);
    assert_nearly_balanced(&ds.train);
}

#[test]
fn exact_fraction_is_not_rounded_up() {
    // 2 * 15 = 30 rows, 10% -> exactly 3.
    let ds = dataset(15, 15, &plain_balance(1_000, 4));
    assert_eq!(ds.val.len(), 3);
}

#[test]
fn halves_are_disjoint() {
    let ds = dataset(200, 200, &plain_balance(1_000, 8));
    assert_disjoint(&ds.train, &ds.val);
}

#[test]
fn split_keeps_every_row_once() {
    let rows: Vec<u32> = (0..97).collect();
    let (train, val) = stratified_split(rows, 0.25, |r| r % 3, 77);
    assert_eq!(val.len(), 25);
    let mut all = [train, val].concat();
    all.sort_unstable();
    assert_eq!(all, (0..97).collect::<Vec<_>>());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn per_label_is_min_of_pools_and_cap(
        attack in 0usize..60,
        normal in 0usize..60,
        cap in 1usize..80,
        seed in any::<u64>(),
    ) {
        let ds = dataset(attack, normal, &plain_balance(cap, seed));
        let expected = attack.min(normal).min(cap);
        prop_assert_eq!(ds.per_label, expected);

        let all = [ds.train.clone(), ds.val.clone()].concat();
        prop_assert_eq!(count_label(&all, Label::Attack), expected);
        prop_assert_eq!(count_label(&all, Label::Normal), expected);
        let val_attack = count_label(&ds.val, Label::Attack);
        let val_normal = count_label(&ds.val, Label::Normal);
        prop_assert!(val_attack.abs_diff(val_normal) <= 1);
    }
}
