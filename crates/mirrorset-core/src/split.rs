//! Stratified train/validation split.
//!
//! Each class is shuffled independently and cut at its share of the
//! validation size, so both halves keep the class proportions of the input
//! up to rounding. The same seed and input always give the same split.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Partition `rows` into `(train, val)` preserving the distribution of
/// `key` across both halves.
///
/// The validation half holds `ceil(test_fraction * rows.len())` rows; that
/// total is shared out between classes in proportion to their size, with
/// leftover rows going to the classes with the largest remainders. Every
/// input row ends up in exactly one half.
pub fn stratified_split<T, K, F>(
    rows: Vec<T>,
    test_fraction: f64,
    key: F,
    seed: u64,
) -> (Vec<T>, Vec<T>)
where
    F: Fn(&T) -> K,
    K: Ord,
{
    let total = rows.len();
    if total == 0 {
        return (Vec::new(), Vec::new());
    }

    let mut classes: BTreeMap<K, Vec<usize>> = BTreeMap::new();
    for (i, row) in rows.iter().enumerate() {
        classes.entry(key(row)).or_default().push(i);
    }

    // The epsilon keeps e.g. 0.1 * 30 = 3.0000000000000004 from rounding up to 4.
    let n_val = ((test_fraction * total as f64 - 1e-9).ceil().max(0.0) as usize).min(total);
    let quotas = allocate(
        &classes.values().map(Vec::len).collect::<Vec<_>>(),
        n_val,
        total,
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train_idx = Vec::with_capacity(total - n_val);
    let mut val_idx = Vec::with_capacity(n_val);
    for (mut members, quota) in classes.into_values().zip(quotas) {
        members.shuffle(&mut rng);
        val_idx.extend_from_slice(&members[..quota]);
        train_idx.extend_from_slice(&members[quota..]);
    }
    train_idx.shuffle(&mut rng);
    val_idx.shuffle(&mut rng);

    let mut slots: Vec<Option<T>> = rows.into_iter().map(Some).collect();
    let mut take = |idx: Vec<usize>| -> Vec<T> {
        idx.into_iter().filter_map(|i| slots[i].take()).collect()
    };
    let train = take(train_idx);
    let val = take(val_idx);
    (train, val)
}

/// Share `n_val` between classes of the given sizes: floor of the exact
/// proportional share, then one extra to the largest remainders (earlier
/// classes win ties).
fn allocate(sizes: &[usize], n_val: usize, total: usize) -> Vec<usize> {
    let exact: Vec<f64> = sizes
        .iter()
        .map(|&s| s as f64 * n_val as f64 / total as f64)
        .collect();
    let mut quotas: Vec<usize> = exact
        .iter()
        .zip(sizes)
        .map(|(&e, &s)| (e.floor() as usize).min(s))
        .collect();

    let mut leftover = n_val.saturating_sub(quotas.iter().sum());
    let mut order: Vec<usize> = (0..sizes.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra).then(a.cmp(&b))
    });
    for i in order.into_iter().cycle().take(sizes.len() * 2) {
        if leftover == 0 {
            break;
        }
        if quotas[i] < sizes[i] {
            quotas[i] += 1;
            leftover -= 1;
        }
    }
    quotas
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
