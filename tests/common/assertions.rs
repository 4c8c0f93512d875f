//! Domain-specific assertions for mirrorset harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* dataset invariant was violated.

use std::collections::HashSet;

use mirrorset::{Label, RequestFields, StandardRecord};

// ---------------------------------------------------------------------------
// Field assertions
// ---------------------------------------------------------------------------

/// Assert selected fields of a parsed request or record.
///
/// ```rust
/// assert_fields!(req, method: "GET", path: "/api/x", query: "y=1");
/// ```
#[macro_export]
macro_rules! assert_fields {
    ($rec:expr, $($field:ident : $value:expr),+ $(,)?) => {{
        let rec = &$rec;
        $(
            pretty_assertions::assert_eq!(
                rec.$field.as_str(),
                $value,
                "field `{}` mismatch in {:?}",
                stringify!($field),
                rec
            );
        )+
    }};
}

/// Assert that `req` is the all-default `GET /` request.
pub fn assert_default_request(req: &RequestFields) {
    pretty_assertions::assert_eq!(req, &RequestFields::default());
}

// ---------------------------------------------------------------------------
// Dataset assertions
// ---------------------------------------------------------------------------

pub fn count_label(rows: &[StandardRecord], label: Label) -> usize {
    rows.iter().filter(|r| r.label == label).count()
}

/// Both labels occur the same number of times in `rows`.
pub fn assert_balanced(rows: &[StandardRecord]) {
    let attack = count_label(rows, Label::Attack);
    let normal = count_label(rows, Label::Normal);
    assert_eq!(
        attack, normal,
        "dataset is not class-balanced: {attack} attack vs {normal} normal"
    );
}

/// Label counts in `rows` differ by at most one (odd split sizes round).
pub fn assert_nearly_balanced(rows: &[StandardRecord]) {
    let attack = count_label(rows, Label::Attack);
    let normal = count_label(rows, Label::Normal);
    assert!(
        attack.abs_diff(normal) <= 1,
        "split drifted from 50/50: {attack} attack vs {normal} normal"
    );
}

/// No record value appears in both halves. Only meaningful when every
/// input record is unique.
pub fn assert_disjoint(train: &[StandardRecord], val: &[StandardRecord]) {
    let train_set: HashSet<&StandardRecord> = train.iter().collect();
    let leaked: Vec<_> = val.iter().filter(|r| train_set.contains(r)).collect();
    assert!(leaked.is_empty(), "records leaked into both halves: {leaked:?}");
}
