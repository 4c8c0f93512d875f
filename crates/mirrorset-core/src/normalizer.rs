//! Normalizer — canonicalizes free text before feature extraction.
//!
//! Steps are applied in order: lowercase → percent-decode (two passes) →
//! whitespace collapse. Nothing here fails: malformed escapes stay verbatim
//! and decoded bytes that are not valid UTF-8 become U+FFFD, so the valid
//! escapes around them still decode.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Field, FieldAccess};

/// Number of percent-decoding passes. Fixed rather than iterated to a
/// fixpoint so adversarial input cannot force unbounded work.
const DECODE_PASSES: usize = 2;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Normalize `raw` into the canonical text form.
///
/// Accepts either a `&str` or an `Option<&str>`; absent input yields an empty
/// string.
///
/// ```
/// use mirrorset_core::normalizer::normalize;
///
/// assert_eq!(normalize("  SELECT%2520*\tFROM  "), "select * from");
/// assert_eq!(normalize(None), "");
/// ```
pub fn normalize<'a>(raw: impl Into<Option<&'a str>>) -> String {
    let Some(raw) = raw.into() else {
        return String::new();
    };

    let mut text = raw.to_lowercase();
    for _ in 0..DECODE_PASSES {
        let decoded = urlencoding::decode_binary(text.as_bytes());
        text = String::from_utf8_lossy(&decoded).into_owned();
    }

    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

/// Fields joined by [`extract_text`], in order.
const TEXT_FIELDS: [Field; 4] = [Field::Path, Field::Query, Field::Headers, Field::Body];

/// The combined text a classifier consumes for one record: trimmed `path`,
/// `query`, `headers` and `body`, skipping empty and `nan` values, joined by
/// single spaces.
pub fn extract_text<R: FieldAccess + ?Sized>(record: &R) -> String {
    TEXT_FIELDS
        .iter()
        .map(|&field| record.field(field).trim())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("nan"))
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
