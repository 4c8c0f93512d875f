//! Schema standardizer — maps heterogeneous source rows onto [`StandardRecord`].
//!
//! Two inputs are handled: tabular rows keyed by a source-specific column
//! name, and free-text category lines of the form
//! `<n>. <category>: <example>`. Per-row anomalies are defaulted or skipped;
//! nothing in this module returns an error.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::parser::parse_request;
use crate::types::{Field, Label, StandardRecord};

/// One source row: column name → raw cell text.
pub type SourceRow = HashMap<String, String>;

/// Cell spellings treated as a missing value, on top of any casing of `nan`.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "None", "n/a", "null",
];

static CATEGORY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\.\s+(.*?):\s+(.*)$").expect("category line pattern is valid")
});

/// Source-specific column name for each canonical field. A field with no
/// column always takes its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ColumnMap {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub headers: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub ua: Option<String>,
}

impl ColumnMap {
    pub fn column(&self, field: Field) -> Option<&str> {
        match field {
            Field::Method => self.method.as_deref(),
            Field::Path => self.path.as_deref(),
            Field::Query => self.query.as_deref(),
            Field::Headers => self.headers.as_deref(),
            Field::Body => self.body.as_deref(),
            Field::Ua => self.ua.as_deref(),
        }
    }

    /// Builder-style setter.
    pub fn map(mut self, field: Field, column: impl Into<String>) -> Self {
        let slot = match field {
            Field::Method => &mut self.method,
            Field::Path => &mut self.path,
            Field::Query => &mut self.query,
            Field::Headers => &mut self.headers,
            Field::Body => &mut self.body,
            Field::Ua => &mut self.ua,
        };
        *slot = Some(column.into());
        self
    }
}

/// Trimmed cell text, or `None` when the cell is a missing-value marker.
pub fn clean_cell(raw: &str) -> Option<&str> {
    let value = raw.trim();
    if MISSING_MARKERS.contains(&value) || value.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(value)
    }
}

/// Map one tabular row onto the canonical schema.
pub fn standardize_row(row: &SourceRow, columns: &ColumnMap, label: Label) -> StandardRecord {
    let mut record = StandardRecord::new(label);
    for field in Field::ALL {
        let cell = columns
            .column(field)
            .and_then(|name| row.get(name))
            .and_then(|raw| clean_cell(raw));
        if let Some(value) = cell {
            *record.field_mut(field) = value.to_string();
        }
    }
    record
}

/// Map every row of a source, preserving order. `label` is applied
/// uniformly; it comes from provenance, not content.
pub fn standardize<'a, I>(rows: I, columns: &ColumnMap, label: Label) -> Vec<StandardRecord>
where
    I: IntoIterator<Item = &'a SourceRow>,
{
    rows.into_iter()
        .map(|row| standardize_row(row, columns, label))
        .collect()
}

/// A parsed category-file line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryExample<'a> {
    pub category: &'a str,
    pub example: &'a str,
}

/// Match `<n>. <category>: <example>` after trimming the line.
pub fn parse_category_line(line: &str) -> Option<CategoryExample<'_>> {
    let caps = CATEGORY_LINE.captures(line.trim())?;
    Some(CategoryExample {
        category: caps.get(1)?.as_str(),
        example: caps.get(2)?.as_str(),
    })
}

/// Turn category-file lines into records. Each example text goes through
/// the payload parser; lines that do not match the pattern are skipped.
pub fn standardize_categories<I, S>(lines: I, label: Label) -> Vec<StandardRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut skipped = 0usize;
    let records: Vec<_> = lines
        .into_iter()
        .filter_map(|line| {
            let parsed = parse_category_line(line.as_ref())
                .map(|cat| parse_request(cat.example).labeled(label));
            if parsed.is_none() {
                skipped += 1;
            }
            parsed
        })
        .collect();
    tracing::debug!(%label, kept = records.len(), skipped, "standardized category lines");
    records
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
