//! Core types for mirrorset-core.
//!
//! This module defines the canonical row schema shared across all pipeline
//! layers: the [`StandardRecord`], its [`Label`], the per-column [`Field`]
//! discriminant, and the [`SourceKind`] that records where a row came from.

use serde::{Deserialize, Serialize};

/// Column order of a persisted table. Downstream feature extraction may rely
/// on positional access, so this order is part of the output contract.
pub const COLUMNS: [&str; 7] = ["method", "path", "query", "headers", "body", "ua", "label"];

/// Class label of a record. Assigned by source provenance, never inferred
/// from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Label {
    Normal,
    Attack,
}

impl Label {
    /// Both labels, in ascending numeric order.
    pub const ALL: [Label; 2] = [Label::Normal, Label::Attack];

    pub fn as_u8(self) -> u8 {
        match self {
            Label::Normal => 0,
            Label::Attack => 1,
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> u8 {
        label.as_u8()
    }
}

impl TryFrom<u8> for Label {
    type Error = crate::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::Normal),
            1 => Ok(Label::Attack),
            other => Err(crate::Error::InvalidLabel(other)),
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Normal => write!(f, "normal"),
            Label::Attack => write!(f, "attack"),
        }
    }
}

/// One string column of the canonical schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Method,
    Path,
    Query,
    Headers,
    Body,
    Ua,
}

impl Field {
    /// Every string field, in persisted column order.
    pub const ALL: [Field; 6] = [
        Field::Method,
        Field::Path,
        Field::Query,
        Field::Headers,
        Field::Body,
        Field::Ua,
    ];

    /// Value used when a source has no usable cell for this field.
    pub fn default_value(self) -> &'static str {
        match self {
            Field::Method => "GET",
            Field::Path => "/",
            _ => "",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Method => "method",
            Field::Path => "path",
            Field::Query => "query",
            Field::Headers => "headers",
            Field::Body => "body",
            Field::Ua => "ua",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Structured request fields without a label.
///
/// This is what the payload parser produces; a label is attached only once
/// the record's provenance is known, via [`RequestFields::labeled`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestFields {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: String,
    pub body: String,
    pub ua: String,
}

impl Default for RequestFields {
    fn default() -> Self {
        Self {
            method: Field::Method.default_value().to_string(),
            path: Field::Path.default_value().to_string(),
            query: String::new(),
            headers: String::new(),
            body: String::new(),
            ua: String::new(),
        }
    }
}

/// Read access to the string columns, shared by labelled and unlabelled rows.
pub trait FieldAccess {
    fn field(&self, field: Field) -> &str;
}

impl RequestFields {
    pub fn labeled(self, label: Label) -> StandardRecord {
        StandardRecord {
            method: self.method,
            path: self.path,
            query: self.query,
            headers: self.headers,
            body: self.body,
            ua: self.ua,
            label,
        }
    }
}

/// The canonical unit of data flowing through the pipeline.
///
/// Every field is always present; absence is an empty string, never a
/// separate null state. Field declaration order matches [`COLUMNS`] and is
/// the order the CSV serializer writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StandardRecord {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: String,
    pub body: String,
    pub ua: String,
    pub label: Label,
}

impl StandardRecord {
    /// An all-default record (`GET /`) carrying `label`.
    pub fn new(label: Label) -> Self {
        RequestFields::default().labeled(label)
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Method => &mut self.method,
            Field::Path => &mut self.path,
            Field::Query => &mut self.query,
            Field::Headers => &mut self.headers,
            Field::Body => &mut self.body,
            Field::Ua => &mut self.ua,
        }
    }

    /// Builder-style setter used by golden samples and tests.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        *self.field_mut(field) = value.into();
        self
    }
}

macro_rules! impl_field_access {
    ($($ty:ty),+) => {$(
        impl FieldAccess for $ty {
            fn field(&self, field: Field) -> &str {
                match field {
                    Field::Method => &self.method,
                    Field::Path => &self.path,
                    Field::Query => &self.query,
                    Field::Headers => &self.headers,
                    Field::Body => &self.body,
                    Field::Ua => &self.ua,
                }
            }
        }
    )+};
}

impl_field_access!(RequestFields, StandardRecord);

/// Which kind of source produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Tabular export from a security scanner / WAF (attack traffic).
    ScannerExport,
    /// Tabular export of ordinary traffic.
    NormalExport,
    /// Free-text `<n>. <category>: <example>` file.
    CategoryText,
    /// Hand-authored golden samples.
    Golden,
    /// Trivial `GET /` filler appended to the normal pool.
    Baseline,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::ScannerExport => write!(f, "scanner-export"),
            SourceKind::NormalExport => write!(f, "normal-export"),
            SourceKind::CategoryText => write!(f, "category-text"),
            SourceKind::Golden => write!(f, "golden"),
            SourceKind::Baseline => write!(f, "baseline"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
