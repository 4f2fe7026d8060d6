//! Raw content records as exported from the tabular content store.
//!
//! Records are loosely typed: a field is either a string, a list of strings,
//! or missing altogether. Relations are always list-encoded, even when they
//! are conceptually single-valued. Nothing in this module validates; it only
//! gives decoders a uniform way to look at a field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

/// A single raw field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    /// A scalar string value.
    Text(String),
    /// A list of strings, used for relations and multi-valued columns.
    List(Vec<String>),
}

/// The outcome of reading one field from a [`RawRecord`].
///
/// Every decoder goes through this type so that absence is always handled
/// explicitly rather than through ad hoc optional chaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// The field is not present (or was an explicit `null`).
    Absent,
    /// The field holds a scalar string.
    Text(&'a str),
    /// The field holds a list of strings.
    List(&'a [String]),
}

/// An untyped field-name-to-value mapping for one record.
///
/// Explicit JSON `null` values are dropped on deserialization, so a field set
/// to `null` is indistinguishable from one that is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Option<RawField>>")]
pub struct RawRecord {
    #[serde(flatten)]
    fields: BTreeMap<String, RawField>,
}

impl From<BTreeMap<String, Option<RawField>>> for RawRecord {
    fn from(value: BTreeMap<String, Option<RawField>>) -> Self {
        let fields = value
            .into_iter()
            .filter_map(|(name, field)| field.map(|present| (name, present)))
            .collect();
        Self { fields }
    }
}

impl RawRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record with `field` set to a scalar string.
    ///
    /// # Example
    ///
    /// ```
    /// use portal_data::{FieldValue, RawRecord};
    ///
    /// let record = RawRecord::new().with_text("name", "Ada");
    /// assert_eq!(record.field("name"), FieldValue::Text("Ada"));
    /// assert_eq!(record.field("email"), FieldValue::Absent);
    /// ```
    #[must_use]
    pub fn with_text(mut self, field: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(field.to_owned(), RawField::Text(value.into()));
        self
    }

    /// Returns the record with `field` set to a list of strings.
    #[must_use]
    pub fn with_list<I, S>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = values.into_iter().map(Into::into).collect();
        self.fields.insert(field.to_owned(), RawField::List(list));
        self
    }

    /// Returns the record with `field` set to a one-element relation list, or
    /// left absent when `value` is `None`.
    #[must_use]
    pub fn with_relation(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(id) => self.with_list(field, [id]),
            None => self,
        }
    }

    /// Returns the record with `field` set when `value` is `Some`.
    #[must_use]
    pub fn with_optional_text(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(text) => self.with_text(field, text),
            None => self,
        }
    }

    /// Reads a field.
    #[must_use]
    pub fn field(&self, name: &str) -> FieldValue<'_> {
        match self.fields.get(name) {
            None => FieldValue::Absent,
            Some(RawField::Text(text)) => FieldValue::Text(text),
            Some(RawField::List(list)) => FieldValue::List(list),
        }
    }

    /// Returns the record's `id` when it is a non-blank scalar.
    ///
    /// Used to label report entries even when the rest of the record fails to
    /// decode.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self.field("id") {
            FieldValue::Text(id) if !id.trim().is_empty() => Some(id),
            _ => None,
        }
    }

    /// Returns the number of present fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One snapshot of the content store: every raw record, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSnapshot {
    /// Raw user profile records.
    pub users: Vec<RawRecord>,
    /// Raw skill records.
    pub skills: Vec<RawRecord>,
    /// Raw project records.
    pub projects: Vec<RawRecord>,
    /// Raw volunteer opportunity records.
    pub opportunities: Vec<RawRecord>,
    /// Raw partner records.
    pub partners: Vec<RawRecord>,
    /// Raw instructional video records.
    pub videos: Vec<RawRecord>,
}

impl RawSnapshot {
    /// Parses a snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Parse`] when the JSON is malformed or a field
    /// holds something other than a string, a list of strings, or `null`.
    ///
    /// # Example
    ///
    /// ```
    /// use portal_data::RawSnapshot;
    ///
    /// let snapshot = RawSnapshot::from_json(r#"{"skills": [{"id": "s1", "name": "Rust", "field": "Dev"}]}"#)
    ///     .expect("valid snapshot");
    /// assert_eq!(snapshot.skills.len(), 1);
    /// assert!(snapshot.users.is_empty());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|err| SnapshotError::Parse {
            message: err.to_string(),
        })
    }

    /// Returns the total number of raw records across all kinds.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.users.len()
            + self.skills.len()
            + self.projects.len()
            + self.opportunities.len()
            + self.partners.len()
            + self.videos.len()
    }
}
