//! Field decoding primitives shared by every per-kind decoder.
//!
//! A [`RecordReader`] wraps one raw record together with the context needed
//! to produce structured errors (entity kind and record id) and collects
//! non-fatal warnings. Each read method spells out its absence rule.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::entities::EntityKind;
use crate::error::{DecodeError, DecodeWarning};
use crate::raw::{FieldValue, RawRecord};

/// A decoded entity together with any warnings raised while decoding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    /// The decoded entity.
    pub entity: T,
    /// Non-fatal inconsistencies found in the raw record.
    pub warnings: Vec<DecodeWarning>,
}

impl<T> Decoded<T> {
    /// Discards the warnings and returns the entity.
    #[must_use]
    pub fn into_entity(self) -> T {
        self.entity
    }
}

/// Result of normalising a list-encoded relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedRelation<'a> {
    /// The resolved scalar id: the first list element, if any.
    pub id: Option<&'a str>,
    /// Number of elements in the raw list.
    pub len: usize,
}

impl NormalizedRelation<'_> {
    /// Returns `true` when the raw list held more than one element.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        self.len > 1
    }
}

/// Turns a raw relation list into a scalar-or-absent id.
///
/// An empty list is equivalent to a missing field; a longer list resolves to
/// its first element.
///
/// # Example
///
/// ```
/// use portal_data::normalize_relation;
///
/// assert_eq!(normalize_relation(&[]).id, None);
/// let ids = ["a".to_owned(), "b".to_owned()];
/// let relation = normalize_relation(&ids);
/// assert_eq!(relation.id, Some("a"));
/// assert!(relation.is_malformed());
/// ```
#[must_use]
pub fn normalize_relation(values: &[String]) -> NormalizedRelation<'_> {
    NormalizedRelation {
        id: values.first().map(String::as_str),
        len: values.len(),
    }
}

/// Reads fields from one raw record on behalf of a decoder.
#[derive(Debug)]
pub(crate) struct RecordReader<'a> {
    record: &'a RawRecord,
    kind: EntityKind,
    warnings: Vec<DecodeWarning>,
}

impl<'a> RecordReader<'a> {
    pub(crate) const fn new(record: &'a RawRecord, kind: EntityKind) -> Self {
        Self {
            record,
            kind,
            warnings: Vec::new(),
        }
    }

    /// Wraps a finished entity with the collected warnings.
    pub(crate) fn finish<T>(self, entity: T) -> Decoded<T> {
        Decoded {
            entity,
            warnings: self.warnings,
        }
    }

    /// Reads a required scalar. Absent or blank is a failure.
    ///
    /// A single-element list is accepted too: lookup columns in the content
    /// store arrive list-encoded even when they carry one scalar.
    pub(crate) fn required_text(&mut self, field: &'static str) -> Result<String, DecodeError> {
        self.optional_text(field)
            .ok_or_else(|| self.missing(field))
    }

    /// Reads an optional scalar. Absent, blank, or an empty list is `None`.
    pub(crate) fn optional_text(&mut self, field: &'static str) -> Option<String> {
        let record = self.record;
        let value = match record.field(field) {
            FieldValue::Absent => None,
            FieldValue::Text(text) => Some(text),
            FieldValue::List(values) => self.normalize(field, values),
        };
        value
            .filter(|text| !text.trim().is_empty())
            .map(str::to_owned)
    }

    /// Reads a list column. Absent is an empty list; a scalar is a
    /// one-element list.
    pub(crate) fn text_list(&self, field: &'static str) -> Vec<String> {
        match self.record.field(field) {
            FieldValue::Absent => Vec::new(),
            FieldValue::Text(text) => vec![text.to_owned()],
            FieldValue::List(values) => values.to_vec(),
        }
    }

    /// Reads an optional relation. Absent and empty are both `None`.
    pub(crate) fn relation(&mut self, field: &'static str) -> Option<String> {
        let record = self.record;
        let id = match record.field(field) {
            FieldValue::Absent => None,
            FieldValue::Text(text) => Some(text),
            FieldValue::List(values) => self.normalize(field, values),
        };
        id.map(str::to_owned)
    }

    /// Reads a required relation. Absent and empty are failures.
    pub(crate) fn required_relation(&mut self, field: &'static str) -> Result<String, DecodeError> {
        self.relation(field)
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| self.missing(field))
    }

    /// Reads a required field constrained to a closed set.
    pub(crate) fn enum_value<E: FromStr>(&mut self, field: &'static str) -> Result<E, DecodeError> {
        let raw = self.required_text(field)?;
        raw.parse::<E>()
            .map_err(|_| DecodeError::InvalidEnumValue {
                kind: self.kind,
                record_id: self.record_id(),
                field,
                value: raw,
            })
    }

    /// Reads a required RFC 3339 timestamp.
    pub(crate) fn timestamp(&mut self, field: &'static str) -> Result<DateTime<Utc>, DecodeError> {
        let raw = self.required_text(field)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|err| self.invalid(field, &raw, err.to_string()))
    }

    /// Builds an [`DecodeError::InvalidFieldValue`] for this record.
    pub(crate) fn invalid(
        &self,
        field: &'static str,
        value: &str,
        reason: impl Into<String>,
    ) -> DecodeError {
        DecodeError::InvalidFieldValue {
            kind: self.kind,
            record_id: self.record_id(),
            field,
            value: value.to_owned(),
            reason: reason.into(),
        }
    }

    fn missing(&self, field: &'static str) -> DecodeError {
        DecodeError::MissingRequiredField {
            kind: self.kind,
            record_id: self.record_id(),
            field,
        }
    }

    fn record_id(&self) -> Option<String> {
        self.record.id().map(str::to_owned)
    }

    fn normalize<'v>(&mut self, field: &'static str, values: &'v [String]) -> Option<&'v str> {
        let relation = normalize_relation(values);
        if relation.is_malformed() {
            self.warnings.push(DecodeWarning::MalformedRelationEncoding {
                field,
                len: relation.len,
            });
        }
        relation.id
    }
}
