//! Error types for the portal-data crate.
//!
//! Decoding and resolution never panic or unwind: every failure is a value.
//! Per-record decode failures become [`DecodeError`]s, tolerated source
//! inconsistencies become [`DecodeWarning`]s, and lookups across collections
//! fail with [`ResolveError`].

use thiserror::Error;

use crate::entities::EntityKind;
use crate::report::BuildMode;

/// Errors that exclude a single raw record from its collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A required field is absent or blank.
    #[error("{kind} record {} is missing required field '{field}'", display_id(.record_id.as_deref()))]
    MissingRequiredField {
        /// Kind of record being decoded.
        kind: EntityKind,
        /// Record id, when the record has one.
        record_id: Option<String>,
        /// Name of the missing field.
        field: &'static str,
    },

    /// A field constrained to a closed set holds an unrecognised value.
    #[error("{kind} record {} has invalid value '{value}' for field '{field}'", display_id(.record_id.as_deref()))]
    InvalidEnumValue {
        /// Kind of record being decoded.
        kind: EntityKind,
        /// Record id, when the record has one.
        record_id: Option<String>,
        /// Name of the enum field.
        field: &'static str,
        /// The offending raw value.
        value: String,
    },

    /// A field is present but its content cannot be parsed.
    #[error("{kind} record {} has malformed field '{field}' ('{value}'): {reason}", display_id(.record_id.as_deref()))]
    InvalidFieldValue {
        /// Kind of record being decoded.
        kind: EntityKind,
        /// Record id, when the record has one.
        record_id: Option<String>,
        /// Name of the malformed field.
        field: &'static str,
        /// The offending raw value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl DecodeError {
    /// Returns the kind of record that failed to decode.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::MissingRequiredField { kind, .. }
            | Self::InvalidEnumValue { kind, .. }
            | Self::InvalidFieldValue { kind, .. } => *kind,
        }
    }

    /// Returns the id of the record that failed to decode, when known.
    #[must_use]
    pub fn record_id(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { record_id, .. }
            | Self::InvalidEnumValue { record_id, .. }
            | Self::InvalidFieldValue { record_id, .. } => record_id.as_deref(),
        }
    }

    /// Returns the name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { field, .. }
            | Self::InvalidEnumValue { field, .. }
            | Self::InvalidFieldValue { field, .. } => field,
        }
    }
}

/// Non-fatal source inconsistencies found while decoding a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeWarning {
    /// A relation list held more than one element; the first was used.
    #[error("relation field '{field}' holds {len} ids where at most one is expected")]
    MalformedRelationEncoding {
        /// Name of the relation field.
        field: &'static str,
        /// Number of ids found in the raw list.
        len: usize,
    },
}

/// Failures when following a relation from one entity to another.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The referenced entity does not exist in its collection.
    #[error("{from_kind} {from_id} references missing {target_kind} '{target_id}' via '{field}'")]
    DanglingReference {
        /// Kind of the referencing entity.
        from_kind: EntityKind,
        /// Id of the referencing entity.
        from_id: String,
        /// Relation field that was followed.
        field: &'static str,
        /// Kind of the referenced entity.
        target_kind: EntityKind,
        /// Id that could not be resolved.
        target_id: String,
    },
}

/// Errors raised when reading a raw snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The snapshot JSON is malformed or has the wrong shape.
    #[error("invalid content snapshot JSON: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },
}

/// Failure to serialise decoded data for page generators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to serialise {what}: {message}")]
pub struct SerializeError {
    /// What was being serialised.
    pub what: &'static str,
    /// Serializer error message.
    pub message: String,
}

/// Build-policy failure raised by [`AggregationReport::enforce`](crate::AggregationReport::enforce).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Records were excluded while building in development mode.
    #[error("{count} record(s) excluded from the dataset in {mode} mode")]
    ExcludedRecords {
        /// Number of error entries in the report.
        count: usize,
        /// Mode the build ran in.
        mode: BuildMode,
    },
}

fn display_id(record_id: Option<&str>) -> String {
    record_id.map_or_else(|| "<no id>".to_owned(), |id| format!("'{id}'"))
}
