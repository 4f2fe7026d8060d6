//! The aggregation report: every problem met while building a dataset.
//!
//! The report is the only error channel of aggregation. Whether a non-empty
//! report fails the build is the caller's decision, expressed through
//! [`AggregationReport::enforce`].

use std::fmt;

use serde::Serialize;

use crate::entities::{EntityKind, closed_set};
use crate::error::{DecodeError, DecodeWarning, PolicyError, ResolveError};

closed_set! {
    /// How strictly a generation pass treats excluded records.
    pub enum BuildMode {
        /// Any excluded record fails the build.
        Development => "development",
        /// Excluded records are logged and the partial dataset is used.
        Production => "production",
    }
}

closed_set! {
    /// Whether a reported record was kept.
    pub enum Severity {
        /// The record was excluded from its collection.
        Error => "error",
        /// The record was kept despite the issue.
        Warning => "warning",
    }
}

/// What went wrong with a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all_fields = "camelCase")]
pub enum Issue {
    /// A required field was absent or blank.
    MissingRequiredField {
        /// Raw field name.
        field: String,
    },
    /// A closed-set field held an unknown value.
    InvalidEnumValue {
        /// Raw field name.
        field: String,
        /// The rejected value.
        value: String,
    },
    /// A field held a value of the wrong shape.
    InvalidFieldValue {
        /// Raw field name.
        field: String,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// A required relation pointed at a missing entity.
    DanglingReference {
        /// Raw relation field name.
        field: String,
        /// Kind of the missing entity.
        target_kind: EntityKind,
        /// Id that matched nothing.
        target_id: String,
    },
    /// A relation list held more than one id; the first was used.
    MalformedRelationEncoding {
        /// Raw relation field name.
        field: String,
        /// Number of ids in the list.
        len: usize,
    },
    /// An earlier record of the same kind already used this id.
    DuplicateId,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequiredField { field } => write!(f, "missing required field '{field}'"),
            Self::InvalidEnumValue { field, value } => {
                write!(f, "invalid value '{value}' for field '{field}'")
            }
            Self::InvalidFieldValue {
                field,
                value,
                reason,
            } => write!(f, "malformed field '{field}' ('{value}'): {reason}"),
            Self::DanglingReference {
                field,
                target_kind,
                target_id,
            } => write!(f, "references missing {target_kind} '{target_id}' via '{field}'"),
            Self::MalformedRelationEncoding { field, len } => {
                write!(f, "relation field '{field}' holds {len} ids; using the first")
            }
            Self::DuplicateId => f.write_str("duplicate id; first occurrence kept"),
        }
    }
}

/// One report line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    /// Kind of the offending record.
    pub kind: EntityKind,
    /// Id of the offending record, when it had one.
    pub record_id: Option<String>,
    /// Whether the record was excluded.
    pub severity: Severity,
    /// The problem found.
    #[serde(flatten)]
    pub issue: Issue,
}

impl ReportEntry {
    pub(crate) fn decode_failure(err: DecodeError) -> Self {
        let kind = err.kind();
        let record_id = err.record_id().map(str::to_owned);
        let issue = match err {
            DecodeError::MissingRequiredField { field, .. } => Issue::MissingRequiredField {
                field: field.to_owned(),
            },
            DecodeError::InvalidEnumValue { field, value, .. } => Issue::InvalidEnumValue {
                field: field.to_owned(),
                value,
            },
            DecodeError::InvalidFieldValue {
                field,
                value,
                reason,
                ..
            } => Issue::InvalidFieldValue {
                field: field.to_owned(),
                value,
                reason,
            },
        };
        Self {
            kind,
            record_id,
            severity: Severity::Error,
            issue,
        }
    }

    pub(crate) fn decode_warning(kind: EntityKind, record_id: &str, warning: DecodeWarning) -> Self {
        let issue = match warning {
            DecodeWarning::MalformedRelationEncoding { field, len } => {
                Issue::MalformedRelationEncoding {
                    field: field.to_owned(),
                    len,
                }
            }
        };
        Self {
            kind,
            record_id: Some(record_id.to_owned()),
            severity: Severity::Warning,
            issue,
        }
    }

    pub(crate) fn dangling(err: ResolveError) -> Self {
        match err {
            ResolveError::DanglingReference {
                from_kind,
                from_id,
                field,
                target_kind,
                target_id,
            } => Self {
                kind: from_kind,
                record_id: Some(from_id),
                severity: Severity::Error,
                issue: Issue::DanglingReference {
                    field: field.to_owned(),
                    target_kind,
                    target_id,
                },
            },
        }
    }

    pub(crate) fn duplicate(kind: EntityKind, record_id: &str) -> Self {
        Self {
            kind,
            record_id: Some(record_id.to_owned()),
            severity: Severity::Error,
            issue: Issue::DuplicateId,
        }
    }

    /// Returns `true` when the record was excluded.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.record_id {
            Some(id) => write!(f, "{} {} '{id}': {}", self.severity, self.kind, self.issue),
            None => write!(f, "{} {} <no id>: {}", self.severity, self.kind, self.issue),
        }
    }
}

/// All entries accumulated while building one dataset, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AggregationReport {
    entries: Vec<ReportEntry>,
}

impl AggregationReport {
    pub(crate) fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    /// Every entry in discovery order.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Entries for excluded records.
    pub fn errors(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|entry| entry.is_error())
    }

    /// Entries for kept records.
    pub fn warnings(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|entry| !entry.is_error())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries of `kind` at `severity`.
    #[must_use]
    pub fn count(&self, kind: EntityKind, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind && entry.severity == severity)
            .count()
    }

    /// Applies the build policy for `mode`.
    ///
    /// Development fails on any excluded record; production always proceeds.
    /// Warnings never fail a build.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::ExcludedRecords`] in development mode when the
    /// report has error entries.
    ///
    /// # Example
    ///
    /// ```
    /// use portal_data::{BuildMode, RawRecord, RawSnapshot, build_dataset};
    ///
    /// let snapshot = RawSnapshot {
    ///     skills: vec![RawRecord::new().with_text("id", "s1")],
    ///     ..RawSnapshot::default()
    /// };
    /// let report = build_dataset(&snapshot).report;
    ///
    /// assert!(report.enforce(BuildMode::Development).is_err());
    /// assert!(report.enforce(BuildMode::Production).is_ok());
    /// ```
    pub fn enforce(&self, mode: BuildMode) -> Result<(), PolicyError> {
        let count = self.errors().count();
        match mode {
            BuildMode::Development if count > 0 => Err(PolicyError::ExcludedRecords { count, mode }),
            BuildMode::Development | BuildMode::Production => Ok(()),
        }
    }
}
