//! Decoding and relational resolution of volunteer portal content.
//!
//! Content for the portal lives in a tabular content store whose records are
//! loosely typed: fields may be missing, relations arrive as one-element id
//! lists, and enum values are unchecked strings. This crate turns a snapshot
//! of those records into one immutable, strongly-typed [`Dataset`] that page
//! generators query.
//!
//! # Overview
//!
//! - [`RawSnapshot`] / [`RawRecord`]: the untyped input boundary.
//! - `decode_*`: pure per-kind decoders returning [`Decoded`] entities or a
//!   structured [`DecodeError`].
//! - [`build_dataset`]: decodes everything, drops and reports bad records,
//!   and checks that every opportunity's project and owner exist.
//! - [`Dataset`] lookups such as [`Dataset::project_of`] and
//!   [`Dataset::visible_opportunities`], plus read-time projections like
//!   [`resolve_cover_image`] and [`plain_text`].
//!
//! # Example
//!
//! ```
//! use portal_data::{BuildMode, RawSnapshot, build_dataset};
//!
//! let json = r#"{
//!     "projects": [{
//!         "id": "p1", "name": "Cedu", "slug": "cedu",
//!         "logoUrl": "https://x/logo.png", "coverImageUrl": "https://x/cover.png",
//!         "state": "running"
//!     }],
//!     "opportunities": [{
//!         "id": "o1", "name": "Editor", "summary": "Help us **edit**.",
//!         "timeRequirements": "2 hours a week", "contactUrl": "https://x/contact",
//!         "projectId": ["p1"], "ownerId": ["u404"], "status": "live"
//!     }]
//! }"#;
//!
//! let snapshot = RawSnapshot::from_json(json).expect("valid snapshot");
//! let aggregation = build_dataset(&snapshot);
//!
//! assert!(aggregation.dataset.opportunity("o1").is_none());
//! assert_eq!(aggregation.report.len(), 1);
//! assert!(aggregation.report.enforce(BuildMode::Production).is_ok());
//! ```

mod aggregate;
mod dataset;
mod defaults;
mod entities;
mod error;
mod fields;
mod raw;
mod report;
mod resolve;

pub use aggregate::{Aggregation, build_dataset};
pub use dataset::{Collection, Dataset, Keyed};
pub use defaults::{excerpt, plain_text, resolve_cover_image};
pub use entities::{
    EntityKind, MalformedEntry, Modifier, Opportunity, OpportunityStatus, Partner, Project,
    ProjectState, Resource, RichText, Segment, Skill, UnknownValue, User, UserState, Video,
    decode_opportunity, decode_partner, decode_project, decode_skill, decode_user, decode_video,
};
pub use error::{DecodeError, DecodeWarning, PolicyError, ResolveError, SerializeError, SnapshotError};
pub use fields::{Decoded, NormalizedRelation, normalize_relation};
pub use raw::{FieldValue, RawField, RawRecord, RawSnapshot};
pub use report::{AggregationReport, BuildMode, Issue, ReportEntry, Severity};
pub use resolve::{SkillField, fields_of, modifier_skill, skill_fields, skills_for_field};
