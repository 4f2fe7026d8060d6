//! Builds a [`Dataset`] from a raw snapshot.
//!
//! Every record is decoded independently. A record that fails to decode, or
//! repeats an id already seen in its kind, is left out and reported; it never
//! stops its siblings from decoding. Once every kind is decoded, opportunities
//! whose project or owner is missing are excluded as well.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::dataset::{Collection, Dataset, Keyed};
use crate::entities::{
    EntityKind, decode_opportunity, decode_partner, decode_project, decode_skill, decode_user,
    decode_video,
};
use crate::error::{DecodeError, ResolveError};
use crate::fields::Decoded;
use crate::raw::{RawRecord, RawSnapshot};
use crate::report::{AggregationReport, ReportEntry};

/// A decoded dataset with the report of everything left out of it.
#[derive(Debug, Clone)]
pub struct Aggregation {
    /// The dataset, possibly partial.
    pub dataset: Dataset,
    /// Problems found while building it.
    pub report: AggregationReport,
}

type Decoder<T> = fn(&RawRecord) -> Result<Decoded<T>, DecodeError>;

/// Decodes every record of `snapshot` and joins the results.
///
/// Never fails: whether the report is fatal is decided by the caller through
/// [`AggregationReport::enforce`].
///
/// # Example
///
/// ```
/// use portal_data::{RawRecord, RawSnapshot, build_dataset};
///
/// let snapshot = RawSnapshot {
///     skills: vec![
///         RawRecord::new()
///             .with_text("id", "s1")
///             .with_text("name", "Rust")
///             .with_text("field", "Development"),
///         RawRecord::new().with_text("id", "s2"),
///     ],
///     ..RawSnapshot::default()
/// };
///
/// let aggregation = build_dataset(&snapshot);
/// assert_eq!(aggregation.dataset.skills().len(), 1);
/// assert_eq!(aggregation.report.len(), 1);
/// ```
#[must_use]
pub fn build_dataset(snapshot: &RawSnapshot) -> Aggregation {
    let mut report = AggregationReport::default();
    let mut dataset = Dataset {
        users: decode_kind(&snapshot.users, EntityKind::User, decode_user, &mut report),
        skills: decode_kind(&snapshot.skills, EntityKind::Skill, decode_skill, &mut report),
        projects: decode_kind(&snapshot.projects, EntityKind::Project, decode_project, &mut report),
        opportunities: decode_kind(
            &snapshot.opportunities,
            EntityKind::Opportunity,
            decode_opportunity,
            &mut report,
        ),
        partners: decode_kind(&snapshot.partners, EntityKind::Partner, decode_partner, &mut report),
        videos: decode_kind(&snapshot.videos, EntityKind::Video, decode_video, &mut report),
    };
    exclude_dangling_opportunities(&mut dataset, &mut report);

    info!(
        raw = snapshot.record_count(),
        entities = dataset.len(),
        errors = report.errors().count(),
        warnings = report.warnings().count(),
        "dataset built"
    );
    Aggregation { dataset, report }
}

fn decode_kind<T: Keyed>(
    records: &[RawRecord],
    kind: EntityKind,
    decode: Decoder<T>,
    report: &mut AggregationReport,
) -> Collection<T> {
    let mut collection = Collection::default();
    for record in records {
        let Decoded { entity, warnings } = match decode(record) {
            Ok(decoded) => decoded,
            Err(err) => {
                warn!(%kind, error = %err, "excluding undecodable record");
                report.push(ReportEntry::decode_failure(err));
                continue;
            }
        };
        if collection.contains(entity.key()) {
            warn!(%kind, id = entity.key(), "excluding record with duplicate id");
            report.push(ReportEntry::duplicate(kind, entity.key()));
            continue;
        }
        for warning in warnings {
            debug!(%kind, id = entity.key(), %warning, "tolerating malformed relation");
            report.push(ReportEntry::decode_warning(kind, entity.key(), warning));
        }
        if let Err(duplicate) = collection.insert(entity) {
            report.push(ReportEntry::duplicate(kind, duplicate.key()));
        }
    }
    debug!(%kind, raw = records.len(), decoded = collection.len(), "decoded collection");
    collection
}

/// Drops opportunities whose `projectId` or `ownerId` resolves to nothing,
/// reporting one entry per dangling field.
fn exclude_dangling_opportunities(dataset: &mut Dataset, report: &mut AggregationReport) {
    let dangling: Vec<ResolveError> = dataset
        .opportunities
        .iter()
        .flat_map(|opportunity| {
            [
                dataset.project_of(opportunity).err(),
                dataset.owner_of(opportunity).err(),
            ]
        })
        .flatten()
        .collect();

    let mut excluded = HashSet::new();
    for err in dangling {
        let ResolveError::DanglingReference { from_id, .. } = &err;
        warn!(error = %err, "excluding opportunity with dangling reference");
        excluded.insert(from_id.clone());
        report.push(ReportEntry::dangling(err));
    }
    dataset
        .opportunities
        .retain(|opportunity| !excluded.contains(&opportunity.id));
}

#[cfg(test)]
mod tests {
    //! Aggregation policy: exclusion, duplicates, and referential integrity.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::report::{Issue, Severity};

    fn user(id: &str) -> RawRecord {
        RawRecord::new()
            .with_text("id", id)
            .with_text("name", "Ada")
            .with_text("email", "ada@example.org")
            .with_list("slackId", ["U1"])
            .with_text("state", "confirmed")
            .with_text("createdAt", "2022-03-23T08:31:54.500Z")
            .with_text("lastModifiedAt", "2022-03-23T08:31:54.500Z")
    }

    fn project(id: &str) -> RawRecord {
        RawRecord::new()
            .with_text("id", id)
            .with_text("name", "Cedu")
            .with_text("slug", id)
            .with_text("logoUrl", "https://x/logo.png")
            .with_text("coverImageUrl", "https://x/cover.png")
            .with_text("state", "running")
    }

    fn opportunity(id: &str, project_id: &str, owner_id: &str) -> RawRecord {
        RawRecord::new()
            .with_text("id", id)
            .with_text("name", "Helper")
            .with_text("summary", "Help")
            .with_text("timeRequirements", "flexible")
            .with_text("contactUrl", "https://x/contact")
            .with_list("projectId", [project_id])
            .with_list("ownerId", [owner_id])
            .with_text("status", "live")
    }

    #[fixture]
    fn snapshot() -> RawSnapshot {
        RawSnapshot {
            users: vec![user("u1")],
            projects: vec![project("p1")],
            opportunities: vec![opportunity("o1", "p1", "u1")],
            ..RawSnapshot::default()
        }
    }

    #[rstest]
    fn clean_snapshot_has_empty_report(snapshot: RawSnapshot) {
        let aggregation = build_dataset(&snapshot);
        assert!(aggregation.report.is_empty());
        assert_eq!(aggregation.dataset.len(), 3);
    }

    #[rstest]
    fn bad_record_does_not_stop_siblings(mut snapshot: RawSnapshot) {
        snapshot.users.insert(0, user("u0").with_text("state", "banned"));
        let aggregation = build_dataset(&snapshot);

        assert!(aggregation.dataset.user("u0").is_none());
        assert!(aggregation.dataset.user("u1").is_some());
        assert_eq!(aggregation.report.count(EntityKind::User, Severity::Error), 1);
    }

    #[rstest]
    #[case::project(opportunity("o2", "p404", "u1"), vec!["projectId"])]
    #[case::owner(opportunity("o2", "p1", "u404"), vec!["ownerId"])]
    #[case::both(opportunity("o2", "p404", "u404"), vec!["projectId", "ownerId"])]
    fn dangling_opportunities_are_excluded(
        mut snapshot: RawSnapshot,
        #[case] dangling: RawRecord,
        #[case] fields: Vec<&str>,
    ) {
        snapshot.opportunities.push(dangling);
        let aggregation = build_dataset(&snapshot);

        assert!(aggregation.dataset.opportunity("o2").is_none());
        assert!(aggregation.dataset.opportunity("o1").is_some());
        let reported: Vec<&str> = aggregation
            .report
            .entries()
            .iter()
            .filter(|entry| entry.record_id.as_deref() == Some("o2"))
            .filter_map(|entry| match &entry.issue {
                Issue::DanglingReference { field, .. } => Some(field.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(reported, fields);
    }

    #[rstest]
    fn duplicate_ids_keep_first_and_report(mut snapshot: RawSnapshot) {
        snapshot.projects.push(project("p1").with_text("name", "Impostor"));
        let aggregation = build_dataset(&snapshot);

        assert_eq!(aggregation.dataset.projects().len(), 1);
        assert_eq!(
            aggregation.dataset.project("p1").map(|p| p.name.as_str()),
            Some("Cedu")
        );
        let entry = aggregation.report.entries().first().expect("one entry");
        assert_eq!(entry.issue, Issue::DuplicateId);
        assert_eq!(entry.kind, EntityKind::Project);
    }

    #[rstest]
    fn duplicate_warnings_are_not_attributed_to_kept_record(mut snapshot: RawSnapshot) {
        snapshot
            .opportunities
            .push(opportunity("o1", "p1", "u1").with_list("ownerId", ["u1", "u2"]));
        let aggregation = build_dataset(&snapshot);

        assert_eq!(aggregation.report.warnings().count(), 0);
        let entries = aggregation.report.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.first().map(|entry| &entry.issue), Some(&Issue::DuplicateId));
    }

    #[rstest]
    fn malformed_relations_are_kept_with_warning(mut snapshot: RawSnapshot) {
        snapshot.opportunities = vec![
            opportunity("o1", "p1", "u1").with_list("projectId", ["p1", "p2"]),
        ];
        let aggregation = build_dataset(&snapshot);

        assert!(aggregation.dataset.opportunity("o1").is_some());
        assert_eq!(aggregation.report.warnings().count(), 1);
        assert_eq!(aggregation.report.errors().count(), 0);
    }

    #[rstest]
    fn retired_skills_are_not_reported(mut snapshot: RawSnapshot) {
        snapshot.users = vec![user("u1").with_list("skills", ["retired"])];
        let aggregation = build_dataset(&snapshot);

        let ada = aggregation.dataset.user("u1").expect("user kept");
        assert!(aggregation.dataset.skills_of(ada).is_empty());
        assert!(aggregation.report.is_empty());
    }
}
