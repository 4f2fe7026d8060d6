//! Volunteer opportunities offered by projects.

use serde::Serialize;

use super::{EntityKind, RichText};
use crate::error::DecodeError;
use crate::fields::{Decoded, RecordReader};
use crate::raw::RawRecord;

closed_set! {
    /// Publication status of an opportunity.
    pub enum OpportunityStatus {
        /// Not published; no page is generated.
        Draft => "draft",
        /// Published and listed.
        Live => "live",
        /// Published, reachable by direct link, but not listed.
        Unlisted => "unlisted",
    }
}

impl OpportunityStatus {
    /// Returns `true` when the opportunity gets its own page.
    #[must_use]
    pub const fn is_published(self) -> bool {
        !matches!(self, Self::Draft)
    }

    /// Returns `true` when the opportunity appears in listings.
    #[must_use]
    pub const fn is_listed(self) -> bool {
        matches!(self, Self::Live)
    }
}

/// A volunteer opportunity.
///
/// `project_id` and `owner_id` are foreign keys; the dataset guarantees both
/// resolve. The cover image is deliberately left optional: the inherited
/// project cover is computed at read time by
/// [`resolve_cover_image`](crate::resolve_cover_image).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    /// Record id in the content store.
    pub id: String,
    /// Opportunity title.
    pub name: String,
    /// Markdown description.
    pub summary: RichText,
    /// Own cover image, if set.
    pub cover_image_url: Option<String>,
    /// Free-form time commitment, e.g. `2 hours a week`.
    pub time_requirements: String,
    /// Where interested volunteers get in touch.
    pub contact_url: String,
    /// Id of the owning project.
    pub project_id: String,
    /// Id of the user responsible for the opportunity.
    pub owner_id: String,
    /// Publication status.
    pub status: OpportunityStatus,
    /// Ids of the skills the opportunity asks for.
    pub skills: Vec<String>,
}

impl Opportunity {
    /// Re-encodes the opportunity as a raw record, relations as one-element
    /// lists.
    #[must_use]
    pub fn to_raw(&self) -> RawRecord {
        RawRecord::new()
            .with_text("id", &self.id)
            .with_text("name", &self.name)
            .with_text("summary", self.summary.source())
            .with_optional_text("coverImageUrl", self.cover_image_url.as_deref())
            .with_text("timeRequirements", &self.time_requirements)
            .with_text("contactUrl", &self.contact_url)
            .with_relation("projectId", Some(&self.project_id))
            .with_relation("ownerId", Some(&self.owner_id))
            .with_text("status", self.status.as_str())
            .with_list("skills", self.skills.iter().map(String::as_str))
    }
}

/// Decodes a raw opportunity record.
///
/// `projectId` and `ownerId` are required relations: an absent or empty list
/// fails decoding here, while an id that matches nothing is caught later by
/// the dataset's referential-integrity pass.
///
/// # Errors
///
/// Returns [`DecodeError`] when a required field or relation is missing or
/// `status` is not a known [`OpportunityStatus`].
pub fn decode_opportunity(record: &RawRecord) -> Result<Decoded<Opportunity>, DecodeError> {
    let mut fields = RecordReader::new(record, EntityKind::Opportunity);
    let opportunity = Opportunity {
        id: fields.required_text("id")?,
        name: fields.required_text("name")?,
        summary: RichText::from(fields.required_text("summary")?),
        cover_image_url: fields.optional_text("coverImageUrl"),
        time_requirements: fields.required_text("timeRequirements")?,
        contact_url: fields.required_text("contactUrl")?,
        project_id: fields.required_relation("projectId")?,
        owner_id: fields.required_relation("ownerId")?,
        status: fields.enum_value("status")?,
        skills: fields.text_list("skills"),
    };
    Ok(fields.finish(opportunity))
}
