//! Community projects.

use serde::Serialize;

use super::EntityKind;
use crate::error::DecodeError;
use crate::fields::{Decoded, RecordReader};
use crate::raw::RawRecord;

closed_set! {
    /// Publication state of a project.
    pub enum ProjectState {
        /// Being prepared; never shown publicly.
        Draft => "draft",
        /// Staff-only project; never shown publicly.
        Internal => "internal",
        /// Accepted and being set up.
        Incubating => "incubating",
        /// Actively developed.
        Running => "running",
        /// Completed.
        Finished => "finished",
        /// Public without a more specific lifecycle stage.
        Public => "public",
    }
}

impl ProjectState {
    /// States hidden from public listings.
    pub const HIDDEN: &'static [Self] = &[Self::Draft, Self::Internal];

    /// Returns `true` when projects in this state may be shown publicly.
    #[must_use]
    pub fn is_visible(self) -> bool {
        !Self::HIDDEN.contains(&self)
    }
}

/// A project that owns volunteer opportunities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Record id in the content store.
    pub id: String,
    /// Project name.
    pub name: String,
    /// URL slug for the project page.
    pub slug: String,
    /// Logo image URL.
    pub logo_url: String,
    /// Cover image URL; opportunities without their own cover inherit it.
    pub cover_image_url: String,
    /// Publication state.
    pub state: ProjectState,
    /// External project website, if any.
    pub url: Option<String>,
}

impl Project {
    /// Returns `true` when the project may be shown publicly.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    /// Re-encodes the project as a raw record.
    #[must_use]
    pub fn to_raw(&self) -> RawRecord {
        RawRecord::new()
            .with_text("id", &self.id)
            .with_text("name", &self.name)
            .with_text("slug", &self.slug)
            .with_text("logoUrl", &self.logo_url)
            .with_text("coverImageUrl", &self.cover_image_url)
            .with_text("state", self.state.as_str())
            .with_optional_text("url", self.url.as_deref())
    }
}

/// Decodes a raw project record.
///
/// # Errors
///
/// Returns [`DecodeError`] when a required field is missing or `state` is not
/// a known [`ProjectState`].
pub fn decode_project(record: &RawRecord) -> Result<Decoded<Project>, DecodeError> {
    let mut fields = RecordReader::new(record, EntityKind::Project);
    let project = Project {
        id: fields.required_text("id")?,
        name: fields.required_text("name")?,
        slug: fields.required_text("slug")?,
        logo_url: fields.required_text("logoUrl")?,
        cover_image_url: fields.required_text("coverImageUrl")?,
        state: fields.enum_value("state")?,
        url: fields.optional_text("url"),
    };
    Ok(fields.finish(project))
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn raw() -> RawRecord {
        RawRecord::new()
            .with_text("id", "p1")
            .with_text("name", "Cedu")
            .with_text("slug", "cedu")
            .with_text("logoUrl", "https://x/logo.png")
            .with_text("coverImageUrl", "https://x/cover.png")
            .with_text("state", "running")
    }

    #[rstest]
    #[case(ProjectState::Draft, false)]
    #[case(ProjectState::Internal, false)]
    #[case(ProjectState::Incubating, true)]
    #[case(ProjectState::Running, true)]
    #[case(ProjectState::Finished, true)]
    #[case(ProjectState::Public, true)]
    fn visibility_follows_hidden_set(#[case] state: ProjectState, #[case] visible: bool) {
        assert_eq!(state.is_visible(), visible);
    }

    #[rstest]
    fn decodes_optional_url_as_none(raw: RawRecord) {
        let project = decode_project(&raw).expect("project decodes").into_entity();
        assert_eq!(project.url, None);
        assert_eq!(project.state, ProjectState::Running);
    }

    #[rstest]
    fn rejects_unknown_state(raw: RawRecord) {
        let err = decode_project(&raw.with_text("state", "archived")).expect_err("bad state");
        assert!(matches!(
            err,
            DecodeError::InvalidEnumValue { ref value, .. } if value == "archived"
        ));
    }

    #[rstest]
    fn round_trips(raw: RawRecord) {
        let project = decode_project(&raw.with_text("url", "https://cedu.example"))
            .expect("project decodes")
            .into_entity();
        let again = decode_project(&project.to_raw())
            .expect("project decodes")
            .into_entity();
        assert_eq!(again, project);
    }
}
