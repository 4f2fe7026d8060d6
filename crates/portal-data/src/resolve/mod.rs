//! Relation lookups over a [`Dataset`].
//!
//! Lookups that follow a required relation (`project_of`, `owner_of`) are
//! checked and fail with [`ResolveError::DanglingReference`]. The skill
//! relation is the one tolerated exception: ids of retired skills are
//! silently skipped by [`Dataset::skills_of`].

mod skills;

pub use skills::{SkillField, fields_of, modifier_skill, skill_fields, skills_for_field};

use crate::dataset::Dataset;
use crate::defaults::resolve_cover_image;
use crate::entities::{EntityKind, Modifier, Opportunity, Partner, Project, Skill, User, Video};
use crate::error::ResolveError;

impl Dataset {
    /// Looks a user up by id.
    #[must_use]
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Looks a skill up by id.
    #[must_use]
    pub fn skill(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    /// Looks a project up by id.
    #[must_use]
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.get(id)
    }

    /// Looks an opportunity up by id.
    #[must_use]
    pub fn opportunity(&self, id: &str) -> Option<&Opportunity> {
        self.opportunities.get(id)
    }

    /// Looks a partner up by id.
    #[must_use]
    pub fn partner(&self, id: &str) -> Option<&Partner> {
        self.partners.get(id)
    }

    /// Finds the project page addressed by `slug`.
    #[must_use]
    pub fn project_by_slug(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.slug == slug)
    }

    /// Finds the video page addressed by `slug`.
    #[must_use]
    pub fn video_by_slug(&self, slug: &str) -> Option<&Video> {
        self.videos.iter().find(|video| video.slug == slug)
    }

    /// Returns the project owning `opportunity`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::DanglingReference`] when no project has the
    /// opportunity's `project_id`.
    pub fn project_of(&self, opportunity: &Opportunity) -> Result<&Project, ResolveError> {
        self.projects.get(&opportunity.project_id).ok_or_else(|| {
            ResolveError::DanglingReference {
                from_kind: EntityKind::Opportunity,
                from_id: opportunity.id.clone(),
                field: "projectId",
                target_kind: EntityKind::Project,
                target_id: opportunity.project_id.clone(),
            }
        })
    }

    /// Returns the user responsible for `opportunity`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::DanglingReference`] when no user has the
    /// opportunity's `owner_id`.
    pub fn owner_of(&self, opportunity: &Opportunity) -> Result<&User, ResolveError> {
        self.users.get(&opportunity.owner_id).ok_or_else(|| {
            ResolveError::DanglingReference {
                from_kind: EntityKind::Opportunity,
                from_id: opportunity.id.clone(),
                field: "ownerId",
                target_kind: EntityKind::User,
                target_id: opportunity.owner_id.clone(),
            }
        })
    }

    /// Returns the skills a user selected, in skill collection order.
    ///
    /// Ids with no matching skill are skipped without error.
    #[must_use]
    pub fn skills_of(&self, user: &User) -> Vec<&Skill> {
        self.skills_among(&user.skills)
    }

    /// Returns the skills an opportunity asks for, in skill collection order.
    ///
    /// Unknown ids are skipped, as for [`skills_of`](Self::skills_of).
    #[must_use]
    pub fn skills_wanted_by(&self, opportunity: &Opportunity) -> Vec<&Skill> {
        self.skills_among(&opportunity.skills)
    }

    fn skills_among(&self, ids: &[String]) -> Vec<&Skill> {
        self.skills
            .iter()
            .filter(|skill| ids.contains(&skill.id))
            .collect()
    }

    /// Returns `true` when `user` selected the `modifier` skill of `field`.
    ///
    /// Only the first matching modifier skill in collection order counts; see
    /// [`modifier_skill`].
    #[must_use]
    pub fn user_has_modifier(&self, user: &User, field: &str, modifier: Modifier) -> bool {
        modifier_skill(self.skills.as_slice(), field, modifier)
            .is_some_and(|skill| user.skills.contains(&skill.id))
    }

    /// Projects that may be shown publicly.
    pub fn visible_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|project| project.is_visible())
    }

    /// Opportunities listed publicly: `live`, with a visible parent project.
    pub fn visible_opportunities(&self) -> impl Iterator<Item = &Opportunity> {
        self.opportunities.iter().filter(move |opportunity| {
            opportunity.status.is_listed()
                && self
                    .projects
                    .get(&opportunity.project_id)
                    .is_some_and(Project::is_visible)
        })
    }

    /// Opportunities that get their own page; unlisted ones included.
    pub fn published_opportunities(&self) -> impl Iterator<Item = &Opportunity> {
        self.opportunities
            .iter()
            .filter(|opportunity| opportunity.status.is_published())
    }

    /// Opportunities owned by `project`, in source order.
    pub fn opportunities_of<'a>(
        &'a self,
        project: &'a Project,
    ) -> impl Iterator<Item = &'a Opportunity> {
        self.opportunities
            .iter()
            .filter(move |opportunity| opportunity.project_id == project.id)
    }

    /// Up to `limit` other publicly listed opportunities, in source order.
    #[must_use]
    pub fn related_opportunities(&self, opportunity: &Opportunity, limit: usize) -> Vec<&Opportunity> {
        self.visible_opportunities()
            .filter(|other| other.id != opportunity.id)
            .take(limit)
            .collect()
    }

    /// Partners tagged with `category`, in source order.
    pub fn partners_in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a Partner> {
        self.partners
            .iter()
            .filter(move |partner| partner.has_category(category))
    }

    /// Returns the cover image `opportunity` is shown with, falling back to
    /// its project's cover.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::DanglingReference`] when the parent project is
    /// missing.
    pub fn effective_cover_image<'a>(
        &'a self,
        opportunity: &'a Opportunity,
    ) -> Result<&'a str, ResolveError> {
        let project = self.project_of(opportunity)?;
        Ok(resolve_cover_image(opportunity, project))
    }
}
