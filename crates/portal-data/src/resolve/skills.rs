//! Skill grouping for the selection menu.
//!
//! Skill order in the content store is significant: when several skills in
//! one field carry the same modifier name, the first one wins everywhere.

use serde::Serialize;

use crate::entities::{Modifier, Skill};

/// One field of the skill selection menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillField<'a> {
    /// Field label.
    pub field: &'a str,
    /// Ordinary skills of the field, sorted by name.
    pub skills: Vec<&'a Skill>,
    /// The field's `senior` flag skill, if defined.
    pub senior: Option<&'a Skill>,
    /// The field's `mentor` flag skill, if defined.
    pub mentor: Option<&'a Skill>,
}

/// Distinct fields across all skills, in first-seen order.
///
/// A field holding only modifier skills is still listed, so its `senior` and
/// `mentor` flags can be offered.
#[must_use]
pub fn fields_of(skills: &[Skill]) -> Vec<&str> {
    let mut fields: Vec<&str> = Vec::new();
    for skill in skills {
        if !fields.contains(&skill.field.as_str()) {
            fields.push(&skill.field);
        }
    }
    fields
}

/// Ordinary skills of `field`, sorted by name.
///
/// Names compare case-insensitively, falling back to byte order for ties.
/// Accented letters sort by code point, after unaccented ones.
#[must_use]
pub fn skills_for_field<'a>(skills: &'a [Skill], field: &str) -> Vec<&'a Skill> {
    let mut matching: Vec<&Skill> = skills
        .iter()
        .filter(|skill| skill.field == field && !skill.is_modifier())
        .collect();
    matching.sort_by_cached_key(|skill| (skill.name.to_lowercase(), skill.name.clone()));
    matching
}

/// The first `modifier` skill of `field`, in collection order.
///
/// # Example
///
/// ```
/// use portal_data::{Modifier, Skill, modifier_skill};
///
/// let skill = |id: &str, name: &str| Skill {
///     id: id.to_owned(),
///     name: name.to_owned(),
///     field: "Design".to_owned(),
/// };
/// let skills = [skill("a", "Figma"), skill("b", "senior"), skill("c", "senior")];
///
/// let senior = modifier_skill(&skills, "Design", Modifier::Senior);
/// assert_eq!(senior.map(|s| s.id.as_str()), Some("b"));
/// ```
#[must_use]
pub fn modifier_skill<'a>(skills: &'a [Skill], field: &str, modifier: Modifier) -> Option<&'a Skill> {
    skills
        .iter()
        .find(|skill| skill.field == field && skill.modifier() == Some(modifier))
}

/// Groups skills into the selection menu, one entry per [`fields_of`] field.
#[must_use]
pub fn skill_fields(skills: &[Skill]) -> Vec<SkillField<'_>> {
    fields_of(skills)
        .into_iter()
        .map(|field| SkillField {
            field,
            skills: skills_for_field(skills, field),
            senior: modifier_skill(skills, field, Modifier::Senior),
            mentor: modifier_skill(skills, field, Modifier::Mentor),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn skills() -> Vec<Skill> {
        [
            ("s1", "Rust", "Development"),
            ("s2", "senior", "Development"),
            ("s3", "Figma", "Design"),
            ("s4", "Go", "Development"),
            ("s5", "mentor", "Marketing"),
            ("s6", "senior", "Development"),
            ("s7", "mentor", "Design"),
        ]
        .into_iter()
        .map(|(id, name, field)| Skill {
            id: id.to_owned(),
            name: name.to_owned(),
            field: field.to_owned(),
        })
        .collect()
    }

    fn ids(skills: &[&Skill]) -> Vec<String> {
        skills.iter().map(|skill| skill.id.clone()).collect()
    }

    #[rstest]
    fn fields_include_modifier_only_fields(skills: Vec<Skill>) {
        assert_eq!(fields_of(&skills), ["Development", "Design", "Marketing"]);
    }

    #[rstest]
    fn field_skills_sort_ignoring_case() {
        let skills: Vec<Skill> = [("a", "python"), ("b", "Rust"), ("c", "Go"), ("d", "go")]
            .into_iter()
            .map(|(id, name)| Skill {
                id: id.to_owned(),
                name: name.to_owned(),
                field: "Development".to_owned(),
            })
            .collect();
        assert_eq!(ids(&skills_for_field(&skills, "Development")), ["c", "d", "a", "b"]);
    }

    #[rstest]
    fn field_skills_are_sorted_and_exclude_modifiers(skills: Vec<Skill>) {
        assert_eq!(ids(&skills_for_field(&skills, "Development")), ["s4", "s1"]);
    }

    #[rstest]
    #[case("Development", Modifier::Senior, Some("s2"))]
    #[case("Development", Modifier::Mentor, None)]
    #[case("Marketing", Modifier::Mentor, Some("s5"))]
    fn modifier_lookup_takes_first_match(
        skills: Vec<Skill>,
        #[case] field: &str,
        #[case] modifier: Modifier,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(
            modifier_skill(&skills, field, modifier).map(|skill| skill.id.as_str()),
            expected
        );
    }

    #[rstest]
    fn groups_menu_by_field(skills: Vec<Skill>) {
        let menu = skill_fields(&skills);
        let design = menu.get(1).expect("design group");
        let marketing = menu.get(2).expect("marketing group");

        assert_eq!(menu.len(), 3);
        assert_eq!(design.field, "Design");
        assert_eq!(ids(&design.skills), ["s3"]);
        assert_eq!(design.senior, None);
        assert_eq!(design.mentor.map(|skill| skill.id.as_str()), Some("s7"));
        assert_eq!(marketing.field, "Marketing");
        assert!(marketing.skills.is_empty());
        assert_eq!(marketing.mentor.map(|skill| skill.id.as_str()), Some("s5"));
    }
}
