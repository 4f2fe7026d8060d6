//! Read-time fallbacks and projections over decoded entities.
//!
//! Nothing here mutates or caches: a fallback is recomputed from the current
//! entities every time it is asked for, so a project cover changed within a
//! pass is picked up by every opportunity that inherits it.

use pulldown_cmark::{Event, Parser, TagEnd};

use crate::entities::{Opportunity, Project, RichText};

/// Returns the cover image an opportunity should be shown with.
///
/// The opportunity's own cover wins; otherwise the parent project's cover is
/// used. The caller is responsible for passing the opportunity's actual
/// parent (see [`Dataset::effective_cover_image`](crate::Dataset::effective_cover_image)
/// for the checked form).
#[must_use]
pub fn resolve_cover_image<'a>(opportunity: &'a Opportunity, project: &'a Project) -> &'a str {
    opportunity
        .cover_image_url
        .as_deref()
        .unwrap_or(&project.cover_image_url)
}

/// Renders markdown to a single line of plain text.
///
/// Markup is dropped, block boundaries and line breaks become single spaces,
/// and runs of whitespace collapse.
///
/// # Example
///
/// ```
/// use portal_data::{RichText, plain_text};
///
/// let summary = RichText::new("# Join us\n\nWe build **open** tools.");
/// assert_eq!(plain_text(&summary), "Join us We build open tools.");
/// ```
#[must_use]
pub fn plain_text(text: &RichText) -> String {
    let mut rendered = String::new();
    for event in Parser::new(text.source()) {
        match event {
            Event::Text(chunk) | Event::Code(chunk) | Event::InlineHtml(chunk) => {
                rendered.push_str(&chunk);
            }
            Event::SoftBreak | Event::HardBreak | Event::Rule => rendered.push(' '),
            Event::End(tag) if ends_block(tag) => rendered.push(' '),
            _ => {}
        }
    }
    rendered.split_whitespace().collect::<Vec<_>>().join(" ")
}

const fn ends_block(tag: TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::BlockQuote(_)
            | TagEnd::CodeBlock
            | TagEnd::Item
            | TagEnd::TableCell
            | TagEnd::TableRow
    )
}

/// Returns at most `max_chars` characters of the plain-text projection.
///
/// Shortened text is cut on a character boundary, stripped of trailing
/// whitespace, and ends with `…` (counted in `max_chars`). A `max_chars` of
/// zero yields an empty string.
#[must_use]
pub fn excerpt(text: &RichText, max_chars: usize) -> String {
    let plain = plain_text(text);
    if plain.chars().count() <= max_chars {
        return plain;
    }
    let Some(keep) = max_chars.checked_sub(1) else {
        return String::new();
    };
    let mut shortened: String = plain.chars().take(keep).collect();
    shortened.truncate(shortened.trim_end().len());
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::entities::{OpportunityStatus, ProjectState};

    #[fixture]
    fn project() -> Project {
        Project {
            id: "p1".to_owned(),
            name: "Cedu".to_owned(),
            slug: "cedu".to_owned(),
            logo_url: "https://x/logo.png".to_owned(),
            cover_image_url: "https://x/logo.png".to_owned(),
            state: ProjectState::Running,
            url: None,
        }
    }

    fn opportunity(cover: Option<&str>) -> Opportunity {
        Opportunity {
            id: "o1".to_owned(),
            name: "Designer".to_owned(),
            summary: RichText::new("Draw things"),
            cover_image_url: cover.map(str::to_owned),
            time_requirements: "2 hours a week".to_owned(),
            contact_url: "https://x/contact".to_owned(),
            project_id: "p1".to_owned(),
            owner_id: "u1".to_owned(),
            status: OpportunityStatus::Live,
            skills: Vec::new(),
        }
    }

    #[rstest]
    fn falls_back_to_project_cover_without_mutation(project: Project) {
        let inherits = opportunity(None);
        let before = inherits.clone();

        assert_eq!(resolve_cover_image(&inherits, &project), "https://x/logo.png");
        assert_eq!(inherits, before);
    }

    #[rstest]
    fn own_cover_wins(project: Project) {
        let own = opportunity(Some("https://x/own.png"));
        assert_eq!(resolve_cover_image(&own, &project), "https://x/own.png");
    }

    #[rstest]
    fn tracks_project_cover_changes(mut project: Project) {
        let inherits = opportunity(None);
        project.cover_image_url = "https://x/new.png".to_owned();
        assert_eq!(resolve_cover_image(&inherits, &project), "https://x/new.png");
    }

    #[rstest]
    #[case::emphasis("Some *very* `important` text", "Some very important text")]
    #[case::list("- one\n- two", "one two")]
    #[case::link("See [the docs](https://x/docs).", "See the docs.")]
    #[case::soft_break("first\nsecond", "first second")]
    #[case::empty("", "")]
    fn projects_markdown_to_plain_text(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(plain_text(&RichText::new(source)), expected);
    }

    #[rstest]
    #[case::fits("short", 10, "short")]
    #[case::exact("short", 5, "short")]
    #[case::cut("hello wonderful world", 7, "hello…")]
    #[case::multibyte("žluťoučký kůň", 5, "žluť…")]
    #[case::zero("anything", 0, "")]
    fn excerpts_on_char_boundaries(
        #[case] source: &str,
        #[case] max_chars: usize,
        #[case] expected: &str,
    ) {
        let result = excerpt(&RichText::new(source), max_chars);
        assert_eq!(result, expected);
        assert!(result.chars().count() <= max_chars);
    }
}
