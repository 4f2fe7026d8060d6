//! Skills volunteers can select, grouped by field.

use serde::Serialize;

use super::EntityKind;
use crate::error::DecodeError;
use crate::fields::{Decoded, RecordReader};
use crate::raw::RawRecord;

closed_set! {
    /// Reserved skill names that act as per-field flags rather than skills.
    ///
    /// A skill named `senior` in the field `Development` marks a senior
    /// developer; it is never listed alongside ordinary development skills.
    pub enum Modifier {
        /// Senior level in the field.
        Senior => "senior",
        /// Willing to lead and mentor others in the field.
        Mentor => "mentor",
    }
}

/// A selectable skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    /// Record id in the content store.
    pub id: String,
    /// Skill name, or a reserved [`Modifier`] name.
    pub name: String,
    /// Grouping label, e.g. `Development` or `Design`.
    pub field: String,
}

impl Skill {
    /// Returns the modifier this skill stands for, if its name is reserved.
    #[must_use]
    pub fn modifier(&self) -> Option<Modifier> {
        self.name.parse().ok()
    }

    /// Returns `true` for `senior`/`mentor` flag skills.
    #[must_use]
    pub fn is_modifier(&self) -> bool {
        self.modifier().is_some()
    }

    /// Re-encodes the skill as a raw record.
    #[must_use]
    pub fn to_raw(&self) -> RawRecord {
        RawRecord::new()
            .with_text("id", &self.id)
            .with_text("name", &self.name)
            .with_text("field", &self.field)
    }
}

/// Decodes a raw skill record. All three fields are required.
///
/// # Errors
///
/// Returns [`DecodeError::MissingRequiredField`] when `id`, `name`, or
/// `field` is absent or blank.
pub fn decode_skill(record: &RawRecord) -> Result<Decoded<Skill>, DecodeError> {
    let mut fields = RecordReader::new(record, EntityKind::Skill);
    let skill = Skill {
        id: fields.required_text("id")?,
        name: fields.required_text("name")?,
        field: fields.required_text("field")?,
    };
    Ok(fields.finish(skill))
}
