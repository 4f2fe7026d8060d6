//! Partner organisations shown on the portal.

use serde::Serialize;

use super::EntityKind;
use crate::error::DecodeError;
use crate::fields::{Decoded, RecordReader};
use crate::raw::RawRecord;

/// A partner organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    /// Record id in the content store.
    pub id: String,
    /// Organisation name.
    pub name: String,
    /// Placement tags such as `homepage`, de-duplicated in source order.
    pub categories: Vec<String>,
    /// Logo image URL, if set.
    pub logo_url: Option<String>,
    /// Organisation website, if set.
    pub url: Option<String>,
}

impl Partner {
    /// Returns `true` when the partner is tagged with `category`.
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|tag| tag == category)
    }

    /// Re-encodes the partner as a raw record.
    #[must_use]
    pub fn to_raw(&self) -> RawRecord {
        RawRecord::new()
            .with_text("id", &self.id)
            .with_text("name", &self.name)
            .with_list("categories", self.categories.iter().map(String::as_str))
            .with_optional_text("logoUrl", self.logo_url.as_deref())
            .with_optional_text("url", self.url.as_deref())
    }
}

/// Decodes a raw partner record.
///
/// Repeated category tags collapse to their first occurrence.
///
/// # Errors
///
/// Returns [`DecodeError::MissingRequiredField`] when `id` or `name` is
/// absent or blank.
pub fn decode_partner(record: &RawRecord) -> Result<Decoded<Partner>, DecodeError> {
    let mut fields = RecordReader::new(record, EntityKind::Partner);
    let mut categories: Vec<String> = Vec::new();
    for tag in fields.text_list("categories") {
        if !categories.contains(&tag) {
            categories.push(tag);
        }
    }
    let partner = Partner {
        id: fields.required_text("id")?,
        name: fields.required_text("name")?,
        categories,
        logo_url: fields.optional_text("logoUrl"),
        url: fields.optional_text("url"),
    };
    Ok(fields.finish(partner))
}
