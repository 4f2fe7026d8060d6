//! Instructional videos, addressed by slug.
//!
//! Besides plain text fields a video carries three list fields whose
//! elements have their own small grammar:
//!
//! - `toc`: `"<h:mm:ss|m:ss> <title>"`, e.g. `"1:05 Getting started"`;
//! - `resources`: markdown links, `"[title](url)"`;
//! - `credits`: free text, one contributor per element.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use super::{EntityKind, RichText};
use crate::error::DecodeError;
use crate::fields::{Decoded, RecordReader};
use crate::raw::RawRecord;

/// Error returned when a `toc` or `resources` element does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedEntry {
    /// The element is not `"<h:mm:ss|m:ss> <title>"`.
    #[error("expected '<h:mm:ss|m:ss> <title>'")]
    Segment,
    /// The element is not `"[title](url)"`.
    #[error("expected '[title](url)'")]
    Resource,
}

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Offset into the video, in seconds.
    pub start_seconds: u32,
    /// Segment heading.
    pub title: String,
}

impl FromStr for Segment {
    type Err = MalformedEntry;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (time, title) = value
            .trim()
            .split_once(char::is_whitespace)
            .ok_or(MalformedEntry::Segment)?;
        let title = title.trim();
        if title.is_empty() {
            return Err(MalformedEntry::Segment);
        }
        Ok(Self {
            start_seconds: parse_offset(time).ok_or(MalformedEntry::Segment)?,
            title: title.to_owned(),
        })
    }
}

/// Parses `m:ss` or `h:mm:ss` into seconds.
fn parse_offset(time: &str) -> Option<u32> {
    let parts = time
        .split(':')
        .map(|part| {
            part.chars()
                .all(|c| c.is_ascii_digit())
                .then(|| part.parse::<u32>().ok())
                .flatten()
        })
        .collect::<Option<Vec<u32>>>()?;
    match parts.as_slice() {
        [minutes, seconds] if *seconds < 60 => minutes.checked_mul(60)?.checked_add(*seconds),
        [hours, minutes, seconds] if *minutes < 60 && *seconds < 60 => hours
            .checked_mul(3600)?
            .checked_add(minutes * 60 + seconds),
        _ => None,
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.start_seconds.div_euclid(3600);
        let minutes = self.start_seconds.rem_euclid(3600).div_euclid(60);
        let seconds = self.start_seconds.rem_euclid(60);
        if hours > 0 {
            write!(f, "{hours}:{minutes:02}:{seconds:02} {}", self.title)
        } else {
            write!(f, "{minutes}:{seconds:02} {}", self.title)
        }
    }
}

/// A supporting link shown next to the video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    /// Link text.
    pub title: String,
    /// Link target.
    pub url: String,
}

impl FromStr for Resource {
    type Err = MalformedEntry;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (title, url) = value
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(')'))
            .and_then(|inner| inner.split_once("]("))
            .ok_or(MalformedEntry::Resource)?;
        if title.trim().is_empty() || url.trim().is_empty() {
            return Err(MalformedEntry::Resource);
        }
        Ok(Self {
            title: title.trim().to_owned(),
            url: url.trim().to_owned(),
        })
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]({})", self.title, self.url)
    }
}

/// An instructional video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Record id in the content store.
    pub id: String,
    /// URL slug; one static page per video.
    pub slug: String,
    /// Video title.
    pub title: String,
    /// Short description, used for SEO.
    pub description: String,
    /// Cover image URL.
    pub cover: String,
    /// Embeddable player URL.
    pub video_url: String,
    /// Markdown transcript, if published.
    pub transcript: Option<RichText>,
    /// Table of contents in source order.
    pub toc: Vec<Segment>,
    /// Supporting links.
    pub resources: Vec<Resource>,
    /// Contributors.
    pub credits: Vec<String>,
}

impl Video {
    /// Re-encodes the video as a raw record.
    #[must_use]
    pub fn to_raw(&self) -> RawRecord {
        RawRecord::new()
            .with_text("id", &self.id)
            .with_text("slug", &self.slug)
            .with_text("title", &self.title)
            .with_text("description", &self.description)
            .with_text("cover", &self.cover)
            .with_text("videoUrl", &self.video_url)
            .with_optional_text("transcript", self.transcript.as_ref().map(RichText::source))
            .with_list("toc", self.toc.iter().map(ToString::to_string))
            .with_list("resources", self.resources.iter().map(ToString::to_string))
            .with_list("credits", self.credits.iter().map(String::as_str))
    }
}

/// Decodes a raw video record.
///
/// # Errors
///
/// Returns [`DecodeError::MissingRequiredField`] for a missing identity,
/// media, or description field and [`DecodeError::InvalidFieldValue`] for a
/// `toc` or `resources` element that does not parse.
pub fn decode_video(record: &RawRecord) -> Result<Decoded<Video>, DecodeError> {
    let mut fields = RecordReader::new(record, EntityKind::Video);
    let video = Video {
        id: fields.required_text("id")?,
        slug: fields.required_text("slug")?,
        title: fields.required_text("title")?,
        description: fields.required_text("description")?,
        cover: fields.required_text("cover")?,
        video_url: fields.required_text("videoUrl")?,
        transcript: fields.optional_text("transcript").map(RichText::from),
        toc: parse_list(&fields, "toc")?,
        resources: parse_list(&fields, "resources")?,
        credits: fields.text_list("credits"),
    };
    Ok(fields.finish(video))
}

fn parse_list<T>(fields: &RecordReader<'_>, field: &'static str) -> Result<Vec<T>, DecodeError>
where
    T: FromStr<Err = MalformedEntry>,
{
    fields
        .text_list(field)
        .iter()
        .map(|raw| {
            raw.parse()
                .map_err(|err: MalformedEntry| fields.invalid(field, raw, err.to_string()))
        })
        .collect()
}
