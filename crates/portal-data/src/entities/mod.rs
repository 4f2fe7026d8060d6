//! Decoded domain entities and their per-kind decoders.
//!
//! Each submodule owns one entity kind: its strongly-shaped type, a pure
//! `decode_*` function turning a [`RawRecord`](crate::RawRecord) into that
//! type, and a `to_raw` re-encoding used to check that decoding is lossless.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;
use thiserror::Error;

/// Error returned when a raw string is not a member of a closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised value '{input}'")]
pub struct UnknownValue {
    /// The rejected input.
    pub input: String,
}

/// Declares a closed set of raw string values as a Rust enum.
///
/// The generated type carries `ALL`, `as_str`, `Display`, `FromStr`, and
/// serde impls that all agree on the content-store spelling.
macro_rules! closed_set {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $raw:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $raw)]
                $variant,
            )+
        }

        impl $name {
            /// Every member of the set, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the content-store spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $raw,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::entities::UnknownValue;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|member| member.as_str() == value)
                    .ok_or_else(|| $crate::entities::UnknownValue {
                        input: value.to_owned(),
                    })
            }
        }
    };
}

pub(crate) use closed_set;

mod opportunity;
mod partner;
mod project;
mod rich_text;
mod skill;
mod user;
mod video;

pub use opportunity::{Opportunity, OpportunityStatus, decode_opportunity};
pub use partner::{Partner, decode_partner};
pub use project::{Project, ProjectState, decode_project};
pub use rich_text::RichText;
pub use skill::{Modifier, Skill, decode_skill};
pub use user::{User, UserState, decode_user};
pub use video::{MalformedEntry, Resource, Segment, Video, decode_video};

closed_set! {
    /// The kinds of entity held in a dataset.
    pub enum EntityKind {
        /// A registered volunteer.
        User => "user",
        /// A skill volunteers can select.
        Skill => "skill",
        /// A project run by the community.
        Project => "project",
        /// A volunteer opportunity within a project.
        Opportunity => "opportunity",
        /// A partner organisation.
        Partner => "partner",
        /// An instructional video.
        Video => "video",
    }
}

/// Formats a timestamp the way the content store writes them.
pub(crate) fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Serialises a timestamp in content-store form (`2022-03-23T08:31:54.500Z`).
pub(crate) fn serialize_timestamp<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(value))
}

impl EntityKind {
    /// Returns the plural label used for collections of this kind.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Skill => "skills",
            Self::Project => "projects",
            Self::Opportunity => "opportunities",
            Self::Partner => "partners",
            Self::Video => "videos",
        }
    }
}
