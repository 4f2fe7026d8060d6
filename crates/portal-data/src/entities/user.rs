//! Volunteer user profiles.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{EntityKind, format_timestamp, serialize_timestamp};
use crate::error::DecodeError;
use crate::fields::{Decoded, RecordReader};
use crate::raw::RawRecord;

closed_set! {
    /// Lifecycle state of a user profile.
    pub enum UserState {
        /// Invited by staff but not yet registered.
        Invited => "invited",
        /// Registered, email not yet confirmed.
        Unconfirmed => "unconfirmed",
        /// Registered and confirmed.
        Confirmed => "confirmed",
    }
}

/// A registered volunteer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Record id in the content store.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Ids of the skills the user selected, in source order.
    pub skills: Vec<String>,
    /// Slack member id.
    pub slack_id: String,
    /// Id of the linked Slack user record, if the user has one.
    pub slack_user_relation_id: Option<String>,
    /// Profile lifecycle state.
    pub state: UserState,
    /// When the profile was created.
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
    /// When the profile was last modified.
    #[serde(serialize_with = "serialize_timestamp")]
    pub last_modified_at: DateTime<Utc>,
}

impl User {
    /// Re-encodes the user as a raw record, relations as one-element lists.
    #[must_use]
    pub fn to_raw(&self) -> RawRecord {
        RawRecord::new()
            .with_text("id", &self.id)
            .with_text("name", &self.name)
            .with_text("email", &self.email)
            .with_list("skills", self.skills.iter().map(String::as_str))
            .with_list("slackId", [self.slack_id.as_str()])
            .with_relation("slackUser", self.slack_user_relation_id.as_deref())
            .with_text("state", self.state.as_str())
            .with_text("createdAt", format_timestamp(&self.created_at))
            .with_text("lastModifiedAt", format_timestamp(&self.last_modified_at))
    }
}

/// Decodes a raw user profile record.
///
/// `skills` defaults to an empty list; `slackUser` is a relation whose
/// absence and emptiness both decode to `None`.
///
/// # Errors
///
/// Returns [`DecodeError`] when an identity field is missing, `state` is not
/// a known [`UserState`], or a timestamp is malformed.
///
/// # Example
///
/// ```
/// use portal_data::{RawRecord, UserState, decode_user};
///
/// let raw = RawRecord::new()
///     .with_text("id", "uisoh7Ei")
///     .with_text("name", "John Smith")
///     .with_text("email", "john@smith.name")
///     .with_list("slackId", ["slack-id"])
///     .with_text("state", "confirmed")
///     .with_text("createdAt", "2022-03-23T08:31:54.500Z")
///     .with_text("lastModifiedAt", "2022-03-23T08:31:54.500Z");
///
/// let user = decode_user(&raw).expect("valid user").into_entity();
/// assert!(user.skills.is_empty());
/// assert_eq!(user.slack_id, "slack-id");
/// assert_eq!(user.state, UserState::Confirmed);
/// ```
pub fn decode_user(record: &RawRecord) -> Result<Decoded<User>, DecodeError> {
    let mut fields = RecordReader::new(record, EntityKind::User);
    let user = User {
        id: fields.required_text("id")?,
        name: fields.required_text("name")?,
        email: fields.required_text("email")?,
        skills: fields.text_list("skills"),
        slack_id: fields.required_text("slackId")?,
        slack_user_relation_id: fields.relation("slackUser"),
        state: fields.enum_value("state")?,
        created_at: fields.timestamp("createdAt")?,
        last_modified_at: fields.timestamp("lastModifiedAt")?,
    };
    Ok(fields.finish(user))
}

#[cfg(test)]
mod tests {
    //! Decoding scenarios for user profiles.

    use rstest::{fixture, rstest};

    use super::*;

    const TIMESTAMP: &str = "2022-03-23T08:31:54.500Z";

    #[fixture]
    fn john() -> RawRecord {
        RawRecord::new()
            .with_text("id", "uisoh7Ei")
            .with_text("name", "John Smith")
            .with_text("email", "john@smith.name")
            .with_list("slackId", ["slack-id"])
            .with_text("state", "confirmed")
            .with_text("createdAt", TIMESTAMP)
            .with_text("lastModifiedAt", TIMESTAMP)
    }

    fn timestamp() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(TIMESTAMP)
            .expect("valid timestamp")
            .with_timezone(&Utc)
    }

    fn decode(record: &RawRecord) -> User {
        decode_user(record).expect("user decodes").into_entity()
    }

    #[rstest]
    fn decodes_user_with_no_skills(john: RawRecord) {
        assert_eq!(
            decode(&john),
            User {
                id: "uisoh7Ei".to_owned(),
                name: "John Smith".to_owned(),
                email: "john@smith.name".to_owned(),
                skills: vec![],
                slack_id: "slack-id".to_owned(),
                slack_user_relation_id: None,
                state: UserState::Confirmed,
                created_at: timestamp(),
                last_modified_at: timestamp(),
            }
        );
    }

    #[rstest]
    fn decodes_slack_user_relation(john: RawRecord) {
        let linked = john.clone().with_list("slackUser", ["someDatabaseId"]);
        let unlinked = john.with_list("slackUser", Vec::<String>::new());

        assert_eq!(
            decode(&linked).slack_user_relation_id.as_deref(),
            Some("someDatabaseId")
        );
        assert_eq!(decode(&unlinked).slack_user_relation_id, None);
    }

    #[rstest]
    fn keeps_skill_order(john: RawRecord) {
        let user = decode(&john.with_list("skills", ["foo", "bar"]));
        assert_eq!(user.skills, vec!["foo".to_owned(), "bar".to_owned()]);
    }

    #[rstest]
    #[case::id("id")]
    #[case::name("name")]
    #[case::email("email")]
    #[case::slack_id("slackId")]
    fn rejects_missing_identity_fields(john: RawRecord, #[case] field: &'static str) {
        let raw = john.with_list(field, Vec::<String>::new());
        let err = decode_user(&raw).expect_err("missing field");
        assert_eq!(err.field(), field);
        assert!(matches!(err, DecodeError::MissingRequiredField { .. }));
    }

    #[rstest]
    fn rejects_unknown_state(john: RawRecord) {
        let err = decode_user(&john.with_text("state", "banned")).expect_err("bad state");
        assert_eq!(
            err,
            DecodeError::InvalidEnumValue {
                kind: EntityKind::User,
                record_id: Some("uisoh7Ei".to_owned()),
                field: "state",
                value: "banned".to_owned(),
            }
        );
    }

    #[rstest]
    fn reencoding_round_trips(john: RawRecord) {
        let user = decode(&john.with_list("skills", ["a", "b"]).with_list("slackUser", ["s1"]));
        assert_eq!(decode(&user.to_raw()), user);
    }

    #[rstest]
    fn serializes_in_content_store_shape(john: RawRecord) {
        let json = serde_json::to_value(decode(&john)).expect("serialize");
        assert_eq!(json["createdAt"], TIMESTAMP);
        assert_eq!(json["slackUserRelationId"], serde_json::Value::Null);
        assert_eq!(json["skills"], serde_json::json!([]));
    }
}
