use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

use crate::blank;
use crate::errors::CallCenterError;
use crate::timestamp;

/// A numeric identifier: of a call, a user or a dictionary entry.
pub type Id = i64;

/// Which side placed the call.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Inbound
    }
}

impl FromStr for Direction {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inbound" => Ok(Direction::Inbound),
            "outbound" => Ok(Direction::Outbound),
            _ => Err(UnknownVariant::new("direction", s)),
        }
    }
}

/// Where a call currently stands. Any status may follow any other.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Ringing,
    Answered,
    Missed,
    Abandoned,
    Busy,
    Failed,
}

impl CallStatus {
    pub const ALL: [CallStatus; 6] = [
        CallStatus::Ringing,
        CallStatus::Answered,
        CallStatus::Missed,
        CallStatus::Abandoned,
        CallStatus::Busy,
        CallStatus::Failed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CallStatus::Ringing => "ringing",
            CallStatus::Answered => "answered",
            CallStatus::Missed => "missed",
            CallStatus::Abandoned => "abandoned",
            CallStatus::Busy => "busy",
            CallStatus::Failed => "failed",
        }
    }
}

impl Default for CallStatus {
    fn default() -> Self {
        CallStatus::Ringing
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CallStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("status", s))
    }
}

/// Returned when a string names no known direction or status.
#[derive(Debug, Error)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        UnknownVariant {
            kind,
            value: value.to_owned(),
        }
    }
}

/// A single phone call and everything known about it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Call {
    /// Assigned at creation; never changes.
    pub(crate) id: Id,

    /// The PBX identifier of this call leg.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) uniqueid: Option<String>,

    /// The PBX identifier shared by linked legs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) linkedid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) queue: Option<String>,

    pub(crate) direction: Direction,

    pub(crate) status: CallStatus,

    /// Stamped at creation; never changes.
    #[serde(with = "timestamp")]
    pub(crate) started_at: OffsetDateTime,

    #[serde(skip_serializing_if = "Option::is_none", with = "timestamp::option")]
    pub(crate) answered_at: Option<OffsetDateTime>,

    #[serde(skip_serializing_if = "Option::is_none", with = "timestamp::option")]
    pub(crate) ended_at: Option<OffsetDateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) duration_sec: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) talk_sec: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) hold_sec: Option<u32>,

    pub(crate) src_number: String,

    pub(crate) dst_number: String,

    /// The number the caller dialed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) did: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) operator_id: Option<Id>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) purpose_id: Option<Id>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) category_id: Option<Id>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sub_category_id: Option<Id>,

    /// Where the recording lives in storage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) recording_path: Option<String>,

    /// Where clients fetch the recording from. Absent means there is none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) recording_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) resolved_first_call: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) needs_callback: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) notes: Option<String>,
}

impl Call {
    /// Builds a fresh record from creation input, applying the defaults.
    pub(crate) fn new(id: Id, started_at: OffsetDateTime, new_call: NewCall) -> Self {
        let NewCall {
            direction,
            status,
            src_number,
            dst_number,
        } = new_call;

        Call {
            id,
            uniqueid: None,
            linkedid: None,
            queue: None,
            direction: direction.unwrap_or_default(),
            status: status.unwrap_or_default(),
            started_at,
            answered_at: None,
            ended_at: None,
            duration_sec: None,
            talk_sec: None,
            hold_sec: None,
            src_number: src_number.unwrap_or_default(),
            dst_number: dst_number.unwrap_or_default(),
            did: None,
            operator_id: None,
            purpose_id: None,
            category_id: None,
            sub_category_id: None,
            recording_path: None,
            recording_url: None,
            resolved_first_call: None,
            needs_callback: None,
            notes: None,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn status(&self) -> CallStatus {
        self.status
    }

    pub fn started_at(&self) -> OffsetDateTime {
        self.started_at
    }

    pub fn src_number(&self) -> &str {
        &self.src_number
    }

    pub fn dst_number(&self) -> &str {
        &self.dst_number
    }

    pub fn operator_id(&self) -> Option<Id> {
        self.operator_id
    }

    pub fn purpose_id(&self) -> Option<Id> {
        self.purpose_id
    }

    pub fn category_id(&self) -> Option<Id> {
        self.category_id
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn recording_url(&self) -> Option<&str> {
        self.recording_url.as_deref()
    }

    pub(crate) fn classify(&mut self, classification: Classification) {
        let Classification {
            purpose_id,
            category_id,
            notes,
        } = classification;

        self.purpose_id = Some(purpose_id);
        self.category_id = Some(category_id);
        self.notes = Some(notes);
    }

    pub(crate) fn apply(&mut self, update: TelephonyUpdate) {
        macro_rules! overwrite {
            ($($field:ident),+) => {
                $(
                    if let Some(value) = update.$field {
                        self.$field = Some(value);
                    }
                )+
            };
        }

        if let Some(status) = update.status {
            self.status = status;
        }

        overwrite!(
            uniqueid,
            linkedid,
            queue,
            answered_at,
            ended_at,
            duration_sec,
            talk_sec,
            hold_sec,
            did,
            operator_id,
            sub_category_id,
            recording_path,
            recording_url,
            resolved_first_call,
            needs_callback
        );
    }
}

/// The fields a client may supply when registering a call. Anything
/// missing or unusable falls back to an inbound, ringing call between empty
/// numbers, so decoding a JSON object into this never fails.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewCall {
    #[serde(default, deserialize_with = "blank::deserialize_lenient")]
    pub direction: Option<Direction>,

    #[serde(default, deserialize_with = "blank::deserialize_lenient")]
    pub status: Option<CallStatus>,

    #[serde(default, deserialize_with = "blank::deserialize_text")]
    pub src_number: Option<String>,

    #[serde(default, deserialize_with = "blank::deserialize_text")]
    pub dst_number: Option<String>,
}

/// An operator's classification of a call. All three parts are required
/// together; see [`Annotation::validate`].
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Annotation {
    pub purpose_id: Option<Id>,

    pub category_id: Option<Id>,

    pub notes: Option<String>,
}

pub(crate) const INCOMPLETE_ANNOTATION: &str = "purpose_id, category_id and notes are required";

impl Annotation {
    /// Checks that every part is present. A zero ID or empty notes count
    /// as missing.
    pub fn validate(self) -> Result<Classification, CallCenterError> {
        let purpose_id = self.purpose_id.filter(|id| *id != 0);
        let category_id = self.category_id.filter(|id| *id != 0);
        let notes = self.notes.filter(|notes| !notes.is_empty());

        match (purpose_id, category_id, notes) {
            (Some(purpose_id), Some(category_id), Some(notes)) => Ok(Classification {
                purpose_id,
                category_id,
                notes,
            }),
            _ => Err(CallCenterError::Validation(INCOMPLETE_ANNOTATION)),
        }
    }
}

/// A complete, validated annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    purpose_id: Id,
    category_id: Id,
    notes: String,
}

/// Progress reported by the telephony side for an existing call. Every
/// field present overwrites the stored value; the rest stay as they are.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TelephonyUpdate {
    pub uniqueid: Option<String>,
    pub linkedid: Option<String>,
    pub queue: Option<String>,
    pub status: Option<CallStatus>,

    #[serde(default, with = "timestamp::option")]
    pub answered_at: Option<OffsetDateTime>,

    #[serde(default, with = "timestamp::option")]
    pub ended_at: Option<OffsetDateTime>,

    pub duration_sec: Option<u32>,
    pub talk_sec: Option<u32>,
    pub hold_sec: Option<u32>,
    pub did: Option<String>,
    pub operator_id: Option<Id>,
    pub sub_category_id: Option<Id>,
    pub recording_path: Option<String>,
    pub recording_url: Option<String>,
    pub resolved_first_call: Option<bool>,
    pub needs_callback: Option<bool>,
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn fresh() -> Call {
        Call::new(1, datetime!(2024-05-01 10:00 UTC), NewCall::default())
    }

    #[test]
    fn new_calls_are_defaulted() {
        let call = fresh();

        assert_eq!(call.direction(), Direction::Inbound);
        assert_eq!(call.status(), CallStatus::Ringing);
        assert_eq!(call.src_number(), "");
        assert_eq!(call.dst_number(), "");
        assert_eq!(call.recording_url(), None);
        assert_eq!(call.notes(), None);
    }

    #[test]
    fn unset_fields_are_omitted_from_json() {
        let value = serde_json::to_value(&fresh()).expect("serialize call");
        let object = value.as_object().expect("call is an object");

        let mut keys = object.keys().map(String::as_str).collect::<Vec<_>>();
        keys.sort_unstable();

        assert_eq!(
            keys,
            vec!["direction", "dst_number", "id", "src_number", "started_at", "status"]
        );
        assert_eq!(object["started_at"], "2024-05-01T10:00:00.000Z");
        assert_eq!(object["direction"], "inbound");
        assert_eq!(object["status"], "ringing");
    }

    #[test]
    fn recording_fields_are_serialized() {
        let mut call = fresh();
        call.apply(TelephonyUpdate {
            recording_path: Some("/var/spool/recordings/1.ogg".to_owned()),
            recording_url: Some("https://records.example.com/1.ogg".to_owned()),
            ..Default::default()
        });

        let value = serde_json::to_value(&call).expect("serialize call");
        assert_eq!(value["recording_path"], "/var/spool/recordings/1.ogg");
        assert_eq!(value["recording_url"], "https://records.example.com/1.ogg");
    }

    #[test]
    fn new_call_parses_blank_fields_as_absent() {
        let new_call: NewCall =
            serde_json::from_str(r#"{"direction": "", "status": null, "src_number": "5551", "extra": 1}"#)
                .expect("parse new call");

        assert_eq!(new_call.direction, None);
        assert_eq!(new_call.status, None);
        assert_eq!(new_call.src_number.as_deref(), Some("5551"));
        assert_eq!(new_call.dst_number, None);
    }

    #[test]
    fn new_call_falls_back_on_unusable_fields() {
        let new_call: NewCall = serde_json::from_str(
            r#"{"direction": 1, "status": "on hold", "src_number": 5551, "dst_number": [5552]}"#,
        )
        .expect("parse new call");

        assert_eq!(new_call.direction, None);
        assert_eq!(new_call.status, None);
        assert_eq!(new_call.src_number.as_deref(), Some("5551"));
        assert_eq!(new_call.dst_number, None);

        let call = Call::new(1, datetime!(2024-05-01 10:00 UTC), new_call);
        assert_eq!(call.direction(), Direction::Inbound);
        assert_eq!(call.status(), CallStatus::Ringing);
        assert_eq!(call.src_number(), "5551");
        assert_eq!(call.dst_number(), "");
    }

    #[test]
    fn annotation_requires_all_parts() {
        let complete = Annotation {
            purpose_id: Some(1),
            category_id: Some(2),
            notes: Some("rescheduled".to_owned()),
        };
        assert!(complete.clone().validate().is_ok());

        let missing = vec![
            Annotation { purpose_id: None, ..complete.clone() },
            Annotation { category_id: None, ..complete.clone() },
            Annotation { notes: None, ..complete.clone() },
            Annotation { purpose_id: Some(0), ..complete.clone() },
            Annotation { category_id: Some(0), ..complete.clone() },
            Annotation { notes: Some(String::new()), ..complete },
        ];

        for annotation in missing {
            match annotation.clone().validate() {
                Err(CallCenterError::Validation(message)) => {
                    assert_eq!(message, INCOMPLETE_ANNOTATION)
                }
                other => panic!("{:?} validated as {:?}", annotation, other),
            }
        }
    }

    #[test]
    fn telephony_updates_leave_absent_fields_alone() {
        let mut call = fresh();
        call.apply(TelephonyUpdate {
            status: Some(CallStatus::Answered),
            operator_id: Some(2),
            recording_url: Some("https://records.example.com/1.ogg".to_owned()),
            ..Default::default()
        });
        call.apply(TelephonyUpdate {
            talk_sec: Some(42),
            ..Default::default()
        });

        assert_eq!(call.status(), CallStatus::Answered);
        assert_eq!(call.operator_id(), Some(2));
        assert_eq!(call.recording_url(), Some("https://records.example.com/1.ogg"));
        assert_eq!(call.talk_sec, Some(42));
        assert_eq!(call.started_at(), datetime!(2024-05-01 10:00 UTC));
    }

    #[test]
    fn statuses_round_trip_through_strings() {
        for status in CallStatus::ALL.iter() {
            assert_eq!(status.as_str().parse::<CallStatus>().unwrap(), *status);
        }
        assert!("Ringing".parse::<CallStatus>().is_err());
    }
}
