//! Timestamps as they appear on call records: UTC, RFC 3339, millisecond
//! precision, so that their textual form sorts the same way as the instants.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// Returns the current instant truncated to whole milliseconds.
pub fn now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();

    now.replace_millisecond(now.millisecond()).unwrap_or(now)
}

/// Formats an instant as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn format(instant: OffsetDateTime) -> Result<String, time::error::Format> {
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    );

    instant.to_offset(UtcOffset::UTC).format(format)
}

/// Parses a query bound. Accepts full RFC 3339 timestamps and bare
/// `YYYY-MM-DD` dates, which are taken as UTC midnight.
pub fn parse_bound(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();

    if let Ok(instant) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(instant);
    }

    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc())
}

pub fn serialize<S>(instant: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where S: Serializer {
    let formatted = format(*instant).map_err(S::Error::custom)?;
    serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where D: Deserializer<'de> {
    let s: &str = Deserialize::deserialize(deserializer)?;
    OffsetDateTime::parse(s, &Rfc3339).map_err(D::Error::custom)
}

/// The same encoding for optional fields.
pub mod option {
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::format_description::well_known::Rfc3339;
    use time::OffsetDateTime;

    pub fn serialize<S>(instant: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        match instant {
            Some(instant) => {
                let formatted = super::format(*instant).map_err(S::Error::custom)?;
                serializer.serialize_some(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where D: Deserializer<'de> {
        let o: Option<String> = Deserialize::deserialize(deserializer)?;

        o.map(|s| OffsetDateTime::parse(&s, &Rfc3339).map_err(D::Error::custom))
            .transpose()
    }
}
