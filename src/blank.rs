use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Returns `None` for the empty string, which counts as not supplied.
/// Whitespace is content.
///
/// ```
/// use callcenter::blank::non_empty;
/// assert_eq!(non_empty(""), None);
/// assert_eq!(non_empty("  "), Some("  "));
/// assert_eq!(non_empty(" 5551"), Some(" 5551"));
/// ```
pub fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Deserializes an optional text field without ever failing. Numbers keep
/// their decimal form; `null`, the empty string and values of any other
/// type are absent.
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => non_empty(&s).map(str::to_owned),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Deserializes an optional field through `FromStr` without ever failing.
/// Anything that is not a string, or does not parse, is absent.
pub fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde::Deserialize;

    use super::non_empty;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "super::deserialize_lenient")]
        value: Option<u16>,

        #[serde(default, deserialize_with = "super::deserialize_text")]
        text: Option<String>,
    }

    fn holder(raw: &str) -> Holder {
        serde_json::from_str(raw).expect("parse holder")
    }

    #[test]
    fn null_and_empty_are_absent() {
        for raw in &[r#"{}"#, r#"{"value": null, "text": null}"#, r#"{"value": "", "text": ""}"#] {
            let holder = holder(raw);
            assert_eq!(holder.value, None, "{}", raw);
            assert_eq!(holder.text, None, "{}", raw);
        }
    }

    #[test]
    fn unusable_values_are_absent() {
        for raw in &[
            r#"{"value": "many"}"#,
            r#"{"value": 7}"#,
            r#"{"value": true}"#,
            r#"{"value": [1]}"#,
            r#"{"value": {"nested": 1}}"#,
        ] {
            assert_eq!(holder(raw).value, None, "{}", raw);
        }

        assert_eq!(holder(r#"{"value": "7"}"#).value, Some(7));
    }

    #[test]
    fn numbers_become_text() {
        assert_eq!(holder(r#"{"text": 5551}"#).text.as_deref(), Some("5551"));
        assert_eq!(holder(r#"{"text": "5551"}"#).text.as_deref(), Some("5551"));
        assert_eq!(holder(r#"{"text": "  "}"#).text.as_deref(), Some("  "));
        assert_eq!(holder(r#"{"text": false}"#).text, None);
        assert_eq!(holder(r#"{"text": ["5551"]}"#).text, None);
    }

    proptest! {
        #[test]
        fn only_the_empty_string_is_dropped(s in ".*") {
            prop_assert_eq!(non_empty(&s).is_none(), s.is_empty());
        }

        #[test]
        fn any_integer_is_kept_as_text(n in any::<i64>()) {
            let holder: Holder = serde_json::from_str(&format!(r#"{{"text": {}}}"#, n)).unwrap();
            prop_assert_eq!(holder.text, Some(n.to_string()));
        }
    }
}
