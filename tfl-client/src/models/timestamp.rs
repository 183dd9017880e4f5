//! Lenient timestamp deserialization.
//!
//! TfL is not consistent about timestamp formats. Most fields are RFC 3339
//! (`2024-07-12T03:30:00Z`), some omit the offset entirely
//! (`2024-07-12T03:30:00`), and error bodies may carry an HTTP date.
//! Offset-less values are taken to be UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Parse a timestamp in any of the accepted formats.
pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Deserialize a required timestamp.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
}

/// Deserialize an optional timestamp; `null` and a missing field are `None`.
///
/// Use together with `#[serde(default)]`.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    use super::parse;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn expected() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 12, 3, 30, 0).unwrap()
    }

    #[test]
    fn parses_rfc3339() {
        assert_eq!(parse("2024-07-12T03:30:00Z"), Some(expected()));
        assert_eq!(parse("2024-07-12T04:30:00+01:00"), Some(expected()));
    }

    #[test]
    fn parses_naive_as_utc() {
        assert_eq!(parse("2024-07-12T03:30:00"), Some(expected()));
        assert!(parse("2024-07-12T03:30:00.123").is_some());
    }

    #[test]
    fn parses_http_date() {
        assert_eq!(parse("Fri, 12 Jul 2024 03:30:00 GMT"), Some(expected()));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse("soon"), None);
        assert_eq!(parse(""), None);
    }

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "option::deserialize")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn optional_field_handles_null_and_missing() {
        let missing: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.at, None);

        let null: Probe = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert_eq!(null.at, None);

        let set: Probe = serde_json::from_str(r#"{"at": "2024-07-12T03:30:00Z"}"#).unwrap();
        assert_eq!(set.at, Some(expected()));

        assert!(serde_json::from_str::<Probe>(r#"{"at": "later"}"#).is_err());
    }
}
