//! Cache expiry derivation for API responses.
//!
//! TfL responses carry a `Cache-Control` header with two directives we care
//! about:
//! - `s-maxage` - how long the resource may sit in a shared cache
//! - `max-age` - how long any cache may keep it
//!
//! Each is combined with the response `Date` header to produce an absolute
//! timestamp. The two are computed independently: a missing `max-age` never
//! suppresses a present `s-maxage`, and vice versa.
//!
//! Nothing here stores or enforces expiry. The timestamps are only reported
//! on the records built from the response.

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::header::{CACHE_CONTROL, DATE, HeaderMap};

/// The two numeric `Cache-Control` directives, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheDirectives {
    /// `s-maxage`, if present and numeric.
    pub s_maxage: Option<i64>,
    /// `max-age`, if present and numeric.
    pub max_age: Option<i64>,
}

/// Absolute expiry timestamps for a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expiry {
    /// When the resource-specific entry expires (`Date` + `s-maxage`).
    pub content_expires: Option<DateTime<Utc>>,
    /// When the general cache entry expires (`Date` + `max-age`).
    pub shared_expires: Option<DateTime<Utc>>,
}

impl Expiry {
    /// No expiry known.
    pub const fn none() -> Self {
        Self {
            content_expires: None,
            shared_expires: None,
        }
    }
}

/// Parse the `s-maxage` and `max-age` directives from a response's headers.
///
/// The header value is split on whitespace and commas. Tokens of the form
/// `key=value` are split on the first `=`. A directive whose value is empty
/// or not an integer is reported as absent without affecting the other one.
///
/// # Examples
///
/// ```
/// use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue};
/// use tfl_client::expiry::parse_cache_directives;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(
///     CACHE_CONTROL,
///     HeaderValue::from_static("public, must-revalidate, max-age=43200, s-maxage=86400"),
/// );
///
/// let directives = parse_cache_directives(&headers);
/// assert_eq!(directives.s_maxage, Some(86400));
/// assert_eq!(directives.max_age, Some(43200));
/// ```
pub fn parse_cache_directives(headers: &HeaderMap) -> CacheDirectives {
    let Some(value) = headers.get(CACHE_CONTROL).and_then(|v| v.to_str().ok()) else {
        return CacheDirectives::default();
    };

    let mut directives = CacheDirectives::default();

    for token in value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let Some((key, raw)) = token.split_once('=') else {
            continue;
        };

        // Later occurrences overwrite earlier ones.
        match key {
            "s-maxage" => directives.s_maxage = parse_seconds(raw),
            "max-age" => directives.max_age = parse_seconds(raw),
            _ => {}
        }
    }

    directives
}

/// Parse a directive value as whole seconds. Quoted values are unquoted.
fn parse_seconds(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let raw = raw
        .strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .unwrap_or(raw);

    if raw.is_empty() {
        return None;
    }

    raw.parse().ok()
}

/// Offset `base_time` by `seconds`.
///
/// Returns `None` if either input is absent or the result is out of range.
/// Zero returns `base_time` unchanged; negative values move backward, which
/// describes a resource that has already expired.
pub fn compute_absolute_expiry(
    seconds: Option<i64>,
    base_time: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    let delta = TimeDelta::try_seconds(seconds?)?;
    base_time?.checked_add_signed(delta)
}

/// Parse an HTTP date (RFC 5322 / RFC 2822 format) into UTC.
///
/// ```
/// use tfl_client::expiry::parse_http_date;
///
/// let date = parse_http_date("Tue, 15 Nov 1994 12:45:26 GMT").unwrap();
/// assert_eq!(date.to_rfc3339(), "1994-11-15T12:45:26+00:00");
/// assert!(parse_http_date("yesterday").is_none());
/// ```
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Read the `Date` header as an absolute timestamp.
pub fn response_date(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    headers
        .get(DATE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_http_date)
}

/// Derive both expiry timestamps for a response.
pub fn get_result_expiry(headers: &HeaderMap) -> Expiry {
    let base = response_date(headers);
    let directives = parse_cache_directives(headers);

    Expiry {
        content_expires: compute_absolute_expiry(directives.s_maxage, base),
        shared_expires: compute_absolute_expiry(directives.max_age, base),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use reqwest::header::HeaderValue;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 12, 13, 0, 0).unwrap()
    }

    proptest! {
        /// The offset is exactly the number of seconds given.
        #[test]
        fn offset_is_exact(s in -10_000_000i64..10_000_000) {
            let expiry = compute_absolute_expiry(Some(s), Some(base())).unwrap();
            prop_assert_eq!((expiry - base()).num_seconds(), s);
        }

        /// Any pair of integer directives survives parsing, in either order.
        #[test]
        fn directives_roundtrip(max_age in any::<i64>(), s_maxage in any::<i64>(), swap in any::<bool>()) {
            let value = if swap {
                format!("public, s-maxage={s_maxage}, max-age={max_age}")
            } else {
                format!("public, max-age={max_age}, s-maxage={s_maxage}")
            };
            let mut headers = HeaderMap::new();
            headers.insert(CACHE_CONTROL, HeaderValue::from_str(&value).unwrap());

            let parsed = parse_cache_directives(&headers);
            prop_assert_eq!(parsed.max_age, Some(max_age));
            prop_assert_eq!(parsed.s_maxage, Some(s_maxage));
        }

        /// A garbage max-age never disturbs s-maxage.
        #[test]
        fn garbage_is_isolated(junk in "[a-z]{1,8}", s_maxage in any::<i64>()) {
            let value = format!("max-age={junk}, s-maxage={s_maxage}");
            let mut headers = HeaderMap::new();
            headers.insert(CACHE_CONTROL, HeaderValue::from_str(&value).unwrap());

            let parsed = parse_cache_directives(&headers);
            prop_assert_eq!(parsed.max_age, None);
            prop_assert_eq!(parsed.s_maxage, Some(s_maxage));
        }
    }
}
