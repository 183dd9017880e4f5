//! Stop points: stations, platforms, bus stops and piers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::line::Line;
use super::{null_as_empty, timestamp};

/// A stop point.
///
/// Stop points nest: a station has child stop points for its entrances and
/// platforms, and each line listed at a stop may in turn carry disruptions
/// that list affected stops. The cycle is broken by `Vec` indirection.
///
/// Only the identifiers, `common_name` and the coordinates are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPoint {
    pub naptan_id: String,
    pub platform_name: Option<String>,
    pub indicator: Option<String>,
    pub stop_letter: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub modes: Vec<String>,

    pub ics_code: Option<String>,
    pub sms_code: Option<String>,
    pub stop_type: Option<String>,
    pub station_naptan: Option<String>,
    pub accessibility_summary: Option<String>,
    pub hub_naptan_code: Option<String>,

    /// Lines serving this stop.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lines: Vec<Line>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub line_group: Vec<LineGroup>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub line_mode_groups: Vec<LineModeGroup>,

    pub full_name: Option<String>,
    pub naptan_mode: Option<String>,
    pub status: Option<bool>,
    pub id: String,
    pub url: Option<String>,
    pub common_name: String,

    /// Distance from a search point; zero outside radius searches.
    pub distance: Option<f64>,

    pub place_type: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub additional_properties: Vec<AdditionalProperties>,

    /// Child stop points. `None` when the server did not expand children.
    pub children: Option<Vec<StopPoint>>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub children_urls: Vec<String>,

    pub lat: f64,
    pub lon: f64,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

/// A page of stop points, as returned by `StopPoint/Mode/{mode}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPointsResponse {
    /// `None` when the server omitted the list.
    pub stop_points: Option<Vec<StopPoint>>,
    pub page_size: i64,
    pub total: i64,
    pub page: i64,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineGroup {
    pub naptan_id_reference: Option<String>,

    /// ATCO code of the station. Older payloads misspell the key.
    #[serde(alias = "stationActoCode")]
    pub station_atco_code: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub line_identifier: Vec<String>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineModeGroup {
    pub mode_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub line_identifier: Vec<String>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

/// Key/value facts about a stop, e.g. facilities or address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalProperties {
    pub category: String,
    pub key: String,
    pub source_system_key: String,
    pub value: String,

    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub modified: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}
