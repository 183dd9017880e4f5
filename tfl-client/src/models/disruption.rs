//! Disruptions and the routes and stops they affect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stop_point::StopPoint;
use super::{null_as_empty, timestamp};

/// A disruption on one or more lines.
///
/// Disruptions nested in a [`LineStatus`](super::LineStatus) omit `type`
/// and the timestamps, so those are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disruption {
    /// Broad category, e.g. `RealTime` or `PlannedWork`.
    pub category: String,

    /// Disruption type, e.g. `routeInfo` or `lineInfo`.
    #[serde(rename = "type")]
    pub disruption_type: Option<String>,

    pub category_description: String,

    pub description: String,

    pub summary: Option<String>,

    pub additional_info: Option<String>,

    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub last_update: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub affected_routes: Vec<AffectedRoute>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub affected_stops: Vec<StopPoint>,

    /// Short machine-friendly status, e.g. `minorDelays`.
    pub closure_text: Option<String>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

/// A route affected by a disruption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedRoute {
    pub id: String,
    pub line_id: String,
    pub route_code: Option<String>,
    pub name: String,
    pub line_string: Option<String>,
    pub direction: Option<String>,
    pub origination_name: Option<String>,
    pub destination_name: Option<String>,

    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub valid_to: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub valid_from: Option<DateTime<Utc>>,

    /// Stops along the route, in order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub route_section_naptan_entry_sequence: Vec<RouteSectionNaptanEntrySequence>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

/// One stop in an affected route's stop sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSectionNaptanEntrySequence {
    pub ordinal: i64,
    pub stop_point: StopPoint,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}
