//! Transport modes (`Line/Meta/Modes`, `StopPoint/Meta/Modes`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A transport mode such as `tube`, `bus` or `river-bus`.
///
/// All four fields are always present in TfL responses and are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    /// Whether TfL runs the service.
    pub is_tfl_service: bool,

    /// Whether passengers pay a fare.
    pub is_fare_paying: bool,

    /// Whether the mode runs to a timetable.
    pub is_scheduled_service: bool,

    /// Mode identifier, used as the `{mode}` argument of other endpoints.
    pub mode_name: String,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}
