//! Lines, their statuses and routes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::disruption::Disruption;
use super::{null_as_empty, timestamp};

/// A line: a tube line, a bus route, a river service and so on.
///
/// The same shape comes back from the line lookup, status and route
/// endpoints; each fills in a different subset. Only `id` and `name` are
/// always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Line identifier, e.g. `victoria` or `55`.
    pub id: String,

    /// Display name, e.g. `Victoria`.
    pub name: String,

    pub mode_name: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub disruptions: Vec<Disruption>,

    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub modified: Option<DateTime<Utc>>,

    /// Current statuses; filled by the status endpoints.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub line_statuses: Vec<LineStatus>,

    /// Route sections; filled by the route endpoints.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub route_sections: Vec<RouteSection>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub service_types: Vec<ServiceType>,

    pub crowding: Option<Crowding>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

/// Status of a line over a period, e.g. "Good Service" or "Part Closure".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStatus {
    pub id: i64,

    pub line_id: Option<String>,

    /// Severity code; 10 is good service, lower is worse.
    pub status_severity: i32,

    pub status_severity_description: String,

    /// Free-text explanation; absent for good service.
    pub reason: Option<String>,

    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub last_update: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub validity_periods: Vec<ValidityPeriod>,

    /// The disruption causing this status, if any.
    pub disruption: Option<Disruption>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

/// A period during which a status applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityPeriod {
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub from_date: DateTime<Utc>,

    #[serde(deserialize_with = "timestamp::deserialize")]
    pub to_date: DateTime<Utc>,

    pub is_now: bool,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

/// One origin-to-destination section of a line's route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSection {
    pub route_code: Option<String>,

    pub name: String,

    /// `inbound` or `outbound`.
    pub direction: String,

    pub origination_name: Option<String>,

    pub destination_name: Option<String>,

    /// Naptan id of the first stop.
    pub originator: Option<String>,

    /// Naptan id of the last stop.
    pub destination: Option<String>,

    pub service_type: Option<String>,

    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub valid_to: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub valid_from: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

/// A service pattern, `Regular` or `Night`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceType {
    pub name: String,
    pub uri: String,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

/// Crowding data. TfL usually sends this as an empty object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crowding {
    #[serde(default, alias = "passengerFlow", deserialize_with = "null_as_empty")]
    pub passenger_flows: Vec<PassengerFlow>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub train_loadings: Vec<TrainLoading>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerFlow {
    pub time_slice: String,
    pub value: i64,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainLoading {
    pub line: String,
    pub line_direction: String,
    pub platform_direction: String,
    pub direction: String,
    pub naptan_to: String,
    pub time_slice: String,
    pub value: i64,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_minimal_line() {
        let line: Line = serde_json::from_str(r#"{"id": "victoria", "name": "Victoria"}"#).unwrap();

        assert_eq!(line.id, "victoria");
        assert_eq!(line.name, "Victoria");
        assert!(line.mode_name.is_none());
        assert!(line.disruptions.is_empty());
        assert!(line.line_statuses.is_empty());
        assert!(line.crowding.is_none());
    }

    #[test]
    fn deserialize_line_status_response() {
        let json = r#"{
            "$type": "Tfl.Api.Presentation.Entities.Line, Tfl.Api.Presentation.Entities",
            "id": "victoria",
            "name": "Victoria",
            "modeName": "tube",
            "disruptions": [],
            "created": "2024-07-09T15:57:00.51Z",
            "modified": "2024-07-09T15:57:00.51Z",
            "lineStatuses": [
                {
                    "id": 0,
                    "lineId": "victoria",
                    "statusSeverity": 9,
                    "statusSeverityDescription": "Minor Delays",
                    "reason": "Minor delays due to an earlier signal failure.",
                    "created": "0001-01-01T00:00:00",
                    "validityPeriods": [
                        {
                            "fromDate": "2024-07-12T08:01:41Z",
                            "toDate": "2024-07-13T00:29:00Z",
                            "isNow": true
                        }
                    ],
                    "disruption": {
                        "category": "RealTime",
                        "categoryDescription": "RealTime",
                        "description": "Minor delays due to an earlier signal failure.",
                        "affectedRoutes": [],
                        "affectedStops": [],
                        "closureText": "minorDelays"
                    }
                }
            ],
            "routeSections": null,
            "serviceTypes": [
                {"name": "Regular", "uri": "/Line/Route?ids=Victoria&serviceTypes=Regular"},
                {"name": "Night", "uri": "/Line/Route?ids=Victoria&serviceTypes=Night"}
            ],
            "crowding": {"$type": "Tfl.Api.Presentation.Entities.Crowding, Tfl.Api.Presentation.Entities"}
        }"#;

        let line: Line = serde_json::from_str(json).unwrap();

        assert_eq!(line.mode_name.as_deref(), Some("tube"));
        assert!(line.route_sections.is_empty());
        assert_eq!(line.service_types.len(), 2);
        assert_eq!(line.service_types[1].name, "Night");

        let status = &line.line_statuses[0];
        assert_eq!(status.status_severity, 9);
        assert_eq!(status.validity_periods.len(), 1);
        assert!(status.validity_periods[0].is_now);
        let disruption = status.disruption.as_ref().unwrap();
        assert_eq!(disruption.closure_text.as_deref(), Some("minorDelays"));

        let crowding = line.crowding.unwrap();
        assert!(crowding.passenger_flows.is_empty());
        assert!(crowding.train_loadings.is_empty());
    }

    #[test]
    fn deserialize_route_section() {
        let json = r#"{
            "name": "Brixton Underground Station - Walthamstow Central Underground Station",
            "direction": "inbound",
            "originationName": "Brixton Underground Station",
            "destinationName": "Walthamstow Central Underground Station",
            "originator": "940GZZLUBXN",
            "destination": "940GZZLUWWL",
            "serviceType": "Regular",
            "validTo": "2024-12-31T00:00:00Z",
            "validFrom": "2024-07-12T00:00:00Z"
        }"#;

        let section: RouteSection = serde_json::from_str(json).unwrap();

        assert_eq!(section.direction, "inbound");
        assert_eq!(section.originator.as_deref(), Some("940GZZLUBXN"));
        assert!(section.route_code.is_none());
        assert!(section.valid_to.is_some());
    }

    #[test]
    fn crowding_accepts_singular_passenger_flow() {
        let json = r#"{"passengerFlow": [{"timeSlice": "0800-0815", "value": 42}]}"#;
        let crowding: Crowding = serde_json::from_str(json).unwrap();
        assert_eq!(crowding.passenger_flows[0].value, 42);
    }

    #[test]
    fn validity_period_requires_dates() {
        assert!(serde_json::from_str::<ValidityPeriod>(r#"{"isNow": true}"#).is_err());
    }
}
