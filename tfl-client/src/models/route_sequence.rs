//! Ordered route sequences (`Line/{id}/Route/Sequence/{direction}`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::line::Crowding;
use super::null_as_empty;

/// The ordered stops of a line in one direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSequence {
    pub line_id: String,
    pub line_name: String,
    pub direction: String,
    pub is_outbound_only: bool,
    pub mode: String,

    /// GeoJSON-style coordinate strings, one per branch.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub line_strings: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub stations: Vec<MatchedStop>,

    pub service_type: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub ordered_line_routes: Vec<OrderedRoute>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

/// A station on a route sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedStop {
    pub station_id: Option<String>,
    pub ics_id: Option<String>,
    pub top_most_parent_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub modes: Vec<String>,

    pub stop_type: String,
    pub zone: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub lines: Vec<Identifier>,

    pub status: bool,
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

/// One branch of a route, as an ordered list of naptan ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedRoute {
    pub name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub naptan_ids: Vec<String>,

    pub service_type: String,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

/// A lightweight reference to a line (or other entity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub full_name: Option<String>,

    #[serde(rename = "type")]
    pub identifier_type: String,

    pub crowding: Option<Crowding>,
    pub route_type: Option<String>,
    pub status: Option<String>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_route_sequence() {
        let json = r#"{
            "$type": "Tfl.Api.Presentation.Entities.RouteSequence, Tfl.Api.Presentation.Entities",
            "lineId": "northern",
            "lineName": "Northern",
            "direction": "inbound",
            "isOutboundOnly": false,
            "mode": "tube",
            "lineStrings": ["[[[-0.194298,51.650541],[-0.179486,51.630597]]]"],
            "stations": [
                {
                    "stationId": "940GZZLUHBT",
                    "icsId": "1000107",
                    "topMostParentId": "940GZZLUHBT",
                    "modes": ["tube"],
                    "stopType": "NaptanMetroStation",
                    "zone": "5",
                    "lines": [
                        {
                            "id": "northern",
                            "name": "Northern",
                            "uri": "/Line/northern",
                            "type": "Line",
                            "crowding": {},
                            "routeType": "Unknown",
                            "status": "Unknown"
                        }
                    ],
                    "status": true,
                    "id": "940GZZLUHBT",
                    "name": "High Barnet Underground Station",
                    "lat": 51.650541,
                    "lon": -0.194298
                }
            ],
            "orderedLineRoutes": [
                {"name": "High Barnet  - Morden ", "naptanIds": ["940GZZLUHBT", "940GZZLUMDN"], "serviceType": "Regular"}
            ]
        }"#;

        let sequence: RouteSequence = serde_json::from_str(json).unwrap();

        assert_eq!(sequence.line_id, "northern");
        assert!(!sequence.is_outbound_only);
        assert!(sequence.service_type.is_none());

        let station = &sequence.stations[0];
        assert_eq!(station.zone.as_deref(), Some("5"));
        assert_eq!(station.lines[0].identifier_type, "Line");
        assert_eq!(station.lines[0].status.as_deref(), Some("Unknown"));

        assert_eq!(sequence.ordered_line_routes[0].naptan_ids.len(), 2);
    }

    #[test]
    fn matched_stop_lines_default_empty() {
        let json = r#"{"stopType": "NaptanMetroStation", "status": true, "id": "x", "name": "X", "lat": 0.0, "lon": 0.0}"#;
        let stop: MatchedStop = serde_json::from_str(json).unwrap();
        assert!(stop.lines.is_empty());
        assert!(stop.modes.is_empty());
    }
}
