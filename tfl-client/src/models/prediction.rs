//! Arrival predictions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// A predicted arrival of a vehicle at a stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Prediction id. TfL sends a numeric string.
    pub id: String,

    /// 1 = insert, 2 = update.
    pub operation_type: i32,

    pub vehicle_id: String,
    pub naptan_id: String,
    pub station_name: String,
    pub line_id: String,
    pub line_name: String,
    pub platform_name: Option<String>,
    pub direction: Option<String>,
    pub bearing: Option<String>,
    pub destination_naptan_id: Option<String>,
    pub destination_name: Option<String>,

    #[serde(deserialize_with = "timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,

    /// Seconds until the vehicle reaches the stop.
    pub time_to_station: i64,

    pub current_location: Option<String>,
    pub towards: Option<String>,

    #[serde(deserialize_with = "timestamp::deserialize")]
    pub expected_arrival: DateTime<Utc>,

    /// When this prediction should be discarded.
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub time_to_live: DateTime<Utc>,

    pub mode_name: String,
    pub timing: Option<PredictionTiming>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

/// Pipeline timestamps for a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionTiming {
    pub countdown_server_adjustment: String,

    #[serde(deserialize_with = "timestamp::deserialize")]
    pub source: DateTime<Utc>,

    #[serde(deserialize_with = "timestamp::deserialize")]
    pub insert: DateTime<Utc>,

    #[serde(deserialize_with = "timestamp::deserialize")]
    pub read: DateTime<Utc>,

    #[serde(deserialize_with = "timestamp::deserialize")]
    pub sent: DateTime<Utc>,

    #[serde(deserialize_with = "timestamp::deserialize")]
    pub received: DateTime<Utc>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_tube_prediction() {
        let json = r#"{
            "$type": "Tfl.Api.Presentation.Entities.Prediction, Tfl.Api.Presentation.Entities",
            "id": "-1519378339",
            "operationType": 1,
            "vehicleId": "207",
            "naptanId": "940GZZLUGPK",
            "stationName": "Green Park Underground Station",
            "lineId": "victoria",
            "lineName": "Victoria",
            "platformName": "Northbound - Platform 4",
            "direction": "outbound",
            "bearing": "",
            "destinationNaptanId": "940GZZLUWWL",
            "destinationName": "Walthamstow Central Underground Station",
            "timestamp": "2024-07-12T13:09:06.2471296Z",
            "timeToStation": 1004,
            "currentLocation": "Between Stockwell and Vauxhall",
            "towards": "Walthamstow Central",
            "expectedArrival": "2024-07-12T13:25:50Z",
            "timeToLive": "2024-07-12T13:25:50Z",
            "modeName": "tube",
            "timing": {
                "$type": "Tfl.Api.Presentation.Entities.PredictionTiming, Tfl.Api.Presentation.Entities",
                "countdownServerAdjustment": "00:00:00",
                "source": "0001-01-01T00:00:00",
                "insert": "0001-01-01T00:00:00",
                "read": "2024-07-12T13:08:59.871Z",
                "sent": "2024-07-12T13:09:06Z",
                "received": "0001-01-01T00:00:00"
            }
        }"#;

        let prediction: Prediction = serde_json::from_str(json).unwrap();

        assert_eq!(prediction.id, "-1519378339");
        assert_eq!(prediction.vehicle_id, "207");
        assert_eq!(prediction.time_to_station, 1004);
        assert_eq!(prediction.bearing.as_deref(), Some(""));
        assert!(prediction.expected_arrival > prediction.timestamp);
        assert_eq!(prediction.timing.unwrap().countdown_server_adjustment, "00:00:00");
    }

    #[test]
    fn invalid_timestamp_rejected() {
        let json = r#"{
            "id": "1", "operationType": 1, "vehicleId": "1", "naptanId": "n",
            "stationName": "s", "lineId": "l", "lineName": "L",
            "timestamp": "whenever", "timeToStation": 0,
            "expectedArrival": "2024-07-12T13:25:50Z", "timeToLive": "2024-07-12T13:25:50Z",
            "modeName": "bus"
        }"#;
        assert!(serde_json::from_str::<Prediction>(json).is_err());
    }
}
