//! Record types returned by the TfL unified API.
//!
//! Every type maps directly to a TfL JSON schema. Rust fields are snake_case;
//! on the wire they are the server's camelCase names. Unknown fields are
//! ignored, so new server fields never break deserialization.
//!
//! Field defaults are chosen per field, because TfL is inconsistent about
//! omitting a field, sending `null`, or sending an empty list:
//! - identifiers and names are required
//! - collections the server omits (or nulls) become empty
//! - scalars the server omits or nulls are `Option`
//!
//! Every catalogue type also carries `content_expires` and `shared_expires`.
//! These never come from the server; they are stamped once when a record is
//! built from a response and are readable through [`Record`].

mod api_error;
mod disruption;
mod line;
mod mode;
mod prediction;
mod route_sequence;
mod stop_point;
pub mod timestamp;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::expiry::Expiry;

pub use api_error::ApiError;
pub use disruption::{AffectedRoute, Disruption, RouteSectionNaptanEntrySequence};
pub use line::{
    Crowding, Line, LineStatus, PassengerFlow, RouteSection, ServiceType, TrainLoading,
    ValidityPeriod,
};
pub use mode::Mode;
pub use prediction::{Prediction, PredictionTiming};
pub use route_sequence::{Identifier, MatchedStop, OrderedRoute, RouteSequence};
pub use stop_point::{AdditionalProperties, LineGroup, LineModeGroup, StopPoint, StopPointsResponse};

/// A typed record the client can build from a response body.
pub trait Record:
    DeserializeOwned + Serialize + Into<AnyRecord> + TryFrom<AnyRecord, Error = AnyRecord>
{
    /// Catalogue name, as used by endpoint descriptors.
    const NAME: &'static str;

    /// When the resource-specific cache entry expires (`s-maxage`).
    fn content_expires(&self) -> Option<DateTime<Utc>>;

    /// When the general cache entry expires (`max-age`).
    fn shared_expires(&self) -> Option<DateTime<Utc>>;

    /// Serialize to JSON using the server's field names.
    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Builds one record from a JSON value.
pub type Constructor = fn(Value) -> Result<AnyRecord, serde_json::Error>;

fn construct<R: Record>(value: Value) -> Result<AnyRecord, serde_json::Error> {
    serde_json::from_value::<R>(value).map(Into::into)
}

/// Lookup from record-type name to its constructor.
///
/// Built once when a client is created and never modified afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordCatalogue {
    constructors: HashMap<&'static str, Constructor>,
}

impl RecordCatalogue {
    /// A catalogue with nothing registered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a record type under its [`Record::NAME`].
    pub fn register<R: Record>(&mut self) {
        self.constructors.insert(R::NAME, construct::<R>);
    }

    /// Constructor for the named record type.
    pub fn constructor(&self, name: &str) -> Option<Constructor> {
        self.constructors.get(name).copied()
    }

    /// Whether the named record type is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Number of registered record types.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Whether the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }
}

macro_rules! record_catalogue {
    ($($record:ident),+ $(,)?) => {
        /// A record of any catalogue type.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum AnyRecord {
            $($record($record),)+
        }

        impl AnyRecord {
            /// Catalogue name of the contained record.
            pub fn name(&self) -> &'static str {
                match self {
                    $(AnyRecord::$record(_) => <$record as Record>::NAME,)+
                }
            }

            /// Set both expiry fields. Only the materializer calls this.
            pub(crate) fn stamp(&mut self, expiry: Expiry) {
                match self {
                    $(AnyRecord::$record(r) => {
                        r.content_expires = expiry.content_expires;
                        r.shared_expires = expiry.shared_expires;
                    })+
                }
            }
        }

        $(
            impl Record for $record {
                const NAME: &'static str = stringify!($record);

                fn content_expires(&self) -> Option<DateTime<Utc>> {
                    self.content_expires
                }

                fn shared_expires(&self) -> Option<DateTime<Utc>> {
                    self.shared_expires
                }
            }

            impl From<$record> for AnyRecord {
                fn from(record: $record) -> Self {
                    AnyRecord::$record(record)
                }
            }

            impl TryFrom<AnyRecord> for $record {
                type Error = AnyRecord;

                fn try_from(record: AnyRecord) -> Result<Self, AnyRecord> {
                    match record {
                        AnyRecord::$record(r) => Ok(r),
                        other => Err(other),
                    }
                }
            }
        )+

        impl RecordCatalogue {
            /// Every record type the API can return.
            pub fn standard() -> Self {
                let mut catalogue = Self::empty();
                $(catalogue.register::<$record>();)+
                catalogue
            }
        }
    };
}

record_catalogue!(
    AdditionalProperties,
    AffectedRoute,
    ApiError,
    Crowding,
    Disruption,
    Identifier,
    Line,
    LineGroup,
    LineModeGroup,
    LineStatus,
    MatchedStop,
    Mode,
    OrderedRoute,
    PassengerFlow,
    Prediction,
    PredictionTiming,
    RouteSection,
    RouteSectionNaptanEntrySequence,
    RouteSequence,
    ServiceType,
    StopPoint,
    StopPointsResponse,
    TrainLoading,
    ValidityPeriod,
);

/// Deserialize a list where the server may send `null` instead of `[]`.
///
/// Use together with `#[serde(default)]` to also cover a missing field.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
