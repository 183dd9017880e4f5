//! The typed TfL client.
//!
//! Every operation follows the same steps:
//! 1. look up the endpoint and check it returns the record type asked for
//! 2. fill the path template and send the request
//! 3. a non-200 response becomes [`ApiResponse::Error`]
//! 4. otherwise derive the cache expiry, decode the body and build records

use tracing::{debug, trace, warn};

use crate::expiry::get_result_expiry;
use crate::models::{
    AnyRecord, ApiError, Disruption, Line, Mode, Prediction, Record, RecordCatalogue,
    RouteSequence, StopPoint, StopPointsResponse,
};

use super::config::ClientConfig;
use super::endpoints::{Direction, Endpoint};
use super::error::{ClientError, ConfigurationError};
use super::materialize::{Materialized, materialize, materialize_error};
use super::transport::{HttpTransport, Transport};

/// Result of an operation that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<R> {
    /// The body was a single object.
    Single(R),
    /// The body was an array (possibly empty).
    Many(Vec<R>),
    /// The server answered with a non-200 status.
    Error(ApiError),
}

impl<R> ApiResponse<R> {
    pub fn is_error(&self) -> bool {
        matches!(self, ApiResponse::Error(_))
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            ApiResponse::Error(e) => Some(e),
            _ => None,
        }
    }

    /// The records, whether one or many. Empty for an error.
    pub fn records(&self) -> &[R] {
        match self {
            ApiResponse::Single(r) => std::slice::from_ref(r),
            ApiResponse::Many(rs) => rs,
            ApiResponse::Error(_) => &[],
        }
    }

    /// All records, or the server's error.
    pub fn into_records(self) -> Result<Vec<R>, ApiError> {
        match self {
            ApiResponse::Single(r) => Ok(vec![r]),
            ApiResponse::Many(rs) => Ok(rs),
            ApiResponse::Error(e) => Err(e),
        }
    }
}

/// TfL unified API client.
///
/// Holds only immutable state, so it can be shared across threads when its
/// transport can.
#[derive(Debug)]
pub struct TflClient<T = HttpTransport> {
    transport: T,
    catalogue: RecordCatalogue,
}

impl TflClient<HttpTransport> {
    /// Create a client talking to the real API.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::with_transport(HttpTransport::new(&config)?))
    }
}

impl<T: Transport> TflClient<T> {
    /// Create a client over any transport, with the standard catalogue.
    pub fn with_transport(transport: T) -> Self {
        Self::with_catalogue(transport, RecordCatalogue::standard())
    }

    pub fn with_catalogue(transport: T, catalogue: RecordCatalogue) -> Self {
        Self {
            transport,
            catalogue,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn catalogue(&self) -> &RecordCatalogue {
        &self.catalogue
    }

    /// Call `endpoint` and build `R` records from the response.
    pub fn call<R: Record>(
        &self,
        endpoint: Endpoint,
        args: &[&str],
        params: &[(&str, Option<String>)],
    ) -> Result<ApiResponse<R>, ClientError> {
        let descriptor = endpoint.descriptor();
        if descriptor.model != R::NAME {
            return Err(ConfigurationError::ModelMismatch {
                expected: R::NAME,
                found: descriptor.model,
            }
            .into());
        }

        let path = endpoint.url(args)?;
        debug!(endpoint = descriptor.name, path = %path, "calling endpoint");

        let response = self.transport.send_request(&path, params)?;

        if !response.is_ok() {
            warn!(
                endpoint = descriptor.name,
                status = response.status,
                "request failed"
            );
            return materialize_error(&self.catalogue, &response).map(ApiResponse::Error);
        }

        let expiry = get_result_expiry(&response.headers);
        let body = response
            .json()
            .map_err(|e| ClientError::validation(descriptor.model, e, Some(&response.text())))?;

        let materialized = materialize(&self.catalogue, descriptor.model, body, expiry)
            .map_err(|e| e.with_body(&response.text()))?;

        trace!(
            endpoint = descriptor.name,
            records = materialized.len(),
            "materialized response"
        );

        narrow(materialized)
    }

    /// Stop points served by a line.
    pub fn get_stop_points_by_line_id(
        &self,
        line_id: &str,
    ) -> Result<ApiResponse<StopPoint>, ClientError> {
        self.call(Endpoint::StopPointsByLineId, &[line_id], &[])
    }

    /// Transport modes known to the line endpoints.
    pub fn get_line_meta_modes(&self) -> Result<ApiResponse<Mode>, ClientError> {
        self.call(Endpoint::LineMetaModes, &[], &[])
    }

    /// Lines by id, or else by mode.
    ///
    /// At least one selector is required; when both are given `line_id`
    /// wins. Fails with [`ClientError::InvalidArgument`] before any request
    /// when neither is given.
    pub fn get_lines(
        &self,
        line_id: Option<&str>,
        mode: Option<&str>,
    ) -> Result<ApiResponse<Line>, ClientError> {
        match (line_id, mode) {
            (Some(line_id), _) => self.call(Endpoint::LinesByLineId, &[line_id], &[]),
            (None, Some(mode)) => self.call(Endpoint::LinesByMode, &[mode], &[]),
            (None, None) => Err(ClientError::InvalidArgument(
                "either line_id or mode must be specified".to_string(),
            )),
        }
    }

    /// Current status of a line. `include_details` adds disruption details.
    pub fn get_line_status(
        &self,
        line: &str,
        include_details: Option<bool>,
    ) -> Result<ApiResponse<Line>, ClientError> {
        self.call(
            Endpoint::LineStatus,
            &[line],
            &[("detail", include_details.map(|d| d.to_string()))],
        )
    }

    /// Lines currently at the given severity level.
    pub fn get_line_status_severity(
        &self,
        severity: i32,
    ) -> Result<ApiResponse<Line>, ClientError> {
        self.call(Endpoint::LineStatusBySeverity, &[&severity.to_string()], &[])
    }

    pub fn get_line_status_by_mode(&self, mode: &str) -> Result<ApiResponse<Line>, ClientError> {
        self.call(Endpoint::LineStatusByMode, &[mode], &[])
    }

    pub fn get_route_by_line_id(&self, line_id: &str) -> Result<ApiResponse<Line>, ClientError> {
        self.call(Endpoint::RouteByLineId, &[line_id], &[])
    }

    pub fn get_route_by_mode(&self, mode: &str) -> Result<ApiResponse<Line>, ClientError> {
        self.call(Endpoint::RouteByMode, &[mode], &[])
    }

    /// Ordered stops of a line in one direction.
    pub fn get_route_by_line_id_with_direction(
        &self,
        line_id: &str,
        direction: Direction,
    ) -> Result<ApiResponse<RouteSequence>, ClientError> {
        self.call(
            Endpoint::RouteByLineIdWithDirection,
            &[line_id, direction.as_str()],
            &[],
        )
    }

    pub fn get_line_disruptions_by_line_id(
        &self,
        line_id: &str,
    ) -> Result<ApiResponse<Disruption>, ClientError> {
        self.call(Endpoint::LineDisruptionsByLineId, &[line_id], &[])
    }

    pub fn get_line_disruptions_by_mode(
        &self,
        mode: &str,
    ) -> Result<ApiResponse<Disruption>, ClientError> {
        self.call(Endpoint::LineDisruptionsByMode, &[mode], &[])
    }

    /// A stop point by naptan id (or comma-separated ids).
    pub fn get_stop_points_by_id(&self, id: &str) -> Result<ApiResponse<StopPoint>, ClientError> {
        self.call(Endpoint::StopPointById, &[id], &[])
    }

    /// All stop points for a mode, as a single paged response.
    pub fn get_stop_points_by_mode(
        &self,
        mode: &str,
    ) -> Result<ApiResponse<StopPointsResponse>, ClientError> {
        self.call(Endpoint::StopPointByMode, &[mode], &[])
    }

    /// Transport modes known to the stop point endpoints.
    pub fn get_stop_point_meta_modes(&self) -> Result<ApiResponse<Mode>, ClientError> {
        self.call(Endpoint::StopPointMetaModes, &[], &[])
    }

    /// Arrival predictions for every stop on a line.
    pub fn get_arrivals_by_line_id(
        &self,
        line_id: &str,
    ) -> Result<ApiResponse<Prediction>, ClientError> {
        self.call(Endpoint::ArrivalsByLineId, &[line_id], &[])
    }
}

fn narrow<R: Record>(materialized: Materialized) -> Result<ApiResponse<R>, ClientError> {
    let cast = |record: AnyRecord| {
        R::try_from(record).map_err(|other| {
            ClientError::from(ConfigurationError::ModelMismatch {
                expected: R::NAME,
                found: other.name(),
            })
        })
    };

    match materialized {
        Materialized::Single(record) => cast(record).map(ApiResponse::Single),
        Materialized::Many(records) => records
            .into_iter()
            .map(cast)
            .collect::<Result<Vec<_>, _>>()
            .map(ApiResponse::Many),
    }
}
