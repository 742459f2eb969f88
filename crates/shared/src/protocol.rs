//! Wire formats of the routing backend and the geocoding service.

use serde::{Deserialize, Serialize};

use crate::domain::RouteRequest;

pub const GENERIC_ROUTE_FAILURE: &str = "Failed to calculate route";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequestBody {
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
    pub lambda: f64,
}

impl From<&RouteRequest> for RouteRequestBody {
    fn from(request: &RouteRequest) -> Self {
        Self {
            start_lat: request.start.lat,
            start_lon: request.start.lng,
            end_lat: request.end.lat,
            end_lon: request.end.lng,
            lambda: request.risk_tolerance,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl RouteErrorBody {
    /// Error text of a failed route response, falling back to the generic message
    /// when the body is empty, not JSON, or carries no usable `error` field.
    pub fn message_from(body: &str) -> String {
        serde_json::from_str::<RouteErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| GENERIC_ROUTE_FAILURE.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// One candidate of a Nominatim-style `/search?format=json` answer.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeCandidate {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}
