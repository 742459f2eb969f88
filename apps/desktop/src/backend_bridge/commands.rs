//! Backend commands queued from the session to the backend worker.

use shared::domain::{EndpointField, RouteRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    Geocode {
        field: EndpointField,
        generation: u64,
        address: String,
    },
    ComputeRoute {
        generation: u64,
        request: RouteRequest,
    },
    ProbeHealth,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Geocode { .. } => "geocode",
            Self::ComputeRoute { .. } => "compute_route",
            Self::ProbeHealth => "probe_health",
        }
    }
}
