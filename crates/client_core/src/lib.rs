use async_trait::async_trait;
use shared::{
    domain::{GeocodedPlace, RouteRequest, RouteResponse},
    error::{GeocodeError, RouteError},
};
use url::Url;

mod geocoding;
mod routing;

pub use geocoding::NominatimGeocoder;
pub use routing::RouteServiceClient;

pub const DEFAULT_USER_AGENT: &str = "TorontoSafetyRoutes/1.0";

/// Resolves free-text addresses to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Looks up `address` and returns the top-ranked candidate.
    ///
    /// A blank address issues no request and yields `Ok(None)`.
    async fn resolve(&self, address: &str) -> Result<Option<GeocodedPlace>, GeocodeError>;
}

/// Computes risk-weighted routes between two endpoints.
#[async_trait]
pub trait RoutingBackend: Send + Sync {
    async fn compute_route(&self, request: &RouteRequest) -> Result<RouteResponse, RouteError>;

    /// Reports the backend's self-declared health status.
    async fn health(&self) -> anyhow::Result<String>;
}

/// Joins `path` onto a configured base URL, tolerating a trailing slash on the base.
pub(crate) fn endpoint(base_url: &str, path: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
