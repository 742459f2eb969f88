use async_trait::async_trait;
use reqwest::{header::USER_AGENT, Client};
use shared::{
    domain::{Coordinate, GeocodedPlace},
    error::GeocodeError,
    protocol::GeocodeCandidate,
};
use tracing::{debug, warn};

use crate::{endpoint, Geocoder, DEFAULT_USER_AGENT};

/// Geocoder speaking the Nominatim `/search?format=json` protocol.
pub struct NominatimGeocoder {
    http: Client,
    base_url: String,
    user_agent: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn transport_error(err: impl std::fmt::Display) -> GeocodeError {
    GeocodeError::Network(err.to_string())
}

fn parse_ordinate(name: &str, raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|err| GeocodeError::Network(format!("invalid {name} '{raw}' in geocoder response: {err}")))
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, address: &str) -> Result<Option<GeocodedPlace>, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            debug!("geocode: blank address, skipping lookup");
            return Ok(None);
        }

        let search = endpoint(&self.base_url, "search").map_err(transport_error)?;
        let url = url::Url::parse_with_params(
            search.as_str(),
            &[("format", "json"), ("q", address), ("limit", "1")],
        )
        .map_err(transport_error)?;

        debug!(%url, "geocode: issuing lookup");
        let candidates: Vec<GeocodeCandidate> = self
            .http
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(transport_error)?
            .error_for_status()
            .map_err(transport_error)?
            .json()
            .await
            .map_err(|err| {
                warn!("geocode: undecodable response for '{address}': {err}");
                transport_error(err)
            })?;

        let Some(top) = candidates.into_iter().next() else {
            debug!("geocode: no candidates for '{address}'");
            return Err(GeocodeError::NotFound);
        };

        let coordinate = Coordinate::new(
            parse_ordinate("lat", &top.lat)?,
            parse_ordinate("lon", &top.lon)?,
        );
        Ok(Some(GeocodedPlace {
            coordinate,
            display_name: top.display_name,
        }))
    }
}
