use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in rendering order (latitude first).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    SelectingStart,
    SelectingEnd,
}

impl SelectionMode {
    pub fn field(self) -> EndpointField {
        match self {
            Self::SelectingStart => EndpointField::Start,
            Self::SelectingEnd => EndpointField::End,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointField {
    Start,
    End,
}

impl EndpointField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::End => "End",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub start: Coordinate,
    pub end: Coordinate,
    pub risk_tolerance: f64,
}

/// A GeoJSON position, stored in (lon, lat) order exactly as received.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct LonLat(pub f64, pub f64);

impl LonLat {
    pub fn to_coordinate(self) -> Coordinate {
        Coordinate::new(self.1, self.0)
    }
}

impl TryFrom<Vec<f64>> for LonLat {
    type Error = String;

    fn try_from(ordinates: Vec<f64>) -> Result<Self, Self::Error> {
        // Trailing ordinates (altitude) are dropped.
        match ordinates.as_slice() {
            [lon, lat, ..] => Ok(Self(*lon, *lat)),
            other => Err(format!(
                "position needs at least 2 ordinates, got {}",
                other.len()
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawGeometry")]
pub enum PathGeometry {
    LineString(Vec<LonLat>),
    MultiLineString(Vec<Vec<LonLat>>),
    /// Any geometry type the renderer does not draw; carries the type name.
    Unsupported(String),
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

impl TryFrom<RawGeometry> for PathGeometry {
    type Error = serde_json::Error;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        match raw.kind.as_str() {
            "LineString" => Ok(Self::LineString(serde_json::from_value(raw.coordinates)?)),
            "MultiLineString" => Ok(Self::MultiLineString(serde_json::from_value(
                raw.coordinates,
            )?)),
            _ => Ok(Self::Unsupported(raw.kind)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub geometry: Option<PathGeometry>,
    pub distance_m: f64,
    pub time_min: f64,
    pub avg_risk: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub coordinate: Coordinate,
    pub display_name: Option<String>,
}
