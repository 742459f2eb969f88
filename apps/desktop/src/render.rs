//! Projection of session state into what the map layer draws.

use shared::domain::{Coordinate, EndpointField, PathGeometry, RouteResponse};

use crate::state::UiState;

/// Flattens a route geometry into one render-ordered point list.
///
/// MultiLineString segments are concatenated in input order with no break
/// between them, so disjoint segments render as one continuous line.
/// Missing or unsupported geometry yields an empty list.
pub fn project(geometry: Option<&PathGeometry>) -> Vec<Coordinate> {
    match geometry {
        Some(PathGeometry::LineString(positions)) => {
            positions.iter().map(|p| p.to_coordinate()).collect()
        }
        Some(PathGeometry::MultiLineString(lines)) => lines
            .iter()
            .flatten()
            .map(|p| p.to_coordinate())
            .collect(),
        Some(PathGeometry::Unsupported(_)) | None => Vec::new(),
    }
}

/// One polyline per segment, for renderers that keep segments apart.
pub fn project_segments(geometry: Option<&PathGeometry>) -> Vec<Vec<Coordinate>> {
    match geometry {
        Some(PathGeometry::LineString(positions)) if !positions.is_empty() => {
            vec![positions.iter().map(|p| p.to_coordinate()).collect()]
        }
        Some(PathGeometry::MultiLineString(lines)) => lines
            .iter()
            .filter(|line| !line.is_empty())
            .map(|line| line.iter().map(|p| p.to_coordinate()).collect())
            .collect(),
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub icon_url: String,
    pub shadow_url: String,
    pub icon_size: (u32, u32),
    pub icon_anchor: (u32, u32),
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            icon_url: "marker-icon.png".to_string(),
            shadow_url: "marker-shadow.png".to_string(),
            icon_size: (25, 41),
            icon_anchor: (12, 41),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineStyle {
    pub color: String,
    pub weight: u32,
}

impl Default for PolylineStyle {
    fn default() -> Self {
        Self {
            color: "blue".to_string(),
            weight: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub label: &'static str,
    pub style: MarkerStyle,
}

impl Marker {
    pub fn new(position: Coordinate, label: &'static str, style: MarkerStyle) -> Self {
        Self {
            position,
            label,
            style,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: Coordinate::new(43.6532, -79.3832),
            zoom: 13,
        }
    }
}

/// Styles handed to each marker and polyline as it is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneStyle {
    pub marker: MarkerStyle,
    pub path: PolylineStyle,
}

/// Everything the map layer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderScene {
    pub view: MapView,
    pub markers: Vec<Marker>,
    pub path: Vec<Coordinate>,
    /// Number of disjoint segments the route geometry carried.
    pub segments: usize,
    pub path_style: PolylineStyle,
}

impl RenderScene {
    pub fn build(state: &UiState, view: MapView, style: &SceneStyle) -> Self {
        let markers = [EndpointField::Start, EndpointField::End]
            .into_iter()
            .filter_map(|field| {
                state
                    .endpoint(field)
                    .map(|position| Marker::new(position, field.label(), style.marker.clone()))
            })
            .collect();
        let geometry = state.route().and_then(|route| route.geometry.as_ref());
        Self {
            view,
            markers,
            path: project(geometry),
            segments: project_segments(geometry).len(),
            path_style: style.path.clone(),
        }
    }

    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Summary lines shown under "Route Stats".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteStats {
    pub distance: String,
    pub time: String,
    pub avg_risk: String,
}

impl From<&RouteResponse> for RouteStats {
    fn from(route: &RouteResponse) -> Self {
        Self {
            distance: format!("{:.2} km", route.distance_m / 1000.0),
            time: format!("{} min", route.time_min.ceil()),
            avg_risk: format!("{:.2}", route.avg_risk),
        }
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
