//! Session state consumed by the renderer. Fields are private; every write goes
//! through the `pub(crate)` transitions below, which only the reducer calls.

use shared::domain::{
    Coordinate, EndpointField, GeocodedPlace, RouteRequest, RouteResponse, SelectionMode,
};

use crate::controller::events::UiError;

pub const RISK_TOLERANCE_MIN: f64 = 0.0;
pub const RISK_TOLERANCE_MAX: f64 = 10.0;
/// Slider step is 0.1.
const RISK_TOLERANCE_STEPS_PER_UNIT: f64 = 10.0;
pub const DEFAULT_RISK_TOLERANCE: f64 = 0.5;

/// One value per endpoint field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerField<T> {
    pub start: T,
    pub end: T,
}

impl<T> PerField<T> {
    pub fn get(&self, field: EndpointField) -> &T {
        match field {
            EndpointField::Start => &self.start,
            EndpointField::End => &self.end,
        }
    }

    pub(crate) fn get_mut(&mut self, field: EndpointField) -> &mut T {
        match field {
            EndpointField::Start => &mut self.start,
            EndpointField::End => &mut self.end,
        }
    }
}

/// Clamps to the slider range and snaps to its step.
pub fn normalize_risk_tolerance(value: f64) -> f64 {
    let clamped = value.clamp(RISK_TOLERANCE_MIN, RISK_TOLERANCE_MAX);
    (clamped * RISK_TOLERANCE_STEPS_PER_UNIT).round() / RISK_TOLERANCE_STEPS_PER_UNIT
}

pub fn click_address_text(coordinate: Coordinate) -> String {
    format!("Lat: {:.4}, Lon: {:.4}", coordinate.lat, coordinate.lng)
}

#[derive(Debug, Clone)]
pub struct UiState {
    selection_mode: SelectionMode,
    endpoints: PerField<Option<Coordinate>>,
    addresses: PerField<String>,
    resolving: PerField<bool>,
    risk_tolerance: f64,
    loading: bool,
    error: Option<UiError>,
    route: Option<RouteResponse>,
    route_generation: u64,
    geocode_generation: PerField<u64>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_TOLERANCE)
    }
}

impl UiState {
    pub fn new(risk_tolerance: f64) -> Self {
        Self {
            selection_mode: SelectionMode::SelectingStart,
            endpoints: PerField::default(),
            addresses: PerField::default(),
            resolving: PerField::default(),
            risk_tolerance: normalize_risk_tolerance(risk_tolerance),
            loading: false,
            error: None,
            route: None,
            route_generation: 0,
            geocode_generation: PerField::default(),
        }
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    pub fn endpoint(&self, field: EndpointField) -> Option<Coordinate> {
        *self.endpoints.get(field)
    }

    pub fn address(&self, field: EndpointField) -> &str {
        self.addresses.get(field)
    }

    pub fn is_resolving(&self, field: EndpointField) -> bool {
        *self.resolving.get(field)
    }

    pub fn risk_tolerance(&self) -> f64 {
        self.risk_tolerance
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&UiError> {
        self.error.as_ref()
    }

    pub fn route(&self) -> Option<&RouteResponse> {
        self.route.as_ref()
    }

    /// Whether the "Find Route" trigger is enabled.
    pub fn can_compute_route(&self) -> bool {
        self.endpoints.start.is_some() && self.endpoints.end.is_some() && !self.loading
    }

    /// Whether any network operation is still outstanding.
    pub fn has_pending_work(&self) -> bool {
        self.loading || self.resolving.start || self.resolving.end
    }

    pub(crate) fn assign_clicked_point(&mut self, coordinate: Coordinate) -> EndpointField {
        let field = self.selection_mode.field();
        *self.endpoints.get_mut(field) = Some(coordinate);
        *self.addresses.get_mut(field) = click_address_text(coordinate);
        self.selection_mode = match self.selection_mode {
            SelectionMode::SelectingStart => SelectionMode::SelectingEnd,
            SelectionMode::SelectingEnd => SelectionMode::SelectingStart,
        };
        field
    }

    pub(crate) fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selection_mode = mode;
    }

    pub(crate) fn set_address(&mut self, field: EndpointField, text: String) {
        *self.addresses.get_mut(field) = text;
    }

    pub(crate) fn set_risk_tolerance(&mut self, value: f64) {
        self.risk_tolerance = normalize_risk_tolerance(value);
    }

    /// Starts a lookup for `field`; returns the generation it was issued under.
    pub(crate) fn begin_geocode(&mut self, field: EndpointField) -> u64 {
        let generation = self.geocode_generation.get_mut(field);
        *generation += 1;
        *self.resolving.get_mut(field) = true;
        self.error = None;
        *generation
    }

    /// Applies a lookup outcome. Returns `false` when the outcome is stale.
    pub(crate) fn settle_geocode(
        &mut self,
        field: EndpointField,
        generation: u64,
        outcome: Result<Option<GeocodedPlace>, UiError>,
    ) -> bool {
        if *self.geocode_generation.get(field) != generation {
            return false;
        }
        *self.resolving.get_mut(field) = false;
        match outcome {
            // Resolved coordinates never touch the selection mode.
            Ok(Some(place)) => *self.endpoints.get_mut(field) = Some(place.coordinate),
            Ok(None) => {}
            Err(err) => self.error = Some(err),
        }
        true
    }

    /// Starts a route computation when both endpoints are set and none is loading.
    pub(crate) fn begin_route(&mut self) -> Option<(u64, RouteRequest)> {
        let (Some(start), Some(end)) = (self.endpoints.start, self.endpoints.end) else {
            return None;
        };
        if self.loading {
            return None;
        }
        self.route_generation += 1;
        self.loading = true;
        self.error = None;
        Some((
            self.route_generation,
            RouteRequest {
                start,
                end,
                risk_tolerance: self.risk_tolerance,
            },
        ))
    }

    /// Applies a route outcome. Returns `false` when the outcome is stale.
    pub(crate) fn settle_route(
        &mut self,
        generation: u64,
        outcome: Result<RouteResponse, UiError>,
    ) -> bool {
        if self.route_generation != generation {
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(response) => {
                self.route = Some(response);
                self.error = None;
            }
            Err(err) => self.error = Some(err),
        }
        true
    }

    pub(crate) fn report_error(&mut self, err: UiError) {
        self.error = Some(err);
    }
}
