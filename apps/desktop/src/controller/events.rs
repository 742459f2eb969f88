//! User actions, backend events and error modeling for the session controller.

use std::fmt;

use shared::{
    domain::{Coordinate, EndpointField, GeocodedPlace, RouteResponse, SelectionMode},
    error::{GeocodeError, RouteError},
};

/// Input from the user or the map widget.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    MapClicked(Coordinate),
    SetSelectionMode(SelectionMode),
    EditAddress { field: EndpointField, text: String },
    SubmitAddress(EndpointField),
    SetRiskTolerance(f64),
    FindRoute,
}

/// Completion reported by the backend worker.
#[derive(Debug, Clone)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    GeocodeSettled {
        field: EndpointField,
        generation: u64,
        result: Result<Option<GeocodedPlace>, GeocodeError>,
    },
    RouteSettled {
        generation: u64,
        result: Result<RouteResponse, RouteError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    AddressNotFound,
    GeocodingTransport,
    RouteService,
    RouteTransport,
    Backend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    StartAddress,
    EndAddress,
    Route,
    BackendStartup,
    General,
}

impl From<EndpointField> for UiErrorContext {
    fn from(field: EndpointField) -> Self {
        match field {
            EndpointField::Start => Self::StartAddress,
            EndpointField::End => Self::EndAddress,
        }
    }
}

/// The single user-visible error slot's content.
#[derive(Debug, Clone, PartialEq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_geocode(field: EndpointField, err: &GeocodeError) -> Self {
        let category = match err {
            GeocodeError::NotFound => UiErrorCategory::AddressNotFound,
            GeocodeError::Network(_) => UiErrorCategory::GeocodingTransport,
        };
        Self {
            category,
            context: field.into(),
            message: format!("Geocoding failed: {err}"),
        }
    }

    pub fn from_route(err: &RouteError) -> Self {
        let category = match err {
            RouteError::Service(_) => UiErrorCategory::RouteService,
            RouteError::Transport(_) => UiErrorCategory::RouteTransport,
        };
        Self {
            category,
            context: UiErrorContext::Route,
            message: err.message().to_string(),
        }
    }

    pub fn backend(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Backend,
            context,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
