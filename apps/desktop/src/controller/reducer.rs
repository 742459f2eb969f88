//! Pure transitions from actions and backend events to `UiState` changes.

use tracing::{debug, info, warn};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::{UiError, UiEvent, UserAction},
    state::UiState,
};

/// Applies a user action and returns the backend command it issues, if any.
pub fn apply_user_action(state: &mut UiState, action: UserAction) -> Option<BackendCommand> {
    match action {
        UserAction::MapClicked(coordinate) => {
            let field = state.assign_clicked_point(coordinate);
            debug!(?field, %coordinate, "selection: endpoint set from map click");
            None
        }
        UserAction::SetSelectionMode(mode) => {
            state.set_selection_mode(mode);
            None
        }
        UserAction::EditAddress { field, text } => {
            state.set_address(field, text);
            None
        }
        UserAction::SubmitAddress(field) => {
            let address = state.address(field).trim().to_string();
            if address.is_empty() {
                debug!(?field, "geocode: blank address, nothing to resolve");
                return None;
            }
            let generation = state.begin_geocode(field);
            info!(?field, generation, "geocode: resolving address");
            Some(BackendCommand::Geocode {
                field,
                generation,
                address,
            })
        }
        UserAction::SetRiskTolerance(value) => {
            if !value.is_finite() {
                warn!("ignoring non-finite risk tolerance {value}");
                return None;
            }
            state.set_risk_tolerance(value);
            None
        }
        UserAction::FindRoute => {
            let Some((generation, request)) = state.begin_route() else {
                debug!(
                    loading = state.loading(),
                    "route: trigger disabled, ignoring request"
                );
                return None;
            };
            info!(generation, "route: computing");
            Some(BackendCommand::ComputeRoute {
                generation,
                request,
            })
        }
    }
}

/// Applies a backend event. Returns `false` if the event was stale and discarded.
pub fn apply_ui_event(state: &mut UiState, event: UiEvent) -> bool {
    match event {
        UiEvent::Info(message) => {
            info!("{message}");
            true
        }
        UiEvent::Error(err) => {
            warn!(context = ?err.context(), "{err}");
            state.report_error(err);
            true
        }
        UiEvent::GeocodeSettled {
            field,
            generation,
            result,
        } => {
            let outcome = result.map_err(|err| UiError::from_geocode(field, &err));
            let applied = state.settle_geocode(field, generation, outcome);
            if !applied {
                debug!(?field, generation, "geocode: discarding stale result");
            }
            applied
        }
        UiEvent::RouteSettled { generation, result } => {
            let outcome = result.map_err(|err| UiError::from_route(&err));
            let applied = state.settle_route(generation, outcome);
            if !applied {
                debug!(generation, "route: discarding stale result");
            }
            applied
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
