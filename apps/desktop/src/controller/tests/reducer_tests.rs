use super::*;

use shared::{
    domain::{
        Coordinate, EndpointField, GeocodedPlace, LonLat, PathGeometry, RouteRequest,
        RouteResponse, SelectionMode,
    },
    error::{GeocodeError, RouteError},
};

use crate::controller::events::UiErrorCategory;

const A: Coordinate = Coordinate {
    lat: 43.65,
    lng: -79.38,
};
const B: Coordinate = Coordinate {
    lat: 43.66,
    lng: -79.40,
};

fn route(distance_m: f64) -> RouteResponse {
    RouteResponse {
        geometry: Some(PathGeometry::LineString(vec![
            LonLat(-79.38, 43.65),
            LonLat(-79.40, 43.66),
        ])),
        distance_m,
        time_min: 12.0,
        avg_risk: 0.2,
    }
}

fn place(coordinate: Coordinate) -> GeocodedPlace {
    GeocodedPlace {
        coordinate,
        display_name: Some("somewhere".to_string()),
    }
}

fn state_with_endpoints() -> UiState {
    let mut state = UiState::default();
    apply_user_action(&mut state, UserAction::MapClicked(A));
    apply_user_action(&mut state, UserAction::MapClicked(B));
    state
}

fn start_route(state: &mut UiState) -> u64 {
    match apply_user_action(state, UserAction::FindRoute) {
        Some(BackendCommand::ComputeRoute { generation, .. }) => generation,
        other => panic!("expected route command, got {other:?}"),
    }
}

fn submit_address(state: &mut UiState, field: EndpointField, text: &str) -> u64 {
    apply_user_action(
        state,
        UserAction::EditAddress {
            field,
            text: text.to_string(),
        },
    );
    match apply_user_action(state, UserAction::SubmitAddress(field)) {
        Some(BackendCommand::Geocode { generation, .. }) => generation,
        other => panic!("expected geocode command, got {other:?}"),
    }
}

#[test]
fn two_clicks_set_start_then_end_and_cycle_mode() {
    let mut state = UiState::default();

    assert_eq!(apply_user_action(&mut state, UserAction::MapClicked(A)), None);
    assert_eq!(state.selection_mode(), SelectionMode::SelectingEnd);
    assert_eq!(apply_user_action(&mut state, UserAction::MapClicked(B)), None);

    assert_eq!(state.endpoint(EndpointField::Start), Some(A));
    assert_eq!(state.endpoint(EndpointField::End), Some(B));
    assert_eq!(state.selection_mode(), SelectionMode::SelectingStart);
    assert_eq!(state.address(EndpointField::Start), "Lat: 43.6500, Lon: -79.3800");
    assert_eq!(state.address(EndpointField::End), "Lat: 43.6600, Lon: -79.4000");
}

#[test]
fn set_mode_assigns_nothing() {
    let mut state = UiState::default();
    apply_user_action(
        &mut state,
        UserAction::SetSelectionMode(SelectionMode::SelectingEnd),
    );
    assert_eq!(state.selection_mode(), SelectionMode::SelectingEnd);
    assert_eq!(state.endpoint(EndpointField::Start), None);
    assert_eq!(state.endpoint(EndpointField::End), None);

    apply_user_action(&mut state, UserAction::MapClicked(B));
    assert_eq!(state.endpoint(EndpointField::End), Some(B));
    assert_eq!(state.endpoint(EndpointField::Start), None);
    assert_eq!(state.selection_mode(), SelectionMode::SelectingStart);
}

#[test]
fn blank_address_submits_nothing() {
    let mut state = UiState::default();
    assert_eq!(
        apply_user_action(&mut state, UserAction::SubmitAddress(EndpointField::Start)),
        None
    );
    apply_user_action(
        &mut state,
        UserAction::EditAddress {
            field: EndpointField::Start,
            text: "   ".to_string(),
        },
    );
    assert_eq!(
        apply_user_action(&mut state, UserAction::SubmitAddress(EndpointField::Start)),
        None
    );
    assert!(!state.is_resolving(EndpointField::Start));
}

#[test]
fn geocoded_coordinate_is_written_without_changing_mode() {
    let mut state = UiState::default();
    let generation = submit_address(&mut state, EndpointField::End, "CN Tower");
    assert!(state.is_resolving(EndpointField::End));

    assert!(apply_ui_event(
        &mut state,
        UiEvent::GeocodeSettled {
            field: EndpointField::End,
            generation,
            result: Ok(Some(place(B))),
        },
    ));

    assert_eq!(state.endpoint(EndpointField::End), Some(B));
    assert_eq!(state.selection_mode(), SelectionMode::SelectingStart);
    assert_eq!(state.address(EndpointField::End), "CN Tower");
    assert!(!state.is_resolving(EndpointField::End));
}

#[test]
fn geocode_command_carries_trimmed_address() {
    let mut state = UiState::default();
    apply_user_action(
        &mut state,
        UserAction::EditAddress {
            field: EndpointField::Start,
            text: "  Union Station ".to_string(),
        },
    );
    assert_eq!(
        apply_user_action(&mut state, UserAction::SubmitAddress(EndpointField::Start)),
        Some(BackendCommand::Geocode {
            field: EndpointField::Start,
            generation: 1,
            address: "Union Station".to_string(),
        })
    );
}

#[test]
fn address_not_found_fills_error_slot() {
    let mut state = UiState::default();
    let generation = submit_address(&mut state, EndpointField::Start, "Atlantis");

    apply_ui_event(
        &mut state,
        UiEvent::GeocodeSettled {
            field: EndpointField::Start,
            generation,
            result: Err(GeocodeError::NotFound),
        },
    );

    let err = state.error().expect("error slot");
    assert_eq!(err.category(), UiErrorCategory::AddressNotFound);
    assert_eq!(err.message(), "Geocoding failed: Address not found");
    assert_eq!(state.endpoint(EndpointField::Start), None);
}

#[test]
fn stale_geocode_result_is_discarded() {
    let mut state = UiState::default();
    let first = submit_address(&mut state, EndpointField::Start, "first");
    let second = submit_address(&mut state, EndpointField::Start, "second");
    assert!(second > first);

    assert!(apply_ui_event(
        &mut state,
        UiEvent::GeocodeSettled {
            field: EndpointField::Start,
            generation: second,
            result: Ok(Some(place(B))),
        },
    ));
    assert!(!apply_ui_event(
        &mut state,
        UiEvent::GeocodeSettled {
            field: EndpointField::Start,
            generation: first,
            result: Ok(Some(place(A))),
        },
    ));

    assert_eq!(state.endpoint(EndpointField::Start), Some(B));
}

#[test]
fn geocode_generations_are_per_field() {
    let mut state = UiState::default();
    let start = submit_address(&mut state, EndpointField::Start, "here");
    let end = submit_address(&mut state, EndpointField::End, "there");

    apply_ui_event(
        &mut state,
        UiEvent::GeocodeSettled {
            field: EndpointField::End,
            generation: end,
            result: Ok(Some(place(B))),
        },
    );
    apply_ui_event(
        &mut state,
        UiEvent::GeocodeSettled {
            field: EndpointField::Start,
            generation: start,
            result: Ok(Some(place(A))),
        },
    );

    assert_eq!(state.endpoint(EndpointField::Start), Some(A));
    assert_eq!(state.endpoint(EndpointField::End), Some(B));
    assert!(state.can_compute_route());
}

#[test]
fn compute_route_sends_endpoints_and_risk_tolerance() {
    let mut state = state_with_endpoints();
    apply_user_action(&mut state, UserAction::SetRiskTolerance(3.0));

    assert_eq!(
        apply_user_action(&mut state, UserAction::FindRoute),
        Some(BackendCommand::ComputeRoute {
            generation: 1,
            request: RouteRequest {
                start: A,
                end: B,
                risk_tolerance: 3.0,
            },
        })
    );
    assert!(state.loading());
    assert!(!state.can_compute_route());
}

#[test]
fn compute_route_without_both_endpoints_is_a_no_op() {
    let mut state = UiState::default();
    apply_user_action(&mut state, UserAction::MapClicked(A));
    let before = format!("{state:?}");

    assert_eq!(apply_user_action(&mut state, UserAction::FindRoute), None);
    assert_eq!(format!("{state:?}"), before);
    assert!(!state.loading());
}

#[test]
fn second_trigger_while_loading_is_ignored() {
    let mut state = state_with_endpoints();
    start_route(&mut state);
    assert_eq!(apply_user_action(&mut state, UserAction::FindRoute), None);
}

#[test]
fn failed_route_then_success_clears_error() {
    let mut state = state_with_endpoints();

    let generation = start_route(&mut state);
    apply_ui_event(
        &mut state,
        UiEvent::RouteSettled {
            generation,
            result: Err(RouteError::Service("No path found".to_string())),
        },
    );
    assert!(!state.loading());
    let err = state.error().expect("error slot");
    assert_eq!(err.category(), UiErrorCategory::RouteService);
    assert_eq!(err.message(), "No path found");

    let generation = start_route(&mut state);
    assert!(state.error().is_none(), "issuing a request clears the error");
    apply_ui_event(
        &mut state,
        UiEvent::RouteSettled {
            generation,
            result: Ok(route(1800.0)),
        },
    );
    assert!(!state.loading());
    assert!(state.error().is_none());
    assert_eq!(state.route(), Some(&route(1800.0)));
}

#[test]
fn new_route_replaces_previous_result() {
    let mut state = state_with_endpoints();
    for distance in [1000.0, 2000.0] {
        let generation = start_route(&mut state);
        apply_ui_event(
            &mut state,
            UiEvent::RouteSettled {
                generation,
                result: Ok(route(distance)),
            },
        );
    }
    assert_eq!(state.route().map(|r| r.distance_m), Some(2000.0));
}

#[test]
fn transport_failure_keeps_previous_route_and_sets_error() {
    let mut state = state_with_endpoints();
    let generation = start_route(&mut state);
    apply_ui_event(
        &mut state,
        UiEvent::RouteSettled {
            generation,
            result: Ok(route(1000.0)),
        },
    );
    let generation = start_route(&mut state);
    apply_ui_event(
        &mut state,
        UiEvent::RouteSettled {
            generation,
            result: Err(RouteError::Transport("connection reset".to_string())),
        },
    );

    assert!(!state.loading());
    assert_eq!(
        state.error().map(|e| e.category()),
        Some(UiErrorCategory::RouteTransport)
    );
    assert_eq!(state.route().map(|r| r.distance_m), Some(1000.0));
}

#[test]
fn stale_route_result_is_discarded() {
    let mut state = state_with_endpoints();
    let stale = start_route(&mut state);
    apply_ui_event(
        &mut state,
        UiEvent::RouteSettled {
            generation: stale,
            result: Err(RouteError::Transport("timeout".to_string())),
        },
    );
    let current = start_route(&mut state);

    assert!(!apply_ui_event(
        &mut state,
        UiEvent::RouteSettled {
            generation: stale,
            result: Ok(route(999.0)),
        },
    ));
    assert!(state.loading(), "current request is still outstanding");
    assert!(state.route().is_none());

    apply_ui_event(
        &mut state,
        UiEvent::RouteSettled {
            generation: current,
            result: Ok(route(1500.0)),
        },
    );
    assert_eq!(state.route().map(|r| r.distance_m), Some(1500.0));
}

#[test]
fn risk_tolerance_ignores_non_finite_values() {
    let mut state = UiState::default();
    apply_user_action(&mut state, UserAction::SetRiskTolerance(f64::NAN));
    assert_eq!(state.risk_tolerance(), 0.5);
    apply_user_action(&mut state, UserAction::SetRiskTolerance(7.25));
    assert_eq!(state.risk_tolerance(), 7.3);
}

#[test]
fn backend_error_event_fills_error_slot() {
    let mut state = UiState::default();
    apply_ui_event(
        &mut state,
        UiEvent::Error(crate::controller::events::UiError::backend(
            crate::controller::events::UiErrorContext::BackendStartup,
            "backend worker startup failure",
        )),
    );
    assert_eq!(
        state.error().map(|e| e.category()),
        Some(UiErrorCategory::Backend)
    );
}
