//! Line-oriented front end standing in for the map widget: it turns typed
//! commands into user actions and prints the session as text.

use std::{
    fmt::Write as _,
    io::{self, BufRead},
    thread,
};

use crossbeam_channel::{bounded, Receiver};
use shared::domain::{Coordinate, EndpointField, SelectionMode};

use crate::{
    controller::events::UserAction,
    render::{RenderScene, RouteStats},
    state::UiState,
};

pub const HELP: &str = "\
Commands:
  click <lat> <lng>         place the next endpoint on the map
  mode start|end            choose which endpoint the next click sets
  address start|end <text>  edit an address field
  find start|end            resolve that address field
  risk <0-10>               set risk tolerance (0 = direct, 10 = safe)
  route                     find the route
  show                      print the map scene
  help                      this text
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum TerminalCommand {
    Action(UserAction),
    Show,
    Help,
    Quit,
}

fn parse_field(word: Option<&str>) -> Result<EndpointField, String> {
    match word.map(str::to_ascii_lowercase).as_deref() {
        Some("start") => Ok(EndpointField::Start),
        Some("end") => Ok(EndpointField::End),
        Some(other) => Err(format!("expected 'start' or 'end', got '{other}'")),
        None => Err("expected 'start' or 'end'".to_string()),
    }
}

fn parse_number(word: Option<&str>, name: &str) -> Result<f64, String> {
    let word = word.ok_or_else(|| format!("missing {name}"))?;
    word.parse::<f64>()
        .map_err(|_| format!("invalid {name} '{word}'"))
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<TerminalCommand>, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim_start();
    let mut words = rest.split_whitespace();

    let command = match verb.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "click" => {
            let lat = parse_number(words.next(), "latitude")?;
            let lng = parse_number(words.next(), "longitude")?;
            TerminalCommand::Action(UserAction::MapClicked(Coordinate::new(lat, lng)))
        }
        "mode" => {
            let mode = match parse_field(words.next())? {
                EndpointField::Start => SelectionMode::SelectingStart,
                EndpointField::End => SelectionMode::SelectingEnd,
            };
            TerminalCommand::Action(UserAction::SetSelectionMode(mode))
        }
        "address" => {
            let (field_word, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field = parse_field(Some(field_word).filter(|w| !w.is_empty()))?;
            TerminalCommand::Action(UserAction::EditAddress {
                field,
                text: text.trim().to_string(),
            })
        }
        "find" => TerminalCommand::Action(UserAction::SubmitAddress(parse_field(words.next())?)),
        "risk" => TerminalCommand::Action(UserAction::SetRiskTolerance(parse_number(
            words.next(),
            "risk tolerance",
        )?)),
        "route" => TerminalCommand::Action(UserAction::FindRoute),
        "show" => TerminalCommand::Show,
        "help" | "?" => TerminalCommand::Help,
        "quit" | "exit" => TerminalCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

fn endpoint_line(state: &UiState, field: EndpointField) -> String {
    let position = state
        .endpoint(field)
        .map(|c| c.to_string())
        .unwrap_or_else(|| "Not set".to_string());
    let mut line = format!("{}: {position}", field.label());
    if !state.address(field).is_empty() {
        let _ = write!(line, "  [{}]", state.address(field));
    }
    if state.is_resolving(field) {
        line.push_str("  (resolving...)");
    }
    line
}

pub fn render_status(state: &UiState) -> String {
    let mut out = String::new();
    let mode = match state.selection_mode() {
        SelectionMode::SelectingStart => "next click sets Start",
        SelectionMode::SelectingEnd => "next click sets End",
    };
    let _ = writeln!(out, "Mode: {mode}");
    let _ = writeln!(out, "{}", endpoint_line(state, EndpointField::Start));
    let _ = writeln!(out, "{}", endpoint_line(state, EndpointField::End));
    let _ = writeln!(out, "Safety importance: {}", state.risk_tolerance());

    let button = if state.loading() {
        "[Processing...]"
    } else if state.can_compute_route() {
        "[Find Route]"
    } else {
        "[Find Route] (disabled)"
    };
    let _ = writeln!(out, "{button}");

    if let Some(err) = state.error() {
        let _ = writeln!(out, "Error: {err}");
    }
    if let Some(route) = state.route() {
        let stats = RouteStats::from(route);
        let _ = writeln!(
            out,
            "Route Stats: Distance: {} | Time: {} | Avg Risk: {}",
            stats.distance, stats.time, stats.avg_risk
        );
    }
    out
}

pub fn render_scene(scene: &RenderScene) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Map center {} zoom {}",
        scene.view.center, scene.view.zoom
    );
    for marker in &scene.markers {
        let _ = writeln!(
            out,
            "Marker {} at {} (icon {} {}x{})",
            marker.label,
            marker.position,
            marker.style.icon_url,
            marker.style.icon_size.0,
            marker.style.icon_size.1
        );
    }
    if scene.has_path() {
        let _ = writeln!(
            out,
            "Path: {} points in {} segment(s), {} weight {}",
            scene.path.len(),
            scene.segments,
            scene.path_style.color,
            scene.path_style.weight
        );
        for point in &scene.path {
            let _ = writeln!(out, "  {point}");
        }
    }
    out
}

/// Forwards stdin lines on a channel; the channel closes at end of input.
pub fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = bounded(64);
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    tracing::warn!("stdin read failed: {err}");
                    break;
                }
            }
        }
    });
    rx
}
