use std::{fs, path::Path};

use shared::domain::Coordinate;

use crate::{
    render::MapView,
    state::{normalize_risk_tolerance, DEFAULT_RISK_TOLERANCE},
};

pub const DEFAULT_CONFIG_PATH: &str = "saferoute.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub routing_url: String,
    pub geocoder_url: String,
    pub user_agent: String,
    pub risk_tolerance: f64,
    pub map_view: MapView,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            routing_url: "http://localhost:5000".into(),
            geocoder_url: "https://nominatim.openstreetmap.org".into(),
            user_agent: client_core::DEFAULT_USER_AGENT.into(),
            risk_tolerance: DEFAULT_RISK_TOLERANCE,
            map_view: MapView::default(),
        }
    }
}

/// Defaults, then `path` if it exists, then the process environment.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config file at {}", path.display());
        }
        Err(err) => tracing::warn!("failed to read config file {}: {err}", path.display()),
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let table = match raw.parse::<toml::Table>() {
        Ok(table) => table,
        Err(err) => {
            tracing::warn!("ignoring malformed config file: {err}");
            return;
        }
    };

    for (key, value) in table {
        let text = match value {
            toml::Value::String(s) => s,
            toml::Value::Float(f) => f.to_string(),
            toml::Value::Integer(i) => i.to_string(),
            other => {
                tracing::warn!("ignoring config key '{key}' with unsupported value {other}");
                continue;
            }
        };
        apply_value(settings, &key, &text);
    }
}

/// Each key is read as `NAME` and then `APP__NAME`; the prefixed form wins.
fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    const KEYS: [&str; 7] = [
        "routing_url",
        "geocoder_url",
        "user_agent",
        "risk_tolerance",
        "map_center_lat",
        "map_center_lng",
        "map_zoom",
    ];

    for key in KEYS {
        let upper = key.to_ascii_uppercase();
        if let Some(v) = lookup(&upper) {
            apply_value(settings, key, &v);
        }
        if let Some(v) = lookup(&format!("APP__{upper}")) {
            apply_value(settings, key, &v);
        }
    }
}

fn apply_value(settings: &mut Settings, key: &str, value: &str) {
    match key {
        "routing_url" => settings.routing_url = value.to_string(),
        "geocoder_url" => settings.geocoder_url = value.to_string(),
        "user_agent" => settings.user_agent = value.to_string(),
        "risk_tolerance" => {
            if let Some(v) = parse_float(key, value) {
                settings.risk_tolerance = normalize_risk_tolerance(v);
            }
        }
        "map_center_lat" => {
            if let Some(v) = parse_float(key, value) {
                settings.map_view.center = Coordinate::new(v, settings.map_view.center.lng);
            }
        }
        "map_center_lng" => {
            if let Some(v) = parse_float(key, value) {
                settings.map_view.center = Coordinate::new(settings.map_view.center.lat, v);
            }
        }
        "map_zoom" => match value.trim().parse::<u8>() {
            Ok(zoom) => settings.map_view.zoom = zoom,
            Err(err) => tracing::warn!("ignoring invalid map_zoom '{value}': {err}"),
        },
        other => tracing::warn!("ignoring unknown config key '{other}'"),
    }
}

fn parse_float(key: &str, value: &str) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            tracing::warn!("ignoring invalid {key} '{value}'");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
