mod app;
mod backend_bridge;
mod config;
mod controller;
mod render;
mod state;
mod terminal;

use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{NominatimGeocoder, RouteServiceClient};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use crate::{
    app::RouteSession,
    backend_bridge::{
        commands::BackendCommand,
        runtime::{launch, BackendServices},
    },
    config::{load_settings, Settings, DEFAULT_CONFIG_PATH},
    state::normalize_risk_tolerance,
};

#[derive(Parser, Debug)]
#[command(about = "Plan walking routes that trade distance against street safety")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long)]
    routing_url: Option<String>,
    #[arg(long)]
    geocoder_url: Option<String>,
    /// 0 favours the shortest path, 10 the safest.
    #[arg(long)]
    risk_tolerance: Option<f64>,
}

impl Args {
    fn apply(self, settings: &mut Settings) {
        if let Some(url) = self.routing_url {
            settings.routing_url = url;
        }
        if let Some(url) = self.geocoder_url {
            settings.geocoder_url = url;
        }
        if let Some(value) = self.risk_tolerance.filter(|v| v.is_finite()) {
            settings.risk_tolerance = normalize_risk_tolerance(value);
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut settings = load_settings(&args.config);
    args.apply(&mut settings);
    tracing::info!(
        routing_url = %settings.routing_url,
        geocoder_url = %settings.geocoder_url,
        "starting saferoute"
    );

    let services = BackendServices {
        geocoder: Arc::new(
            NominatimGeocoder::new(settings.geocoder_url.clone())
                .with_user_agent(settings.user_agent.clone()),
        ),
        router: Arc::new(RouteServiceClient::new(settings.routing_url.clone())),
    };
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded(2048);
    let worker = launch(cmd_rx, ui_tx, services);

    let mut session = RouteSession::new(&settings, cmd_tx);
    session.submit(BackendCommand::ProbeHealth);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", terminal::HELP)?;
    app::run(&mut session, terminal::spawn_stdin_reader(), ui_rx, &mut out)
        .context("terminal session failed")?;

    drop(session);
    worker
        .join()
        .map_err(|_| anyhow!("backend worker panicked"))?;
    Ok(())
}
