//! Backend worker: a tokio runtime on its own thread that executes queued
//! commands concurrently and reports every completion back as a `UiEvent`.

use std::{sync::Arc, thread};

use client_core::{Geocoder, RoutingBackend};
use crossbeam_channel::{Receiver, Sender};
use shared::error::{GeocodeError, RouteError};
use tokio::task::JoinError;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::{UiError, UiErrorContext, UiEvent},
};

#[derive(Clone)]
pub struct BackendServices {
    pub geocoder: Arc<dyn Geocoder>,
    pub router: Arc<dyn RoutingBackend>,
}

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    services: BackendServices,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::backend(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                return;
            }
        };

        let handle = runtime.handle().clone();
        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend: received command");
                handle.spawn(execute(cmd, services.clone(), ui_tx.clone()));
            }
            tracing::info!("backend: command queue closed, worker exiting");
        });
    })
}

fn task_failure(err: JoinError) -> String {
    if err.is_panic() {
        "request task panicked".to_string()
    } else {
        format!("request task aborted: {err}")
    }
}

/// Runs one command. The request itself runs in a child task so that a panic
/// still produces a settle event for its slot.
pub(crate) async fn execute(cmd: BackendCommand, services: BackendServices, ui_tx: Sender<UiEvent>) {
    let event = match cmd {
        BackendCommand::Geocode {
            field,
            generation,
            address,
        } => {
            let geocoder = services.geocoder;
            let task = tokio::spawn(async move { geocoder.resolve(&address).await });
            let result = task
                .await
                .unwrap_or_else(|err| Err(GeocodeError::Network(task_failure(err))));
            if let Err(err) = &result {
                tracing::warn!(?field, generation, "backend: geocode failed: {err}");
            }
            UiEvent::GeocodeSettled {
                field,
                generation,
                result,
            }
        }
        BackendCommand::ComputeRoute {
            generation,
            request,
        } => {
            let router = services.router;
            let task = tokio::spawn(async move { router.compute_route(&request).await });
            let result = task
                .await
                .unwrap_or_else(|err| Err(RouteError::Transport(task_failure(err))));
            if let Err(err) = &result {
                tracing::warn!(generation, "backend: compute_route failed: {err}");
            }
            UiEvent::RouteSettled { generation, result }
        }
        BackendCommand::ProbeHealth => match services.router.health().await {
            Ok(status) => UiEvent::Info(format!("Routing backend status: {status}")),
            Err(err) => {
                tracing::warn!("backend: health probe failed: {err:#}");
                UiEvent::Info(format!("Routing backend not reachable yet: {err:#}"))
            }
        },
    };

    if ui_tx.send(event).is_err() {
        tracing::debug!("backend: session closed before completion was delivered");
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
