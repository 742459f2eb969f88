//! Command orchestration from session actions to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};
use shared::error::{GeocodeError, RouteError};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::{UiError, UiErrorContext, UiEvent},
};

/// Queues `cmd` for the backend worker.
///
/// When the queue rejects the command, returns the settle event that closes the
/// operation the command belonged to, so the session never waits on it.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Option<UiEvent> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued session->backend command");
            None
        }
        Err(TrySendError::Full(cmd)) => {
            tracing::warn!(command = cmd_name, "backend command queue is full");
            Some(undeliverable(cmd, "Backend command queue is full; please retry"))
        }
        Err(TrySendError::Disconnected(cmd)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            Some(undeliverable(
                cmd,
                "Backend command processor disconnected (possible startup/runtime failure)",
            ))
        }
    }
}

fn undeliverable(cmd: BackendCommand, reason: &str) -> UiEvent {
    match cmd {
        BackendCommand::Geocode {
            field, generation, ..
        } => UiEvent::GeocodeSettled {
            field,
            generation,
            result: Err(GeocodeError::Network(reason.to_string())),
        },
        BackendCommand::ComputeRoute { generation, .. } => UiEvent::RouteSettled {
            generation,
            result: Err(RouteError::Transport(reason.to_string())),
        },
        BackendCommand::ProbeHealth => {
            UiEvent::Error(UiError::backend(UiErrorContext::General, reason))
        }
    }
}
