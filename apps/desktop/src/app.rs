//! The session: owns `UiState` and runs the single dispatch loop through which
//! user input and backend completions are applied.

use std::io::{self, Write};

use crossbeam_channel::{select, Receiver, Sender};

use crate::{
    backend_bridge::commands::BackendCommand,
    config::Settings,
    controller::{
        events::{UiEvent, UserAction},
        orchestration::dispatch_backend_command,
        reducer::{apply_ui_event, apply_user_action},
    },
    render::{MapView, RenderScene, SceneStyle},
    state::UiState,
    terminal::{self, TerminalCommand},
};

pub struct RouteSession {
    state: UiState,
    cmd_tx: Sender<BackendCommand>,
    view: MapView,
    style: SceneStyle,
}

impl RouteSession {
    pub fn new(settings: &Settings, cmd_tx: Sender<BackendCommand>) -> Self {
        Self {
            state: UiState::new(settings.risk_tolerance),
            cmd_tx,
            view: settings.map_view,
            style: SceneStyle::default(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn scene(&self) -> RenderScene {
        RenderScene::build(&self.state, self.view, &self.style)
    }

    pub fn handle_action(&mut self, action: UserAction) {
        if let Some(cmd) = apply_user_action(&mut self.state, action) {
            self.submit(cmd);
        }
    }

    /// Returns `false` when the event was stale and changed nothing.
    pub fn handle_event(&mut self, event: UiEvent) -> bool {
        apply_ui_event(&mut self.state, event)
    }

    pub fn submit(&mut self, cmd: BackendCommand) {
        if let Some(rejected) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.handle_event(rejected);
        }
    }
}

fn report_event(session: &mut RouteSession, event: UiEvent, out: &mut impl Write) -> io::Result<()> {
    let info = match &event {
        UiEvent::Info(message) => Some(message.clone()),
        _ => None,
    };
    if !session.handle_event(event) {
        return Ok(());
    }
    match info {
        Some(message) => writeln!(out, "{message}"),
        None => write!(out, "{}", terminal::render_status(session.state())),
    }
}

/// Handles one input line; returns `false` when the user asked to quit.
fn handle_line(session: &mut RouteSession, line: &str, out: &mut impl Write) -> io::Result<bool> {
    match terminal::parse_command(line) {
        Ok(None) => {}
        Ok(Some(TerminalCommand::Quit)) => return Ok(false),
        Ok(Some(TerminalCommand::Help)) => writeln!(out, "{}", terminal::HELP)?,
        Ok(Some(TerminalCommand::Show)) => {
            write!(out, "{}", terminal::render_scene(&session.scene()))?
        }
        Ok(Some(TerminalCommand::Action(action))) => {
            session.handle_action(action);
            write!(out, "{}", terminal::render_status(session.state()))?;
        }
        Err(message) => writeln!(out, "{message}")?,
    }
    Ok(true)
}

/// Runs until the user quits or input ends. After end of input, outstanding
/// requests are still awaited so their results are reported.
pub fn run(
    session: &mut RouteSession,
    input_rx: Receiver<String>,
    ui_rx: Receiver<UiEvent>,
    out: &mut impl Write,
) -> io::Result<()> {
    let mut backend_open = true;
    loop {
        select! {
            recv(input_rx) -> line => match line {
                Ok(line) => {
                    if !handle_line(session, &line, out)? {
                        return Ok(());
                    }
                }
                Err(_) => break,
            },
            recv(ui_rx) -> event => match event {
                Ok(event) => report_event(session, event, out)?,
                Err(_) => {
                    tracing::warn!("backend event channel closed");
                    backend_open = false;
                    break;
                }
            },
        }
        out.flush()?;
    }

    if !backend_open {
        for line in input_rx.iter() {
            if !handle_line(session, &line, out)? {
                break;
            }
            out.flush()?;
        }
        return out.flush();
    }

    while session.state().has_pending_work() {
        match ui_rx.recv() {
            Ok(event) => report_event(session, event, out)?,
            Err(_) => break,
        }
    }
    out.flush()
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
