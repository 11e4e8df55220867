//! Runtime bridge between the shell's command queue and the file session.

use std::thread::{self, JoinHandle};

use client_core::{FileSession, SessionEvent, SessionOptions, SessionServices};
use crossbeam_channel::{Receiver, Sender};
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Spawns the worker. It runs until every command sender is dropped.
pub fn start_backend_bridge(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    services: SessionServices,
    options: SessionOptions,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let mut session = FileSession::new(services, options);
            let mut events = session.subscribe_events();
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                let context = UiErrorContext::for_command(&cmd);
                tracing::debug!(command = cmd.name(), "backend: processing command");
                match cmd.into_explorer_command(&session.view()) {
                    Ok(Some(command)) => session.handle(command).await,
                    Ok(None) => {}
                    Err(message) => {
                        let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                            context, message,
                        )));
                        continue;
                    }
                }
                forward_session_events(&mut events, &ui_tx, context);
                let _ = ui_tx.try_send(UiEvent::View(session.view()));
            }
            tracing::info!("backend: command queue closed, worker exiting");
        });
    })
}

fn forward_session_events(
    events: &mut broadcast::Receiver<SessionEvent>,
    ui_tx: &Sender<UiEvent>,
    context: UiErrorContext,
) {
    loop {
        let event = match events.try_recv() {
            Ok(event) => event,
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "backend: session events dropped");
                continue;
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        };
        let ui_event = match event {
            SessionEvent::Notification(notification) => {
                UiEvent::Error(UiError::from_message(context, notification.message))
            }
            SessionEvent::Download(request) => UiEvent::Download(request),
            SessionEvent::ListingChanged | SessionEvent::ModalChanged => continue,
        };
        let _ = ui_tx.try_send(ui_event);
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
