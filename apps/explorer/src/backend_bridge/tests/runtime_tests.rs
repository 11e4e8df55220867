use super::*;

use std::time::Duration;

use client_core::SessionPhase;
use crossbeam_channel::bounded;
use shared::domain::{ConnectionName, RecordContext};
use url::Url;

fn next_event(ui_rx: &Receiver<UiEvent>) -> UiEvent {
    ui_rx
        .recv_timeout(Duration::from_secs(10))
        .expect("backend event")
}

#[test]
fn unreachable_controller_surfaces_a_lookup_error_then_the_view() {
    let services = SessionServices::http(Url::parse("http://127.0.0.1:1/api").expect("url"));
    let options = SessionOptions::new(
        ConnectionName::new("default"),
        Url::parse("http://localhost").expect("origin"),
    );
    let (cmd_tx, cmd_rx) = bounded(8);
    let (ui_tx, ui_rx) = bounded(64);
    let worker = start_backend_bridge(cmd_rx, ui_tx, services, options);

    cmd_tx
        .send(BackendCommand::Resolve {
            context: RecordContext::new("File_Container__c", "Case", "500A"),
        })
        .expect("queue");

    let mut saw_error = false;
    loop {
        match next_event(&ui_rx) {
            UiEvent::Error(err) => {
                assert_eq!(err.context(), UiErrorContext::Lookup);
                saw_error = true;
            }
            UiEvent::View(view) => {
                assert_eq!(view.phase, SessionPhase::Errored);
                assert_eq!(view.files, None);
                break;
            }
            UiEvent::Info(_) | UiEvent::Download(_) => {}
        }
    }
    assert!(saw_error);

    drop(cmd_tx);
    worker.join().expect("worker exits when the queue closes");
}

#[test]
fn bad_position_is_reported_without_touching_the_session() {
    let services = SessionServices::http(Url::parse("http://127.0.0.1:1/api").expect("url"));
    let options = SessionOptions::new(
        ConnectionName::new("default"),
        Url::parse("http://localhost").expect("origin"),
    );
    let (cmd_tx, cmd_rx) = bounded(8);
    let (ui_tx, ui_rx) = bounded(64);
    let worker = start_backend_bridge(cmd_rx, ui_tx, services, options);

    cmd_tx
        .send(BackendCommand::Preview { index: 0 })
        .expect("queue");
    cmd_tx.send(BackendCommand::ShowView).expect("queue");

    let mut errors = Vec::new();
    loop {
        match next_event(&ui_rx) {
            UiEvent::Error(err) => errors.push(err),
            UiEvent::View(view) => {
                assert_eq!(view.phase, SessionPhase::Unresolved);
                break;
            }
            UiEvent::Info(_) | UiEvent::Download(_) => {}
        }
    }
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].context(), UiErrorContext::Preview);
    assert!(errors[0].message().starts_with("missing listing"));

    drop(cmd_tx);
    worker.join().expect("worker exits");
}
