use super::*;

use client_core::{ModalState, SessionPhase, TypeSelector};
use shared::domain::{FileRecord, FileType};

fn view_with(files: Option<Vec<FileRecord>>) -> ExplorerView {
    ExplorerView {
        phase: SessionPhase::Ready,
        categories: Vec::new(),
        files,
        modal: ModalState::Closed,
        upload_ready: false,
        type_filter: TypeSelector::All,
        query: None,
        error: None,
    }
}

#[test]
fn positions_resolve_against_visible_files() {
    let rear = FileRecord::new("rear.jpg", FileType::Image, "https://files.example/rear.jpg");
    let view = view_with(Some(vec![
        FileRecord::new("front.png", FileType::Image, "https://files.example/front.png"),
        rear.clone(),
    ]));

    assert_eq!(
        BackendCommand::Preview { index: 1 }.into_explorer_command(&view),
        Ok(Some(ExplorerCommand::Select(rear.clone())))
    );
    assert_eq!(
        BackendCommand::Download { index: 1 }.into_explorer_command(&view),
        Ok(Some(ExplorerCommand::Download(rear)))
    );
    assert!(BackendCommand::Preview { index: 2 }
        .into_explorer_command(&view)
        .expect_err("out of range")
        .contains("invalid file index 2"));
}

#[test]
fn positions_need_a_loaded_listing() {
    let err = BackendCommand::Download { index: 0 }
        .into_explorer_command(&view_with(None))
        .expect_err("nothing loaded");
    assert!(err.starts_with("missing listing"));
}

#[test]
fn show_view_runs_nothing() {
    assert_eq!(
        BackendCommand::ShowView.into_explorer_command(&view_with(None)),
        Ok(None)
    );
    assert_eq!(
        BackendCommand::SelectType {
            name: "image".into()
        }
        .into_explorer_command(&view_with(None)),
        Ok(Some(ExplorerCommand::TypeSelect("image".into())))
    );
}
