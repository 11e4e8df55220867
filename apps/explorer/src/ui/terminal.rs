use std::fmt::Write as _;

use client_core::{ExplorerView, ModalState, SessionPhase};

use crate::controller::events::UiEvent;

pub const HELP: &str = "\
commands:
  open <record-id> [object-type]   resolve a record and list its files
  refresh                          reload the listing
  type <all|folder|image|document|other>
  search <text>                    set the search text
  ls | view                        show the explorer
  preview <n> | download <n>       act on the n-th listed file
  upload                           open the upload dialog
  choose <path>                    pick a .pdf .doc .docx .jpg .jpeg .png file
  send                             upload the chosen file
  close | esc                      close the open dialog
  key <name>                       send a key press
  help | quit";

pub fn render_event(event: &UiEvent) -> String {
    match event {
        UiEvent::Info(message) => format!("-- {message}"),
        UiEvent::Error(err) => format!(
            "!! {} error ({:?}): {}",
            err.context().label(),
            err.category(),
            err.message()
        ),
        UiEvent::Download(request) => {
            format!("download {} from {}", request.file_name, request.href)
        }
        UiEvent::View(view) => render_view(view),
    }
}

pub fn render_view(view: &ExplorerView) -> String {
    let mut out = String::new();

    let tabs: Vec<String> = view
        .categories
        .iter()
        .map(|bucket| {
            let marker = if bucket.id == view.type_filter.id() { "*" } else { "" };
            format!("{marker}{} ({})", bucket.label, bucket.count)
        })
        .collect();
    let _ = writeln!(out, "[{}]", tabs.join(" | "));
    if let Some(query) = &view.query {
        let _ = writeln!(out, "search: {query}");
    }

    match (&view.files, view.phase) {
        (None, SessionPhase::Errored) => {
            let _ = writeln!(out, "no files available");
        }
        (None, _) => {
            let _ = writeln!(out, "no record opened");
        }
        (Some(files), _) if files.is_empty() => {
            let _ = writeln!(out, "no files");
        }
        (Some(files), _) => {
            for (position, file) in files.iter().enumerate() {
                let _ = writeln!(out, "{:>3}. {} [{}]", position + 1, file.display_name(), file.kind);
            }
        }
    }

    match &view.modal {
        ModalState::Closed => {}
        ModalState::Preview(file) => {
            let _ = writeln!(out, "preview: {} <{}>", file.display_name(), file.url);
        }
        ModalState::Upload => {
            let state = if view.upload_ready { "ready to send" } else { "choose a file" };
            let _ = writeln!(out, "upload: {state}");
        }
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "error: {error}");
    }

    out.trim_end().to_string()
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
