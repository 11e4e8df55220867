//! Backend commands queued from the shell to the backend worker.

use std::path::PathBuf;

use client_core::{ExplorerCommand, ExplorerView};
use shared::domain::RecordContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Resolve { context: RecordContext },
    Refresh,
    SelectType { name: String },
    Search { text: String },
    /// Index into the currently visible files.
    Preview { index: usize },
    Download { index: usize },
    OpenUpload,
    ChooseFile { path: PathBuf },
    Upload,
    CloseModal,
    KeyPressed { key: String },
    ShowView,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resolve { .. } => "resolve",
            Self::Refresh => "refresh",
            Self::SelectType { .. } => "select_type",
            Self::Search { .. } => "search",
            Self::Preview { .. } => "preview",
            Self::Download { .. } => "download",
            Self::OpenUpload => "open_upload",
            Self::ChooseFile { .. } => "choose_file",
            Self::Upload => "upload",
            Self::CloseModal => "close_modal",
            Self::KeyPressed { .. } => "key_pressed",
            Self::ShowView => "show_view",
        }
    }

    /// Session command for this input. `Ok(None)` means nothing to run; an index
    /// outside the visible files is an error message.
    pub fn into_explorer_command(
        self,
        view: &ExplorerView,
    ) -> Result<Option<ExplorerCommand>, String> {
        let command = match self {
            Self::Resolve { context } => ExplorerCommand::Resolve(context),
            Self::Refresh => ExplorerCommand::Refresh,
            Self::SelectType { name } => ExplorerCommand::TypeSelect(name),
            Self::Search { text } => ExplorerCommand::Search(text),
            Self::Preview { index } => ExplorerCommand::Select(visible_file(view, index)?),
            Self::Download { index } => ExplorerCommand::Download(visible_file(view, index)?),
            Self::OpenUpload => ExplorerCommand::OpenUpload,
            Self::ChooseFile { path } => ExplorerCommand::ChooseFile(path),
            Self::Upload => ExplorerCommand::Upload,
            Self::CloseModal => ExplorerCommand::CloseModal,
            Self::KeyPressed { key } => ExplorerCommand::KeyPressed(key),
            Self::ShowView => return Ok(None),
        };
        Ok(Some(command))
    }
}

fn visible_file(
    view: &ExplorerView,
    index: usize,
) -> Result<shared::domain::FileRecord, String> {
    let files = view
        .files
        .as_deref()
        .ok_or_else(|| "missing listing: no files loaded yet".to_string())?;
    files
        .get(index)
        .cloned()
        .ok_or_else(|| format!("invalid file index {index}: {} file(s) shown", files.len()))
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
