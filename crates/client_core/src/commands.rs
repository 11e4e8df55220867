//! Inward command vocabulary and outward session events.

use std::path::PathBuf;

use shared::domain::{FileRecord, RecordContext};

/// Everything the surrounding shell can ask a `FileSession` to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerCommand {
    Resolve(RecordContext),
    Refresh,
    TypeSelect(String),
    Search(String),
    Select(FileRecord),
    Download(FileRecord),
    OpenUpload,
    ChooseFile(PathBuf),
    Upload,
    CloseModal,
    KeyPressed(String),
}

impl ExplorerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resolve(_) => "resolve",
            Self::Refresh => "refresh",
            Self::TypeSelect(_) => "type_select",
            Self::Search(_) => "search",
            Self::Select(_) => "select",
            Self::Download(_) => "download",
            Self::OpenUpload => "open_upload",
            Self::ChooseFile(_) => "choose_file",
            Self::Upload => "upload",
            Self::CloseModal => "close_modal",
            Self::KeyPressed(_) => "key_pressed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Error,
}

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
            variant: NotificationVariant::Error,
        }
    }
}

/// Client-side save-as of a listed file. The shell performs it; no request is made here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub href: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Notification(Notification),
    Download(DownloadRequest),
    ListingChanged,
    ModalChanged,
}
