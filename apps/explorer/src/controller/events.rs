//! Backend-to-shell events and error modeling for the explorer controller.

use client_core::{DownloadRequest, ExplorerView};

use crate::backend_bridge::commands::BackendCommand;

#[derive(Debug, Clone)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    View(ExplorerView),
    /// The shell performs the save-as itself.
    Download(DownloadRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Lookup,
    Listing,
    Preview,
    Upload,
    General,
}

impl UiErrorContext {
    pub fn for_command(cmd: &BackendCommand) -> Self {
        match cmd {
            BackendCommand::Resolve { .. } => Self::Lookup,
            BackendCommand::Refresh
            | BackendCommand::SelectType { .. }
            | BackendCommand::Search { .. }
            | BackendCommand::ShowView => Self::Listing,
            BackendCommand::Preview { .. } | BackendCommand::Download { .. } => Self::Preview,
            BackendCommand::OpenUpload
            | BackendCommand::ChooseFile { .. }
            | BackendCommand::Upload => Self::Upload,
            BackendCommand::CloseModal | BackendCommand::KeyPressed { .. } => Self::General,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::BackendStartup => "startup",
            Self::Lookup => "record lookup",
            Self::Listing => "file listing",
            Self::Preview => "file preview",
            Self::Upload => "upload",
            Self::General => "explorer",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("401")
            || message_lower.contains("403")
            || message_lower.contains("unauthorized")
            || message_lower.contains("forbidden")
            || message_lower.contains("not authorized")
            || message_lower.contains("session expired")
        {
            UiErrorCategory::Auth
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
            || message_lower.contains("unsupported")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("unavailable")
            || message_lower.contains("error sending request")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
