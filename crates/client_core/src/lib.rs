//! Client-side core of the record file explorer: listing catalog, modal state,
//! direct-to-storage uploads, and the session that ties them together.

pub mod catalog;
pub mod commands;
pub mod error;
pub mod modal;
pub mod services;
pub mod session;
pub mod upload;

pub use catalog::{CategoryCount, CategoryLabels, FilterState, TypeSelector};
pub use commands::{DownloadRequest, ExplorerCommand, Notification, SessionEvent};
pub use error::{ErrorKind, FileSessionError, ServiceError};
pub use modal::{KeyListeners, ModalState};
pub use session::{ExplorerView, FileSession, SessionOptions, SessionPhase, SessionServices};
pub use upload::{UploadDraft, UploadOutcome};

#[cfg(test)]
#[path = "tests/fakes.rs"]
mod fakes;
