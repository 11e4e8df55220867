//! Single-modal state machine plus the scoped key bindings that live while a modal is open.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use shared::domain::FileRecord;

use crate::commands::ExplorerCommand;

pub const CLOSE_KEY: &str = "escape";

/// At most one modal is ever open; opening one replaces whatever was showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Preview(FileRecord),
    Upload,
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn previewed(&self) -> Option<&FileRecord> {
        match self {
            Self::Preview(file) => Some(file),
            _ => None,
        }
    }

    pub fn is_upload(&self) -> bool {
        matches!(self, Self::Upload)
    }
}

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    entries: Vec<ListenerEntry>,
}

struct ListenerEntry {
    id: u64,
    key: String,
    command: ExplorerCommand,
}

fn lock_table(table: &Mutex<ListenerTable>) -> MutexGuard<'_, ListenerTable> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registry of key bindings shared between the shell and the modal controller.
#[derive(Clone, Default)]
pub struct KeyListeners {
    table: Arc<Mutex<ListenerTable>>,
}

impl KeyListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, key: &str, command: ExplorerCommand) -> KeySubscription {
        let mut table = lock_table(&self.table);
        let id = table.next_id;
        table.next_id += 1;
        table.entries.push(ListenerEntry {
            id,
            key: key.to_ascii_lowercase(),
            command,
        });
        KeySubscription {
            id,
            table: Arc::downgrade(&self.table),
        }
    }

    /// Commands bound to `key`, matched case-insensitively.
    pub fn dispatch(&self, key: &str) -> Vec<ExplorerCommand> {
        let key = key.to_ascii_lowercase();
        lock_table(&self.table)
            .entries
            .iter()
            .filter(|entry| entry.key == key)
            .map(|entry| entry.command.clone())
            .collect()
    }

    pub fn active_count(&self) -> usize {
        lock_table(&self.table).entries.len()
    }
}

/// Binding handle; the binding is removed when this is dropped.
#[must_use = "dropping the subscription removes the key binding"]
pub struct KeySubscription {
    id: u64,
    table: Weak<Mutex<ListenerTable>>,
}

impl Drop for KeySubscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            lock_table(&table).entries.retain(|entry| entry.id != self.id);
        }
    }
}

pub struct ModalController {
    state: ModalState,
    listeners: KeyListeners,
    close_binding: Option<KeySubscription>,
}

impl ModalController {
    pub fn new(listeners: KeyListeners) -> Self {
        Self {
            state: ModalState::Closed,
            listeners,
            close_binding: None,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn open_preview(&mut self, file: FileRecord) {
        tracing::debug!(file_name = %file.name, "modal: preview");
        self.state = ModalState::Preview(file);
        self.bind_close_key();
    }

    pub fn open_upload(&mut self) {
        tracing::debug!("modal: upload");
        self.state = ModalState::Upload;
        self.bind_close_key();
    }

    pub fn close(&mut self) {
        if self.state.is_open() {
            tracing::debug!("modal: closed");
        }
        self.state = ModalState::Closed;
        self.close_binding = None;
    }

    fn bind_close_key(&mut self) {
        if self.close_binding.is_none() {
            self.close_binding = Some(
                self.listeners
                    .subscribe(CLOSE_KEY, ExplorerCommand::CloseModal),
            );
        }
    }
}

#[cfg(test)]
#[path = "tests/modal_tests.rs"]
mod tests;
