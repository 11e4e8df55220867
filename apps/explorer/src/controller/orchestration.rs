//! Command orchestration from typed shell input to the backend command queue.

use std::path::PathBuf;

use crossbeam_channel::{Sender, TrySendError};
use shared::domain::RecordContext;

use crate::{backend_bridge::commands::BackendCommand, config::Settings};

pub const COMMAND_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Command(BackendCommand),
    Help,
    Quit,
}

/// Parses one line of shell input. Blank lines yield `Ok(None)`.
///
/// File positions are 1-based as printed by the listing.
pub fn parse_input(line: &str, settings: &Settings) -> Result<Option<ShellInput>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let command = match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => return Ok(Some(ShellInput::Help)),
        "quit" | "exit" => return Ok(Some(ShellInput::Quit)),
        "open" => {
            let mut parts = rest.split_whitespace();
            let record_id = parts
                .next()
                .ok_or_else(|| "missing record id: open <record-id> [object-type]".to_string())?;
            let object_type = parts.next().unwrap_or(&settings.object_type);
            BackendCommand::Resolve {
                context: RecordContext::new(
                    settings.record_identifier.clone(),
                    object_type,
                    record_id,
                ),
            }
        }
        "refresh" => BackendCommand::Refresh,
        "type" => BackendCommand::SelectType {
            name: required(rest, "type <all|folder|image|document|other>")?,
        },
        "search" => BackendCommand::Search {
            text: rest.to_string(),
        },
        "preview" => BackendCommand::Preview {
            index: position(rest, "preview <n>")?,
        },
        "download" => BackendCommand::Download {
            index: position(rest, "download <n>")?,
        },
        "upload" => BackendCommand::OpenUpload,
        "choose" => BackendCommand::ChooseFile {
            path: PathBuf::from(required(rest, "choose <path>")?),
        },
        "send" => BackendCommand::Upload,
        "close" => BackendCommand::CloseModal,
        "esc" => BackendCommand::KeyPressed {
            key: "Escape".to_string(),
        },
        "key" => BackendCommand::KeyPressed {
            key: required(rest, "key <name>")?,
        },
        "ls" | "view" => BackendCommand::ShowView,
        other => return Err(format!("unknown command '{other}'; type 'help'")),
    };
    Ok(Some(ShellInput::Command(command)))
}

fn required(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("missing argument: {usage}"))
    } else {
        Ok(rest.to_string())
    }
}

fn position(rest: &str, usage: &str) -> Result<usize, String> {
    match rest.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("invalid position '{rest}': {usage}")),
    }
}

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued shell->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "Command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the explorer"
                    .to_string();
        }
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
