//! Text rendering of session snapshots and events.

use client_core::{SessionEvent, SessionSnapshot};
use shared::{domain::SessionPhase, error::ContractError};

pub fn prompt(snapshot: &SessionSnapshot) -> &'static str {
    match snapshot.phase {
        SessionPhase::Collecting | SessionPhase::Uploading => "files> ",
        SessionPhase::Ready | SessionPhase::Querying => "ask> ",
    }
}

pub fn file_list(snapshot: &SessionSnapshot) -> String {
    if snapshot.file_names.is_empty() {
        return "no files queued; use 'add <path>'".to_string();
    }
    snapshot
        .file_names
        .iter()
        .enumerate()
        .map(|(index, name)| format!("  {}. {name}", index + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per event worth showing; plain state changes only surface their
/// busy label.
pub fn event_line(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::StateChanged(snapshot) => snapshot.busy_label().map(str::to_string),
        SessionEvent::UploadFailed(message) => Some(format!("!! {message}")),
        SessionEvent::AnswerUpdated(answer) => Some(format!("Answer:\n{answer}")),
    }
}

pub fn contract_error(err: &ContractError) -> String {
    match err {
        ContractError::IndexOutOfRange { len: 0, .. } => {
            "there are no files to remove".to_string()
        }
        ContractError::IndexOutOfRange { len, .. } => {
            format!("pick a file number between 1 and {len}")
        }
        ContractError::EmptyCollection => "add at least one file before uploading".to_string(),
        ContractError::EmptyQuestion => "type a question first".to_string(),
        ContractError::Busy => "still waiting on the previous request".to_string(),
        ContractError::WrongPhase {
            phase: SessionPhase::Collecting | SessionPhase::Uploading,
            ..
        } => "upload your documents before asking questions".to_string(),
        ContractError::WrongPhase { .. } => {
            "documents are already uploaded; ask a question".to_string()
        }
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
