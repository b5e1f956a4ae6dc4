//! Line commands typed at the prompt, parsed into session intents.

use std::path::PathBuf;

use shared::domain::SessionPhase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddFiles(Vec<PathBuf>),
    /// Zero-based index into the collection.
    RemoveFile(usize),
    ListFiles,
    Upload,
    Ask(String),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  add <path>...   queue files for upload (.pdf, .jpg, .jpeg, .png)
  rm <n>          remove file number <n> from the list
  ls              show queued files
  upload          send queued files for ingestion
  ask <question>  ask about the uploaded documents
  help            show this help
  quit            leave the session
once documents are ready, any line that is not a bare command is asked as a question";

/// Parses one input line. `Ok(None)` means there is nothing to do.
pub fn parse_line(line: &str, phase: SessionPhase) -> Result<Option<Intent>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    let question = || Intent::Ask(line.trim_end_matches(['\r', '\n']).to_string());
    let is_control_word = matches!(command, "ls" | "upload" | "help" | "?" | "quit" | "exit");
    let frozen_command = matches!(command, "add" | "rm");
    if phase.is_ingested() && (frozen_command || (is_control_word && !rest.is_empty())) {
        // The collection is frozen once ingested, so these read as questions.
        return Ok(Some(question()));
    }
    if is_control_word && !rest.is_empty() {
        return Err(format!("'{command}' takes no arguments; type 'help'"));
    }

    let intent = match command {
        "add" => {
            if rest.is_empty() {
                return Err("usage: add <path>...".to_string());
            }
            Intent::AddFiles(rest.split_whitespace().map(PathBuf::from).collect())
        }
        "rm" => {
            let number = rest
                .parse::<usize>()
                .map_err(|_| format!("usage: rm <n> (got '{rest}')"))?;
            if number == 0 {
                return Err("files are numbered from 1".to_string());
            }
            Intent::RemoveFile(number - 1)
        }
        "ls" => Intent::ListFiles,
        "upload" => Intent::Upload,
        // The question goes out as typed; only the command word is stripped.
        "ask" => Intent::Ask(ask_argument(line)),
        "help" | "?" => Intent::Help,
        "quit" | "exit" => Intent::Quit,
        _ if phase.is_ingested() => question(),
        other => return Err(format!("unknown command '{other}'; type 'help'")),
    };
    Ok(Some(intent))
}

fn ask_argument(line: &str) -> String {
    let line = line.trim_start();
    line.strip_prefix("ask")
        .map(|rest| rest.strip_prefix(' ').unwrap_or(rest))
        .unwrap_or(line)
        .trim_end_matches(['\r', '\n'])
        .to_string()
}

#[cfg(test)]
#[path = "tests/intent_tests.rs"]
mod tests;
