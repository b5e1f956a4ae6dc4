//! Session state and its pure transition function.
//!
//! Every intent and every coordinator step is expressed as a [`Transition`].
//! [`transition`] never mutates its input: it either returns the next state or
//! the contract the caller broke.

use shared::{
    domain::{FileRef, SessionPhase},
    error::ContractError,
    protocol::{QueryOutcome, UploadOutcome},
};

use crate::collection::FileCollection;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    phase: SessionPhase,
    busy: bool,
    answer: Option<String>,
    files: FileCollection,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored phase: `Collecting` or `Ready`.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Phase as the user sees it, with an in-flight request overlaid.
    pub fn effective_phase(&self) -> SessionPhase {
        self.phase.effective(self.busy)
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn files(&self) -> &FileCollection {
        &self.files
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    AddFiles(Vec<FileRef>),
    RemoveFile(usize),
    BeginUpload,
    FinishUpload(UploadOutcome),
    BeginQuery { question: String },
    FinishQuery(QueryOutcome),
}

impl Transition {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddFiles(_) => "add files",
            Self::RemoveFile(_) => "remove file",
            Self::BeginUpload => "upload",
            Self::FinishUpload(_) => "finish upload",
            Self::BeginQuery { .. } => "ask",
            Self::FinishQuery(_) => "finish ask",
        }
    }
}

pub fn transition(state: &SessionState, transition: Transition) -> Result<SessionState, ContractError> {
    let intent = transition.name();
    let wrong_phase = || ContractError::WrongPhase {
        intent,
        phase: state.effective_phase(),
    };

    match transition {
        Transition::AddFiles(new_files) => {
            ensure_idle(state)?;
            if state.phase != SessionPhase::Collecting {
                return Err(wrong_phase());
            }
            Ok(SessionState {
                files: state.files.add(new_files),
                ..state.clone()
            })
        }
        Transition::RemoveFile(index) => {
            ensure_idle(state)?;
            if state.phase != SessionPhase::Collecting {
                return Err(wrong_phase());
            }
            Ok(SessionState {
                files: state.files.remove(index)?,
                ..state.clone()
            })
        }
        Transition::BeginUpload => {
            ensure_idle(state)?;
            if state.phase != SessionPhase::Collecting {
                return Err(wrong_phase());
            }
            if state.files.is_empty() {
                return Err(ContractError::EmptyCollection);
            }
            Ok(SessionState {
                busy: true,
                answer: None,
                ..state.clone()
            })
        }
        Transition::FinishUpload(outcome) => {
            if !state.busy || state.phase != SessionPhase::Collecting {
                return Err(wrong_phase());
            }
            let phase = if outcome.is_ready() {
                SessionPhase::Ready
            } else {
                state.phase
            };
            Ok(SessionState {
                phase,
                busy: false,
                ..state.clone()
            })
        }
        Transition::BeginQuery { question } => {
            if question.trim().is_empty() {
                return Err(ContractError::EmptyQuestion);
            }
            ensure_idle(state)?;
            if state.phase != SessionPhase::Ready {
                return Err(wrong_phase());
            }
            Ok(SessionState {
                busy: true,
                answer: None,
                ..state.clone()
            })
        }
        Transition::FinishQuery(outcome) => {
            if !state.busy || state.phase != SessionPhase::Ready {
                return Err(wrong_phase());
            }
            Ok(SessionState {
                busy: false,
                answer: Some(outcome.display_text().to_string()),
                ..state.clone()
            })
        }
    }
}

fn ensure_idle(state: &SessionState) -> Result<(), ContractError> {
    if state.busy {
        Err(ContractError::Busy)
    } else {
        Ok(())
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub busy: bool,
    pub file_names: Vec<String>,
    pub answer: Option<String>,
}

impl SessionSnapshot {
    pub fn can_submit_upload(&self) -> bool {
        !self.busy && self.phase == SessionPhase::Collecting && !self.file_names.is_empty()
    }

    pub fn can_ask(&self, question: &str) -> bool {
        !self.busy && self.phase == SessionPhase::Ready && !question.trim().is_empty()
    }

    pub fn busy_label(&self) -> Option<&'static str> {
        match self.phase {
            SessionPhase::Uploading => Some("Uploading..."),
            SessionPhase::Querying => Some("Processing..."),
            SessionPhase::Collecting | SessionPhase::Ready => None,
        }
    }
}

impl From<&SessionState> for SessionSnapshot {
    fn from(state: &SessionState) -> Self {
        Self {
            phase: state.effective_phase(),
            busy: state.busy,
            file_names: state.files.names(),
            answer: state.answer.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
