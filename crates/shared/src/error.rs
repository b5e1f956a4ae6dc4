use thiserror::Error;

use crate::domain::SessionPhase;

/// Caller-side contract violations. A well-behaved frontend disables the
/// corresponding controls, so these never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("file index {index} is out of range for a collection of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no files selected for upload")]
    EmptyCollection,
    #[error("question must not be blank")]
    EmptyQuestion,
    #[error("another request is still in flight")]
    Busy,
    #[error("{intent} is not available while the session is {phase:?}")]
    WrongPhase {
        intent: &'static str,
        phase: SessionPhase,
    },
}
