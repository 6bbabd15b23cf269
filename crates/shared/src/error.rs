use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::TrialStage;

/// Caller-misuse errors surfaced by the trial flow controller. Both kinds
/// propagate synchronously and are never retried; the session is always
/// recoverable via reset.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TrialError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{op} is not allowed while the trial is {}", stage.label())]
    InvalidState { op: &'static str, stage: TrialStage },
}

impl TrialError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_state(op: &'static str, stage: TrialStage) -> Self {
        Self::InvalidState { op, stage }
    }
}
