//! UI/backend events and error modeling for the desktop GUI controller.

use shared::error::TrialError;
use trial_core::TrialEvent;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    Trial(TrialEvent),
    ContactAccepted,
    ContactRejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    /// Caller supplied bad input (empty upload, malformed form field).
    Validation,
    /// Operation invoked from a stage that does not permit it.
    Flow,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Upload,
    Generate,
    Contact,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_trial_error(context: UiErrorContext, err: &TrialError) -> Self {
        let category = match err {
            TrialError::InvalidInput(_) => UiErrorCategory::Validation,
            TrialError::InvalidState { .. } => UiErrorCategory::Flow,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("required")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("not allowed") || message_lower.contains("while the trial")
        {
            UiErrorCategory::Flow
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

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Flow => "Trial flow",
        UiErrorCategory::Unknown => "Unexpected",
    }
}
