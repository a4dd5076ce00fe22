// ABOUTME: Errors reported by the stack control plane.
// ABOUTME: Separates not-found and validation-class rejections from other failures.

/// Message the control plane uses when an update would change nothing.
pub const NO_UPDATES_MESSAGE: &str = "No updates are to be performed.";

/// Errors from control plane calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    /// The addressed stack does not exist.
    #[error("stack not found: {0}")]
    NotFound(String),

    /// The request was rejected as invalid. Carries the remote message verbatim.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("control plane error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}

impl ControlError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ControlError::NotFound(_))
    }

    /// True for the one validation error that means "nothing to do".
    pub fn is_no_updates(&self) -> bool {
        matches!(self, ControlError::Validation(message) if message == NO_UPDATES_MESSAGE)
    }
}
